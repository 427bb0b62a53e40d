// src/core/target.rs
// Render-target sizing and reallocation policy for reflection textures
// RELEVANT FILES: src/core/config.rs, src/core/coordinator.rs, src/render.rs

use serde::{Deserialize, Serialize};

use crate::camera::SourceCamera;
use crate::core::config::{CameraOverride, MirrorConfig};

/// Hard floor on target dimensions, preventing zero-sized allocations.
pub const MIN_TARGET_SIZE: u32 = 4;

/// Color format class of a reflection target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetFormat {
    /// LDR color, 8 bits per channel
    Default,
    /// HDR color, half-float per channel
    Hdr,
}

/// Complete description of a reflection render target.
///
/// Compared structurally: two descriptors are interchangeable iff every
/// field matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetDescriptor {
    pub width: u32,
    pub height: u32,
    pub format: TargetFormat,
    pub sample_count: u32,
}

/// Derive the target descriptor for one source camera under one config.
///
/// Dimensions scale with the source camera's pixel size and clamp to the
/// 4x4 floor. HDR and MSAA inherit from the source camera unless overridden
/// off.
pub fn desired_descriptor(source: &SourceCamera, config: &MirrorConfig) -> TargetDescriptor {
    let width = scaled_dimension(source.pixel_width, config.texture_scale);
    let height = scaled_dimension(source.pixel_height, config.texture_scale);

    let hdr = config.allow_hdr == CameraOverride::Inherit && source.allow_hdr;
    let format = if hdr {
        TargetFormat::Hdr
    } else {
        TargetFormat::Default
    };

    let msaa = config.allow_msaa == CameraOverride::Inherit && source.allow_msaa;
    let sample_count = if msaa { source.msaa_samples.max(1) } else { 1 };

    TargetDescriptor {
        width,
        height,
        format,
        sample_count,
    }
}

fn scaled_dimension(source: u32, scale: f32) -> u32 {
    ((source as f32 * scale).round() as u32).max(MIN_TARGET_SIZE)
}

/// Whether a cached target must be released and a new one acquired.
///
/// True iff there is no previous descriptor or any field differs. Under a
/// stable source resolution this stays false, which is what keeps target
/// allocation out of the steady-state frame cost.
pub fn should_reallocate(previous: Option<&TargetDescriptor>, desired: &TargetDescriptor) -> bool {
    match previous {
        Some(previous) => previous != desired,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraKind;

    fn source(width: u32, height: u32, allow_hdr: bool, allow_msaa: bool) -> SourceCamera {
        SourceCamera {
            view: glam::Mat4::IDENTITY,
            projection: glam::Mat4::IDENTITY,
            pixel_width: width,
            pixel_height: height,
            allow_hdr,
            allow_msaa,
            msaa_samples: 4,
            kind: CameraKind::Normal,
        }
    }

    #[test]
    fn test_descriptor_scales_source_size() {
        let desc = desired_descriptor(&source(1920, 1080, false, false), &MirrorConfig {
            texture_scale: 0.5,
            ..Default::default()
        });
        assert_eq!(desc.width, 960);
        assert_eq!(desc.height, 540);
        assert_eq!(desc.format, TargetFormat::Default);
        assert_eq!(desc.sample_count, 1);
    }

    #[test]
    fn test_descriptor_floors_tiny_targets() {
        let desc = desired_descriptor(&source(1920, 1080, false, false), &MirrorConfig {
            texture_scale: 0.001,
            ..Default::default()
        });
        assert_eq!(desc.width, MIN_TARGET_SIZE);
        assert_eq!(desc.height, MIN_TARGET_SIZE);

        let degenerate = desired_descriptor(&source(0, 0, false, false), &MirrorConfig::default());
        assert_eq!(degenerate.width, MIN_TARGET_SIZE);
        assert_eq!(degenerate.height, MIN_TARGET_SIZE);
    }

    #[test]
    fn test_descriptor_monotonic_in_scale() {
        let camera = source(1333, 777, false, false);
        let config = |scale| MirrorConfig {
            texture_scale: scale,
            ..Default::default()
        };

        let mut previous = desired_descriptor(&camera, &config(0.05));
        for step in 1..=20 {
            let scale = 0.05 * (step as f32 + 1.0);
            let next = desired_descriptor(&camera, &config(scale.min(1.0)));
            assert!(next.width >= previous.width);
            assert!(next.height >= previous.height);
            previous = next;
        }
    }

    #[test]
    fn test_hdr_inherits_from_source() {
        let camera = source(800, 600, true, false);

        let inherit = desired_descriptor(&camera, &MirrorConfig::default());
        assert_eq!(inherit.format, TargetFormat::Hdr);

        let off = desired_descriptor(&camera, &MirrorConfig {
            allow_hdr: CameraOverride::Off,
            ..Default::default()
        });
        assert_eq!(off.format, TargetFormat::Default);

        // Inherit from a camera without HDR stays LDR.
        let ldr_camera = source(800, 600, false, false);
        let ldr = desired_descriptor(&ldr_camera, &MirrorConfig::default());
        assert_eq!(ldr.format, TargetFormat::Default);
    }

    #[test]
    fn test_msaa_inherits_from_source() {
        let camera = source(800, 600, false, true);

        let inherit = desired_descriptor(&camera, &MirrorConfig::default());
        assert_eq!(inherit.sample_count, 4);

        let off = desired_descriptor(&camera, &MirrorConfig {
            allow_msaa: CameraOverride::Off,
            ..Default::default()
        });
        assert_eq!(off.sample_count, 1);
    }

    #[test]
    fn test_should_reallocate_reflexive_false() {
        let desc = TargetDescriptor {
            width: 960,
            height: 540,
            format: TargetFormat::Hdr,
            sample_count: 4,
        };
        assert!(!should_reallocate(Some(&desc), &desc));
        assert!(should_reallocate(None, &desc));
    }

    #[test]
    fn test_should_reallocate_on_any_field_change() {
        let base = TargetDescriptor {
            width: 960,
            height: 540,
            format: TargetFormat::Default,
            sample_count: 1,
        };

        let variants = [
            TargetDescriptor { width: 961, ..base },
            TargetDescriptor { height: 541, ..base },
            TargetDescriptor {
                format: TargetFormat::Hdr,
                ..base
            },
            TargetDescriptor {
                sample_count: 4,
                ..base
            },
        ];
        for changed in variants {
            assert!(should_reallocate(Some(&base), &changed));
        }
    }
}
