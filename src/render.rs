// src/render.rs
// wgpu-backed reflection targets: texture allocation, render pass setup, winding
// RELEVANT FILES: src/core/target.rs, src/core/external.rs, src/gpu.rs

use log::warn;
use wgpu::{
    AddressMode, CommandEncoder, Device, Extent3d, FilterMode, RenderPass, Sampler,
    SamplerDescriptor, Texture, TextureDescriptor, TextureDimension, TextureFormat, TextureUsages,
    TextureView, TextureViewDescriptor,
};

use crate::core::external::TargetAllocator;
use crate::core::target::{TargetDescriptor, TargetFormat};
use crate::error::{MirrorError, MirrorResult};

/// Color format for LDR reflection targets.
pub const COLOR_FORMAT_DEFAULT: TextureFormat = TextureFormat::Rgba8Unorm;

/// Color format for HDR reflection targets.
pub const COLOR_FORMAT_HDR: TextureFormat = TextureFormat::Rgba16Float;

/// Depth format shared by all reflection passes.
pub const DEPTH_FORMAT: TextureFormat = TextureFormat::Depth32Float;

/// Map a descriptor format class onto a wgpu texture format.
pub fn color_format(format: TargetFormat) -> TextureFormat {
    match format {
        TargetFormat::Default => COLOR_FORMAT_DEFAULT,
        TargetFormat::Hdr => COLOR_FORMAT_HDR,
    }
}

/// Front-face convention under the given winding inversion state.
///
/// Reflection passes render with inverted winding; pipelines driving them
/// should take their `front_face` from here.
pub fn front_face(inverted_winding: bool) -> wgpu::FrontFace {
    if inverted_winding {
        wgpu::FrontFace::Cw
    } else {
        wgpu::FrontFace::Ccw
    }
}

/// One allocated reflection target: color, depth, and sampling state.
///
/// The color texture is always single-sampled so it can be bound for
/// sampling; under MSAA an additional multisampled attachment is created
/// and resolved into it at the end of the pass.
pub struct MirrorTarget {
    pub descriptor: TargetDescriptor,
    pub color: Texture,
    pub color_view: TextureView,
    pub msaa_color: Option<Texture>,
    pub msaa_view: Option<TextureView>,
    pub depth: Texture,
    pub depth_view: TextureView,
    pub sampler: Sampler,
}

impl MirrorTarget {
    /// Create a target for the given descriptor.
    ///
    /// Dimensions exceeding the device's texture limit are clamped (with a
    /// warning) rather than rejected; a reflection pass degrades, it does
    /// not fail.
    pub fn create(device: &Device, descriptor: &TargetDescriptor) -> Self {
        let descriptor = clamp_to_limits(descriptor, &device.limits());
        let size = Extent3d {
            width: descriptor.width,
            height: descriptor.height,
            depth_or_array_layers: 1,
        };
        let format = color_format(descriptor.format);

        let color = device.create_texture(&TextureDescriptor {
            label: Some("mirror_reflection_color"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: TextureDimension::D2,
            format,
            usage: TextureUsages::RENDER_ATTACHMENT | TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let color_view = color.create_view(&TextureViewDescriptor::default());

        let (msaa_color, msaa_view) = if descriptor.sample_count > 1 {
            let msaa = device.create_texture(&TextureDescriptor {
                label: Some("mirror_reflection_msaa"),
                size,
                mip_level_count: 1,
                sample_count: descriptor.sample_count,
                dimension: TextureDimension::D2,
                format,
                usage: TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            });
            let view = msaa.create_view(&TextureViewDescriptor::default());
            (Some(msaa), Some(view))
        } else {
            (None, None)
        };

        let depth = device.create_texture(&TextureDescriptor {
            label: Some("mirror_reflection_depth"),
            size,
            mip_level_count: 1,
            sample_count: descriptor.sample_count.max(1),
            dimension: TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let depth_view = depth.create_view(&TextureViewDescriptor::default());

        let sampler = device.create_sampler(&SamplerDescriptor {
            label: Some("mirror_reflection_sampler"),
            address_mode_u: AddressMode::ClampToEdge,
            address_mode_v: AddressMode::ClampToEdge,
            address_mode_w: AddressMode::ClampToEdge,
            mag_filter: FilterMode::Linear,
            min_filter: FilterMode::Linear,
            mipmap_filter: FilterMode::Linear,
            compare: None,
            ..Default::default()
        });

        Self {
            descriptor,
            color,
            color_view,
            msaa_color,
            msaa_view,
            depth,
            depth_view,
            sampler,
        }
    }

    /// Begin the reflection render pass, clearing color and depth.
    ///
    /// Under MSAA the multisampled attachment resolves into the sampleable
    /// color texture when the pass ends.
    pub fn begin_reflection_pass<'a>(&'a self, encoder: &'a mut CommandEncoder) -> RenderPass<'a> {
        let (view, resolve_target) = match &self.msaa_view {
            Some(msaa_view) => (msaa_view, Some(&self.color_view)),
            None => (&self.color_view, None),
        };
        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("mirror_reflection_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: 0.0,
                        g: 0.0,
                        b: 0.0,
                        a: 0.0,
                    }),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        })
    }
}

/// Validate a descriptor against device limits.
pub fn validate_descriptor(
    descriptor: &TargetDescriptor,
    limits: &wgpu::Limits,
) -> MirrorResult<()> {
    let max = limits.max_texture_dimension_2d;
    if descriptor.width > max || descriptor.height > max {
        return Err(MirrorError::allocation(format!(
            "reflection target {}x{} exceeds device limit {}",
            descriptor.width, descriptor.height, max
        )));
    }
    Ok(())
}

fn clamp_to_limits(descriptor: &TargetDescriptor, limits: &wgpu::Limits) -> TargetDescriptor {
    if let Err(err) = validate_descriptor(descriptor, limits) {
        warn!("{err}; clamping");
        let max = limits.max_texture_dimension_2d;
        return TargetDescriptor {
            width: descriptor.width.min(max),
            height: descriptor.height.min(max),
            ..*descriptor
        };
    }
    *descriptor
}

/// `TargetAllocator` backed by a wgpu device.
pub struct WgpuTargetAllocator<'d> {
    device: &'d Device,
}

impl<'d> WgpuTargetAllocator<'d> {
    pub fn new(device: &'d Device) -> Self {
        Self { device }
    }
}

impl WgpuTargetAllocator<'static> {
    /// Allocator over the process-wide GPU context.
    pub fn from_global() -> Self {
        Self::new(&crate::gpu::ctx().device)
    }
}

impl<'d> TargetAllocator for WgpuTargetAllocator<'d> {
    type Handle = MirrorTarget;

    fn acquire(&mut self, descriptor: &TargetDescriptor) -> MirrorTarget {
        MirrorTarget::create(self.device, descriptor)
    }

    fn release(&mut self, handle: MirrorTarget) {
        // wgpu resources release on drop; dropping the handle is the release.
        drop(handle);
    }
}
