// src/core/uniforms.rs
// GPU-facing uniform block describing one mirror's reflection pass
// RELEVANT FILES: src/core/pose.rs, src/core/target.rs, src/render.rs

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::core::plane::{reflection_matrix, MirrorSurface};
use crate::core::pose::ReflectionPose;
use crate::core::target::TargetDescriptor;

/// Uniform data for shaders sampling the reflection texture.
///
/// Layout matches the WGSL-side struct: vec4/mat4 fields only, 16-byte
/// aligned, uploadable as one `write_buffer` with `bytemuck::cast_slice`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct MirrorUniforms {
    /// Mirror plane in the reflection camera's view space (n.xyz, d)
    pub clip_plane: [f32; 4],
    /// World-space reflection matrix across the mirror plane
    pub reflection_matrix: [f32; 16],
    /// View matrix of the reflection camera
    pub reflection_view: [f32; 16],
    /// Oblique projection of the reflection camera
    pub reflection_projection: [f32; 16],
    /// Target size (width, height, 1/width, 1/height)
    pub target_size: [f32; 4],
}

impl MirrorUniforms {
    pub fn new(
        surface: &MirrorSurface,
        pose: &ReflectionPose,
        descriptor: &TargetDescriptor,
    ) -> Self {
        let width = descriptor.width as f32;
        let height = descriptor.height as f32;
        Self {
            clip_plane: pose.clip_plane.to_array(),
            reflection_matrix: reflection_matrix(surface).to_cols_array(),
            reflection_view: pose.view.to_cols_array(),
            reflection_projection: pose.projection.to_cols_array(),
            target_size: [width, height, 1.0 / width, 1.0 / height],
        }
    }
}

impl Default for MirrorUniforms {
    fn default() -> Self {
        Self {
            clip_plane: [0.0, 1.0, 0.0, 0.0],
            reflection_matrix: Mat4::IDENTITY.to_cols_array(),
            reflection_view: Mat4::IDENTITY.to_cols_array(),
            reflection_projection: Mat4::IDENTITY.to_cols_array(),
            target_size: [1.0, 1.0, 1.0, 1.0],
        }
    }
}
