// src/core/external.rs
// Collaborator seams the reflection pipeline consumes from the host renderer
// RELEVANT FILES: src/core/coordinator.rs, src/core/binding.rs, src/render.rs

use glam::Mat4;

use crate::core::config::RendererId;
use crate::core::target::TargetDescriptor;

/// One manually driven sub-render of the scene from the reflection camera.
///
/// `render_shadows` is always false for reflection passes; shadow maps are
/// the source camera's business. The pass is synchronous and any internal
/// failure stays inside the renderer; nothing surfaces here.
#[derive(Debug)]
pub struct RenderRequest<'a, T> {
    /// World-to-camera matrix of the reflection camera
    pub view: Mat4,
    /// Oblique projection of the reflection camera
    pub projection: Mat4,
    pub target: &'a T,
    pub layer_mask: u32,
    pub hdr: bool,
    pub msaa: bool,
    pub render_shadows: bool,
}

/// Allocates and releases reflection render targets.
///
/// Both calls are non-blocking relative to the render thread. Double-release
/// is a caller bug; the coordinator guards with a presence check before
/// releasing.
pub trait TargetAllocator {
    type Handle;

    fn acquire(&mut self, descriptor: &TargetDescriptor) -> Self::Handle;
    fn release(&mut self, handle: Self::Handle);
}

/// The host renderer the reflection pass is driven through.
pub trait ExternalRenderer {
    type Target;

    /// Invert the front-face winding convention for subsequent renders.
    ///
    /// Mirrors flip handedness; the coordinator inverts winding for exactly
    /// the duration of one sub-render and restores it unconditionally.
    fn set_inverted_winding(&mut self, inverted: bool);

    /// Render the scene once from the reflection camera, synchronously.
    fn render_single_camera(&mut self, request: &RenderRequest<'_, Self::Target>);
}

/// Publishes textures and parameters to shaders and materials.
pub trait ShaderResourceSink {
    type Texture;

    /// Bind a process-wide named shader resource.
    fn set_global_texture(&mut self, name: &str, texture: &Self::Texture);

    /// Set a per-renderer texture override.
    fn set_renderer_texture(&mut self, renderer: RendererId, name: &str, texture: &Self::Texture);

    /// Set a per-renderer float override.
    fn set_renderer_float(&mut self, renderer: RendererId, name: &str, value: f32);

    /// Enable a named shader feature/keyword.
    fn enable_feature(&mut self, name: &str);
}
