//! Planar reflection rendering for wgpu-based renderers.
//!
//! For every frame a host renders a source camera, this crate derives a
//! virtual reflection camera by mirroring the source across a planar
//! surface, renders the scene once more from that vantage point into a
//! cached render target, and publishes the texture to shaders either
//! globally or per renderer.
//!
//! The pipeline is split the way a host engine consumes it:
//! - [`core`] holds the engine-agnostic math and orchestration: reflection
//!   matrices, oblique near-plane clipping, target sizing policy, and the
//!   per-frame [`MirrorCoordinator`] driving everything through the
//!   collaborator traits in [`core::external`].
//! - [`render`] and [`gpu`] supply the wgpu-backed target allocator and
//!   device context for hosts that want them.
//!
//! The embedding application calls
//! [`MirrorCoordinator::on_source_camera_render`] directly from its render
//! loop; there is no event subscription and no internal threading.

pub mod camera;
pub mod core;
pub mod error;
pub mod gpu;
pub mod render;

pub use crate::camera::{CameraKind, CameraRig, SourceCamera};
pub use crate::core::binding::{
    publish, BLEND_MIRRORS_FEATURE, GLOBAL_REFLECTION_MAP, LOCAL_MIRROR, LOCAL_REFLECTION_MAP,
};
pub use crate::core::config::{
    CameraOverride, MirrorConfig, OutputScope, RendererId, TargetLifetime,
};
pub use crate::core::coordinator::{FramePhase, MirrorCoordinator};
pub use crate::core::external::{
    ExternalRenderer, RenderRequest, ShaderResourceSink, TargetAllocator,
};
pub use crate::core::oblique::oblique_near_clip;
pub use crate::core::plane::{
    camera_space_clip_plane, distance_to_plane, is_in_front_of_plane, reflect_point_across_plane,
    reflection_matrix, MirrorSurface,
};
pub use crate::core::pose::ReflectionPose;
pub use crate::core::target::{
    desired_descriptor, should_reallocate, TargetDescriptor, TargetFormat, MIN_TARGET_SIZE,
};
pub use crate::core::uniforms::MirrorUniforms;
pub use crate::error::{MirrorError, MirrorResult};
pub use crate::render::{MirrorTarget, WgpuTargetAllocator};
