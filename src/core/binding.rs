// src/core/binding.rs
// Publishes the finished reflection texture to shaders and materials
// RELEVANT FILES: src/core/config.rs, src/core/external.rs, src/core/coordinator.rs

use crate::core::config::{OutputScope, RendererId};
use crate::core::external::ShaderResourceSink;

/// Process-wide shader resource receiving the global reflection texture.
pub const GLOBAL_REFLECTION_MAP: &str = "_ReflectionMap";

/// Per-renderer texture override used under local scope.
pub const LOCAL_REFLECTION_MAP: &str = "_LocalReflectionMap";

/// Per-renderer selector between the global and local reflection map.
pub const LOCAL_MIRROR: &str = "_LocalMirror";

/// Shader feature enabling per-renderer mirror blending.
pub const BLEND_MIRRORS_FEATURE: &str = "_BLEND_MIRRORS";

/// Publish one frame's reflection texture.
///
/// Global scope sets the named global resource exactly once and points every
/// bound renderer at it (`_LocalMirror = 0`). Local scope enables the blend
/// feature and binds the texture per renderer (`_LocalMirror = 1`). Dead
/// renderer handles must be filtered by the caller beforehand.
pub fn publish<S: ShaderResourceSink>(
    sink: &mut S,
    texture: &S::Texture,
    scope: OutputScope,
    renderers: &[RendererId],
) {
    match scope {
        OutputScope::Global => {
            sink.set_global_texture(GLOBAL_REFLECTION_MAP, texture);
            for renderer in renderers {
                sink.set_renderer_float(*renderer, LOCAL_MIRROR, 0.0);
            }
        }
        OutputScope::Local => {
            sink.enable_feature(BLEND_MIRRORS_FEATURE);
            for renderer in renderers {
                sink.set_renderer_texture(*renderer, LOCAL_REFLECTION_MAP, texture);
                sink.set_renderer_float(*renderer, LOCAL_MIRROR, 1.0);
            }
        }
    }
}
