// src/core/config.rs
// Per-mirror configuration snapshot consumed read-only by the coordinator
// RELEVANT FILES: src/core/target.rs, src/core/coordinator.rs, src/core/binding.rs

use serde::{Deserialize, Serialize};

/// Camera-setting override for HDR and MSAA inheritance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraOverride {
    /// Follow the source camera's setting
    Inherit,
    /// Force the setting off for the reflection pass
    Off,
}

/// Destination policy for the finished reflection texture.
///
/// Global output publishes to a process-wide shader resource; only one
/// mirror should be global at a time (enforced by the embedder's ownership
/// policy, not here). Local output binds one texture per mirror onto each
/// listed renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputScope {
    Global,
    Local,
}

/// Lifetime policy for the reflection target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetLifetime {
    /// Keep the target across frames, reallocating only on descriptor change
    Cached,
    /// Release the target after publish every frame
    PerFrame,
}

/// Opaque handle to a renderer (mesh/material slot) that receives the
/// reflection texture. The embedder owns the mapping to real objects and
/// filters out dead handles before handing the list over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RendererId(pub u64);

/// Immutable-per-frame mirror configuration.
///
/// Supplied by the embedder on every source-camera render; the coordinator
/// treats it as a read-only snapshot. Field defaults match a freshly created
/// mirror: full-resolution global output inheriting the source camera's HDR
/// and MSAA settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MirrorConfig {
    #[serde(default = "MirrorConfig::default_enabled")]
    pub enabled: bool,
    /// Scale applied to the source camera's pixel size
    #[serde(default = "MirrorConfig::default_texture_scale")]
    pub texture_scale: f32,
    /// Layers the reflection pass renders
    #[serde(default = "MirrorConfig::default_layer_mask")]
    pub layer_mask: u32,
    #[serde(default = "MirrorConfig::default_scope")]
    pub scope: OutputScope,
    #[serde(default = "MirrorConfig::default_override")]
    pub allow_hdr: CameraOverride,
    #[serde(default = "MirrorConfig::default_override")]
    pub allow_msaa: CameraOverride,
    #[serde(default = "MirrorConfig::default_lifetime")]
    pub lifetime: TargetLifetime,
    /// Renderers that receive the output binding, in order
    #[serde(default)]
    pub renderers: Vec<RendererId>,
}

impl MirrorConfig {
    fn default_enabled() -> bool {
        true
    }

    fn default_texture_scale() -> f32 {
        1.0
    }

    fn default_layer_mask() -> u32 {
        u32::MAX
    }

    fn default_scope() -> OutputScope {
        OutputScope::Global
    }

    fn default_override() -> CameraOverride {
        CameraOverride::Inherit
    }

    fn default_lifetime() -> TargetLifetime {
        TargetLifetime::Cached
    }
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            texture_scale: Self::default_texture_scale(),
            layer_mask: Self::default_layer_mask(),
            scope: Self::default_scope(),
            allow_hdr: Self::default_override(),
            allow_msaa: Self::default_override(),
            lifetime: Self::default_lifetime(),
            renderers: Vec::new(),
        }
    }
}
