//! Core reflection modules
//!
//! Contains the engine-agnostic planar reflection pipeline: plane geometry,
//! oblique projection, target policy, per-frame coordination and output
//! binding. Everything here is pure or trait-driven; the wgpu-facing pieces
//! live in `crate::render` and `crate::gpu`.

pub mod binding;
pub mod config;
pub mod coordinator;
pub mod external;
pub mod oblique;
pub mod plane;
pub mod pose;
pub mod target;
pub mod uniforms;
