//! Source camera snapshot and view/projection helpers.
//!
//! The reflection pipeline never owns a camera; it consumes a per-frame
//! snapshot of whichever camera the host is about to render.

use glam::{Mat4, Vec3};

/// Kind of the camera triggering a render.
///
/// Reflection passes must never trigger further reflection passes, so the
/// coordinator skips `Preview` and `Reflection` cameras outright. This is
/// what makes the pipeline structurally re-entrancy free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraKind {
    Normal,
    Preview,
    Reflection,
}

/// Per-frame input describing the source camera.
#[derive(Debug, Clone, Copy)]
pub struct SourceCamera {
    /// World-to-camera matrix
    pub view: Mat4,
    /// Perspective projection (GL-style clip volume)
    pub projection: Mat4,
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub allow_hdr: bool,
    pub allow_msaa: bool,
    /// Samples the source camera resolves with when MSAA is allowed
    pub msaa_samples: u32,
    pub kind: CameraKind,
}

impl SourceCamera {
    /// Whether this camera may host a reflection pass.
    pub fn hosts_reflections(&self) -> bool {
        matches!(self.kind, CameraKind::Normal)
    }
}

/// Minimal eye/target/up camera rig.
#[derive(Debug, Clone, Copy)]
pub struct CameraRig {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl CameraRig {
    pub fn new(eye: Vec3, target: Vec3) -> Self {
        Self {
            eye,
            target,
            up: Vec3::Y,
            fovy: 45.0,
            znear: 0.1,
            zfar: 100.0,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fovy.to_radians(), aspect, self.znear, self.zfar)
    }

    /// Snapshot this rig as a normal source camera at the given pixel size.
    pub fn source_camera(&self, pixel_width: u32, pixel_height: u32) -> SourceCamera {
        let aspect = pixel_width.max(1) as f32 / pixel_height.max(1) as f32;
        SourceCamera {
            view: self.view_matrix(),
            projection: self.projection_matrix(aspect),
            pixel_width,
            pixel_height,
            allow_hdr: false,
            allow_msaa: false,
            msaa_samples: 1,
            kind: CameraKind::Normal,
        }
    }
}
