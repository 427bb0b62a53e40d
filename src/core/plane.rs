// src/core/plane.rs
// Mirror plane geometry: reflection matrix and view-space clip plane construction
// RELEVANT FILES: src/core/oblique.rs, src/core/pose.rs, src/core/coordinator.rs

use glam::{Mat4, Vec3, Vec4};

/// A reflective plane in world space.
///
/// The normal points away from the reflective face and is re-normalized
/// defensively at consumption time. `clip_offset` is a small positive bias
/// pulling the clip plane toward the viewer so geometry lying exactly on the
/// mirror does not self-clip at the boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MirrorSurface {
    /// A point on the plane
    pub position: Vec3,
    /// Unit normal of the reflective face
    pub normal: Vec3,
    /// Near-clip bias along the normal
    pub clip_offset: f32,
}

impl MirrorSurface {
    pub const DEFAULT_CLIP_OFFSET: f32 = 0.01;

    /// Create a surface with the default clip offset.
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position,
            normal,
            clip_offset: Self::DEFAULT_CLIP_OFFSET,
        }
    }

    /// Create a surface with an explicit clip offset.
    pub fn with_clip_offset(position: Vec3, normal: Vec3, clip_offset: f32) -> Self {
        Self {
            position,
            normal,
            clip_offset,
        }
    }

    /// Plane depth `d` of the offset plane equation `n·x + d = 0`.
    pub fn plane_depth(&self) -> f32 {
        let n = self.normal.normalize();
        -n.dot(self.position) - self.clip_offset
    }
}

impl Default for MirrorSurface {
    fn default() -> Self {
        // XZ plane at Y=0, reflecting upward
        Self::new(Vec3::ZERO, Vec3::Y)
    }
}

/// Affine matrix reflecting points and directions across the offset plane.
///
/// For unit normal `n` and depth `d = -(n · position) - clip_offset` the
/// matrix is `I - 2 n nᵀ` with translation column `-2 d n`. A non-unit
/// normal is re-normalized; a zero normal produces a degenerate matrix
/// (documented limitation, not a detected error).
pub fn reflection_matrix(surface: &MirrorSurface) -> Mat4 {
    let n = surface.normal.normalize();
    let d = surface.plane_depth();

    Mat4::from_cols(
        Vec4::new(
            1.0 - 2.0 * n.x * n.x,
            -2.0 * n.y * n.x,
            -2.0 * n.z * n.x,
            0.0,
        ),
        Vec4::new(
            -2.0 * n.x * n.y,
            1.0 - 2.0 * n.y * n.y,
            -2.0 * n.z * n.y,
            0.0,
        ),
        Vec4::new(
            -2.0 * n.x * n.z,
            -2.0 * n.y * n.z,
            1.0 - 2.0 * n.z * n.z,
            0.0,
        ),
        Vec4::new(-2.0 * d * n.x, -2.0 * d * n.y, -2.0 * d * n.z, 1.0),
    )
}

/// Transform the offset mirror plane into a camera's view space.
///
/// Offsets the surface point by `normal * clip_offset`, transforms point and
/// normal by `view`, re-normalizes the transformed normal and returns the
/// view-space plane equation `(n.x, n.y, n.z, -dot(point, n))`.
pub fn camera_space_clip_plane(surface: &MirrorSurface, view: Mat4) -> Vec4 {
    let normal = surface.normal.normalize();
    let offset_pos = surface.position + normal * surface.clip_offset;
    let cpos = view.transform_point3(offset_pos);
    let cnormal = view.transform_vector3(normal).normalize();
    Vec4::new(cnormal.x, cnormal.y, cnormal.z, -cpos.dot(cnormal))
}

/// Reflect a point across a plane given by unit normal and depth `d`.
pub fn reflect_point_across_plane(point: Vec3, plane_normal: Vec3, plane_depth: f32) -> Vec3 {
    let n = plane_normal.normalize();
    let distance = point.dot(n) + plane_depth;
    point - 2.0 * distance * n
}

/// Signed distance from a point to the plane `n·x + d = 0`.
pub fn distance_to_plane(point: Vec3, plane_normal: Vec3, plane_depth: f32) -> f32 {
    point.dot(plane_normal.normalize()) + plane_depth
}

/// Check whether a point lies on the reflective side of the plane.
pub fn is_in_front_of_plane(point: Vec3, plane_normal: Vec3, plane_depth: f32) -> bool {
    distance_to_plane(point, plane_normal, plane_depth) > 0.001
}
