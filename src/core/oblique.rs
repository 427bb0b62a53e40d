// src/core/oblique.rs
// Oblique near-plane clipping: skew a perspective projection so its near plane
// coincides with an arbitrary view-space plane
// RELEVANT FILES: src/core/plane.rs, src/core/pose.rs

use glam::{Mat4, Vec4};

/// Derive a projection whose near clipping plane coincides with `clip_plane`.
///
/// `clip_plane` is the view-space plane equation `n·x + d = 0` with the
/// normal facing the camera. The derivation assumes a GL-style clip volume:
/// after perspective divide the clip plane maps to `z = -1`.
///
/// When the plane is near-parallel to the view direction the solve turns
/// singular; the unmodified base projection is returned instead of a broken
/// matrix. The bad frame self-heals because the pose is recomputed from
/// scratch every frame.
pub fn oblique_near_clip(projection: Mat4, clip_plane: Vec4) -> Mat4 {
    let q = projection.inverse()
        * Vec4::new(
            clip_plane.x.signum(),
            clip_plane.y.signum(),
            1.0,
            1.0,
        );

    let denom = clip_plane.dot(q);
    if denom.abs() < 1e-6 {
        return projection;
    }

    let c = clip_plane * (2.0 / denom);
    let row2 = c - projection.row(3);
    if !row2.is_finite() {
        return projection;
    }

    with_row2(projection, row2)
}

/// Rebuild a matrix with its third row replaced.
fn with_row2(m: Mat4, row: Vec4) -> Mat4 {
    let r0 = m.row(0);
    let r1 = m.row(1);
    let r3 = m.row(3);
    Mat4::from_cols(
        Vec4::new(r0.x, r1.x, row.x, r3.x),
        Vec4::new(r0.y, r1.y, row.y, r3.y),
        Vec4::new(r0.z, r1.z, row.z, r3.z),
        Vec4::new(r0.w, r1.w, row.w, r3.w),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    const EPS: f32 = 1e-4;

    fn test_projection() -> Mat4 {
        Mat4::perspective_rh_gl(60f32.to_radians(), 16.0 / 9.0, 0.1, 100.0)
    }

    #[test]
    fn test_clip_plane_maps_to_near_plane() {
        // View-space plane z = -5 facing the camera: n = (0,0,1), d = 5.
        let plane = Vec4::new(0.0, 0.0, 1.0, 5.0);
        let oblique = oblique_near_clip(test_projection(), plane);

        for (x, y) in [(0.0, 0.0), (1.5, -0.75), (-2.0, 1.0)] {
            let ndc = oblique.project_point3(Vec3::new(x, y, -5.0));
            assert!(
                (ndc.z - (-1.0)).abs() < EPS,
                "plane point ({x}, {y}) mapped to ndc z = {}",
                ndc.z
            );
        }
    }

    #[test]
    fn test_tilted_clip_plane_maps_to_near_plane() {
        let normal = Vec3::new(0.2, 0.3, 1.0).normalize();
        let point = Vec3::new(0.0, 0.0, -4.0);
        let plane = Vec4::new(normal.x, normal.y, normal.z, -point.dot(normal));
        let oblique = oblique_near_clip(test_projection(), plane);

        // Walk the plane along two tangents; all samples stay on ndc z = -1.
        let tangent = normal.cross(Vec3::Y).normalize();
        let bitangent = normal.cross(tangent);
        for (u, v) in [(0.0, 0.0), (0.8, -0.4), (-0.5, 0.9)] {
            let sample = point + tangent * u + bitangent * v;
            let ndc = oblique.project_point3(sample);
            assert!((ndc.z - (-1.0)).abs() < EPS);
        }
    }

    #[test]
    fn test_points_behind_clip_plane_fall_outside_ndc() {
        let plane = Vec4::new(0.0, 0.0, 1.0, 5.0);
        let oblique = oblique_near_clip(test_projection(), plane);

        let behind = oblique.project_point3(Vec3::new(0.0, 0.0, -6.0));
        let in_front = oblique.project_point3(Vec3::new(0.0, 0.0, -4.0));
        assert!(in_front.z < -1.0);
        assert!(behind.z > -1.0);
    }

    #[test]
    fn test_degenerate_plane_falls_back_to_base() {
        let projection = test_projection();

        // Zero plane has a vanishing solve denominator.
        let unchanged = oblique_near_clip(projection, Vec4::ZERO);
        assert_eq!(unchanged, projection);
    }
}
