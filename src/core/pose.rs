// src/core/pose.rs
// Per-frame reflection camera pose derived from the mirror surface
// RELEVANT FILES: src/core/plane.rs, src/core/oblique.rs, src/core/coordinator.rs

use glam::{Mat4, Vec4};

use crate::camera::SourceCamera;
use crate::core::oblique::oblique_near_clip;
use crate::core::plane::{camera_space_clip_plane, reflection_matrix, MirrorSurface};

/// Ephemeral per-frame pose of the reflection camera.
///
/// Recomputed from scratch every frame from the mirror surface and the
/// source camera's current matrices; never persisted, so a degenerate frame
/// self-heals on the next one.
#[derive(Debug, Clone, Copy)]
pub struct ReflectionPose {
    /// World-to-camera matrix of the reflection camera
    pub view: Mat4,
    /// Projection with the near plane skewed onto the mirror plane
    pub projection: Mat4,
    /// Mirror plane in the reflection camera's view space
    pub clip_plane: Vec4,
}

impl ReflectionPose {
    /// Derive the reflection camera pose for one frame.
    ///
    /// The reflected view folds the mirror matrix into the source view;
    /// the clip plane is expressed in that reflected space and drives the
    /// oblique projection so nothing behind the mirror leaks into the pass.
    pub fn derive(surface: &MirrorSurface, source: &SourceCamera) -> Self {
        let mirror = reflection_matrix(surface);
        let view = source.view * mirror;
        let clip_plane = camera_space_clip_plane(surface, view);
        let projection = oblique_near_clip(source.projection, clip_plane);
        Self {
            view,
            projection,
            clip_plane,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraRig;
    use glam::Vec3;

    #[test]
    fn test_reflected_view_folds_mirror_matrix() {
        let rig = CameraRig::new(Vec3::new(0.0, 1.0, 4.0), Vec3::ZERO);
        let source = rig.source_camera(1280, 720);
        let surface = MirrorSurface::new(Vec3::ZERO, Vec3::Y);

        let pose = ReflectionPose::derive(&surface, &source);
        let expected = source.view * reflection_matrix(&surface);
        assert!((pose.view.to_cols_array()
            .iter()
            .zip(expected.to_cols_array().iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0f32, f32::max))
            < 1e-6);
    }

    #[test]
    fn test_mirrored_point_lands_where_source_sees_its_reflection() {
        // A camera above a floor mirror: the reflection camera must see a
        // point above the floor exactly where the source camera would see
        // that point's mirror image below the floor.
        let rig = CameraRig::new(Vec3::new(0.0, 2.0, 5.0), Vec3::new(0.0, 0.0, 0.0));
        let source = rig.source_camera(1280, 720);
        let surface = MirrorSurface::with_clip_offset(Vec3::ZERO, Vec3::Y, 0.0);

        let pose = ReflectionPose::derive(&surface, &source);

        let point = Vec3::new(0.5, 1.5, -1.0);
        let image = Vec3::new(0.5, -1.5, -1.0);

        let through_reflection = pose.view.transform_point3(point);
        let through_source = source.view.transform_point3(image);
        assert!((through_reflection - through_source).length() < 1e-5);
    }

    #[test]
    fn test_clip_plane_separates_camera_from_scene() {
        let rig = CameraRig::new(Vec3::new(0.0, 2.0, 5.0), Vec3::ZERO);
        let source = rig.source_camera(1280, 720);
        let surface = MirrorSurface::new(Vec3::ZERO, Vec3::Y);

        let pose = ReflectionPose::derive(&surface, &source);
        let side = |world: Vec3| {
            let view_space = pose.view.transform_point3(world);
            pose.clip_plane.truncate().dot(view_space) + pose.clip_plane.w
        };

        // Scene geometry above the floor is kept; the volume between the
        // reflected camera (below the floor) and the mirror is clipped.
        assert!(side(Vec3::new(0.0, 1.0, 0.0)) > 0.0);
        assert!(side(Vec3::new(0.0, -1.0, 0.0)) < 0.0);
        // The reflection camera itself sits on the clipped side.
        assert!(pose.clip_plane.w < 0.0);
    }
}
