// src/core/coordinator.rs
// Per-frame orchestration: pose derivation, target lifecycle, sub-render, publish
// RELEVANT FILES: src/core/pose.rs, src/core/target.rs, src/core/binding.rs, src/core/external.rs

use log::{debug, trace};

use crate::camera::SourceCamera;
use crate::core::binding::publish;
use crate::core::config::{MirrorConfig, TargetLifetime};
use crate::core::external::{ExternalRenderer, RenderRequest, ShaderResourceSink, TargetAllocator};
use crate::core::plane::MirrorSurface;
use crate::core::pose::ReflectionPose;
use crate::core::target::{desired_descriptor, should_reallocate, TargetDescriptor, TargetFormat};

/// Frame phase of a mirror instance.
///
/// The phases are traversed within a single `on_source_camera_render` call;
/// there is no failure state. A swallowed sub-render failure simply leaves
/// the coordinator back in `Idle` for the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePhase {
    Idle,
    Armed,
    Rendering,
}

/// Drives one mirror's reflection pass once per source-camera render.
///
/// All collaborators are wired in at construction; the coordinator holds no
/// lazily discovered references. The only state carried across frames is the
/// cached target handle and the descriptor it was allocated with.
pub struct MirrorCoordinator<A, R, S>
where
    A: TargetAllocator,
    R: ExternalRenderer<Target = A::Handle>,
    S: ShaderResourceSink<Texture = A::Handle>,
{
    allocator: A,
    renderer: R,
    sink: S,
    target: Option<A::Handle>,
    previous_descriptor: Option<TargetDescriptor>,
    phase: FramePhase,
}

impl<A, R, S> MirrorCoordinator<A, R, S>
where
    A: TargetAllocator,
    R: ExternalRenderer<Target = A::Handle>,
    S: ShaderResourceSink<Texture = A::Handle>,
{
    pub fn new(allocator: A, renderer: R, sink: S) -> Self {
        Self {
            allocator,
            renderer,
            sink,
            target: None,
            previous_descriptor: None,
            phase: FramePhase::Idle,
        }
    }

    /// Run the reflection pass for one source-camera render.
    ///
    /// Skips outright for Preview/Reflection cameras (a reflection pass must
    /// never trigger another one) and for disabled mirrors. Otherwise:
    /// derive the pose, revalidate the cached target, render once with
    /// inverted winding, publish, and return to idle.
    pub fn on_source_camera_render(
        &mut self,
        source: &SourceCamera,
        surface: &MirrorSurface,
        config: &MirrorConfig,
    ) {
        if !source.hosts_reflections() {
            trace!("skipping reflection pass for {:?} camera", source.kind);
            return;
        }
        if !config.enabled {
            trace!("skipping reflection pass: mirror disabled");
            return;
        }
        self.phase = FramePhase::Armed;

        let pose = ReflectionPose::derive(surface, source);

        let desired = desired_descriptor(source, config);
        if should_reallocate(self.previous_descriptor.as_ref(), &desired) {
            debug!(
                "reflection target descriptor changed: {:?} -> {:?}",
                self.previous_descriptor, desired
            );
            if let Some(old) = self.target.take() {
                self.allocator.release(old);
            }
            self.target = Some(self.allocator.acquire(&desired));
            self.previous_descriptor = Some(desired);
        }
        let Some(target) = self.target.as_ref() else {
            // Unreachable by construction; treat as a skipped frame.
            self.phase = FramePhase::Idle;
            return;
        };

        self.phase = FramePhase::Rendering;
        let request = RenderRequest {
            view: pose.view,
            projection: pose.projection,
            target,
            layer_mask: config.layer_mask,
            hdr: desired.format == TargetFormat::Hdr,
            msaa: desired.sample_count > 1,
            render_shadows: false,
        };
        {
            let mut pass = WindingScope::invert(&mut self.renderer);
            pass.render(&request);
        }

        publish(&mut self.sink, target, config.scope, &config.renderers);
        self.phase = FramePhase::Idle;

        if config.lifetime == TargetLifetime::PerFrame {
            self.release_target();
        }
    }

    /// Release the cached target, if any.
    ///
    /// Idempotent; runs on every teardown path including drop. Clearing the
    /// remembered descriptor forces a fresh acquire on the next frame.
    pub fn release_target(&mut self) {
        if let Some(target) = self.target.take() {
            debug!("releasing reflection target");
            self.allocator.release(target);
        }
        self.previous_descriptor = None;
    }

    pub fn phase(&self) -> FramePhase {
        self.phase
    }

    pub fn target(&self) -> Option<&A::Handle> {
        self.target.as_ref()
    }

    pub fn previous_descriptor(&self) -> Option<&TargetDescriptor> {
        self.previous_descriptor.as_ref()
    }

    pub fn allocator(&self) -> &A {
        &self.allocator
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<A, R, S> Drop for MirrorCoordinator<A, R, S>
where
    A: TargetAllocator,
    R: ExternalRenderer<Target = A::Handle>,
    S: ShaderResourceSink<Texture = A::Handle>,
{
    fn drop(&mut self) {
        self.release_target();
    }
}

/// Scoped winding inversion around one sub-render.
///
/// Restores the renderer's winding convention on drop, so the restore runs
/// on every exit path out of the render block.
struct WindingScope<'a, R: ExternalRenderer> {
    renderer: &'a mut R,
}

impl<'a, R: ExternalRenderer> WindingScope<'a, R> {
    fn invert(renderer: &'a mut R) -> Self {
        renderer.set_inverted_winding(true);
        Self { renderer }
    }

    fn render(&mut self, request: &RenderRequest<'_, R::Target>) {
        self.renderer.render_single_camera(request);
    }
}

impl<'a, R: ExternalRenderer> Drop for WindingScope<'a, R> {
    fn drop(&mut self) {
        self.renderer.set_inverted_winding(false);
    }
}
