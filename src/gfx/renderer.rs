//! The frame-loop owner
//!
//! The renderer owns the camera, the asset table and the draw list. Once per
//! frame it finalizes view, projection and camera position, builds a single
//! [`FrameContext`] and calls [`Drawable::draw`] on every instance. A
//! drawable that reports an unbound collaborator is logged and skipped; the
//! frame continues.
//!
//! Mutation of the draw list or asset table must happen between frames —
//! draw dispatch and scene mutation are never interleaved within one frame.

use crate::gfx::assets::Assets;
use crate::gfx::camera::OrbitCamera;
use crate::gfx::frame::FrameContext;
use crate::gfx::traits::Drawable;

/// What happened during one frame's draw dispatch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    pub drawn: usize,
    pub skipped: usize,
}

pub struct Renderer<E> {
    pub camera: OrbitCamera,
    assets: Assets<E>,
    drawables: Vec<Box<dyn Drawable<E>>>,
}

impl<E> Renderer<E> {
    pub fn new(camera: OrbitCamera) -> Self {
        Self {
            camera,
            assets: Assets::new(),
            drawables: Vec::new(),
        }
    }

    pub fn assets(&self) -> &Assets<E> {
        &self.assets
    }

    pub fn assets_mut(&mut self) -> &mut Assets<E> {
        &mut self.assets
    }

    pub fn add_drawable(&mut self, drawable: impl Drawable<E> + 'static) {
        self.drawables.push(Box::new(drawable));
    }

    pub fn drawable_count(&self) -> usize {
        self.drawables.len()
    }

    /// Draws every instance with this frame's finalized camera state.
    ///
    /// `elapsed` is in seconds and is forwarded to drawables untouched.
    pub fn render_frame(&mut self, elapsed: f32, sink: &mut E) -> FrameReport {
        let frame = FrameContext::new(
            elapsed,
            self.camera.projection_matrix(),
            self.camera.view_matrix(),
            self.camera.eye_position(),
        );

        let mut report = FrameReport::default();
        for drawable in &mut self.drawables {
            match drawable.draw(&frame, &mut self.assets, sink) {
                Ok(()) => report.drawn += 1,
                Err(err) => {
                    log::warn!("skipping drawable this frame: {err}");
                    report.skipped += 1;
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{Point3, Vector3};

    use crate::gfx::frame::DrawUniforms;
    use crate::gfx::model::Model;
    use crate::gfx::traits::{Mesh, Technique};

    use super::*;

    struct CountingMesh;
    impl Mesh<u32> for CountingMesh {
        fn submit_for_draw(&mut self, sink: &mut u32) {
            *sink += 1;
        }
    }

    struct PlainTechnique;
    impl Technique<u32> for PlainTechnique {
        fn activate(&mut self, _sink: &mut u32) {}
        fn set_uniforms(&mut self, _sink: &mut u32, _uniforms: &DrawUniforms) {}
    }

    fn test_camera() -> OrbitCamera {
        OrbitCamera::new(5.0, 0.5, 0.5, Point3::new(0.0, 0.0, 0.0), 1.0)
    }

    #[test]
    fn frame_skips_unready_instances_and_keeps_going() {
        let mut renderer: Renderer<u32> = Renderer::new(test_camera());
        let mesh = renderer.assets_mut().insert_mesh(CountingMesh);
        let effect = renderer.assets_mut().insert_technique(PlainTechnique);

        let mut ready = Model::new();
        ready.set_mesh(Some(mesh));
        ready.set_effect(Some(effect));
        renderer.add_drawable(ready);

        // No mesh bound: skipped, not fatal.
        let mut unready = Model::new();
        unready.set_effect(Some(effect));
        renderer.add_drawable(unready);

        let mut ready_too = Model::new();
        ready_too.set_mesh(Some(mesh));
        ready_too.set_effect(Some(effect));
        renderer.add_drawable(ready_too);

        let mut submissions = 0u32;
        let report = renderer.render_frame(0.016, &mut submissions);

        assert_eq!(report, FrameReport { drawn: 2, skipped: 1 });
        assert_eq!(submissions, 2);
    }

    /// Uploads per draw, recorded next to the submissions so the pairing is
    /// visible: `(slot, world translation x)` per upload, `slot` per submit.
    #[derive(Debug, Default)]
    struct SlottedSink {
        next_slot: u32,
        uploads: Vec<(u32, f32)>,
        submissions: Vec<u32>,
    }

    struct SlottedMesh;
    impl Mesh<SlottedSink> for SlottedMesh {
        fn submit_for_draw(&mut self, sink: &mut SlottedSink) {
            let current = sink.next_slot - 1;
            sink.submissions.push(current);
        }
    }

    struct SlottedTechnique;
    impl Technique<SlottedSink> for SlottedTechnique {
        fn activate(&mut self, _sink: &mut SlottedSink) {}
        fn set_uniforms(&mut self, sink: &mut SlottedSink, uniforms: &DrawUniforms) {
            let slot = sink.next_slot;
            sink.next_slot += 1;
            sink.uploads.push((slot, uniforms.world.w.x));
        }
    }

    #[test]
    fn shared_technique_keeps_per_draw_uniforms_apart() {
        let mut renderer: Renderer<SlottedSink> = Renderer::new(test_camera());
        let mesh = renderer.assets_mut().insert_mesh(SlottedMesh);
        let effect = renderer.assets_mut().insert_technique(SlottedTechnique);

        for x in [1.0, 2.0, 3.0] {
            let mut model = Model::new();
            model.set_mesh(Some(mesh));
            model.set_effect(Some(effect));
            model.set_position(Vector3::new(x, 0.0, 0.0));
            renderer.add_drawable(model);
        }

        let mut sink = SlottedSink::default();
        renderer.render_frame(0.0, &mut sink);

        // Each draw lands its own transform in its own slot, and each
        // submission pairs with the slot uploaded immediately before it.
        assert_eq!(sink.uploads, vec![(0, 1.0), (1, 2.0), (2, 3.0)]);
        assert_eq!(sink.submissions, vec![0, 1, 2]);
    }

    #[test]
    fn successive_frames_redraw_every_instance() {
        let mut renderer: Renderer<u32> = Renderer::new(test_camera());
        let mesh = renderer.assets_mut().insert_mesh(CountingMesh);
        let effect = renderer.assets_mut().insert_technique(PlainTechnique);

        let mut model = Model::new();
        model.set_mesh(Some(mesh));
        model.set_effect(Some(effect));
        renderer.add_drawable(model);

        let mut submissions = 0u32;
        for frame in 0..3 {
            let report = renderer.render_frame(frame as f32 / 60.0, &mut submissions);
            assert_eq!(report.drawn, 1);
        }
        assert_eq!(submissions, 3);
    }
}
