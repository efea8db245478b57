//! Capability traits at the seams between model, renderer and GPU backend
//!
//! All three traits are generic over a draw sink `E` — the thing draw
//! commands are recorded into. The wgpu backend uses
//! [`FrameEncoder`](crate::gfx::backend::FrameEncoder); tests use a plain
//! event log. Keeping the sink generic means the scene-graph core never
//! touches a GPU type.

use crate::error::DrawError;
use crate::gfx::assets::Assets;
use crate::gfx::frame::{DrawUniforms, FrameContext};

/// A geometry container that can submit its draw call through the currently
/// active pipeline.
pub trait Mesh<E> {
    fn submit_for_draw(&mut self, sink: &mut E);
}

/// A shading pipeline that can be made current and fed per-draw uniforms.
pub trait Technique<E> {
    /// Make this pipeline the active one on the sink.
    fn activate(&mut self, sink: &mut E);

    /// Upload the per-draw uniform values. Called after [`activate`] and
    /// before any geometry submission.
    ///
    /// [`activate`]: Technique::activate
    fn set_uniforms(&mut self, sink: &mut E, uniforms: &DrawUniforms);
}

/// Anything the renderer can draw once per frame.
///
/// The renderer depends only on this trait, so drawable variants besides
/// [`Model`](crate::gfx::model::Model) can join the draw list without the
/// renderer changing.
pub trait Drawable<E> {
    fn draw(
        &mut self,
        frame: &FrameContext,
        assets: &mut Assets<E>,
        sink: &mut E,
    ) -> Result<(), DrawError>;
}
