//! wgpu implementations of the mesh and technique capabilities
//!
//! The draw sink for this backend is [`FrameEncoder`]: an owned render pass,
//! the queue, and a per-frame draw counter. Since wgpu resources are
//! internally reference counted, the pass can shed its encoder lifetime and
//! the queue is a cheap clone.
//!
//! The draw counter exists because queue uploads enqueued while a pass is
//! being recorded all land before the pass executes: per-draw state such as
//! a technique's uniforms must go into a distinct slot per draw, never into
//! one shared buffer.

mod mesh;
mod technique;
mod vertex;

pub use mesh::GpuMesh;
pub use technique::{GpuTechnique, TechniqueConfig, DEFAULT_SHADER};
pub use vertex::Vertex3D;

/// Draw sink tying the scene-graph core to a wgpu render pass.
pub struct FrameEncoder {
    pub pass: wgpu::RenderPass<'static>,
    pub queue: wgpu::Queue,
    draws: DrawCursor,
}

impl FrameEncoder {
    pub fn new(pass: wgpu::RenderPass<'_>, queue: &wgpu::Queue) -> Self {
        Self {
            pass: pass.forget_lifetime(),
            queue: queue.clone(),
            draws: DrawCursor::new(),
        }
    }

    /// Claims the next per-draw slot index for this frame. Each call
    /// returns a fresh index; a new encoder (a new frame) starts over at
    /// zero.
    pub fn next_draw_slot(&mut self) -> u32 {
        self.draws.next()
    }
}

/// Counts draws within one frame so per-draw resources can be assigned
/// without aliasing.
#[derive(Debug, Default)]
pub struct DrawCursor(u32);

impl DrawCursor {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn next(&mut self) -> u32 {
        let index = self.0;
        self.0 += 1;
        index
    }
}
