//! Per-frame draw parameters
//!
//! The renderer finalizes the camera, view and projection once per frame and
//! hands every drawable the same [`FrameContext`]. Models derive their
//! [`DrawUniforms`] from it; nothing in here is GPU-specific.

use cgmath::{Matrix4, Point3, SquareMatrix};

/// Frame-global parameters supplied by the render loop.
///
/// `parent` is the transform the drawable's local matrix composes under
/// (`world = parent * local`); for top-level instances it is the identity.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext {
    /// Seconds since the renderer started, forwarded untouched to techniques.
    pub elapsed: f32,
    pub projection: Matrix4<f32>,
    pub view: Matrix4<f32>,
    pub parent: Matrix4<f32>,
    pub camera_position: Point3<f32>,
}

impl FrameContext {
    pub fn new(
        elapsed: f32,
        projection: Matrix4<f32>,
        view: Matrix4<f32>,
        camera_position: Point3<f32>,
    ) -> Self {
        Self {
            elapsed,
            projection,
            view,
            parent: Matrix4::identity(),
            camera_position,
        }
    }

    pub fn with_parent(mut self, parent: Matrix4<f32>) -> Self {
        self.parent = parent;
        self
    }
}

/// Values a model uploads to its technique before submitting geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawUniforms {
    pub world: Matrix4<f32>,
    pub view: Matrix4<f32>,
    pub projection: Matrix4<f32>,
    pub camera_position: Point3<f32>,
    pub elapsed: f32,
}
