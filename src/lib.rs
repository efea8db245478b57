// src/lib.rs
//! Bothy
//!
//! A lightweight scene-graph and rendering toolkit built on wgpu. A
//! [`Model`](gfx::Model) composes geometry, a shading technique and a
//! transform; the [`Renderer`](gfx::Renderer) drives one draw per visible
//! instance per frame.

pub mod error;
pub mod gfx;
pub mod loader;

// Re-export main types for convenience
pub use error::{DrawError, LoadError};
pub use gfx::{Assets, Drawable, FrameContext, Model, OrbitCamera, Renderer};
