//! # Graphics Module
//!
//! Everything graphics-related in bothy: the scene-graph model node, the
//! capability traits it draws through, the asset table that owns meshes and
//! techniques, the frame loop, and the concrete wgpu backend.
//!
//! ## Architecture Overview
//!
//! - **Model** ([`model`]) - one drawable instance: transform + handles
//! - **Capabilities** ([`traits`]) - `Mesh`, `Technique`, `Drawable` seams
//! - **Assets** ([`assets`]) - index-handle table owning the collaborators
//! - **Renderer** ([`renderer`]) - per-frame camera finalization and dispatch
//! - **Camera** ([`camera`]) - orbit camera producing view/projection
//! - **Geometry** ([`geometry`]) - CPU geometry and procedural primitives
//! - **Backend** ([`backend`]) - wgpu meshes, techniques and the frame sink
//!
//! The core (model, traits, assets, renderer) is generic over the draw sink
//! and never touches a GPU type; only [`backend`] depends on wgpu.

pub mod assets;
pub mod backend;
pub mod camera;
pub mod frame;
pub mod geometry;
pub mod model;
pub mod renderer;
pub mod traits;

// Re-export commonly used types
pub use assets::{Assets, MeshHandle, TechniqueHandle};
pub use camera::OrbitCamera;
pub use frame::{DrawUniforms, FrameContext};
pub use model::Model;
pub use renderer::{FrameReport, Renderer};
pub use traits::{Drawable, Mesh, Technique};
