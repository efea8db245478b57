//! Error types for the bothy library

use std::path::PathBuf;

use thiserror::Error;

/// Recoverable conditions reported by a draw call.
///
/// A model with an unbound (or no longer resolvable) collaborator is not a
/// crash and not a silent no-op: the draw reports which collaborator was
/// missing and performs no partial work. The caller decides whether to skip
/// the instance or treat it as a scene defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DrawError {
    /// No mesh is bound, or the bound handle no longer resolves in the
    /// asset table.
    #[error("no geometry bound to this model")]
    NoGeometry,

    /// No technique is bound, or the bound handle no longer resolves in the
    /// asset table.
    #[error("no shading technique bound to this model")]
    NoPipeline,
}

/// Failures while loading geometry from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to parse OBJ file: {0}")]
    Obj(#[from] tobj::LoadError),

    /// The file parsed but contained no usable geometry.
    #[error("OBJ file {path:?} contains no geometry")]
    EmptyObject { path: PathBuf },
}
