use thiserror::Error;

/// Everything that can go wrong while building adjacency or striping a mesh.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum StripifyError {
    /// The triangle list is empty, not a multiple of 3, or a face references
    /// vertices that do not form a consistent edge during adjacency linking.
    #[error("invalid triangle list input")]
    BadInput,
    /// Three or more faces share a single undirected edge.
    #[error("mesh is non-manifold: an edge is shared by more than two faces")]
    NonManifold,
    /// Adjacency was built successfully but the face count is zero.
    #[error("mesh has no faces")]
    Empty,
}

/// Result type used throughout this crate.
pub type Result<T> = core::result::Result<T, StripifyError>;
