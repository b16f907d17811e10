#![deny(unconditional_recursion)]

//! Triangle-strip generation from an unordered triangle list.
//!
//! This crate turns a flat triangle-index list into a small set of
//! GPU-friendly *triangle strips*: sequences of vertex indices where every
//! three consecutive entries, alternating winding, describe one triangle.
//! Large strips cut per-triangle index bandwidth from 3 indices down to
//! roughly 1.
//!
//! ## The pipeline
//!
//! * [`radix::RadixSorter`] — a stable byte-radix permutation sort over
//!   unsigned, signed, or IEEE-754 float 32-bit keys. Used both to find
//!   matching edges while building adjacency and to order seed faces.
//! * [`adjacency::MeshAdjacency`] — builds a half-edge-style neighbour table
//!   for every face, rejecting non-manifold input.
//! * [`tracker::track_strip`] — walks the adjacency graph from a seed face
//!   and a directed starting edge, producing one candidate strip.
//! * [`striper::Striper`] — tries three seed orientations per unused face,
//!   commits the longest, applies optional parity correction, and
//!   optionally concatenates every strip into one via degenerate triangles.
//!
//! Building strips is the entire scope of this crate: packing the resulting
//! index stream into a GPU vertex buffer, and any driver-specific quirks
//! around it, are the responsibility of the rendering front-end that
//! consumes [`StripResult`].
//!
//! ```
//! use mesh_stripify::{Striper, StripifyFlags};
//!
//! // Two triangles sharing an edge, forming a quad.
//! let triangles = [0u32, 1, 2, 2, 1, 3];
//! let mut striper = Striper::new(&triangles, StripifyFlags::empty()).unwrap();
//! let result = striper.compute().unwrap();
//! assert_eq!(result.strip_count(), 1);
//! ```

mod adjacency;
mod error;
mod radix;
mod striper;
mod tracker;

#[cfg(test)]
mod striper_tests;

pub use adjacency::{BoundaryEdge, Face, FaceIndex, MeshAdjacency};
pub use error::{Result, StripifyError};
pub use radix::RadixSorter;
pub use striper::{StripIndices, StripResult, Striper, StripifyFlags};
