//! Half-edge-style face adjacency for a manifold triangle mesh.

use crate::error::{Result, StripifyError};
use crate::radix::RadixSorter;

/// Sentinel packed into a [`Face`] neighbour slot meaning "no neighbour
/// across this edge" (a boundary edge).
const BOUNDARY: u32 = 0xFFFF_FFFF;

/// Index of a face in a [`MeshAdjacency`]'s face table.
pub type FaceIndex = u32;

/// One triangular face: its three vertex indices and its three
/// edge-neighbour links.
///
/// Edge ordinals are fixed: edge 0 = (V0,V1), edge 1 = (V0,V2), edge 2 =
/// (V1,V2). A neighbour link packs the neighbour's face index into the low
/// 30 bits and the reciprocal edge ordinal (0, 1 or 2) into the top 2 bits;
/// [`Face::neighbour`] decodes this so callers never touch the packed word
/// directly.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Face {
    pub vertices: [u32; 3],
    links: [u32; 3],
}

impl Face {
    fn new(v0: u32, v1: u32, v2: u32) -> Self {
        Face {
            vertices: [v0, v1, v2],
            links: [BOUNDARY; 3],
        }
    }

    /// The face (and its reciprocal edge ordinal) across `edge`, or `None`
    /// if `edge` is a boundary edge.
    pub fn neighbour(&self, edge: u8) -> Option<(FaceIndex, u8)> {
        let link = self.links[edge as usize];
        if link == BOUNDARY {
            None
        } else {
            Some((link & 0x3FFF_FFFF, (link >> 30) as u8))
        }
    }

    /// Number of non-boundary neighbours this face has (0..=3).
    pub fn degree(&self) -> u32 {
        self.links.iter().filter(|&&l| l != BOUNDARY).count() as u32
    }

    /// The edge ordinal (0, 1 or 2) whose vertex pair is `{a, b}` in either
    /// order, or `None` if this face has no such edge.
    pub fn find_edge(&self, a: u32, b: u32) -> Option<u8> {
        let v = self.vertices;
        if (v[0] == a && v[1] == b) || (v[0] == b && v[1] == a) {
            Some(0)
        } else if (v[0] == a && v[2] == b) || (v[0] == b && v[2] == a) {
            Some(1)
        } else if (v[1] == a && v[2] == b) || (v[1] == b && v[2] == a) {
            Some(2)
        } else {
            None
        }
    }

    /// The third vertex of this face given two of its vertices (in either
    /// order), or `None` if `{a, b}` is not an edge of this face.
    pub fn opposite_vertex(&self, a: u32, b: u32) -> Option<u32> {
        let v = self.vertices;
        if (v[0] == a && v[1] == b) || (v[0] == b && v[1] == a) {
            Some(v[2])
        } else if (v[0] == a && v[2] == b) || (v[0] == b && v[2] == a) {
            Some(v[1])
        } else if (v[1] == a && v[2] == b) || (v[1] == b && v[2] == a) {
            Some(v[0])
        } else {
            None
        }
    }

    fn set_link(&mut self, edge: u8, neighbour: FaceIndex, reciprocal_edge: u8) {
        self.links[edge as usize] = neighbour | ((reciprocal_edge as u32) << 30);
    }
}

/// A boundary edge: the edge belongs to exactly one face.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoundaryEdge {
    pub vertices: [u32; 2],
    pub face: FaceIndex,
}

/// Per-face neighbour adjacency for a triangle list, plus optionally the
/// list of boundary edges.
pub struct MeshAdjacency {
    faces: Vec<Face>,
    boundary_edges: Vec<BoundaryEdge>,
}

/// One transient (owner-face, normalised-vertex-pair) edge record, emitted
/// three per face before pairing.
struct ScratchEdge {
    v_min: u32,
    v_max: u32,
    face: FaceIndex,
}

impl MeshAdjacency {
    /// Builds the adjacency for `indices` (a flat triangle list, length a
    /// multiple of 3). Fails with [`StripifyError::BadInput`] if the list is
    /// empty or malformed, or [`StripifyError::NonManifold`] if any edge is
    /// shared by three or more faces.
    ///
    /// `keep_edges` mirrors the source's independent `iEdges` parameter:
    /// when false the boundary-edge list is left empty, sparing the caller
    /// the cost of retaining it.
    pub fn build(indices: &[u32], keep_edges: bool) -> Result<Self> {
        if indices.is_empty() || indices.len() % 3 != 0 {
            return Err(StripifyError::BadInput);
        }

        let face_count = indices.len() / 3;
        let mut faces = Vec::with_capacity(face_count);
        let mut scratch = Vec::with_capacity(face_count * 3);

        for i in 0..face_count {
            let v0 = indices[i * 3];
            let v1 = indices[i * 3 + 1];
            let v2 = indices[i * 3 + 2];
            faces.push(Face::new(v0, v1, v2));

            let face = i as u32;
            push_edge(&mut scratch, v0, v1, face);
            push_edge(&mut scratch, v0, v2, face);
            push_edge(&mut scratch, v1, v2, face);
        }

        let owners: Vec<u32> = scratch.iter().map(|e| e.face).collect();
        let v_min: Vec<u32> = scratch.iter().map(|e| e.v_min).collect();
        let v_max: Vec<u32> = scratch.iter().map(|e| e.v_max).collect();

        let mut sorter = RadixSorter::new();
        sorter.sort_u32(&owners).sort_u32(&v_min).sort_u32(&v_max);
        let order = sorter.indices().to_vec();

        let mut boundary_edges = Vec::new();
        let edge_count = scratch.len();
        let mut i = 0usize;
        while i < edge_count {
            let (lo, hi) = (v_min[order[i] as usize], v_max[order[i] as usize]);
            let mut j = i;
            while j < edge_count
                && v_min[order[j] as usize] == lo
                && v_max[order[j] as usize] == hi
            {
                j += 1;
            }
            let run = &order[i..j];
            match run.len() {
                1 => {
                    if keep_edges {
                        boundary_edges.push(BoundaryEdge {
                            vertices: [lo, hi],
                            face: owners[run[0] as usize],
                        });
                    }
                }
                2 => {
                    let f1 = owners[run[0] as usize];
                    let f2 = owners[run[1] as usize];
                    update_link(&mut faces, f1, f2, lo, hi)?;
                }
                _ => return Err(StripifyError::NonManifold),
            }
            i = j;
        }

        Ok(MeshAdjacency {
            faces,
            boundary_edges,
        })
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Boundary edges, populated only if `build` was called with
    /// `keep_edges = true`.
    pub fn boundary_edges(&self) -> &[BoundaryEdge] {
        &self.boundary_edges
    }
}

fn push_edge(scratch: &mut Vec<ScratchEdge>, a: u32, b: u32, face: FaceIndex) {
    let (v_min, v_max) = if a < b { (a, b) } else { (b, a) };
    scratch.push(ScratchEdge { v_min, v_max, face });
}

fn update_link(faces: &mut [Face], f1: FaceIndex, f2: FaceIndex, a: u32, b: u32) -> Result<()> {
    let edge0 = faces[f1 as usize]
        .find_edge(a, b)
        .ok_or(StripifyError::BadInput)?;
    let edge1 = faces[f2 as usize]
        .find_edge(a, b)
        .ok_or(StripifyError::BadInput)?;
    faces[f1 as usize].set_link(edge0, f2, edge1);
    faces[f2 as usize].set_link(edge1, f1, edge0);
    Ok(())
}
