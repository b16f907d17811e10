//! Walks the adjacency graph from a seed face and a directed starting edge,
//! producing a strip's vertex sequence and the faces it consumes.

use crate::adjacency::{FaceIndex, MeshAdjacency};

/// Result of one directed walk: the vertices visited and the faces consumed,
/// in strip order.
pub struct Walk {
    pub vertices: Vec<u32>,
    pub faces: Vec<FaceIndex>,
}

/// Tracks a strip starting at `face`, with initial directed edge
/// `(v0, v1)`. `used` is marked for every face the walk consumes; faces
/// already marked stop the walk (they belong to another strip).
///
/// Matches §4.C: each step asks the current face for the vertex opposite
/// `(v0, v1)`, appends it, then rolls the edge forward to `(v1, v_opp)`.
pub fn track_strip(adj: &MeshAdjacency, mut face: FaceIndex, v0: u32, v1: u32, used: &mut [bool]) -> Walk {
    let mut vertices = vec![v0, v1];
    let mut faces = Vec::new();

    let faces_table = adj.faces();
    let face_count = faces_table.len() as FaceIndex;

    let (mut prev, mut last) = (v0, v1);
    loop {
        if face >= face_count {
            break;
        }
        let current = &faces_table[face as usize];
        let Some(opposite) = current.opposite_vertex(prev, last) else {
            break;
        };

        vertices.push(opposite);
        faces.push(face);
        used[face as usize] = true;

        let Some(edge) = current.find_edge(last, opposite) else {
            break;
        };
        match current.neighbour(edge) {
            None => break,
            Some((next_face, _reciprocal)) => {
                if next_face >= face_count || used[next_face as usize] {
                    break;
                }
                face = next_face;
            }
        }

        prev = last;
        last = opposite;
    }

    Walk { vertices, faces }
}
