//! Seed-best selection, commit/parity-fix, strip concatenation and the
//! top-level orchestration that ties the whole pipeline together.

use crate::adjacency::{FaceIndex, MeshAdjacency};
use crate::error::{Result, StripifyError};
use crate::radix::RadixSorter;
use crate::tracker::track_strip;

bitflags::bitflags! {
    /// Behaviour flags for [`Striper`]. Unknown bits cannot be represented:
    /// `bitflags` rejects them at construction rather than silently
    /// ignoring them at use.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct StripifyFlags: u32 {
        /// Output index width is 16-bit (else 32-bit).
        const INDEX16    = 0b0001;
        /// Apply parity correction at commit and at join.
        const PARITYFIX  = 0b0010;
        /// Order seeds by ascending adjacency degree via radix sort.
        const SORTSEEDS  = 0b0100;
        /// After striping, concatenate into one strip with degenerate joins.
        const CONNECTALL = 0b1000;
    }
}

/// Either a 16-bit or a 32-bit index stream, depending on
/// [`StripifyFlags::INDEX16`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StripIndices<'a> {
    U16(&'a [u16]),
    U32(&'a [u32]),
}

impl<'a> StripIndices<'a> {
    pub fn len(&self) -> usize {
        match self {
            StripIndices::U16(s) => s.len(),
            StripIndices::U32(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The output of a [`Striper::compute`] call: one or more triangle strips
/// packed into a single index stream, with per-strip lengths.
#[derive(Debug)]
pub struct StripResult<'a> {
    pub strip_lengths: &'a [u32],
    pub indices: StripIndices<'a>,
}

impl<'a> StripResult<'a> {
    pub fn strip_count(&self) -> usize {
        self.strip_lengths.len()
    }
}

/// One explored strip direction from a seed face: its vertex and face
/// sequence, the length of the initial forward walk, and the total length
/// after the backward extension (§4.D).
struct Candidate {
    vertices: Vec<u32>,
    faces: Vec<FaceIndex>,
    initial_len: u32,
    total_len: u32,
}

/// Turns an unordered triangle list into a compact set of triangle strips.
///
/// Owns its adjacency tables and output buffers; a [`StripResult`] borrows
/// from them and is invalidated by the next `compute` call.
pub struct Striper {
    adjacency: MeshAdjacency,
    flags: StripifyFlags,
    strip_lengths: Vec<u32>,
    indices16: Vec<u16>,
    indices32: Vec<u32>,
    connected_length: u32,
    connected16: Vec<u16>,
    connected32: Vec<u32>,
}

impl Striper {
    /// Builds adjacency for a 32-bit triangle list and prepares to strip it.
    pub fn new(indices: &[u32], flags: StripifyFlags) -> Result<Self> {
        let adjacency = MeshAdjacency::build(indices, false)?;
        Ok(Striper {
            adjacency,
            flags,
            strip_lengths: Vec::new(),
            indices16: Vec::new(),
            indices32: Vec::new(),
            connected_length: 0,
            connected16: Vec::new(),
            connected32: Vec::new(),
        })
    }

    /// Builds adjacency for a 16-bit triangle list. Both ingestion widths
    /// funnel into the same `u32`-indexed internal representation.
    pub fn from_u16(indices: &[u16], flags: StripifyFlags) -> Result<Self> {
        let widened: Vec<u32> = indices.iter().map(|&v| v as u32).collect();
        Self::new(&widened, flags)
    }

    /// Runs the striper over the mesh built at construction time.
    pub fn compute(&mut self) -> Result<StripResult<'_>> {
        self.strip_lengths.clear();
        self.indices16.clear();
        self.indices32.clear();
        self.connected16.clear();
        self.connected32.clear();
        self.connected_length = 0;

        let face_count = self.adjacency.face_count();
        if face_count == 0 {
            return Err(StripifyError::Empty);
        }

        let mut used = vec![false; face_count];
        let order = self.seed_order(face_count);

        let mut consumed = 0u32;
        for &seed in &order {
            if used[seed as usize] {
                continue;
            }
            let before = self.strip_lengths.len();
            let used_faces = self.compute_best_strip(seed, &mut used);
            if self.strip_lengths.len() != before {
                consumed += used_faces;
            }
            if consumed == face_count as u32 {
                break;
            }
        }

        if self.flags.contains(StripifyFlags::CONNECTALL) && !self.strip_lengths.is_empty() {
            self.connect_all();
            return Ok(StripResult {
                strip_lengths: core::slice::from_ref(&self.connected_length),
                indices: if self.flags.contains(StripifyFlags::INDEX16) {
                    StripIndices::U16(&self.connected16)
                } else {
                    StripIndices::U32(&self.connected32)
                },
            });
        }

        Ok(StripResult {
            strip_lengths: &self.strip_lengths,
            indices: if self.flags.contains(StripifyFlags::INDEX16) {
                StripIndices::U16(&self.indices16)
            } else {
                StripIndices::U32(&self.indices32)
            },
        })
    }

    /// Natural face order, or ascending-adjacency-degree order when
    /// [`StripifyFlags::SORTSEEDS`] is set (corner faces make better seeds).
    fn seed_order(&self, face_count: usize) -> Vec<FaceIndex> {
        if !self.flags.contains(StripifyFlags::SORTSEEDS) {
            return (0..face_count as u32).collect();
        }
        let degrees: Vec<u32> = self.adjacency.faces().iter().map(|f| f.degree()).collect();
        let mut sorter = RadixSorter::new();
        sorter.sort_u32(&degrees);
        sorter.indices().to_vec()
    }

    /// Explores the three seed orientations from `seed`, commits the
    /// longest, and returns the number of faces it consumed (0 if no
    /// candidate reached a full triangle).
    fn compute_best_strip(&mut self, seed: FaceIndex, used_global: &mut [bool]) -> u32 {
        let seed_face = self.adjacency.faces()[seed as usize];
        let v = seed_face.vertices;
        // starts0[i] / starts1[i]: the "previous" / "current" vertex of
        // orientation i, tracing edges (V0,V1), (V2,V0), (V1,V2).
        let starts0 = [v[1], v[0], v[2]];
        let starts1 = [v[0], v[2], v[1]];

        let mut candidates: Vec<Candidate> = Vec::with_capacity(3);
        for i in 0..3 {
            candidates.push(self.explore_candidate(seed, starts1[i], starts0[i], used_global));
        }

        let mut best = 0usize;
        if candidates[1].total_len > candidates[best].total_len {
            best = 1;
        }
        if candidates[2].total_len > candidates[best].total_len {
            best = 2;
        }

        let mut winner = candidates.swap_remove(best);
        if winner.total_len < 3 {
            return 0;
        }

        let tri_used = winner.faces.len() as u32;
        for &f in &winner.faces {
            used_global[f as usize] = true;
        }

        if self.flags.contains(StripifyFlags::PARITYFIX) && winner.initial_len % 2 == 1 {
            apply_parity_fix(&mut winner.vertices, winner.initial_len, &mut winner.total_len);
        }

        if self.flags.contains(StripifyFlags::INDEX16) {
            self.indices16
                .extend(winner.vertices.iter().map(|&v| v as u16));
        } else {
            self.indices32.extend(winner.vertices.iter().copied());
        }
        self.strip_lengths.push(winner.total_len);

        tri_used
    }

    /// Walks forward from `seed` along edge `(v0, v1)`, then, if that walk
    /// reached a full triangle, reverses it and extends backward through
    /// the seed in the opposite direction (§4.D steps 2-4).
    fn explore_candidate(&self, seed: FaceIndex, v0: u32, v1: u32, used_global: &[bool]) -> Candidate {
        let mut used_work = used_global.to_vec();
        let forward = track_strip(&self.adjacency, seed, v0, v1, &mut used_work);
        let initial_len = forward.vertices.len() as u32;

        if initial_len < 3 {
            return Candidate {
                vertices: forward.vertices,
                faces: forward.faces,
                initial_len,
                total_len: initial_len,
            };
        }

        let mut vertices = forward.vertices;
        vertices.reverse();
        let mut faces = forward.faces;
        faces.reverse();

        let grow_start = (initial_len - 3) as usize;
        let backward = track_strip(&self.adjacency, seed, vertices[grow_start], vertices[grow_start + 1], &mut used_work);
        let extend = backward.vertices.len() as u32;

        vertices.truncate(grow_start);
        vertices.extend(backward.vertices);
        faces.truncate(grow_start);
        faces.extend(backward.faces);

        Candidate {
            vertices,
            faces,
            initial_len,
            total_len: grow_start as u32 + extend,
        }
    }

    /// Joins every committed strip into one via degenerate triangles (§4.E).
    fn connect_all(&mut self) {
        let lengths = self.strip_lengths.clone();
        let parity = self.flags.contains(StripifyFlags::PARITYFIX);

        if self.flags.contains(StripifyFlags::INDEX16) {
            let src = self.indices16.clone();
            let (connected, total_len) = concat_strips(&lengths, &src, parity);
            self.connected16 = connected;
            self.connected_length = total_len;
        } else {
            let src = self.indices32.clone();
            let (connected, total_len) = concat_strips(&lengths, &src, parity);
            self.connected32 = connected;
            self.connected_length = total_len;
        }
    }
}

/// Applies the parity-correction rule from §4.D to a just-committed strip.
fn apply_parity_fix(vertices: &mut Vec<u32>, initial_len: u32, total_len: &mut u32) {
    if *total_len == 3 || *total_len == 4 {
        vertices.swap(1, 2);
        return;
    }

    vertices.reverse();
    if (*total_len - initial_len) % 2 == 1 {
        vertices.insert(1, vertices[0]);
        *total_len += 1;
    }
}

/// Shared 16/32-bit implementation of strip concatenation.
fn concat_strips<T: Copy + PartialEq>(lengths: &[u32], src: &[T], parity: bool) -> (Vec<T>, u32) {
    let mut connected = Vec::new();
    let mut total_len = 0u32;
    let mut cursor = 0usize;
    let mut have_output = false;

    for &len in lengths {
        let len = len as usize;
        if len == 0 {
            continue;
        }
        let mut seg = &src[cursor..cursor + len];
        cursor += len;

        if have_output {
            let prev_last = *connected.last().unwrap();
            let first_cur = seg[0];
            let second_cur = if seg.len() >= 2 { seg[1] } else { seg[0] };
            connected.push(prev_last);
            connected.push(first_cur);
            total_len += 2;

            if parity && total_len % 2 == 1 {
                if first_cur == second_cur {
                    seg = &seg[1..];
                } else {
                    connected.push(first_cur);
                    total_len += 1;
                }
            }
        }

        connected.extend_from_slice(seg);
        total_len += seg.len() as u32;
        have_output = true;
    }

    (connected, total_len)
}
