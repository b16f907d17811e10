//! Stable, temporal-coherence-aware byte-radix sort over 32-bit keys.
//!
//! [`RadixSorter`] never moves the keys themselves: it only ever produces a
//! permutation of `0..n` such that `keys[perm[i]]` is non-decreasing. Calling
//! `sort_*` again without resetting the indices re-sorts starting from the
//! previous permutation, which is how a stable multi-key sort (sort by the
//! least-significant key first, then the next, ...) is expressed.

/// A permutation sort for 32-bit keys, reused across the adjacency builder
/// (sorting edges) and the top-level striper (sorting seed faces by degree).
pub struct RadixSorter {
    histogram: [u32; 256 * 4],
    offset: [u32; 256],
    indices: Vec<u32>,
    indices2: Vec<u32>,
    len: usize,
}

impl Default for RadixSorter {
    fn default() -> Self {
        Self::new()
    }
}

impl RadixSorter {
    pub fn new() -> Self {
        RadixSorter {
            histogram: [0; 256 * 4],
            offset: [0; 256],
            indices: Vec::new(),
            indices2: Vec::new(),
            len: 0,
        }
    }

    /// The current permutation, as indices into the last sorted key array.
    pub fn indices(&self) -> &[u32] {
        &self.indices[..self.len]
    }

    /// Resets the permutation to the identity order `0, 1, 2, ..., n - 1`.
    pub fn reset_indices(&mut self) -> &mut Self {
        for (i, slot) in self.indices.iter_mut().enumerate() {
            *slot = i as u32;
        }
        self
    }

    fn grow_to(&mut self, n: usize) {
        self.len = n;
        if n > self.indices.len() {
            let start = self.indices.len();
            self.indices.resize(n, 0);
            self.indices2.resize(n, 0);
            for (i, slot) in self.indices.iter_mut().enumerate().skip(start) {
                *slot = i as u32;
            }
        }
    }

    /// Sorts `keys` as unsigned 32-bit integers.
    pub fn sort_u32(&mut self, keys: &[u32]) -> &mut Self {
        self.sort_with(keys.len(), |i| RadixKey::from_bits(keys[i as usize]));
        self
    }

    /// Sorts `keys` as signed 32-bit integers: negatives sort before
    /// non-negatives, ties broken by two's-complement magnitude order.
    pub fn sort_i32(&mut self, keys: &[i32]) -> &mut Self {
        self.sort_with(keys.len(), |i| RadixKey::signed(keys[i as usize]));
        self
    }

    /// Sorts `keys` as IEEE-754 floats (NaN excluded from the contract, as in
    /// the source: ordering among NaNs is unspecified).
    pub fn sort_f32(&mut self, keys: &[f32]) -> &mut Self {
        self.sort_with(keys.len(), |i| RadixKey::float(keys[i as usize]));
        self
    }

    /// Shared four-pass byte-radix driver. `key_at(i)` returns the sort key
    /// (and its MSB-pass bucketing rule) for the element currently at
    /// permutation slot `i`, addressed through `self.indices`.
    fn sort_with(&mut self, n: usize, key_of: impl Fn(u32) -> RadixKey) {
        self.grow_to(n);
        if n == 0 {
            return;
        }

        self.histogram = [0; 256 * 4];
        let mut already_sorted = true;
        let mut prev = key_of(self.indices[0]).order_key();
        for &idx in &self.indices[..n] {
            let key = key_of(idx);
            let ordered = key.order_key();
            if ordered < prev {
                already_sorted = false;
            }
            prev = ordered;
            let bytes = key.bits.to_le_bytes();
            self.histogram[bytes[0] as usize] += 1;
            self.histogram[256 + bytes[1] as usize] += 1;
            self.histogram[512 + bytes[2] as usize] += 1;
            self.histogram[768 + bytes[3] as usize] += 1;
        }

        if already_sorted {
            return;
        }

        let mode = key_of(self.indices[0]).mode;
        let mut negatives = 0u32;
        if mode != RadixMode::Unsigned {
            for i in 128..256 {
                negatives += self.histogram[768 + i];
            }
        }

        for pass in 0..4u32 {
            let counts = &self.histogram[(pass as usize) * 256..(pass as usize) * 256 + 256];

            let mut perform_pass = true;
            for &c in counts {
                if c == n as u32 {
                    perform_pass = false;
                    break;
                }
                if c != 0 {
                    break;
                }
            }
            if !perform_pass {
                continue;
            }

            let is_msb_pass = pass == 3 && mode != RadixMode::Unsigned;
            if !is_msb_pass {
                self.offset[0] = 0;
                for i in 1..256 {
                    self.offset[i] = self.offset[i - 1] + counts[i - 1];
                }
                for &id in &self.indices[..n] {
                    let byte = key_of(id).bits.to_le_bytes()[pass as usize];
                    let slot = &mut self.offset[byte as usize];
                    self.indices2[*slot as usize] = id;
                    *slot += 1;
                }
            } else if mode == RadixMode::Signed {
                self.offset[0] = negatives;
                for i in 1..128 {
                    self.offset[i] = self.offset[i - 1] + counts[i - 1];
                }
                self.offset[128] = 0;
                for i in 129..256 {
                    self.offset[i] = self.offset[i - 1] + counts[i - 1];
                }
                for &id in &self.indices[..n] {
                    let byte = key_of(id).bits.to_le_bytes()[3];
                    let slot = &mut self.offset[byte as usize];
                    self.indices2[*slot as usize] = id;
                    *slot += 1;
                }
            } else {
                // Float MSB pass: non-negatives sort normally from
                // `negatives` upward; negatives sort in reverse byte order,
                // counting down from the top of their bucket, since a larger
                // magnitude byte means a more negative value.
                self.offset[0] = negatives;
                for i in 1..128 {
                    self.offset[i] = self.offset[i - 1] + counts[i - 1];
                }
                self.offset[255] = 0;
                for i in 0..127 {
                    self.offset[254 - i] = self.offset[255 - i] + counts[255 - i];
                }
                for i in 128..256 {
                    self.offset[i] += counts[i];
                }
                for &id in &self.indices[..n] {
                    let radix = key_of(id).bits.to_le_bytes()[3];
                    if radix < 128 {
                        let slot = &mut self.offset[radix as usize];
                        self.indices2[*slot as usize] = id;
                        *slot += 1;
                    } else {
                        let slot = &mut self.offset[radix as usize];
                        *slot -= 1;
                        self.indices2[*slot as usize] = id;
                    }
                }
            }

            core::mem::swap(&mut self.indices, &mut self.indices2);
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum RadixMode {
    Unsigned,
    Signed,
    Float,
}

/// One key's raw little-endian byte representation plus the interpretation
/// used to decide histogram bucketing and MSB-pass ordering.
#[derive(Copy, Clone)]
struct RadixKey {
    bits: u32,
    mode: RadixMode,
}

impl RadixKey {
    fn from_bits(bits: u32) -> Self {
        RadixKey {
            bits,
            mode: RadixMode::Unsigned,
        }
    }

    fn signed(value: i32) -> Self {
        RadixKey {
            bits: value as u32,
            mode: RadixMode::Signed,
        }
    }

    fn float(value: f32) -> Self {
        RadixKey {
            bits: value.to_bits(),
            mode: RadixMode::Float,
        }
    }

    /// A value comparable with plain `<` in the key's own total order, used
    /// only for the temporal-coherence "already sorted" probe. Kept as `f64`
    /// (never truncated to an integer) so the float case compares the real
    /// value, not its floor.
    fn order_key(&self) -> f64 {
        match self.mode {
            RadixMode::Unsigned => self.bits as f64,
            RadixMode::Signed => (self.bits as i32) as f64,
            RadixMode::Float => f32::from_bits(self.bits) as f64,
        }
    }
}
