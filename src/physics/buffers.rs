//! Preallocated state buffers.
//!
//! Each logical buffer is a single boxed slice sized once at construction:
//! - `NodeBuffers`: six f32 fields per node, stored field-major (SoA)
//! - `EdgeBuffers`: source indices followed by target indices
//! - `PairBuffer`: first indices followed by second indices
//!
//! Fields are handed out as typed slices split from the region, so no
//! caller ever computes an offset by hand. Lengths never change.

use crate::graph::NodeIndex;

/// Number of f32 fields stored per node.
pub const NODE_FIELDS: usize = 6;

/// Per-node position, velocity and home placement in one allocation.
///
/// Field order within the region: x position, x velocity, x home,
/// y position, y velocity, y home.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeBuffers {
    len: usize,
    data: Box<[f32]>,
}

/// Shared view of every node field.
#[derive(Debug, Clone, Copy)]
pub struct NodeFields<'a> {
    pub pos_x: &'a [f32],
    pub vel_x: &'a [f32],
    pub home_x: &'a [f32],
    pub pos_y: &'a [f32],
    pub vel_y: &'a [f32],
    pub home_y: &'a [f32],
}

/// Mutable view of every node field.
#[derive(Debug)]
pub struct NodeFieldsMut<'a> {
    pub pos_x: &'a mut [f32],
    pub vel_x: &'a mut [f32],
    pub home_x: &'a mut [f32],
    pub pos_y: &'a mut [f32],
    pub vel_y: &'a mut [f32],
    pub home_y: &'a mut [f32],
}

impl NodeBuffers {
    /// Allocate zeroed storage for `len` nodes.
    ///
    /// Returns None if `len * NODE_FIELDS` overflows.
    pub fn zeroed(len: usize) -> Option<Self> {
        let size = len.checked_mul(NODE_FIELDS)?;
        Some(Self {
            len,
            data: vec![0.0; size].into_boxed_slice(),
        })
    }

    /// Get the number of nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no nodes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Split the region into shared field slices.
    pub fn fields(&self) -> NodeFields<'_> {
        let n = self.len;
        let (pos_x, rest) = self.data.split_at(n);
        let (vel_x, rest) = rest.split_at(n);
        let (home_x, rest) = rest.split_at(n);
        let (pos_y, rest) = rest.split_at(n);
        let (vel_y, home_y) = rest.split_at(n);
        NodeFields {
            pos_x,
            vel_x,
            home_x,
            pos_y,
            vel_y,
            home_y,
        }
    }

    /// Split the region into mutable field slices.
    pub fn fields_mut(&mut self) -> NodeFieldsMut<'_> {
        let n = self.len;
        let (pos_x, rest) = self.data.split_at_mut(n);
        let (vel_x, rest) = rest.split_at_mut(n);
        let (home_x, rest) = rest.split_at_mut(n);
        let (pos_y, rest) = rest.split_at_mut(n);
        let (vel_y, home_y) = rest.split_at_mut(n);
        NodeFieldsMut {
            pos_x,
            vel_x,
            home_x,
            pos_y,
            vel_y,
            home_y,
        }
    }

    #[cfg(test)]
    fn capacity(&self) -> usize {
        self.data.len()
    }
}

/// Edge endpoints as dense node indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeBuffers {
    len: usize,
    data: Box<[u32]>,
}

impl EdgeBuffers {
    /// Copy resolved endpoints into a single `[sources..., targets...]` region.
    pub fn from_endpoints(endpoints: &[(NodeIndex, NodeIndex)]) -> Self {
        let len = endpoints.len();
        let mut data = vec![0u32; len * 2].into_boxed_slice();
        let (sources, targets) = data.split_at_mut(len);
        for (e, &(source, target)) in endpoints.iter().enumerate() {
            sources[e] = source.raw();
            targets[e] = target.raw();
        }
        Self { len, data }
    }

    /// Get the number of edges.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no edges.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Source node index of every edge.
    pub fn sources(&self) -> &[u32] {
        &self.data[..self.len]
    }

    /// Target node index of every edge.
    pub fn targets(&self) -> &[u32] {
        &self.data[self.len..]
    }

    /// (source, target) slot pairs in edge order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.sources()
            .iter()
            .zip(self.targets())
            .map(|(&s, &t)| (s as usize, t as usize))
    }
}

/// Number of unordered pairs of distinct nodes, `n * (n - 1) / 2`.
///
/// Returns None on overflow.
pub fn pair_count(n: usize) -> Option<usize> {
    if n < 2 {
        return Some(0);
    }
    // One of n, n - 1 is even, so halve that one first.
    if n % 2 == 0 {
        (n / 2).checked_mul(n - 1)
    } else {
        n.checked_mul((n - 1) / 2)
    }
}

/// Every unordered node pair `(i, j)` with `i < j`.
///
/// Enumerated with `i` ascending and, for each `i`, `j` ascending from
/// `i + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PairBuffer {
    len: usize,
    data: Box<[u32]>,
}

impl PairBuffer {
    /// A buffer holding no pairs.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Enumerate all pairs of `node_count` nodes.
    ///
    /// Returns None if the pair count overflows, or if a node index does
    /// not fit in u32.
    pub fn for_nodes(node_count: usize) -> Option<Self> {
        u32::try_from(node_count).ok()?;
        let len = pair_count(node_count)?;
        let mut data = vec![0u32; len.checked_mul(2)?].into_boxed_slice();
        let (firsts, seconds) = data.split_at_mut(len);

        let mut k = 0;
        for i in 0..node_count {
            for j in (i + 1)..node_count {
                firsts[k] = i as u32;
                seconds[k] = j as u32;
                k += 1;
            }
        }

        Some(Self { len, data })
    }

    /// Get the number of pairs.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no pairs.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// First index of every pair.
    pub fn firsts(&self) -> &[u32] {
        &self.data[..self.len]
    }

    /// Second index of every pair.
    pub fn seconds(&self) -> &[u32] {
        &self.data[self.len..]
    }

    /// (i, j) slot pairs in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.firsts()
            .iter()
            .zip(self.seconds())
            .map(|(&i, &j)| (i as usize, j as usize))
    }
}
