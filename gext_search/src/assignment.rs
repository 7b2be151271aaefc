//! Injective partial assignment from G1 vertices to G2 vertices.
//!
//! The canonical state shared by every search algorithm: a forward array, its
//! maintained inverse, a used-mask over G2, and a mapped counter. Cloning is
//! a handful of flat `Vec` copies, which is what the A* family leans on.

use gext_common::graph::Vertex;

/// Injective partial function `G1 -> G2` with its inverse.
///
/// Invariants, maintained by every mutation:
/// - `forward[u] == Some(v)` iff `backward[v] == Some(u)`;
/// - `mapped_count` equals the number of `Some` entries in `forward`;
/// - `used[v]` iff `backward[v]` is `Some`.
#[derive(Clone, Debug)]
pub struct Assignment {
    forward: Vec<Option<Vertex>>,
    backward: Vec<Option<Vertex>>,
    used: Vec<bool>,
    mapped_count: u32,
}

impl Assignment {
    /// Empty assignment between graphs of `size_g1` and `size_g2` vertices.
    #[must_use]
    pub fn new(size_g1: u32, size_g2: u32) -> Self {
        Self {
            forward: vec![None; size_g1 as usize],
            backward: vec![None; size_g2 as usize],
            used: vec![false; size_g2 as usize],
            mapped_count: 0,
        }
    }

    /// G1 side size.
    #[must_use]
    pub fn size_g1(&self) -> u32 {
        self.forward.len() as u32
    }

    /// G2 side size.
    #[must_use]
    pub fn size_g2(&self) -> u32 {
        self.backward.len() as u32
    }

    /// Map `g1_vertex -> g2_vertex`, displacing any existing mapping that
    /// touches either endpoint.
    pub fn set(&mut self, g1_vertex: Vertex, g2_vertex: Vertex) {
        debug_assert!((g1_vertex as usize) < self.forward.len());
        debug_assert!((g2_vertex as usize) < self.backward.len());

        self.unset(g1_vertex);
        if let Some(prior_g1) = self.backward[g2_vertex as usize] {
            self.unset(prior_g1);
        }

        self.forward[g1_vertex as usize] = Some(g2_vertex);
        self.backward[g2_vertex as usize] = Some(g1_vertex);
        self.used[g2_vertex as usize] = true;
        self.mapped_count += 1;
    }

    /// Remove `g1_vertex`'s mapping. Returns whether one existed.
    pub fn unset(&mut self, g1_vertex: Vertex) -> bool {
        debug_assert!((g1_vertex as usize) < self.forward.len());
        let Some(g2_vertex) = self.forward[g1_vertex as usize].take() else {
            return false;
        };
        self.backward[g2_vertex as usize] = None;
        self.used[g2_vertex as usize] = false;
        self.mapped_count -= 1;
        true
    }

    /// Image of `g1_vertex`, if mapped.
    #[inline]
    #[must_use]
    pub fn get(&self, g1_vertex: Vertex) -> Option<Vertex> {
        debug_assert!((g1_vertex as usize) < self.forward.len());
        self.forward[g1_vertex as usize]
    }

    /// Preimage of `g2_vertex`, if used.
    #[inline]
    #[must_use]
    pub fn get_inverse(&self, g2_vertex: Vertex) -> Option<Vertex> {
        debug_assert!((g2_vertex as usize) < self.backward.len());
        self.backward[g2_vertex as usize]
    }

    /// Whether `g1_vertex` is mapped.
    #[inline]
    #[must_use]
    pub fn is_mapped(&self, g1_vertex: Vertex) -> bool {
        self.get(g1_vertex).is_some()
    }

    /// Whether `g2_vertex` is the image of some G1 vertex.
    #[inline]
    #[must_use]
    pub fn is_used(&self, g2_vertex: Vertex) -> bool {
        debug_assert!((g2_vertex as usize) < self.used.len());
        self.used[g2_vertex as usize]
    }

    /// Number of mapped G1 vertices.
    #[inline]
    #[must_use]
    pub fn mapped_count(&self) -> u32 {
        self.mapped_count
    }

    /// Whether every G1 vertex is mapped.
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.mapped_count as usize == self.forward.len()
    }

    /// Currently unused G2 vertices, ascending.
    pub fn free_g2(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.used
            .iter()
            .enumerate()
            .filter(|(_, used)| !**used)
            .map(|(v, _)| v as Vertex)
    }

    /// Currently unmapped G1 vertices, ascending.
    pub fn unmapped_g1(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.forward
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_none())
            .map(|(v, _)| v as Vertex)
    }

    /// Mapped `(g1, g2)` pairs in ascending G1 order.
    pub fn pairs(&self) -> impl Iterator<Item = (Vertex, Vertex)> + '_ {
        self.forward
            .iter()
            .enumerate()
            .filter_map(|(u, m)| m.map(|v| (u as Vertex, v)))
    }
}

/// Two assignments are equal iff every G1 vertex maps identically; the
/// inverse and the mask are derived data.
impl PartialEq for Assignment {
    fn eq(&self, other: &Self) -> bool {
        self.forward == other.forward
    }
}

impl Eq for Assignment {}
