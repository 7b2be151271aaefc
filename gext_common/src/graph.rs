//! Dense weighted directed multigraph.
//!
//! Edge weight doubles as multiplicity: `add_edges(u, v, 3)` is three
//! parallel `u -> v` edges. Weights live in a row-major `n * n` matrix for
//! O(1) lookup; per-vertex adjacency lists are maintained alongside it so
//! neighbour iteration is O(degree) rather than O(n).

/// Vertex index into a [`WeightedDigraph`].
pub type Vertex = u32;

/// Edge weight / multiplicity.
pub type Weight = u32;

/// A directed multigraph over the fixed vertex range `0..vertex_count()`.
///
/// Self-loops are permitted. Graphs are immutable inside the search engine;
/// mutation happens only during construction (parsers, generators).
#[derive(Clone, Debug)]
pub struct WeightedDigraph {
    vertices: u32,
    edge_count: u64,
    matrix: Vec<Weight>,
    out_adj: Vec<Vec<Vertex>>,
    in_adj: Vec<Vec<Vertex>>,
    // Undirected, deduplicated neighbour lists: u appears once in
    // neighbors[v] if any of (v,u) / (u,v) carries weight.
    neighbors: Vec<Vec<Vertex>>,
}

impl WeightedDigraph {
    /// Create an edgeless graph with `vertices` vertices.
    #[must_use]
    pub fn new(vertices: u32) -> Self {
        let n = vertices as usize;
        Self {
            vertices,
            edge_count: 0,
            matrix: vec![0; n * n],
            out_adj: vec![Vec::new(); n],
            in_adj: vec![Vec::new(); n],
            neighbors: vec![Vec::new(); n],
        }
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> u32 {
        self.vertices
    }

    /// Total edge weight over all ordered pairs.
    #[must_use]
    pub fn edge_count(&self) -> u64 {
        self.edge_count
    }

    /// Weight of the directed edge `u -> v`, zero if absent.
    #[inline]
    #[must_use]
    pub fn weight(&self, u: Vertex, v: Vertex) -> Weight {
        debug_assert!(u < self.vertices);
        debug_assert!(v < self.vertices);
        self.matrix[u as usize * self.vertices as usize + v as usize]
    }

    /// Add `weight` parallel edges `u -> v`, accumulating onto any existing
    /// weight.
    pub fn add_edges(&mut self, u: Vertex, v: Vertex, weight: Weight) {
        debug_assert!(u < self.vertices);
        debug_assert!(v < self.vertices);
        if weight == 0 {
            return;
        }

        let prior = self.weight(u, v);
        if prior == 0 {
            self.out_adj[u as usize].push(v);
            self.in_adj[v as usize].push(u);
            if self.weight(v, u) == 0 {
                self.neighbors[u as usize].push(v);
                if u != v {
                    self.neighbors[v as usize].push(u);
                }
            }
        }
        self.matrix[u as usize * self.vertices as usize + v as usize] = prior + weight;
        self.edge_count += u64::from(weight);
    }

    /// Remove `weight` parallel edges `u -> v`.
    ///
    /// Removing more weight than present is a caller bug; debug builds
    /// assert, release builds saturate at zero.
    pub fn remove_edges(&mut self, u: Vertex, v: Vertex, weight: Weight) {
        debug_assert!(u < self.vertices);
        debug_assert!(v < self.vertices);
        let prior = self.weight(u, v);
        debug_assert!(prior >= weight);

        let removed = weight.min(prior);
        let remaining = prior - removed;
        self.matrix[u as usize * self.vertices as usize + v as usize] = remaining;
        self.edge_count -= u64::from(removed);

        if remaining == 0 && removed > 0 {
            self.out_adj[u as usize].retain(|&x| x != v);
            self.in_adj[v as usize].retain(|&x| x != u);
            if self.weight(v, u) == 0 {
                self.neighbors[u as usize].retain(|&x| x != v);
                if u != v {
                    self.neighbors[v as usize].retain(|&x| x != u);
                }
            }
        }
    }

    /// Vertices adjacent to `v` in either direction, each listed once.
    #[inline]
    #[must_use]
    pub fn neighbors(&self, v: Vertex) -> &[Vertex] {
        debug_assert!(v < self.vertices);
        &self.neighbors[v as usize]
    }

    /// Number of distinct neighbours of `v` (either direction).
    #[inline]
    #[must_use]
    pub fn neighbor_count(&self, v: Vertex) -> u32 {
        self.neighbors[v as usize].len() as u32
    }

    /// Call `f(weight, target)` for every outgoing edge of `v`.
    pub fn for_each_out_edge(&self, v: Vertex, mut f: impl FnMut(Weight, Vertex)) {
        debug_assert!(v < self.vertices);
        for &u in &self.out_adj[v as usize] {
            f(self.weight(v, u), u);
        }
    }

    /// Call `f(weight, source)` for every incoming edge of `v`.
    pub fn for_each_in_edge(&self, v: Vertex, mut f: impl FnMut(Weight, Vertex)) {
        debug_assert!(v < self.vertices);
        for &u in &self.in_adj[v as usize] {
            f(self.weight(u, v), u);
        }
    }

    /// Call `f(weight, source, target)` for every directed edge touching `v`
    /// (outgoing first, then incoming).
    pub fn for_each_edge_of(&self, v: Vertex, mut f: impl FnMut(Weight, Vertex, Vertex)) {
        debug_assert!(v < self.vertices);
        for &u in &self.out_adj[v as usize] {
            f(self.weight(v, u), v, u);
        }
        for &u in &self.in_adj[v as usize] {
            f(self.weight(u, v), u, v);
        }
    }

    /// Call `f(weight, source, target)` for every directed edge in the graph,
    /// in row-major order.
    pub fn for_each_edge(&self, mut f: impl FnMut(Weight, Vertex, Vertex)) {
        for u in 0..self.vertices {
            for &v in &self.out_adj[u as usize] {
                f(self.weight(u, v), u, v);
            }
        }
    }
}

impl PartialEq for WeightedDigraph {
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices && self.matrix == other.matrix
    }
}

impl Eq for WeightedDigraph {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_edges_accumulates() {
        let mut g = WeightedDigraph::new(3);
        g.add_edges(0, 1, 1);
        g.add_edges(0, 1, 2);
        assert_eq!(g.weight(0, 1), 3);
        assert_eq!(g.weight(1, 0), 0);
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn remove_edges_decrements_and_cleans_adjacency() {
        let mut g = WeightedDigraph::new(3);
        g.add_edges(0, 1, 2);
        g.remove_edges(0, 1, 1);
        assert_eq!(g.weight(0, 1), 1);
        assert_eq!(g.neighbors(0), &[1]);

        g.remove_edges(0, 1, 1);
        assert_eq!(g.weight(0, 1), 0);
        assert!(g.neighbors(0).is_empty());
        assert!(g.neighbors(1).is_empty());
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn neighbors_deduplicate_both_directions() {
        let mut g = WeightedDigraph::new(3);
        g.add_edges(0, 1, 1);
        g.add_edges(1, 0, 1);
        g.add_edges(0, 2, 1);
        assert_eq!(g.neighbors(0), &[1, 2]);
        assert_eq!(g.neighbors(1), &[0]);
        assert_eq!(g.neighbor_count(0), 2);
    }

    #[test]
    fn removing_one_direction_keeps_neighbor() {
        let mut g = WeightedDigraph::new(2);
        g.add_edges(0, 1, 1);
        g.add_edges(1, 0, 1);
        g.remove_edges(0, 1, 1);
        // 1 -> 0 still exists, so the pair stays adjacent.
        assert_eq!(g.neighbors(0), &[1]);
        assert_eq!(g.neighbors(1), &[0]);
    }

    #[test]
    fn self_loop_listed_once() {
        let mut g = WeightedDigraph::new(2);
        g.add_edges(0, 0, 4);
        assert_eq!(g.weight(0, 0), 4);
        assert_eq!(g.neighbors(0), &[0]);
        assert_eq!(g.edge_count(), 4);
    }

    #[test]
    fn directed_edge_iteration() {
        let mut g = WeightedDigraph::new(3);
        g.add_edges(0, 1, 2);
        g.add_edges(2, 0, 5);

        let mut out = Vec::new();
        g.for_each_out_edge(0, |w, u| out.push((w, u)));
        assert_eq!(out, vec![(2, 1)]);

        let mut incoming = Vec::new();
        g.for_each_in_edge(0, |w, u| incoming.push((w, u)));
        assert_eq!(incoming, vec![(5, 2)]);

        let mut all = Vec::new();
        g.for_each_edge(|w, u, v| all.push((w, u, v)));
        assert_eq!(all, vec![(2, 0, 1), (5, 2, 0)]);
    }
}
