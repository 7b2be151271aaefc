//! Fail-first vertex ordering.
//!
//! The branching heuristic used by the A* family: pick the unmapped G1
//! vertex whose neighbourhood is already most constrained by the partial
//! assignment, so contradictions surface as high up the tree as possible.
//! Tie-break is a tunable strategy choice; this implementation fixes
//! most-constraining-first (prefer higher total degree), with the later
//! index winning full ties, and applies it uniformly.

use gext_common::graph::{Vertex, WeightedDigraph};

use crate::assignment::Assignment;

/// Select the next G1 vertex to branch on, or `None` when every vertex is
/// already mapped.
///
/// With an empty assignment the highest-degree vertex is chosen; otherwise
/// the unmapped vertex with the most already-mapped neighbours wins.
#[must_use]
pub fn pick_next_vertex(g1: &WeightedDigraph, assignment: &Assignment) -> Option<Vertex> {
    if assignment.mapped_count() as usize == g1.vertex_count() as usize {
        return None;
    }

    if assignment.mapped_count() == 0 {
        let mut best = 0;
        let mut max_neighbors = 0;
        for v1 in 0..g1.vertex_count() {
            let count = g1.neighbor_count(v1);
            if count >= max_neighbors {
                max_neighbors = count;
                best = v1;
            }
        }
        return Some(best);
    }

    let mut best = None;
    let mut max_mapped = 0u32;
    let mut max_total = 0u32;

    for v1 in 0..g1.vertex_count() {
        if assignment.is_mapped(v1) {
            continue;
        }

        let mut mapped = 0u32;
        let mut total = 0u32;
        for &neighbor in g1.neighbors(v1) {
            if assignment.is_mapped(neighbor) {
                mapped += 1;
            }
            total += 1;
        }

        if mapped > max_mapped || (mapped == max_mapped && total >= max_total) {
            best = Some(v1);
            max_mapped = mapped;
            max_total = total;
        }
    }

    // At least one unmapped vertex exists, and an isolated one still wins
    // the (0, 0) comparison via the >= tie-break.
    debug_assert!(best.is_some());
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_graph(n: u32) -> WeightedDigraph {
        let mut g = WeightedDigraph::new(n);
        for v in 0..n - 1 {
            g.add_edges(v, v + 1, 1);
        }
        g
    }

    #[test]
    fn empty_assignment_prefers_max_degree() {
        // Star centred on 2.
        let mut g = WeightedDigraph::new(4);
        g.add_edges(2, 0, 1);
        g.add_edges(2, 1, 1);
        g.add_edges(2, 3, 1);
        let a = Assignment::new(4, 4);
        assert_eq!(pick_next_vertex(&g, &a), Some(2));
    }

    #[test]
    fn prefers_most_mapped_neighbors() {
        // Path 0-1-2-3; with 1 mapped, both 0 and 2 have one mapped
        // neighbour, but 2 has higher total degree.
        let g = path_graph(4);
        let mut a = Assignment::new(4, 4);
        a.set(1, 0);
        assert_eq!(pick_next_vertex(&g, &a), Some(2));
    }

    #[test]
    fn later_index_wins_full_ties() {
        // 4-cycle: with 0 mapped, vertices 1 and 3 tie on both criteria.
        let mut g = WeightedDigraph::new(4);
        for (u, v) in [(0, 1), (1, 2), (2, 3), (3, 0)] {
            g.add_edges(u, v, 1);
        }
        let mut a = Assignment::new(4, 4);
        a.set(0, 0);
        assert_eq!(pick_next_vertex(&g, &a), Some(3));
    }

    #[test]
    fn isolated_vertices_still_selected() {
        let g = WeightedDigraph::new(3);
        let mut a = Assignment::new(3, 3);
        a.set(0, 0);
        // Degree ties scan to the later index.
        assert_eq!(pick_next_vertex(&g, &a), Some(2));
    }

    #[test]
    fn none_when_complete() {
        let g = path_graph(2);
        let mut a = Assignment::new(2, 2);
        a.set(0, 0);
        a.set(1, 1);
        assert_eq!(pick_next_vertex(&g, &a), None);
    }
}
