//! Cost model: edge-weight deficits.
//!
//! The cost of a mapping is the total weight that would have to be added to
//! G2 so that every G1 edge fits under the mapping. All functions here are
//! pure; the searches combine them incrementally (`pair_cost` /
//! `incremental_cost`) and steer with the admissible lower bound
//! (`heuristic`).

use gext_common::graph::{Vertex, WeightedDigraph};

use crate::assignment::Assignment;

/// Deficit of the single directed G1 edge `v1 -> u1` against its mapped G2
/// counterpart `v2 -> u2`.
#[inline]
fn directed_deficit(
    g1: &WeightedDigraph,
    v1: Vertex,
    u1: Vertex,
    g2: &WeightedDigraph,
    v2: Vertex,
    u2: Vertex,
) -> u64 {
    let needed = g1.weight(v1, u1);
    if needed == 0 {
        return 0;
    }
    let found = g2.weight(v2, u2);
    u64::from(needed.saturating_sub(found))
}

/// Deficit of the unordered pair `{v1, u1}` in both directions.
#[inline]
fn pair_deficit(
    g1: &WeightedDigraph,
    v1: Vertex,
    u1: Vertex,
    g2: &WeightedDigraph,
    v2: Vertex,
    u2: Vertex,
) -> u64 {
    directed_deficit(g1, v1, u1, g2, v2, u2) + directed_deficit(g1, u1, v1, g2, u2, v2)
}

/// Cost that assigning `v1 -> v2` would add on top of `assignment`, counting
/// both edge directions against every already-mapped G1 neighbour of `v1`
/// (and `v1`'s own self-loop, once).
///
/// `v1` itself need not be mapped in `assignment`; the candidate image `v2`
/// is taken from the arguments.
pub fn pair_cost(
    g1: &WeightedDigraph,
    g2: &WeightedDigraph,
    assignment: &Assignment,
    v1: Vertex,
    v2: Vertex,
) -> u64 {
    let mut cost = 0u64;
    for &neighbor in g1.neighbors(v1) {
        let u2 = if neighbor == v1 {
            v2
        } else {
            match assignment.get(neighbor) {
                Some(u2) => u2,
                None => continue,
            }
        };

        cost += directed_deficit(g1, v1, neighbor, g2, v2, u2);
        if v1 != neighbor {
            cost += directed_deficit(g1, neighbor, v1, g2, u2, v2);
        }
    }
    cost
}

/// Cost added by the most recent `assignment.set(newly_mapped, _)`.
///
/// Summing this over the order in which vertices were mapped reproduces
/// [`total_cost`] of the finished assignment; the searches rely on that
/// additivity for their `g` values.
pub fn incremental_cost(
    g1: &WeightedDigraph,
    g2: &WeightedDigraph,
    assignment: &Assignment,
    newly_mapped: Vertex,
) -> u64 {
    let Some(v2) = assignment.get(newly_mapped) else {
        debug_assert!(false, "incremental_cost on an unmapped vertex");
        return 0;
    };
    pair_cost(g1, g2, assignment, newly_mapped, v2)
}

/// Admissible lower bound on the cost of completing `assignment`.
///
/// Each unmapped G1 vertex contributes the cheapest cost it could incur
/// against the already-mapped part if placed on any free G2 vertex. The
/// relaxation ignores competition between unmapped vertices for the same G2
/// vertex, so it never overestimates. A vertex with no free candidates
/// contributes zero (the infeasible case is rejected before search).
pub fn heuristic(g1: &WeightedDigraph, g2: &WeightedDigraph, assignment: &Assignment) -> u64 {
    let free: Vec<Vertex> = assignment.free_g2().collect();

    let mut h = 0u64;
    for v1 in assignment.unmapped_g1() {
        let min_cost = free
            .iter()
            .map(|&v2| {
                let mut candidate = 0u64;
                for &neighbor in g1.neighbors(v1) {
                    let Some(u2) = assignment.get(neighbor) else {
                        continue;
                    };
                    candidate += pair_deficit(g1, v1, neighbor, g2, v2, u2);
                }
                candidate
            })
            .min()
            .unwrap_or(0);
        h += min_cost;
    }
    h
}

/// Total missing-edge weight of `assignment`: the O(E) recomputation used to
/// score finished mappings and to cross-check incremental bookkeeping.
pub fn total_cost(g1: &WeightedDigraph, g2: &WeightedDigraph, assignment: &Assignment) -> u64 {
    let mut missing = 0u64;
    for u in 0..g1.vertex_count() {
        let Some(mapped_u) = assignment.get(u) else {
            continue;
        };
        g1.for_each_out_edge(u, |needed, v| {
            let Some(mapped_v) = assignment.get(v) else {
                return;
            };
            let found = g2.weight(mapped_u, mapped_v);
            missing += u64::from(needed.saturating_sub(found));
        });
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_edge(n: u32, u: Vertex, v: Vertex, w: u32) -> WeightedDigraph {
        let mut g = WeightedDigraph::new(n);
        g.add_edges(u, v, w);
        g
    }

    #[test]
    fn deficit_of_forced_identity_mapping() {
        let g1 = single_edge(2, 0, 1, 10);
        let g2 = single_edge(2, 0, 1, 2);
        let mut a = Assignment::new(2, 2);
        a.set(0, 0);
        a.set(1, 1);
        assert_eq!(total_cost(&g1, &g2, &a), 8);
    }

    #[test]
    fn overweight_host_edge_costs_nothing() {
        let g1 = single_edge(2, 0, 1, 5);
        let g2 = single_edge(2, 0, 1, 10);
        let mut a = Assignment::new(2, 2);
        a.set(0, 0);
        a.set(1, 1);
        assert_eq!(total_cost(&g1, &g2, &a), 0);
    }

    #[test]
    fn directions_count_independently() {
        let mut g1 = WeightedDigraph::new(2);
        g1.add_edges(0, 1, 3);
        g1.add_edges(1, 0, 4);
        let g2 = WeightedDigraph::new(2);
        let mut a = Assignment::new(2, 2);
        a.set(0, 0);
        a.set(1, 1);
        assert_eq!(total_cost(&g1, &g2, &a), 7);
    }

    #[test]
    fn incremental_sums_match_total() {
        // Weighted triangle plus a self-loop, mapped onto a sparser host.
        let mut g1 = WeightedDigraph::new(3);
        g1.add_edges(0, 1, 2);
        g1.add_edges(1, 2, 3);
        g1.add_edges(2, 0, 1);
        g1.add_edges(1, 1, 2);

        let mut g2 = WeightedDigraph::new(4);
        g2.add_edges(1, 2, 1);
        g2.add_edges(2, 3, 3);

        for order in [[0, 1, 2], [2, 0, 1], [1, 2, 0]] {
            let mut a = Assignment::new(3, 4);
            let mut summed = 0u64;
            for v1 in order {
                a.set(v1, v1 + 1);
                summed += incremental_cost(&g1, &g2, &a, v1);
            }
            assert_eq!(summed, total_cost(&g1, &g2, &a), "order {order:?}");
        }
    }

    #[test]
    fn pair_cost_matches_commit_delta() {
        let mut g1 = WeightedDigraph::new(3);
        g1.add_edges(0, 1, 4);
        g1.add_edges(2, 1, 2);
        let mut g2 = WeightedDigraph::new(3);
        g2.add_edges(0, 1, 1);

        let mut a = Assignment::new(3, 3);
        a.set(0, 0);
        a.set(2, 2);

        let before = total_cost(&g1, &g2, &a);
        let speculative = pair_cost(&g1, &g2, &a, 1, 1);
        a.set(1, 1);
        assert_eq!(before + speculative, total_cost(&g1, &g2, &a));
    }

    #[test]
    fn heuristic_zero_on_empty_assignment() {
        let g1 = single_edge(3, 0, 1, 5);
        let g2 = WeightedDigraph::new(3);
        let a = Assignment::new(3, 3);
        // No mapped neighbours anywhere, so every per-vertex minimum is zero.
        assert_eq!(heuristic(&g1, &g2, &a), 0);
    }

    #[test]
    fn heuristic_sees_unavoidable_deficit() {
        // G1: 0 -> 1 weight 6. G2 has no edge out of vertex 0.
        let g1 = single_edge(2, 0, 1, 6);
        let g2 = WeightedDigraph::new(2);
        let mut a = Assignment::new(2, 2);
        a.set(0, 0);
        // Vertex 1 must land on the one free G2 vertex; the 0->1 edge is
        // entirely missing.
        assert_eq!(heuristic(&g1, &g2, &a), 6);
    }

    #[test]
    fn heuristic_no_free_vertices_contributes_zero() {
        let g1 = single_edge(3, 0, 1, 2);
        let g2 = WeightedDigraph::new(2);
        let mut a = Assignment::new(3, 2);
        a.set(0, 0);
        a.set(1, 1);
        // Vertex 2 has no candidates left; the bound degrades to zero
        // instead of panicking.
        assert_eq!(heuristic(&g1, &g2, &a), 0);
    }
}
