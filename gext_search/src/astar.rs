//! Best-first search with the admissible deficit bound.
//!
//! Classic A* over partial assignments: `g` is the exact cost of the edges
//! committed so far, `h` the relaxed lower bound on the rest, and the
//! frontier pops the smallest `f = g + h`. Branching follows the fail-first
//! vertex ordering. Because `h` never overestimates, the first complete
//! assignment popped is optimal, and the search can stop outright once the
//! smallest `f` in the frontier reaches the k-th best finished cost.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use tracing::debug;

use gext_common::config::SearchConfig;
use gext_common::graph::WeightedDigraph;

use crate::assignment::Assignment;
use crate::best_k::BestK;
use crate::cost::{heuristic, pair_cost};
use crate::ordering::pick_next_vertex;

struct Node {
    f: u64,
    g: u64,
    assignment: Assignment,
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.g == other.g
    }
}

impl Eq for Node {}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    // Equal f ties break toward the larger g: deeper nodes are closer to
    // completion.
    fn cmp(&self, other: &Self) -> Ordering {
        self.f.cmp(&other.f).then(other.g.cmp(&self.g))
    }
}

/// Find the k cheapest complete assignments of `g1` into `g2`.
///
/// Returns an empty set when `g1` has more vertices than `g2`. Optimal for
/// `k = 1`; for larger k the search keeps popping until the frontier can no
/// longer beat the k-th best. `config.max_expansions` caps popped nodes and
/// turns the search into an anytime one.
pub fn search(g1: &WeightedDigraph, g2: &WeightedDigraph, config: &SearchConfig) -> BestK {
    let n1 = g1.vertex_count();
    let n2 = g2.vertex_count();
    let mut best = BestK::new(config.k);
    if n1 > n2 {
        return best;
    }
    if n1 == 0 {
        best.insert(0, Assignment::new(0, n2));
        return best;
    }

    let mut frontier: BinaryHeap<Reverse<Node>> = BinaryHeap::new();
    let root = Assignment::new(n1, n2);
    frontier.push(Reverse(Node {
        f: heuristic(g1, g2, &root),
        g: 0,
        assignment: root,
    }));

    let mut expanded = 0u64;
    while let Some(Reverse(node)) = frontier.pop() {
        if let Some(bound) = best.bound()
            && node.f >= bound
        {
            // Admissibility: nothing left in the frontier can improve the
            // held results.
            break;
        }

        if node.assignment.is_complete() {
            best.insert(node.g, node.assignment);
            continue;
        }

        if config.max_expansions.is_some_and(|limit| expanded >= limit) {
            debug!(expanded, "expansion budget exhausted");
            break;
        }
        expanded += 1;

        let Some(v1) = pick_next_vertex(g1, &node.assignment) else {
            continue;
        };

        for v2 in node.assignment.free_g2() {
            let g = node.g + pair_cost(g1, g2, &node.assignment, v1, v2);
            if let Some(bound) = best.bound()
                && g >= bound
            {
                continue;
            }
            let mut child = node.assignment.clone();
            child.set(v1, v2);
            let f = g + heuristic(g1, g2, &child);
            if let Some(bound) = best.bound()
                && f >= bound
            {
                continue;
            }
            frontier.push(Reverse(Node {
                f,
                g,
                assignment: child,
            }));
        }
    }

    debug!(expanded, results = best.len(), "a* finished");
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brute_force;
    use crate::cost::total_cost;

    fn config_k(k: usize) -> SearchConfig {
        SearchConfig {
            k,
            ..SearchConfig::default()
        }
    }

    fn cycle(n: u32, weight: u32) -> WeightedDigraph {
        let mut g = WeightedDigraph::new(n);
        for v in 0..n {
            g.add_edges(v, (v + 1) % n, weight);
        }
        g
    }

    #[test]
    fn finds_zero_cost_embedding() {
        // A 3-cycle hidden among otherwise unconnected host vertices.
        let g1 = cycle(3, 1);
        let mut g2 = WeightedDigraph::new(5);
        g2.add_edges(1, 2, 1);
        g2.add_edges(2, 4, 1);
        g2.add_edges(4, 1, 1);
        let best = search(&g1, &g2, &config_k(1));
        assert_eq!(best.best_cost(), Some(0));
    }

    #[test]
    fn agrees_with_brute_force_on_small_instances() {
        let mut g1 = WeightedDigraph::new(4);
        g1.add_edges(0, 1, 3);
        g1.add_edges(1, 2, 1);
        g1.add_edges(2, 3, 2);
        g1.add_edges(3, 0, 1);
        let mut g2 = WeightedDigraph::new(5);
        g2.add_edges(0, 1, 2);
        g2.add_edges(1, 2, 2);
        g2.add_edges(2, 3, 1);
        g2.add_edges(3, 4, 1);
        g2.add_edges(4, 0, 3);

        for k in [1, 3] {
            let exact = brute_force::search(&g1, &g2, &config_k(k));
            let astar = search(&g1, &g2, &config_k(k));
            let exact_costs: Vec<u64> = exact.entries().iter().map(|(c, _)| *c).collect();
            let astar_costs: Vec<u64> = astar.entries().iter().map(|(c, _)| *c).collect();
            assert_eq!(exact_costs, astar_costs, "k = {k}");
        }
    }

    #[test]
    fn reported_costs_match_recomputation() {
        let g1 = cycle(4, 2);
        let g2 = cycle(4, 1);
        for (cost, assignment) in search(&g1, &g2, &config_k(3)).entries() {
            assert_eq!(*cost, total_cost(&g1, &g2, assignment));
        }
    }

    #[test]
    fn infeasible_returns_empty() {
        let g1 = WeightedDigraph::new(4);
        let g2 = WeightedDigraph::new(2);
        assert!(search(&g1, &g2, &config_k(1)).is_empty());
    }

    #[test]
    fn results_are_distinct() {
        let g1 = cycle(3, 1);
        let g2 = cycle(4, 1);
        let best = search(&g1, &g2, &config_k(5));
        let entries = best.entries();
        for i in 0..entries.len() {
            for j in i + 1..entries.len() {
                assert_ne!(entries[i].1, entries[j].1);
            }
        }
    }

    #[test]
    fn budget_zero_yields_no_expansion_panic() {
        let g1 = cycle(3, 1);
        let g2 = cycle(4, 1);
        let config = SearchConfig {
            max_expansions: Some(0),
            ..SearchConfig::default()
        };
        assert!(search(&g1, &g2, &config).is_empty());
    }
}
