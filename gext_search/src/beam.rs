//! Beam-bounded A*.
//!
//! One bounded frontier per search depth: level `i` holds the partial
//! assignments with `i + 1` mapped vertices, sorted by `f` and capped at the
//! beam width, so memory stays at `n1 * width` nodes no matter how bushy the
//! tree is. A master queue keyed by each level's best `f` decides which
//! level to expand next, which keeps the behaviour best-first across levels
//! rather than strictly layered. The width cap discards nodes, so unlike
//! plain A* the result is not guaranteed optimal.

use std::cmp::Reverse;
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

/// Frontier for one depth: at most `width` nodes, ascending by `f`.
struct Level {
    width: usize,
    nodes: Vec<Node>,
}

impl Level {
    fn new(width: usize) -> Self {
        Self {
            width,
            nodes: Vec::with_capacity(width + 1),
        }
    }

    fn best_f(&self) -> Option<u64> {
        self.nodes.first().map(|n| n.f)
    }

    /// Insert keeping the array sorted; the worst node falls off the end
    /// when the width is exceeded.
    fn push(&mut self, node: Node) {
        let pos = self.nodes.partition_point(|held| held.f <= node.f);
        if pos >= self.width {
            return;
        }
        self.nodes.insert(pos, node);
        self.nodes.truncate(self.width);
    }

    fn pop_best(&mut self) -> Option<Node> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(self.nodes.remove(0))
        }
    }
}

/// Beam A* for the k cheapest assignments of `g1` into `g2`.
///
/// `config.beam_width` bounds every level's frontier. Returns an empty set
/// when `g1` has more vertices than `g2`; results are cheapest-first but may
/// be suboptimal if the beam discarded the optimum's ancestors.
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

    let width = config.beam_width.max(1);
    let mut levels: Vec<Level> = (0..n1).map(|_| Level::new(width)).collect();

    // The master queue is lazy: every mutation of a level pushes a fresh
    // (best_f, level) key, and stale keys are skipped on pop.
    let mut master: BinaryHeap<Reverse<(u64, usize)>> = BinaryHeap::new();

    let empty = Assignment::new(n1, n2);
    let Some(v_start) = pick_next_vertex(g1, &empty) else {
        return best;
    };
    for v2 in 0..n2 {
        let g = pair_cost(g1, g2, &empty, v_start, v2);
        let mut assignment = empty.clone();
        assignment.set(v_start, v2);
        let f = g + heuristic(g1, g2, &assignment);
        levels[0].push(Node { f, g, assignment });
    }
    if let Some(f) = levels[0].best_f() {
        master.push(Reverse((f, 0)));
    }

    let mut expanded = 0u64;
    while let Some(Reverse((key_f, level_idx))) = master.pop() {
        if levels[level_idx].best_f() != Some(key_f) {
            if let Some(f) = levels[level_idx].best_f() {
                master.push(Reverse((f, level_idx)));
            }
            continue;
        }

        if let Some(bound) = best.bound()
            && key_f >= bound
        {
            // Fresh key: every remaining node in every level is at least
            // this expensive.
            break;
        }

        if config.max_expansions.is_some_and(|limit| expanded >= limit) {
            debug!(expanded, "expansion budget exhausted");
            break;
        }
        expanded += 1;

        let Some(node) = levels[level_idx].pop_best() else {
            continue;
        };
        if let Some(f) = levels[level_idx].best_f() {
            master.push(Reverse((f, level_idx)));
        }

        if node.assignment.is_complete() {
            best.insert(node.g, node.assignment);
            continue;
        }

        let Some(v1) = pick_next_vertex(g1, &node.assignment) else {
            continue;
        };
        let next_idx = level_idx + 1;
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
            levels[next_idx].push(Node {
                f,
                g,
                assignment: child,
            });
        }
        if let Some(f) = levels[next_idx].best_f() {
            master.push(Reverse((f, next_idx)));
        }
    }

    debug!(expanded, results = best.len(), "beam a* finished");
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
    fn finds_exact_embedding() {
        let g1 = cycle(3, 1);
        let mut g2 = WeightedDigraph::new(6);
        g2.add_edges(2, 4, 1);
        g2.add_edges(4, 5, 1);
        g2.add_edges(5, 2, 1);
        let best = search(&g1, &g2, &config_k(1));
        assert_eq!(best.best_cost(), Some(0));
    }

    #[test]
    fn wide_beam_matches_brute_force() {
        // With the beam at least as wide as any level, nothing is
        // discarded and the optimum survives.
        let mut g1 = WeightedDigraph::new(3);
        g1.add_edges(0, 1, 2);
        g1.add_edges(1, 2, 3);
        let mut g2 = WeightedDigraph::new(4);
        g2.add_edges(0, 1, 1);
        g2.add_edges(1, 2, 2);
        g2.add_edges(2, 3, 3);
        let config = SearchConfig {
            k: 1,
            beam_width: 64,
            ..SearchConfig::default()
        };
        let exact = brute_force::search(&g1, &g2, &config);
        let beam = search(&g1, &g2, &config);
        assert_eq!(beam.best_cost(), exact.best_cost());
    }

    #[test]
    fn reported_costs_match_recomputation() {
        let g1 = cycle(4, 2);
        let g2 = cycle(5, 1);
        for (cost, assignment) in search(&g1, &g2, &config_k(3)).entries() {
            assert!(assignment.is_complete());
            assert_eq!(*cost, total_cost(&g1, &g2, assignment));
        }
    }

    #[test]
    fn infeasible_returns_empty() {
        let g1 = WeightedDigraph::new(3);
        let g2 = WeightedDigraph::new(2);
        assert!(search(&g1, &g2, &config_k(1)).is_empty());
    }

    #[test]
    fn width_one_still_completes() {
        let g1 = cycle(3, 1);
        let g2 = cycle(4, 1);
        let config = SearchConfig {
            beam_width: 1,
            ..SearchConfig::default()
        };
        // Greedy descent: one node per level survives, so some complete
        // assignment is always reached.
        let best = search(&g1, &g2, &config);
        assert_eq!(best.len(), 1);
    }

    #[test]
    fn level_push_respects_width() {
        let mut level = Level::new(2);
        for f in [5u64, 3, 4, 1] {
            level.push(Node {
                f,
                g: f,
                assignment: Assignment::new(1, 1),
            });
        }
        assert_eq!(level.best_f(), Some(1));
        assert_eq!(level.nodes.len(), 2);
        assert_eq!(level.nodes[1].f, 3);
    }
}
