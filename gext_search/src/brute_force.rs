//! Exhaustive branch-and-bound search.
//!
//! Depth-first enumeration of every injective placement, in natural G1
//! vertex order, with the partial cost carried down the tree. Once k
//! results are held, subtrees whose partial cost already reaches the k-th
//! best are cut. Exact, and the yardstick the other algorithms are tested
//! against; practical up to roughly ten pattern vertices.

#[cfg(feature = "rayon")]
use rayon::prelude::*;
use tracing::debug;

use gext_common::config::SearchConfig;
use gext_common::graph::{Vertex, WeightedDigraph};

use crate::assignment::Assignment;
use crate::best_k::BestK;
use crate::cost::pair_cost;

struct Dfs<'a> {
    g1: &'a WeightedDigraph,
    g2: &'a WeightedDigraph,
    best: BestK,
    expanded: u64,
    budget: Option<u64>,
}

impl Dfs<'_> {
    fn out_of_budget(&self) -> bool {
        self.budget.is_some_and(|limit| self.expanded >= limit)
    }

    fn recurse(&mut self, assignment: &mut Assignment, depth: Vertex, partial_cost: u64) {
        if depth == self.g1.vertex_count() {
            self.best.insert(partial_cost, assignment.clone());
            return;
        }

        let candidates: Vec<Vertex> = assignment.free_g2().collect();
        for v2 in candidates {
            if self.out_of_budget() {
                return;
            }
            self.expanded += 1;

            let cost = partial_cost + pair_cost(self.g1, self.g2, assignment, depth, v2);
            if let Some(bound) = self.best.bound()
                && cost >= bound
            {
                continue;
            }

            assignment.set(depth, v2);
            self.recurse(assignment, depth + 1, cost);
            assignment.unset(depth);
        }
    }
}

/// Enumerate all placements of `g1` into `g2`, returning the k cheapest.
///
/// Returns an empty set when `g1` has more vertices than `g2`. With the
/// `rayon` feature the root branches run in parallel, each under its own
/// expansion budget.
pub fn search(g1: &WeightedDigraph, g2: &WeightedDigraph, config: &SearchConfig) -> BestK {
    let n1 = g1.vertex_count();
    let n2 = g2.vertex_count();
    if n1 > n2 {
        return BestK::new(config.k);
    }
    if n1 == 0 {
        let mut best = BestK::new(config.k);
        best.insert(0, Assignment::new(0, n2));
        return best;
    }

    #[cfg(feature = "rayon")]
    {
        // Root branches run in parallel, each pruning against its own result
        // set under its own expansion budget, merged once all are done.
        let branches = (0..n2).into_par_iter().map(|v2| {
            let mut dfs = Dfs {
                g1,
                g2,
                best: BestK::new(config.k),
                expanded: 1,
                budget: config.max_expansions,
            };
            let mut assignment = Assignment::new(n1, n2);
            let cost = pair_cost(g1, g2, &assignment, 0, v2);
            assignment.set(0, v2);
            dfs.recurse(&mut assignment, 1, cost);
            debug!(root = v2, expanded = dfs.expanded, "root branch done");
            (dfs.best, dfs.expanded)
        });

        let mut best = BestK::new(config.k);
        let mut expanded = 0u64;
        for (branch_best, branch_expanded) in branches.collect::<Vec<_>>() {
            best.merge(branch_best);
            expanded += branch_expanded;
        }
        debug!(expanded, results = best.len(), "brute force finished");
        best
    }

    #[cfg(not(feature = "rayon"))]
    {
        // One result set across every root, so a bound found under an early
        // root keeps pruning under all the later ones.
        let mut dfs = Dfs {
            g1,
            g2,
            best: BestK::new(config.k),
            expanded: 0,
            budget: config.max_expansions,
        };
        let mut assignment = Assignment::new(n1, n2);
        for v2 in 0..n2 {
            if dfs.out_of_budget() {
                break;
            }
            dfs.expanded += 1;

            let cost = pair_cost(g1, g2, &assignment, 0, v2);
            if let Some(bound) = dfs.best.bound()
                && cost >= bound
            {
                continue;
            }

            assignment.set(0, v2);
            dfs.recurse(&mut assignment, 1, cost);
            assignment.unset(0);
        }
        debug!(
            expanded = dfs.expanded,
            results = dfs.best.len(),
            "brute force finished"
        );
        dfs.best
    }
}
