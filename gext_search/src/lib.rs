//! Inexact search for weighted subgraph embeddings.
//!
//! Given a pattern graph G1 and a host graph G2, every algorithm in this
//! crate looks for injective vertex assignments `G1 -> G2` minimising the
//! edge-weight deficit: the total weight that would have to be added to G2
//! for every G1 edge to fit under the assignment. A deficit of zero is an
//! exact weighted embedding.
//!
//! Four interchangeable engines share the same state ([`Assignment`]), cost
//! model ([`cost`]) and branching policy ([`ordering`]):
//!
//! - [`brute_force`]: exhaustive branch and bound, exact;
//! - [`astar`]: best-first with an admissible bound, exact for `k = 1`;
//! - [`beam`]: beam-bounded A*, memory-capped, near-optimal;
//! - [`mcts`]: Monte Carlo tree search, sampled, anytime.
//!
//! [`search_best_k`] dispatches on [`Algorithm`] and is the entry point the
//! command line uses.

pub mod assignment;
pub mod astar;
pub mod beam;
pub mod best_k;
pub mod brute_force;
pub mod cost;
pub mod extension;
pub mod mcts;
pub mod ordering;

use tracing::{info, warn};

use gext_common::config::{Algorithm, SearchConfig};
use gext_common::graph::WeightedDigraph;

pub use assignment::Assignment;
pub use best_k::BestK;
pub use cost::total_cost;
pub use extension::{EdgeExtension, minimal_edge_extension, minimal_extension};

/// Run the configured algorithm, returning up to `config.k` complete
/// assignments with their costs, cheapest first.
///
/// An empty result means the instance is infeasible (`g1` larger than `g2`)
/// or, for budgeted runs, that no complete assignment was reached in time.
#[must_use]
pub fn search_best_k(
    g1: &WeightedDigraph,
    g2: &WeightedDigraph,
    config: &SearchConfig,
) -> Vec<(u64, Assignment)> {
    if g1.vertex_count() > g2.vertex_count() {
        warn!(
            n1 = g1.vertex_count(),
            n2 = g2.vertex_count(),
            "pattern larger than host, no assignment exists"
        );
        return Vec::new();
    }

    info!(
        algorithm = ?config.algorithm,
        n1 = g1.vertex_count(),
        n2 = g2.vertex_count(),
        k = config.k,
        "searching"
    );

    let best = match config.algorithm {
        Algorithm::BruteForce => brute_force::search(g1, g2, config),
        Algorithm::AStar => astar::search(g1, g2, config),
        Algorithm::BeamAStar => beam::search(g1, g2, config),
        Algorithm::Mcts => mcts::search(g1, g2, config),
    };
    best.into_entries()
}
