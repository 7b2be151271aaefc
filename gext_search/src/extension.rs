//! Edge extensions: the host-side repair implied by an assignment.
//!
//! Once a complete assignment is chosen, every under-weight G1 edge
//! corresponds to weight that would have to be added to G2. This module
//! enumerates those additions and can apply them, producing the cheapest
//! supergraph of G2 into which G1 embeds exactly under the assignment.

use gext_common::graph::{Vertex, Weight, WeightedDigraph};

use crate::assignment::Assignment;

/// One directed edge G2 is short of.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeExtension {
    /// Source vertex of the deficient edge in G1.
    pub g1_source: Vertex,
    /// Target vertex of the deficient edge in G1.
    pub g1_target: Vertex,
    /// Image of the source in G2.
    pub g2_source: Vertex,
    /// Image of the target in G2.
    pub g2_target: Vertex,
    /// Weight the G1 edge requires.
    pub weight_needed: Weight,
    /// Weight G2 currently carries on the image edge.
    pub weight_found: Weight,
}

impl EdgeExtension {
    /// Weight to add to G2 on `g2_source -> g2_target`.
    #[must_use]
    pub fn deficit(&self) -> Weight {
        self.weight_needed.saturating_sub(self.weight_found)
    }
}

/// Every directed G1 edge whose image in G2 is under-weight, in ascending
/// `(g1_source, g1_target)` order.
///
/// Empty iff the assignment embeds G1 exactly; the deficits sum to the
/// assignment's total cost. Unmapped endpoints are skipped, so a partial
/// assignment yields the extensions of its mapped core only.
#[must_use]
pub fn minimal_edge_extension(
    g1: &WeightedDigraph,
    g2: &WeightedDigraph,
    assignment: &Assignment,
) -> Vec<EdgeExtension> {
    let mut extensions = Vec::new();
    for u in 0..g1.vertex_count() {
        let Some(g2_source) = assignment.get(u) else {
            continue;
        };
        g1.for_each_out_edge(u, |needed, v| {
            let Some(g2_target) = assignment.get(v) else {
                return;
            };
            let found = g2.weight(g2_source, g2_target);
            if needed > found {
                extensions.push(EdgeExtension {
                    g1_source: u,
                    g1_target: v,
                    g2_source,
                    g2_target,
                    weight_needed: needed,
                    weight_found: found,
                });
            }
        });
    }
    extensions
}

/// `g2` plus exactly the deficits of `assignment`: the smallest host in
/// which the assignment embeds `g1` with zero cost.
#[must_use]
pub fn minimal_extension(
    g1: &WeightedDigraph,
    g2: &WeightedDigraph,
    assignment: &Assignment,
) -> WeightedDigraph {
    let mut extended = g2.clone();
    for ext in minimal_edge_extension(g1, g2, assignment) {
        extended.add_edges(ext.g2_source, ext.g2_target, ext.deficit());
    }
    extended
}
