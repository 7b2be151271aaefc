//! Side-by-side algorithm comparison on built-in instance tables.
//!
//! Runs two algorithms over a fixed list of generator specs and prints one
//! row per instance: sizes, densities, the cost each algorithm reached,
//! whether its mapping passed verification, and wall-clock time. Costs are
//! recomputed from scratch, never taken from the search's own bookkeeping.

use std::fmt::Write as _;
use std::time::Instant;

use tracing::info;

use gext_common::config::{Algorithm, SearchConfig};
use gext_common::graph::WeightedDigraph;
use gext_gen::{GraphSpec, generate_pair};
use gext_search::{Assignment, search_best_k, total_cost};

/// Small instances both exact algorithms can finish quickly.
fn small_specs() -> Vec<GraphSpec> {
    let spec = |size_g1, size_g2, density_g1, density_g2, g1_from_g2| GraphSpec {
        size_g1,
        size_g2,
        density_g1,
        density_g2,
        g1_from_g2,
        seed: 0xDEAD_C0DE,
    };
    vec![
        // Basic sanity checks.
        spec(3, 3, 0.0, 0.0, false),
        spec(4, 4, 3.0, 0.0, false),
        spec(4, 4, 0.0, 3.0, false),
        spec(5, 5, 1.0, 2.0, true),
        spec(4, 6, 1.0, 1.8, true),
        spec(6, 8, 0.8, 2.0, true),
        spec(7, 9, 0.4, 1.5, true),
        spec(8, 8, 2.5, 0.5, false),
        spec(6, 9, 1.5, 1.5, false),
        spec(7, 8, 30.0, 35.0, false),
        spec(6, 9, 0.9, 30.0, true),
        spec(9, 9, 1.2, 1.5, false),
        spec(8, 10, 0.9, 1.2, true),
        spec(10, 10, 30.0, 40.0, false),
        spec(11, 11, 30.0, 40.0, false),
        spec(9, 12, 20.0, 10.0, false),
    ]
}

/// Large instances only the bounded searches should attempt.
fn large_specs() -> Vec<GraphSpec> {
    let spec = |size_g1, size_g2, density_g1, density_g2| GraphSpec {
        size_g1,
        size_g2,
        density_g1,
        density_g2,
        g1_from_g2: true,
        seed: 0xDEAD_C0DE,
    };
    vec![
        spec(50, 70, 1.0, 1.5),
        spec(60, 80, 0.9, 1.8),
        spec(70, 90, 0.75, 1.2),
        spec(80, 100, 0.5, 2.0),
        spec(90, 110, 0.3, 1.0),
    ]
}

/// Re-derive every invariant of a search result from scratch.
fn verify_assignment(g1: &WeightedDigraph, g2: &WeightedDigraph, assignment: &Assignment) -> bool {
    let n1 = g1.vertex_count();
    let n2 = g2.vertex_count();
    if assignment.size_g1() != n1 || assignment.size_g2() != n2 {
        return false;
    }

    let mut mapped = 0u32;
    for u in 0..n1 {
        if let Some(v) = assignment.get(u) {
            if v >= n2 || assignment.get_inverse(v) != Some(u) {
                return false;
            }
            mapped += 1;
        }
    }
    for v in 0..n2 {
        if let Some(u) = assignment.get_inverse(v)
            && assignment.get(u) != Some(v)
        {
            return false;
        }
    }
    if mapped != assignment.mapped_count() {
        return false;
    }

    // Feasible instances must come back fully mapped.
    if n1 <= n2 {
        assignment.mapped_count() == n1
    } else {
        assignment.mapped_count() <= n2
    }
}

struct Outcome {
    cost: Option<u64>,
    verified: bool,
    millis: f64,
}

fn run_one(g1: &WeightedDigraph, g2: &WeightedDigraph, algorithm: Algorithm) -> Outcome {
    let config = SearchConfig::builder().algorithm(algorithm).build();
    let start = Instant::now();
    let results = search_best_k(g1, g2, &config);
    let millis = start.elapsed().as_secs_f64() * 1e3;

    match results.first() {
        Some((_, assignment)) => Outcome {
            cost: Some(total_cost(g1, g2, assignment)),
            verified: verify_assignment(g1, g2, assignment),
            millis,
        },
        None => Outcome {
            cost: None,
            verified: false,
            millis,
        },
    }
}

/// Run `first` against `second` over the chosen spec table and print the
/// comparison to stdout.
pub fn run(first: Algorithm, second: Algorithm, large: bool) {
    let specs = if large { large_specs() } else { small_specs() };
    info!(?first, ?second, instances = specs.len(), "comparing");

    let mut out = String::new();
    let _ = writeln!(
        out,
        "--- Testing Correctness: {first:?} vs {second:?} ---"
    );
    let _ = writeln!(
        out,
        "{:<6}{:<8}{:<8}{:<8}{:<8}{:<10}{:<15}{:<15}{:<15}{:<15}{:<20}{:<20}",
        "Idx",
        "G1_S",
        "G2_S",
        "G1_D",
        "G2_D",
        "G1_on_G2",
        "A_Cost",
        "B_Cost",
        "A_Map_OK",
        "B_Map_OK",
        "A_Time (ms)",
        "B_Time (ms)"
    );
    let _ = writeln!(out, "{}", "-".repeat(140));

    for (idx, spec) in specs.iter().enumerate() {
        let (g1, g2) = generate_pair(spec);
        let a = run_one(&g1, &g2, first);
        let b = run_one(&g1, &g2, second);

        let fmt_cost = |cost: Option<u64>| match cost {
            Some(c) => c.to_string(),
            None => "-".to_string(),
        };
        let _ = writeln!(
            out,
            "{:<6}{:<8}{:<8}{:<8.1}{:<8.1}{:<10}{:<15}{:<15}{:<15}{:<15}{:<20.3}{:<20.3}",
            idx,
            spec.size_g1,
            spec.size_g2,
            spec.density_g1,
            spec.density_g2,
            if spec.g1_from_g2 { "Yes" } else { "No" },
            fmt_cost(a.cost),
            fmt_cost(b.cost),
            if a.verified { "OK" } else { "FAIL" },
            if b.verified { "OK" } else { "FAIL" },
            a.millis,
            b.millis
        );
    }
    let _ = writeln!(out, "{}", "-".repeat(140));
    print!("{out}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_accepts_search_output() {
        let (g1, g2) = generate_pair(&small_specs()[4]);
        let config = SearchConfig::default();
        let results = search_best_k(&g1, &g2, &config);
        assert!(verify_assignment(&g1, &g2, &results[0].1));
    }

    #[test]
    fn verify_rejects_partial_mapping_on_feasible_instance() {
        let g1 = WeightedDigraph::new(3);
        let g2 = WeightedDigraph::new(4);
        let mut partial = Assignment::new(3, 4);
        partial.set(0, 0);
        assert!(!verify_assignment(&g1, &g2, &partial));
    }

    #[test]
    fn verify_rejects_mismatched_shape() {
        let g1 = WeightedDigraph::new(3);
        let g2 = WeightedDigraph::new(4);
        let wrong = Assignment::new(2, 4);
        assert!(!verify_assignment(&g1, &g2, &wrong));
    }

    #[test]
    fn spec_tables_are_nonempty() {
        assert_eq!(small_specs().len(), 16);
        assert_eq!(large_specs().len(), 5);
    }
}
