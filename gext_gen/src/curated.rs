//! The fixed comparison suite.
//!
//! Fifteen named instances in three bands: small exact cases the optimal
//! algorithms must nail, larger approximate cases for the bounded searches,
//! and heavy multigraph cases that stress the weight handling rather than
//! the topology. Builders are deterministic, so runs are comparable across
//! machines.

use itertools::Itertools;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

use gext_common::graph::{Vertex, Weight, WeightedDigraph};

/// A named instance of the comparison suite.
pub struct TestCase {
    /// Stable identifier, also used as the output file stem.
    pub name: &'static str,
    /// Instance builder.
    pub build: fn() -> (WeightedDigraph, WeightedDigraph),
}

fn clique(n: u32) -> WeightedDigraph {
    let mut g = WeightedDigraph::new(n);
    for (i, j) in (0..n).cartesian_product(0..n) {
        if i != j {
            g.add_edges(i, j, 1);
        }
    }
    g
}

fn grid(width: u32, height: u32) -> WeightedDigraph {
    let mut g = WeightedDigraph::new(width * height);
    for (y, x) in (0..height).cartesian_product(0..width) {
        let u = y * width + x;
        if x + 1 < width {
            add_undirected(&mut g, u, u + 1, 1);
        }
        if y + 1 < height {
            add_undirected(&mut g, u, u + width, 1);
        }
    }
    g
}

fn ladder(len: u32) -> WeightedDigraph {
    let mut g = WeightedDigraph::new(2 * len);
    for i in 0..len {
        add_undirected(&mut g, i, len + i, 1);
        if i + 1 < len {
            add_undirected(&mut g, i, i + 1, 1);
            add_undirected(&mut g, len + i, len + i + 1, 1);
        }
    }
    g
}

fn petersen() -> WeightedDigraph {
    let mut g = WeightedDigraph::new(10);
    for i in 0..5 {
        add_undirected(&mut g, i, (i + 1) % 5, 1);
        add_undirected(&mut g, 5 + i, 5 + ((i + 2) % 5), 1);
        add_undirected(&mut g, i, i + 5, 1);
    }
    g
}

fn binary_tree(depth: u32) -> WeightedDigraph {
    let nodes = (1u32 << depth) - 1;
    let mut g = WeightedDigraph::new(nodes);
    for i in 0..nodes {
        for child in [2 * i + 1, 2 * i + 2] {
            if child < nodes {
                add_undirected(&mut g, i, child, 1);
            }
        }
    }
    g
}

fn seeded_random(n: u32, density: f64, seed: u64) -> WeightedDigraph {
    let mut g = WeightedDigraph::new(n);
    let mut rng = Pcg64Mcg::seed_from_u64(seed);
    for (i, j) in (0..n).tuple_combinations() {
        if rng.gen_range(0.0..1.0) < density {
            add_undirected(&mut g, i, j, 1);
        }
    }
    g
}

/// Complete graph whose edge `(i, j)` carries `(i*j + i + j) % modulus + 1`.
/// Topologically symmetric, weight-wise almost rigid.
fn arithmetic_clique(n: u32, modulus: u32) -> WeightedDigraph {
    let mut g = WeightedDigraph::new(n);
    for (i, j) in (0..n).cartesian_product(0..n) {
        if i != j {
            g.add_edges(i, j, (i * j + i + j) % modulus + 1);
        }
    }
    g
}

/// `K_{n,n}` where even left-side rows carry `heavy` on every edge and odd
/// rows carry 1.
fn heavy_bipartite(n: u32, heavy: Weight) -> WeightedDigraph {
    let mut g = WeightedDigraph::new(2 * n);
    for (i, j) in (0..n).cartesian_product(0..n) {
        let weight = if i % 2 == 0 { heavy } else { 1 };
        add_undirected(&mut g, i, n + j, weight);
    }
    g
}

fn star(n: u32) -> WeightedDigraph {
    let mut g = WeightedDigraph::new(n);
    for i in 1..n {
        add_undirected(&mut g, 0, i, 1);
    }
    g
}

/// Ring of `n` vertices where edge `(i, i+1)` carries `3^i % 100 + 1`.
fn modulo_ring(n: u32) -> WeightedDigraph {
    let mut g = WeightedDigraph::new(n);
    for i in 0..n {
        let weight = (3u64.pow(i) % 100 + 1) as Weight;
        add_undirected(&mut g, i, (i + 1) % n, weight);
    }
    g
}

/// Induced subgraph of `g` on its first `n` vertices, undirected edges only.
fn induced_prefix(g: &WeightedDigraph, n: u32) -> WeightedDigraph {
    let mut sub = WeightedDigraph::new(n);
    for (i, j) in (0..n).tuple_combinations() {
        if g.weight(i, j) > 0 {
            add_undirected(&mut sub, i, j, 1);
        }
    }
    sub
}

fn add_undirected(g: &mut WeightedDigraph, u: Vertex, v: Vertex, weight: Weight) {
    g.add_edges(u, v, weight);
    g.add_edges(v, u, weight);
}

fn bump_all_edges(g: &mut WeightedDigraph, extra: Weight) {
    let mut edges: Vec<(Vertex, Vertex)> = Vec::new();
    g.for_each_edge(|_, u, v| edges.push((u, v)));
    for (u, v) in edges {
        g.add_edges(u, v, extra);
    }
}

/// The full suite, in fixed order.
#[must_use]
pub fn all_curated() -> Vec<TestCase> {
    vec![
        // Small exact instances.
        TestCase {
            name: "01_exact_petersen",
            build: || (petersen(), petersen()),
        },
        TestCase {
            name: "02_exact_clique_11",
            build: || (clique(11), clique(11)),
        },
        TestCase {
            name: "03_exact_grid_3x4",
            build: || (grid(3, 4), grid(3, 4)),
        },
        TestCase {
            name: "04_exact_random_dense_12",
            build: || (seeded_random(12, 0.6, 42), seeded_random(12, 0.6, 42)),
        },
        // Larger instances for the bounded searches.
        TestCase {
            name: "05_approx_grid_10x10",
            build: || (grid(5, 5), grid(10, 10)),
        },
        TestCase {
            name: "06_approx_ladder_80",
            build: || (ladder(20), ladder(40)),
        },
        TestCase {
            name: "07_approx_binary_tree",
            build: || (binary_tree(5), binary_tree(6)),
        },
        TestCase {
            name: "08_approx_random_dense_60",
            build: || {
                let g2 = seeded_random(60, 0.5, 12345);
                (induced_prefix(&g2, 30), g2)
            },
        },
        TestCase {
            name: "09_approx_sparse_100",
            build: || {
                let g2 = seeded_random(100, 0.08, 999);
                (induced_prefix(&g2, 40), g2)
            },
        },
        TestCase {
            name: "10_approx_massive_star",
            build: || (star(50), star(100)),
        },
        // Multigraph stress: weights carry the information, not topology.
        TestCase {
            name: "11_multi_arithmetic_clique_10",
            build: || (arithmetic_clique(10, 20), arithmetic_clique(10, 20)),
        },
        TestCase {
            name: "12_multi_heavy_bipartite_20",
            build: || (heavy_bipartite(10, 1000), heavy_bipartite(10, 1000)),
        },
        TestCase {
            // K8 vs K8, all edges weight 10 except one weight-50 edge in
            // the pattern that no host edge can cover.
            name: "13_multi_deep_fail_K8",
            build: || {
                let mut g1 = clique(8);
                bump_all_edges(&mut g1, 9);
                add_undirected(&mut g1, 0, 1, 40);
                let mut g2 = clique(8);
                bump_all_edges(&mut g2, 9);
                (g1, g2)
            },
        },
        TestCase {
            // Few heavy pattern edges against many light host edges.
            name: "14_multi_strength_mismatch",
            build: || {
                let mut g1 = ladder(20);
                bump_all_edges(&mut g1, 99);
                (g1, grid(10, 10))
            },
        },
        TestCase {
            name: "15_multi_modulo_ring_12",
            build: || (modulo_ring(12), modulo_ring(12)),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn suite_is_stable() {
        let cases = all_curated();
        assert_eq!(cases.len(), 15);
        assert_eq!(cases[0].name, "01_exact_petersen");
        assert_eq!(cases[14].name, "15_multi_modulo_ring_12");
    }

    #[test]
    fn every_case_is_feasible() {
        for case in all_curated() {
            let (g1, g2) = (case.build)();
            assert!(
                g1.vertex_count() <= g2.vertex_count(),
                "{} infeasible",
                case.name
            );
        }
    }

    #[test]
    fn petersen_is_cubic() {
        let g = petersen();
        assert_eq!(g.vertex_count(), 10);
        for v in 0..10 {
            assert_eq!(g.neighbor_count(v), 3, "vertex {v}");
        }
    }

    #[rstest]
    #[case(3, 4)]
    #[case(10, 10)]
    fn grid_edge_volume(#[case] width: u32, #[case] height: u32) {
        let g = grid(width, height);
        let undirected = height * (width - 1) + width * (height - 1);
        assert_eq!(g.edge_count(), u64::from(2 * undirected));
    }

    #[test]
    fn arithmetic_clique_weights_in_range() {
        let g = arithmetic_clique(10, 20);
        let mut min = Weight::MAX;
        let mut max = 0;
        g.for_each_edge(|w, _, _| {
            min = min.min(w);
            max = max.max(w);
        });
        assert!(min >= 1 && max <= 20);
    }

    #[test]
    fn deep_fail_pattern_exceeds_host_capacity() {
        let case = &all_curated()[12];
        let (g1, g2) = (case.build)();
        assert_eq!(g1.weight(0, 1), 50);
        let mut max_host = 0;
        g2.for_each_edge(|w, _, _| max_host = max_host.max(w));
        assert_eq!(max_host, 10);
    }

    #[test]
    fn modulo_ring_is_symmetric() {
        let g = modulo_ring(12);
        for v in 0..12 {
            assert_eq!(g.weight(v, (v + 1) % 12), g.weight((v + 1) % 12, v));
        }
    }
}
