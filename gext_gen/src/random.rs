//! Seeded random graph pairs.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use tracing::debug;

use gext_common::graph::{Vertex, WeightedDigraph};

/// Parameters for one random `(g1, g2)` pair.
///
/// `density` is edges per vertex pair: the host gets
/// `density_g2 * size_g2^2` random directed edges (duplicates stack into
/// weight). When `g1_from_g2` is set, G1 is instead carved out of G2 as a
/// random induced subgraph and `density_g1` becomes the per-edge-unit keep
/// probability, so a known embedding of cost zero exists at density 1.0.
/// A carved pattern is capped at `size_g2` vertices, since the host cannot
/// yield more.
#[derive(Clone, Copy, Debug)]
pub struct GraphSpec {
    /// Pattern size, must be positive.
    pub size_g1: u32,
    /// Host size, must be positive.
    pub size_g2: u32,
    /// Pattern density (or keep probability in carve mode, in `[0, 1]`).
    pub density_g1: f64,
    /// Host density.
    pub density_g2: f64,
    /// Carve G1 out of G2 instead of drawing it independently.
    pub g1_from_g2: bool,
    /// RNG seed; equal specs generate equal pairs.
    pub seed: u64,
}

/// Generate the pair described by `spec`.
#[must_use]
pub fn generate_pair(spec: &GraphSpec) -> (WeightedDigraph, WeightedDigraph) {
    debug_assert!(spec.size_g1 > 0);
    debug_assert!(spec.size_g2 > 0);
    let mut rng = Pcg64Mcg::seed_from_u64(spec.seed);

    let mut g2 = WeightedDigraph::new(spec.size_g2);
    let edges_g2 = (spec.density_g2 * f64::from(spec.size_g2) * f64::from(spec.size_g2)) as u64;
    for _ in 0..edges_g2 {
        let u = rng.gen_range(0..spec.size_g2);
        let v = rng.gen_range(0..spec.size_g2);
        g2.add_edges(u, v, 1);
    }

    let g1 = if spec.g1_from_g2 {
        carve_pattern(spec, &g2, &mut rng)
    } else {
        let mut g1 = WeightedDigraph::new(spec.size_g1);
        let edges_g1 = (spec.density_g1 * f64::from(spec.size_g1) * f64::from(spec.size_g1)) as u64;
        for _ in 0..edges_g1 {
            let u = rng.gen_range(0..spec.size_g1);
            let v = rng.gen_range(0..spec.size_g1);
            g1.add_edges(u, v, 1);
        }
        g1
    };

    debug!(
        n1 = g1.vertex_count(),
        e1 = g1.edge_count(),
        n2 = g2.vertex_count(),
        e2 = g2.edge_count(),
        "generated pair"
    );
    (g1, g2)
}

/// Random induced subgraph of `g2` on `size_g1` vertices, thinned by the
/// keep probability `density_g1`.
fn carve_pattern(spec: &GraphSpec, g2: &WeightedDigraph, rng: &mut Pcg64Mcg) -> WeightedDigraph {
    debug_assert!((0.0..=1.0).contains(&spec.density_g1));

    // The host has only size_g2 distinct vertices to offer; asking for more
    // would spin the rejection sampler forever.
    let size = spec.size_g1.min(spec.size_g2);

    // Rejection-sample distinct host vertices; insertion order fixes the
    // pattern labelling.
    let mut selected: Vec<Vertex> = Vec::with_capacity(size as usize);
    let mut taken = vec![false; spec.size_g2 as usize];
    while selected.len() < size as usize {
        let v = rng.gen_range(0..spec.size_g2);
        if !taken[v as usize] {
            taken[v as usize] = true;
            selected.push(v);
        }
    }
    let mut host_to_pattern = vec![None; spec.size_g2 as usize];
    for (idx, &v) in selected.iter().enumerate() {
        host_to_pattern[v as usize] = Some(idx as Vertex);
    }

    let mut g1 = WeightedDigraph::new(size);
    for &v_host in &selected {
        let v = host_to_pattern[v_host as usize].unwrap_or(0);
        g2.for_each_out_edge(v_host, |weight, u_host| {
            if let Some(u) = host_to_pattern[u_host as usize] {
                g1.add_edges(v, u, weight);
            }
        });
    }

    // Thin per weight unit.
    let removal_prob = 1.0 - spec.density_g1;
    if removal_prob > 0.0 {
        let mut edges: Vec<(Vertex, Vertex, u32)> = Vec::new();
        g1.for_each_edge(|weight, u, v| edges.push((u, v, weight)));
        for (u, v, weight) in edges {
            let mut removed = 0u32;
            for _ in 0..weight {
                if rng.gen_range(0.0..1.0) < removal_prob {
                    removed += 1;
                }
            }
            if removed > 0 {
                g1.remove_edges(u, v, removed);
            }
        }
    }
    g1
}
