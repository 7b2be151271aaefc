//! Instance generators for the embedding searches.
//!
//! Two families: [`random`] draws seeded random pairs for benchmarking and
//! differential testing, and [`curated`] builds the fixed suite of named
//! topologies (cliques, grids, Petersen, heavy multigraphs) used to compare
//! the algorithms against each other.

pub mod curated;
pub mod random;

pub use curated::{TestCase, all_curated};
pub use random::{GraphSpec, generate_pair};
