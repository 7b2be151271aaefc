//! Shared leaf types for the gext workspace: the weighted directed
//! multigraph, search configuration, and the plain-text graph-pair format.

pub mod config;
pub mod error;
pub mod graph;
pub mod io;

pub use config::{Algorithm, SearchConfig, SearchConfigBuilder};
pub use error::GraphError;
pub use graph::{Vertex, Weight, WeightedDigraph};
