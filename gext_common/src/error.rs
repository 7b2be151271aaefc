//! Error taxonomy for graph I/O.

use std::path::PathBuf;

use thiserror::Error;

/// Failures reading or writing the plain-text graph-pair format.
///
/// Search preconditions (e.g. `g1` larger than `g2`) are not errors; the
/// searches return an empty result set for those.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Underlying filesystem failure.
    #[error("could not access {path:?}: {source}")]
    Io {
        /// Offending path.
        path: PathBuf,
        /// OS-level cause.
        #[source]
        source: std::io::Error,
    },

    /// The declared vertex count is missing, unparsable, or zero.
    #[error("invalid graph size in {path:?}: {detail}")]
    InvalidSize {
        /// Offending path.
        path: PathBuf,
        /// What was wrong with the size token.
        detail: String,
    },

    /// The adjacency matrix body is truncated or contains a bad token.
    #[error("malformed adjacency matrix in {path:?}: {detail}")]
    Parse {
        /// Offending path.
        path: PathBuf,
        /// What was wrong and where.
        detail: String,
    },
}
