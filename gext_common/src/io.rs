//! Plain-text graph-pair format.
//!
//! A file holds two graphs back to back, each as a vertex count followed by
//! a row-major `n * n` weight matrix. Tokens are whitespace-separated; line
//! breaks are cosmetic.

use std::fmt::Write as _;
use std::path::Path;

use itertools::Itertools;
use tracing::debug;

use crate::error::GraphError;
use crate::graph::{Vertex, Weight, WeightedDigraph};

/// Read a `(g1, g2)` pair from `path`.
pub fn read_pair(path: &Path) -> Result<(WeightedDigraph, WeightedDigraph), GraphError> {
    let text = std::fs::read_to_string(path).map_err(|source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut tokens = text.split_whitespace();
    let g1 = parse_graph(&mut tokens, path)?;
    let g2 = parse_graph(&mut tokens, path)?;
    debug!(
        n1 = g1.vertex_count(),
        n2 = g2.vertex_count(),
        "parsed graph pair"
    );
    Ok((g1, g2))
}

/// Write a `(g1, g2)` pair to `path`, creating parent directories.
pub fn write_pair(
    path: &Path,
    g1: &WeightedDigraph,
    g2: &WeightedDigraph,
) -> Result<(), GraphError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|source| GraphError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    }

    let mut out = String::new();
    render_graph(&mut out, g1);
    render_graph(&mut out, g2);
    std::fs::write(path, out).map_err(|source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Render one graph in the matrix format (used by reports as well).
pub fn render_graph(out: &mut String, g: &WeightedDigraph) {
    let n = g.vertex_count();
    let _ = writeln!(out, "{n}");
    for i in 0..n {
        let _ = writeln!(out, "{}", (0..n).map(|j| g.weight(i, j)).join(" "));
    }
}

fn parse_graph<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    path: &Path,
) -> Result<WeightedDigraph, GraphError> {
    let size_token = tokens.next().ok_or_else(|| GraphError::InvalidSize {
        path: path.to_path_buf(),
        detail: "missing vertex count".into(),
    })?;
    let size: u32 = size_token.parse().map_err(|_| GraphError::InvalidSize {
        path: path.to_path_buf(),
        detail: format!("not a vertex count: {size_token:?}"),
    })?;
    if size == 0 {
        return Err(GraphError::InvalidSize {
            path: path.to_path_buf(),
            detail: "vertex count must be positive".into(),
        });
    }

    let mut g = WeightedDigraph::new(size);
    for i in 0..size {
        for j in 0..size {
            let token = tokens.next().ok_or_else(|| GraphError::Parse {
                path: path.to_path_buf(),
                detail: format!("matrix truncated at row {i}, column {j}"),
            })?;
            let weight: Weight = token.parse().map_err(|_| GraphError::Parse {
                path: path.to_path_buf(),
                detail: format!("bad weight at row {i}, column {j}: {token:?}"),
            })?;
            if weight > 0 {
                g.add_edges(i as Vertex, j as Vertex, weight);
            }
        }
    }
    Ok(g)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> WeightedDigraph {
        let mut g = WeightedDigraph::new(3);
        g.add_edges(0, 1, 1);
        g.add_edges(1, 2, 2);
        g.add_edges(2, 0, 3);
        g
    }

    #[test]
    fn round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pair.txt");

        let g1 = triangle();
        let mut g2 = WeightedDigraph::new(4);
        g2.add_edges(0, 3, 7);

        write_pair(&path, &g1, &g2).unwrap();
        let (r1, r2) = read_pair(&path).unwrap();
        assert_eq!(r1, g1);
        assert_eq!(r2, g2);
    }

    #[test]
    fn rejects_zero_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zero.txt");
        std::fs::write(&path, "0\n").unwrap();
        assert!(matches!(
            read_pair(&path),
            Err(GraphError::InvalidSize { .. })
        ));
    }

    #[test]
    fn rejects_truncated_matrix() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.txt");
        std::fs::write(&path, "2\n0 1\n0\n").unwrap();
        assert!(matches!(read_pair(&path), Err(GraphError::Parse { .. })));
    }

    #[test]
    fn rejects_bad_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        std::fs::write(&path, "2\n0 x\n0 0\n2\n0 0\n0 0\n").unwrap();
        assert!(matches!(read_pair(&path), Err(GraphError::Parse { .. })));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            read_pair(Path::new("/nonexistent/pair.txt")),
            Err(GraphError::Io { .. })
        ));
    }
}
