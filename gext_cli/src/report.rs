//! Human-readable result reports.
//!
//! The console gets an execution summary plus, for small hosts, a visual
//! matrix of the extended G2; the output file always carries the full set:
//! raw matrices, visual diff, summary, extension table and mapping table.

use std::fmt::Write as _;
use std::path::Path;
use std::time::Duration;

use itertools::Itertools;

use gext_common::error::GraphError;
use gext_common::graph::WeightedDigraph;
use gext_common::io::render_graph;
use gext_search::{Assignment, EdgeExtension, minimal_edge_extension, minimal_extension};

/// Host size at which the console stops printing the visual matrix.
const VISUAL_MATRIX_CONSOLE_LIMIT: u32 = 15;

/// Print the summary for a finished search to stdout.
pub fn print_summary(
    g1: &WeightedDigraph,
    g2: &WeightedDigraph,
    results: &[(u64, Assignment)],
    elapsed: Duration,
) {
    let mut out = String::new();
    let _ = writeln!(out, "\n=== Execution Summary ===");
    let _ = writeln!(
        out,
        "Execution Time: {:.4} ms",
        elapsed.as_secs_f64() * 1e3
    );

    let Some((cost, assignment)) = results.first() else {
        let _ = writeln!(out, "No valid mapping found.");
        print!("{out}");
        return;
    };
    let _ = writeln!(out, "Cost (Added Edges): {cost}");

    if g2.vertex_count() < VISUAL_MATRIX_CONSOLE_LIMIT {
        let extended = minimal_extension(g1, g2, assignment);
        let _ = writeln!(out, "\n=== Modified G2 Adjacency Matrix ===");
        let _ = writeln!(out, "(Legend: 'old' or '(old + added)')\n");
        render_visual_matrix(&mut out, g2, &extended);
    }

    let extensions = minimal_edge_extension(g1, g2, assignment);
    render_extension_table(&mut out, &extensions);
    render_mapping_table(&mut out, assignment);
    print!("{out}");
}

/// Write the full report file: the three matrices (pattern, host, extended
/// host), the visual diff and the tables.
pub fn write_result(
    path: &Path,
    g1: &WeightedDigraph,
    g2: &WeightedDigraph,
    results: &[(u64, Assignment)],
    elapsed: Duration,
) -> Result<(), GraphError> {
    // An infeasible run still produces a report, against the empty mapping.
    let empty = Assignment::new(g1.vertex_count(), g2.vertex_count());
    let (cost, assignment) = match results.first() {
        Some((cost, assignment)) => (*cost, assignment),
        None => (0, &empty),
    };

    let extended = minimal_extension(g1, g2, assignment);
    let extensions = minimal_edge_extension(g1, g2, assignment);

    let mut out = String::new();
    render_graph(&mut out, g1);
    render_graph(&mut out, g2);
    render_graph(&mut out, &extended);

    let _ = writeln!(out, "\n=== Visual Representation of Changes ===");
    let _ = writeln!(out, "(Legend: 'old' or '(old + added)')\n");
    render_visual_matrix(&mut out, g2, &extended);

    let _ = writeln!(out, "\n=== Execution Summary ===");
    let _ = writeln!(
        out,
        "\nExecution Time: {:.4} ms",
        elapsed.as_secs_f64() * 1e3
    );
    let _ = writeln!(out, "Cost (Added Edges): {cost}");

    render_extension_table(&mut out, &extensions);
    render_mapping_table(&mut out, assignment);

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|source| GraphError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, out).map_err(|source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Host matrix with additions shown as `(old+added)`.
fn render_visual_matrix(out: &mut String, original: &WeightedDigraph, extended: &WeightedDigraph) {
    let n = original.vertex_count();
    let cells: Vec<Vec<String>> = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| {
                    let old = original.weight(i, j);
                    let added = extended.weight(i, j).saturating_sub(old);
                    if added > 0 {
                        format!("({old}+{added})")
                    } else {
                        old.to_string()
                    }
                })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = (0..n as usize)
        .map(|j| cells.iter().map(|row| row[j].len()).max().unwrap_or(0) + 1)
        .collect();
    for row in &cells {
        for (cell, width) in row.iter().zip(widths.iter().copied()) {
            let _ = write!(out, "{cell:>width$} ");
        }
        out.push('\n');
    }
}

fn render_extension_table(out: &mut String, extensions: &[EdgeExtension]) {
    if extensions.is_empty() {
        return;
    }

    let _ = writeln!(out, "\n=== Minimal Edge Extension ===");
    let headers = ["#", "G1 edge", "Mapped to G2 edge", "Cost"];
    let rows: Vec<[String; 4]> = extensions
        .iter()
        .enumerate()
        .map(|(idx, ext)| {
            [
                (idx + 1).to_string(),
                format!(
                    "({},{}) [{}]",
                    ext.g1_source, ext.g1_target, ext.weight_needed
                ),
                format!(
                    "({},{}) [{}]",
                    ext.g2_source, ext.g2_target, ext.weight_found
                ),
                format!("+{}", ext.deficit()),
            ]
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(c, header)| {
            rows.iter()
                .map(|row| row[c].len())
                .chain([header.len()])
                .max()
                .unwrap_or(0)
                + 2
        })
        .collect();

    let border = format!(
        "  +{}+",
        widths.iter().map(|w| "-".repeat(*w)).join("+")
    );

    let _ = writeln!(out, "{border}");
    let _ = write!(out, "  |");
    for (header, width) in headers.iter().zip(widths.iter().copied()) {
        let cell = format!(" {header}");
        let _ = write!(out, "{cell:<width$}|");
    }
    out.push('\n');
    let _ = writeln!(out, "{border}");

    for row in &rows {
        let _ = write!(out, "  |");
        for (c, (cell, width)) in row.iter().zip(widths.iter().copied()).enumerate() {
            let cell = format!(" {cell}");
            // The cost column is right-aligned like a ledger.
            if c == 3 {
                let _ = write!(out, "{cell:>width$}|");
            } else {
                let _ = write!(out, "{cell:<width$}|");
            }
        }
        out.push('\n');
    }
    let _ = writeln!(out, "{border}");
    out.push('\n');
}

fn render_mapping_table(out: &mut String, assignment: &Assignment) {
    let _ = writeln!(out, "\n=== Vertex Mapping ===");

    const COL: usize = 12;
    let separator = format!("  +{}+{}+", "-".repeat(COL), "-".repeat(COL));

    let _ = writeln!(out, "{separator}");
    let _ = writeln!(out, "  |{:<COL$}|{:<COL$}|", " G1 Vertex", " G2 Vertex");
    let _ = writeln!(out, "{separator}");
    for u in 0..assignment.size_g1() {
        let image = match assignment.get(u) {
            Some(v) => format!(" {v}"),
            None => " -".to_string(),
        };
        let _ = writeln!(out, "  |{:<COL$}|{image:<COL$}|", format!(" {u}"));
    }
    let _ = writeln!(out, "{separator}");
    out.push('\n');
}
