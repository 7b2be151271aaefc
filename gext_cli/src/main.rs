//! Command-line front end for the embedding searches.
//!
//! `gext solve` reads a graph pair, runs the configured search and writes
//! the extension report; `gext gen` and `gext gen-suite` produce input
//! files; `gext compare` races two algorithms on built-in spec tables.

mod args;
mod compare;
mod report;

use std::time::Instant;

use clap::Parser;
use tracing::info;

use gext_common::io::{read_pair, write_pair};
use gext_gen::{all_curated, generate_pair};
use gext_search::search_best_k;

use args::{Args, Command};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    match args.command {
        Command::Solve(solve) => {
            let config = solve.to_config();
            let (g1, g2) = read_pair(&solve.input)?;
            info!(
                n1 = g1.vertex_count(),
                n2 = g2.vertex_count(),
                "loaded graph pair"
            );

            let start = Instant::now();
            let results = search_best_k(&g1, &g2, &config);
            let elapsed = start.elapsed();

            report::print_summary(&g1, &g2, &results, elapsed);
            report::write_result(&solve.output, &g1, &g2, &results, elapsed)?;
        }
        Command::Gen(generate) => {
            let spec = generate.to_spec();
            let (g1, g2) = generate_pair(&spec);
            write_pair(&generate.output, &g1, &g2)?;
            info!(path = %generate.output.display(), "wrote generated pair");
        }
        Command::GenSuite(suite) => {
            let cases = all_curated();
            println!("Generating {} curated test cases...", cases.len());
            for case in cases {
                let path = suite.out_dir.join(format!("{}.txt", case.name));
                println!("  - Writing: {}", path.display());
                let (g1, g2) = (case.build)();
                write_pair(&path, &g1, &g2)?;
            }
            println!("Done.");
        }
        Command::Compare(cmp) => {
            compare::run(cmp.first.into(), cmp.second.into(), cmp.large);
        }
    }

    Ok(())
}
