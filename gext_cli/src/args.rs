use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use gext_common::config::{Algorithm, SearchConfig};
use gext_gen::GraphSpec;

/// Weighted subgraph embedding - find the cheapest way to fit one graph
/// into another
#[derive(Parser, Debug)]
#[command(name = "gext")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search an input pair and write the extension report
    Solve(SolveArgs),
    /// Generate a random graph pair file
    Gen(GenArgs),
    /// Write the curated benchmark suite to a directory
    GenSuite(GenSuiteArgs),
    /// Run two algorithms against each other on built-in spec tables
    Compare(CompareArgs),
}

#[derive(clap::Args, Debug)]
pub struct SolveArgs {
    /// Path to the input file with the two graphs
    pub input: PathBuf,
    /// Path to the output report file
    pub output: PathBuf,

    /// Search algorithm
    #[arg(short = 'a', long, value_enum, default_value = "astar")]
    pub algorithm: AlgorithmArg,
    /// Number of best distinct mappings to search for
    #[arg(short = 'k', long, default_value_t = 1)]
    pub k: usize,
    /// Candidates kept per level (beam only)
    #[arg(long, default_value_t = 5)]
    pub beam_width: usize,
    /// Iteration budget (mcts only)
    #[arg(long, default_value_t = 10_000)]
    pub mcts_iterations: u32,
    /// RNG seed (mcts only)
    #[arg(long, default_value_t = 0xDEAD_C0DE)]
    pub seed: u64,
    /// Optional cap on node expansions; the best results so far are
    /// reported when it is hit
    #[arg(long)]
    pub max_expansions: Option<u64>,
}

impl SolveArgs {
    /// Convert command-line arguments into the search configuration.
    pub fn to_config(&self) -> SearchConfig {
        SearchConfig::builder()
            .algorithm(self.algorithm.into())
            .k(self.k)
            .beam_width(self.beam_width)
            .mcts_iterations(self.mcts_iterations)
            .seed(self.seed)
            .max_expansions(self.max_expansions)
            .build()
    }
}

#[derive(clap::Args, Debug)]
pub struct GenArgs {
    /// Path to write the generated pair to
    pub output: PathBuf,

    /// Pattern graph size
    #[arg(long)]
    pub size_g1: u32,
    /// Host graph size
    #[arg(long)]
    pub size_g2: u32,
    /// Pattern density (keep probability in carve mode)
    #[arg(long, default_value_t = 1.0)]
    pub density_g1: f64,
    /// Host density
    #[arg(long, default_value_t = 1.0)]
    pub density_g2: f64,
    /// Carve the pattern out of the host so a zero-cost embedding exists
    #[arg(long, default_value_t = false)]
    pub carve: bool,
    /// RNG seed
    #[arg(long, default_value_t = 0xDEAD_C0DE)]
    pub seed: u64,
}

impl GenArgs {
    /// Convert command-line arguments into the generator spec.
    pub fn to_spec(&self) -> GraphSpec {
        GraphSpec {
            size_g1: self.size_g1,
            size_g2: self.size_g2,
            density_g1: self.density_g1,
            density_g2: self.density_g2,
            g1_from_g2: self.carve,
            seed: self.seed,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct GenSuiteArgs {
    /// Directory the suite files are written into
    #[arg(default_value = "tests")]
    pub out_dir: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct CompareArgs {
    /// First algorithm
    #[arg(value_enum)]
    pub first: AlgorithmArg,
    /// Second algorithm
    #[arg(value_enum)]
    pub second: AlgorithmArg,
    /// Use the large-instance spec table instead of the small one
    #[arg(long, default_value_t = false)]
    pub large: bool,
}

/// Command-line wrapper for [`Algorithm`].
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AlgorithmArg {
    /// Exhaustive branch and bound
    #[value(name = "brute-force")]
    BruteForce,
    /// Exact best-first search
    #[value(name = "astar")]
    AStar,
    /// Beam-bounded A*
    #[value(name = "beam")]
    Beam,
    /// Monte Carlo tree search
    #[value(name = "mcts")]
    Mcts,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::BruteForce => Algorithm::BruteForce,
            AlgorithmArg::AStar => Algorithm::AStar,
            AlgorithmArg::Beam => Algorithm::BeamAStar,
            AlgorithmArg::Mcts => Algorithm::Mcts,
        }
    }
}
