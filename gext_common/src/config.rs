//! Search configuration.
//!
//! A single explicit config object parameterises every algorithm; there is
//! no process-wide state. The RNG seed lives here so MCTS runs are
//! reproducible.

/// Which search algorithm to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    /// Exhaustive depth-first enumeration with branch-and-bound pruning.
    BruteForce,
    /// Exact best-first search with an admissible heuristic.
    AStar,
    /// Beam-width-bounded A*: approximate, bounded memory.
    BeamAStar,
    /// UCB1 Monte-Carlo tree search: approximate, anytime.
    Mcts,
}

/// Parameters shared by all search algorithms.
///
/// `beam_width` only affects [`Algorithm::BeamAStar`]; `mcts_iterations`,
/// `exploration` and `seed` only affect [`Algorithm::Mcts`].
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Algorithm selected by the caller.
    pub algorithm: Algorithm,
    /// Number of best distinct mappings to return.
    pub k: usize,
    /// Candidates retained per level in beam A*.
    pub beam_width: usize,
    /// Iteration budget for MCTS.
    pub mcts_iterations: u32,
    /// UCB1 exploration constant (default sqrt(2)).
    pub exploration: f64,
    /// RNG seed for the stochastic search.
    pub seed: u64,
    /// Optional cap on node expansions; exceeding it returns the best
    /// results found so far rather than failing.
    pub max_expansions: Option<u64>,
}

impl SearchConfig {
    /// Start building a configuration from the defaults.
    #[must_use]
    pub fn builder() -> SearchConfigBuilder {
        SearchConfigBuilder {
            config: Self::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::AStar,
            k: 1,
            beam_width: 5,
            mcts_iterations: 10_000,
            exploration: std::f64::consts::SQRT_2,
            seed: 0xDEAD_C0DE,
            max_expansions: None,
        }
    }
}

/// Builder for [`SearchConfig`].
#[derive(Clone, Debug)]
pub struct SearchConfigBuilder {
    config: SearchConfig,
}

impl SearchConfigBuilder {
    /// Select the algorithm.
    #[must_use]
    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.config.algorithm = algorithm;
        self
    }

    /// Number of best distinct mappings to return (clamped to at least 1).
    #[must_use]
    pub fn k(mut self, k: usize) -> Self {
        self.config.k = k.max(1);
        self
    }

    /// Beam width for [`Algorithm::BeamAStar`] (clamped to at least 1).
    #[must_use]
    pub fn beam_width(mut self, width: usize) -> Self {
        self.config.beam_width = width.max(1);
        self
    }

    /// Iteration budget for [`Algorithm::Mcts`].
    #[must_use]
    pub fn mcts_iterations(mut self, iterations: u32) -> Self {
        self.config.mcts_iterations = iterations;
        self
    }

    /// UCB1 exploration constant.
    #[must_use]
    pub fn exploration(mut self, c: f64) -> Self {
        self.config.exploration = c;
        self
    }

    /// RNG seed.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Optional node-expansion budget.
    #[must_use]
    pub fn max_expansions(mut self, cap: Option<u64>) -> Self {
        self.config.max_expansions = cap;
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> SearchConfig {
        self.config
    }
}
