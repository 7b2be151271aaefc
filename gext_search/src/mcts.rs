//! Monte Carlo tree search.
//!
//! UCB1-guided sampling of the assignment tree: selection walks the most
//! promising children, expansion grows one node per iteration, and a random
//! playout completes the assignment to score it. Rewards are the negated
//! deficit of the finished playout, so the tree drifts toward low-cost
//! regions without any admissibility requirement. Every finished playout is
//! also offered to the result set, which is how k > 1 results accumulate.
//!
//! The tree lives in an index arena; nodes refer to parents and children by
//! `usize`, never by pointer.

use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use tracing::debug;

use gext_common::config::SearchConfig;
use gext_common::graph::{Vertex, WeightedDigraph};

use crate::assignment::Assignment;
use crate::best_k::BestK;
use crate::cost::{pair_cost, total_cost};

/// Branch vertex for MCTS: always the lowest unmapped pattern index, so the
/// tree shape depends only on depth, never on the graph structure.
fn first_unmapped(assignment: &Assignment) -> Option<Vertex> {
    assignment.unmapped_g1().next()
}

struct Node {
    parent: Option<usize>,
    children: Vec<usize>,
    /// Branch vertex of this node, `None` once the assignment is complete.
    branch: Option<Vertex>,
    /// Free G2 candidates for `branch` not yet expanded into children.
    untried: Vec<Vertex>,
    assignment: Assignment,
    visits: u64,
    total_reward: f64,
}

impl Node {
    fn new(parent: Option<usize>, assignment: Assignment) -> Self {
        let branch = first_unmapped(&assignment);
        let untried = match branch {
            Some(_) => assignment.free_g2().collect(),
            None => Vec::new(),
        };
        Self {
            parent,
            children: Vec::new(),
            branch,
            untried,
            assignment,
            visits: 0,
            total_reward: 0.0,
        }
    }

    fn is_terminal(&self) -> bool {
        self.branch.is_none()
    }
}

struct Tree {
    nodes: Vec<Node>,
    exploration: f64,
}

impl Tree {
    /// Walk down through fully-expanded nodes by UCB1.
    fn select(&self) -> usize {
        let mut current = 0;
        while self.nodes[current].untried.is_empty() && !self.nodes[current].children.is_empty() {
            let parent_visits = self.nodes[current].visits.max(1) as f64;
            let mut best_child = self.nodes[current].children[0];
            let mut best_score = f64::NEG_INFINITY;
            for &child in &self.nodes[current].children {
                let node = &self.nodes[child];
                let score = if node.visits == 0 {
                    f64::INFINITY
                } else {
                    let visits = node.visits as f64;
                    node.total_reward / visits
                        + self.exploration * (parent_visits.ln() / visits).sqrt()
                };
                if score > best_score {
                    best_score = score;
                    best_child = child;
                }
            }
            current = best_child;
        }
        current
    }

    /// Materialise one untried child of `index`, chosen uniformly.
    fn expand(&mut self, index: usize, rng: &mut Pcg64Mcg) -> usize {
        let pick = rng.gen_range(0..self.nodes[index].untried.len());
        let v2 = self.nodes[index].untried.swap_remove(pick);
        // branch is Some whenever untried is non-empty.
        let Some(v1) = self.nodes[index].branch else {
            return index;
        };
        let mut assignment = self.nodes[index].assignment.clone();
        assignment.set(v1, v2);
        let child = Node::new(Some(index), assignment);
        let child_index = self.nodes.len();
        self.nodes.push(child);
        self.nodes[index].children.push(child_index);
        child_index
    }

    /// Random playout from `index` to a complete assignment.
    fn simulate(&self, index: usize, rng: &mut Pcg64Mcg) -> Assignment {
        let mut assignment = self.nodes[index].assignment.clone();
        while let Some(v1) = first_unmapped(&assignment) {
            let Some(v2) = assignment.free_g2().choose(rng) else {
                break;
            };
            assignment.set(v1, v2);
        }
        assignment
    }

    fn backpropagate(&mut self, index: usize, reward: f64) {
        let mut current = Some(index);
        while let Some(i) = current {
            self.nodes[i].visits += 1;
            self.nodes[i].total_reward += reward;
            current = self.nodes[i].parent;
        }
    }

    /// Follow the most-visited child from the root to a leaf.
    fn principal_leaf(&self) -> usize {
        let mut current = 0;
        while let Some(&next) = self.nodes[current]
            .children
            .iter()
            .max_by_key(|&&c| self.nodes[c].visits)
        {
            current = next;
        }
        current
    }
}

/// Complete `assignment` by the cheapest immediate placement per step.
fn complete_greedily(g1: &WeightedDigraph, g2: &WeightedDigraph, assignment: &mut Assignment) {
    while let Some(v1) = first_unmapped(assignment) {
        let Some(v2) = assignment
            .free_g2()
            .min_by_key(|&v2| pair_cost(g1, g2, assignment, v1, v2))
        else {
            break;
        };
        assignment.set(v1, v2);
    }
}

/// Sample assignments of `g1` into `g2` for `config.mcts_iterations` rounds.
///
/// Deterministic for a fixed `config.seed`. Returns an empty set when `g1`
/// has more vertices than `g2`; otherwise at least one complete assignment
/// is produced, with no optimality guarantee.
pub fn search(g1: &WeightedDigraph, g2: &WeightedDigraph, config: &SearchConfig) -> BestK {
    let n1 = g1.vertex_count();
    let n2 = g2.vertex_count();
    let mut best = BestK::new(config.k);
    if n1 > n2 {
        return best;
    }
    if n1 == 0 {
        best.insert(0, Assignment::new(0, n2));
        return best;
    }

    let mut rng = Pcg64Mcg::seed_from_u64(config.seed);
    let mut tree = Tree {
        nodes: vec![Node::new(None, Assignment::new(n1, n2))],
        exploration: config.exploration,
    };

    let iterations = match config.max_expansions {
        Some(limit) => u64::from(config.mcts_iterations).min(limit),
        None => u64::from(config.mcts_iterations),
    };

    for _ in 0..iterations {
        let mut index = tree.select();
        if !tree.nodes[index].is_terminal() && !tree.nodes[index].untried.is_empty() {
            index = tree.expand(index, &mut rng);
        }
        let playout = tree.simulate(index, &mut rng);
        let cost = total_cost(g1, g2, &playout);
        if playout.is_complete() {
            best.insert(cost, playout);
        }
        tree.backpropagate(index, -(cost as f64));
    }

    // The tree's own verdict: the most-visited path, completed greedily if
    // the budget left it partial.
    let leaf = tree.principal_leaf();
    let mut principal = tree.nodes[leaf].assignment.clone();
    complete_greedily(g1, g2, &mut principal);
    if principal.is_complete() {
        let cost = total_cost(g1, g2, &principal);
        best.insert(cost, principal);
    }

    debug!(
        nodes = tree.nodes.len(),
        iterations,
        results = best.len(),
        "mcts finished"
    );
    best
}
