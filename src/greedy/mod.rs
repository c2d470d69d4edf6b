//! Greedy matching strategies over an affinity score matrix.
//!
//! Every strategy works on its own copy of the scores, repeatedly takes a
//! high-scoring pair, invalidates that pair's row and column, and finishes
//! with [`complete`](crate::completion::complete) once no informed choice is
//! left. The returned assignment always holds `min(|G1|, |G2|)` pairs.

mod connectivity;
mod neighbor;
mod pure;
mod radial;

pub use connectivity::connectivity_weighted;
pub use neighbor::neighbor_restricted;
pub use pure::greedy;
pub use radial::{branch_radial, random_radial};

use crate::assignment::Assignment;
use crate::completion;
use crate::dense::DenseMatrix;
use crate::matrix::{Candidate, Matrix};
use crate::selection::DEFAULT_TOLERANCE;
use crate::{AlignError, Graph, Result};
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Selection strategy, ordered by how much graph structure it uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Strategy {
    /// Highest remaining score, no adjacency
    Greedy,
    /// Prefer neighbors of the last matched pair
    NeighborRestricted,
    /// Random near-max pick among neighbors of every matched pair
    RandomRadial,
    /// Seed by global max, then match the seed's neighborhood
    BranchRadial,
    /// Frontier expansion preferring the best-connected candidate
    ConnectivityWeighted,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::Greedy,
        Strategy::NeighborRestricted,
        Strategy::RandomRadial,
        Strategy::BranchRadial,
        Strategy::ConnectivityWeighted,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Greedy => "greedy",
            Strategy::NeighborRestricted => "neighbor-restricted",
            Strategy::RandomRadial => "random-radial",
            Strategy::BranchRadial => "branch-radial",
            Strategy::ConnectivityWeighted => "connectivity-weighted",
        }
    }

    /// Whether results depend on the random source.
    pub fn is_randomized(self) -> bool {
        matches!(self, Strategy::RandomRadial | Strategy::ConnectivityWeighted)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "greedy" | "pure" => Ok(Strategy::Greedy),
            "neighbor-restricted" | "neighbor" => Ok(Strategy::NeighborRestricted),
            "random-radial" | "randomized-radial" => Ok(Strategy::RandomRadial),
            "branch-radial" | "deterministic-radial" => Ok(Strategy::BranchRadial),
            "connectivity-weighted" | "connectivity" => Ok(Strategy::ConnectivityWeighted),
            _ => Err(format!(
                "Invalid strategy: {}. Use one of greedy, neighbor-restricted, random-radial, branch-radial, connectivity-weighted",
                s
            )),
        }
    }
}

/// Settings for one alignment call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignConfig {
    pub strategy: Strategy,
    /// Width of the tie band below the current maximum
    pub tolerance: f64,
    /// Seed for tie-breaking; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl Default for AlignConfig {
    fn default() -> Self {
        AlignConfig {
            strategy: Strategy::ConnectivityWeighted,
            tolerance: DEFAULT_TOLERANCE,
            seed: None,
        }
    }
}

impl AlignConfig {
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Outcome of one strategy call.
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    pub assignment: Assignment,
    /// Sum of the scores of pairs chosen by score (fallback pairs excluded)
    pub total_score: f64,
    /// Pairs chosen from the score matrix
    pub score_picks: usize,
    /// Pairs added by the completion fallback
    pub fallback_pairs: usize,
    pub strategy: Strategy,
}

/// Aligns `g1` to `g2` with the configured strategy.
///
/// `scores` must be `|G1| x |G2|`; it is never modified.
pub fn align(scores: &DenseMatrix, g1: &Graph, g2: &Graph, config: &AlignConfig) -> Result<Alignment> {
    let mut rng = config.rng();
    run(config.strategy, scores, g1, g2, config.tolerance, &mut rng)
}

/// Runs `strategy` with an injected random source.
pub fn run<R: Rng + ?Sized>(
    strategy: Strategy,
    scores: &DenseMatrix,
    g1: &Graph,
    g2: &Graph,
    tolerance: f64,
    rng: &mut R,
) -> Result<Alignment> {
    // NaN and negative widths collapse to exact ties
    let tolerance = tolerance.max(0.0);
    match strategy {
        Strategy::Greedy => greedy(scores, g1, g2),
        Strategy::NeighborRestricted => neighbor_restricted(scores, g1, g2),
        Strategy::RandomRadial => random_radial(scores, g1, g2, tolerance, rng),
        Strategy::BranchRadial => branch_radial(scores, g1, g2),
        Strategy::ConnectivityWeighted => connectivity_weighted(scores, g1, g2, tolerance, rng),
    }
}

pub(crate) fn check_len(expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(AlignError::DimensionMismatch { expected, found });
    }
    Ok(())
}

/// Working state shared by the strategies: a private copy of the scores,
/// the assignment being built and running totals.
struct Matching {
    working: DenseMatrix,
    assignment: Assignment,
    total_score: f64,
    picks: usize,
}

impl Matching {
    fn new(scores: &DenseMatrix, g1: &Graph, g2: &Graph) -> Result<Self> {
        check_len(g1.num_vertices(), scores.rows())?;
        check_len(g2.num_vertices(), scores.cols())?;
        Ok(Matching {
            working: scores.clone(),
            assignment: Assignment::new(scores.rows(), scores.cols()),
            total_score: 0.0,
            picks: 0,
        })
    }

    /// Pairs still needed for a complete assignment.
    fn remaining(&self) -> usize {
        self.assignment.capacity() - self.picks
    }

    fn take(&mut self, pick: Candidate) -> Result<()> {
        trace!("pick {} -> {} (score {})", pick.row, pick.col, pick.score);
        self.assignment.assign(pick.row, pick.col)?;
        self.working.invalidate(pick.row, pick.col)?;
        self.total_score += pick.score;
        self.picks += 1;
        Ok(())
    }

    fn finish(mut self, strategy: Strategy) -> Result<Alignment> {
        let fallback_pairs = completion::complete(&mut self.assignment)?;
        debug!(
            "{}: {} score picks, {} fallback pairs, total score {}",
            strategy, self.picks, fallback_pairs, self.total_score
        );
        Ok(Alignment {
            assignment: self.assignment,
            total_score: self.total_score,
            score_picks: self.picks,
            fallback_pairs,
            strategy,
        })
    }
}
