use crate::dense::DenseMatrix;
use crate::greedy::{run, AlignConfig, Alignment};
use crate::{Graph, Result};
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

/// One independent alignment problem.
#[derive(Debug, Clone, Copy)]
pub struct AlignJob<'a> {
    pub scores: &'a DenseMatrix,
    pub g1: &'a Graph,
    pub g2: &'a Graph,
}

/// Seed for run `index`: `base + index` when seeded, fresh entropy otherwise.
fn rng_for(config: &AlignConfig, index: usize) -> StdRng {
    match config.seed {
        Some(base) => StdRng::seed_from_u64(base.wrapping_add(index as u64)),
        None => StdRng::from_entropy(),
    }
}

/// Runs the configured strategy `restarts` times in parallel and keeps the
/// alignment with the highest total score. Ties go to the lowest restart
/// index, so seeded calls are reproducible. `restarts == 0` runs once.
pub fn best_of(
    scores: &DenseMatrix,
    g1: &Graph,
    g2: &Graph,
    config: &AlignConfig,
    restarts: usize,
) -> Result<Alignment> {
    let restarts = restarts.max(1);
    let attempt = |i: usize| {
        let mut rng = rng_for(config, i);
        run(config.strategy, scores, g1, g2, config.tolerance, &mut rng)
    };

    let mut best = attempt(0)?;
    let mut best_index = 0;
    let others: Vec<Result<Alignment>> = (1..restarts).into_par_iter().map(attempt).collect();
    for (i, result) in others.into_iter().enumerate() {
        let alignment = result?;
        if alignment.total_score > best.total_score {
            best = alignment;
            best_index = i + 1;
        }
    }

    debug!(
        "best of {} restarts: #{} with total score {}",
        restarts, best_index, best.total_score
    );
    Ok(best)
}

/// Aligns independent jobs in parallel; job `i` draws from seed `base + i`.
/// Results come back in job order.
pub fn align_batch(jobs: &[AlignJob<'_>], config: &AlignConfig) -> Vec<Result<Alignment>> {
    jobs.par_iter()
        .enumerate()
        .map(|(i, job)| {
            let mut rng = rng_for(config, i);
            run(
                config.strategy,
                job.scores,
                job.g1,
                job.g2,
                config.tolerance,
                &mut rng,
            )
        })
        .collect()
}
