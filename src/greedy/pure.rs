use super::{Alignment, Matching, Strategy};
use crate::dense::DenseMatrix;
use crate::{Graph, Result};

/// Baseline: repeatedly take the global maximum. Adjacency is ignored; the
/// graphs only fix the expected dimensions.
pub fn greedy(scores: &DenseMatrix, g1: &Graph, g2: &Graph) -> Result<Alignment> {
    let mut m = Matching::new(scores, g1, g2)?;

    for _ in 0..m.assignment.capacity() {
        match m.working.global_max() {
            Some(best) => m.take(best)?,
            None => break,
        }
    }

    m.finish(Strategy::Greedy)
}
