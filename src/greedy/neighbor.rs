use super::{Alignment, Matching, Strategy};
use crate::dense::DenseMatrix;
use crate::{Graph, Result};

/// Greedy matching that prefers extending the last matched pair `(i, j)`:
/// the next pick is the best entry in `neighbors(i) x neighbors(j)` when that
/// region still has a valid entry, otherwise the global maximum.
pub fn neighbor_restricted(scores: &DenseMatrix, g1: &Graph, g2: &Graph) -> Result<Alignment> {
    let mut m = Matching::new(scores, g1, g2)?;
    let mut preferred: Option<DenseMatrix> = None;

    for _ in 0..m.assignment.capacity() {
        let local_best = preferred.as_ref().and_then(DenseMatrix::global_max);
        let pick = match local_best.or_else(|| m.working.global_max()) {
            Some(pick) => pick,
            None => break,
        };
        m.take(pick)?;

        preferred = Some(DenseMatrix::restricted(
            &m.working,
            g1.neighbors(pick.row)?,
            g2.neighbors(pick.col)?,
        )?);
    }

    m.finish(Strategy::NeighborRestricted)
}
