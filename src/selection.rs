//! Candidate selection over a working score matrix: tolerance bands around
//! the maximum and uniform tie-breaking.

use crate::dense::DenseMatrix;
use crate::matrix::Candidate;
use rand::seq::SliceRandom;
use rand::Rng;

/// Scores within this distance of the maximum count as tied.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Valid values `>= threshold`, row-major.
pub fn values_at_or_above(matrix: &DenseMatrix, threshold: f64) -> Vec<f64> {
    matrix
        .candidates()
        .filter(|c| c.score >= threshold)
        .map(|c| c.score)
        .collect()
}

/// Coordinates of valid entries `>= threshold`, in the same order as
/// [`values_at_or_above`].
pub fn coordinates_at_or_above(matrix: &DenseMatrix, threshold: f64) -> Vec<(usize, usize)> {
    matrix
        .candidates()
        .filter(|c| c.score >= threshold)
        .map(|c| (c.row, c.col))
        .collect()
}

/// Valid entries within `tolerance` of the current maximum. Empty when the
/// matrix is fully invalidated.
pub fn tie_set(matrix: &DenseMatrix, tolerance: f64) -> Vec<Candidate> {
    match matrix.global_max() {
        Some(best) => {
            let threshold = best.score - tolerance;
            matrix.candidates().filter(|c| c.score >= threshold).collect()
        }
        None => Vec::new(),
    }
}

/// Uniform pick; `None` for an empty slice.
pub fn choose_uniform<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    items.choose(rng)
}

/// Picks uniformly among the near-maximal entries of `matrix`.
pub fn pick_near_max<R: Rng + ?Sized>(
    matrix: &DenseMatrix,
    tolerance: f64,
    rng: &mut R,
) -> Option<Candidate> {
    let ties = tie_set(matrix, tolerance);
    choose_uniform(rng, &ties).copied()
}
