use crate::assignment::Assignment;
use crate::{Graph, Result};
use log::trace;

/// Pairs unassigned graph-1 vertices with unused graph-2 vertices in index
/// order until one side runs out. Scores are not consulted.
///
/// Returns the number of pairs added; zero when the assignment is already
/// complete.
pub fn complete(assignment: &mut Assignment) -> Result<usize> {
    let free_g1: Vec<usize> = assignment.unassigned_g1().collect();
    let free_g2: Vec<usize> = assignment.unused_g2().collect();

    let mut added = 0;
    for (u, v) in free_g1.into_iter().zip(free_g2) {
        trace!("fallback pair {} -> {}", u, v);
        assignment.assign(u, v)?;
        added += 1;
    }
    Ok(added)
}

/// Like [`complete`], but checks that the assignment was sized for `g1` and `g2`.
pub fn complete_for(assignment: &mut Assignment, g1: &Graph, g2: &Graph) -> Result<usize> {
    crate::greedy::check_len(g1.num_vertices(), assignment.g1_len())?;
    crate::greedy::check_len(g2.num_vertices(), assignment.g2_len())?;
    complete(assignment)
}
