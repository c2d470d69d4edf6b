use super::{Alignment, Matching, Strategy};
use crate::assignment::Assignment;
use crate::dense::DenseMatrix;
use crate::matrix::Candidate;
use crate::selection;
use crate::{Graph, Result};
use itertools::Itertools;
use log::debug;
use rand::Rng;

/// Radial expansion that extends the matched region through its best
/// connected candidates.
///
/// Matched graph-1 vertices form a frontier in the order they were added.
/// For each frontier vertex `u -> v` the candidates are the near-maximal
/// entries of `neighbors(u) x neighbors(v)`. Ties are broken first by how many
/// already matched graph-1 vertices the candidate row touches, then, for that
/// row, by how many already used graph-2 vertices the candidate column
/// touches; remaining ties are broken uniformly at random.
pub fn connectivity_weighted<R: Rng + ?Sized>(
    scores: &DenseMatrix,
    g1: &Graph,
    g2: &Graph,
    tolerance: f64,
    rng: &mut R,
) -> Result<Alignment> {
    let mut m = Matching::new(scores, g1, g2)?;
    let mut add_order: Vec<usize> = Vec::with_capacity(m.assignment.capacity());

    if m.remaining() > 0 {
        if let Some(seed) = selection::pick_near_max(&m.working, tolerance, rng) {
            m.take(seed)?;
            add_order.push(seed.row);
        }
    }

    let mut idx = 0;
    while idx < add_order.len() && m.remaining() > 0 {
        let u = add_order[idx];
        idx += 1;
        let v = match m.assignment.get(u) {
            Some(v) => v,
            None => continue,
        };

        let n1 = g1.neighbors(u)?;
        let n2 = g2.neighbors(v)?;
        let mut local = DenseMatrix::restricted(&m.working, n1, n2)?;

        for _ in 0..n1.len().min(n2.len()) {
            let ties = selection::tie_set(&local, tolerance);
            let pick = match choose_connected(&ties, g1, g2, &m.assignment, rng)? {
                Some(pick) => pick,
                None => break,
            };
            m.take(pick)?;
            local.invalidate(pick.row, pick.col)?;
            add_order.push(pick.row);
        }
    }

    if m.remaining() > 0 {
        debug!(
            "connectivity-weighted: frontier exhausted after {} vertices, {} pairs left",
            add_order.len(),
            m.remaining()
        );
    }

    m.finish(Strategy::ConnectivityWeighted)
}

/// Number of `vertex`'s neighbors in graph 1 that are already matched.
fn matched_neighbors_g1(g1: &Graph, vertex: usize, assignment: &Assignment) -> Result<usize> {
    Ok(g1
        .neighbors(vertex)?
        .iter()
        .filter(|&&w| assignment.is_assigned(w))
        .count())
}

/// Number of `vertex`'s neighbors in graph 2 that are already matched to.
fn matched_neighbors_g2(g2: &Graph, vertex: usize, assignment: &Assignment) -> Result<usize> {
    Ok(g2
        .neighbors(vertex)?
        .iter()
        .filter(|&&w| assignment.is_target_used(w))
        .count())
}

/// Picks one pair from `ties`, preferring the best connected row and then
/// the best connected column for that row.
fn choose_connected<R: Rng + ?Sized>(
    ties: &[Candidate],
    g1: &Graph,
    g2: &Graph,
    assignment: &Assignment,
    rng: &mut R,
) -> Result<Option<Candidate>> {
    match ties {
        [] => return Ok(None),
        [only] => return Ok(Some(*only)),
        _ => {}
    }

    let mut row_counts = Vec::new();
    for row in ties.iter().map(|c| c.row).unique() {
        row_counts.push((row, matched_neighbors_g1(g1, row, assignment)?));
    }
    let best_rows: Vec<usize> = row_counts
        .iter()
        .max_set_by_key(|&&(_, count)| count)
        .into_iter()
        .map(|&(row, _)| row)
        .collect();
    let row = match selection::choose_uniform(rng, &best_rows) {
        Some(&row) => row,
        None => return Ok(None),
    };

    let mut col_counts = Vec::new();
    for cand in ties.iter().filter(|c| c.row == row) {
        col_counts.push((*cand, matched_neighbors_g2(g2, cand.col, assignment)?));
    }
    let best_cols: Vec<Candidate> = col_counts
        .iter()
        .max_set_by_key(|&&(_, count)| count)
        .into_iter()
        .map(|&(cand, _)| cand)
        .collect();

    Ok(selection::choose_uniform(rng, &best_cols).copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::greedy::tests::identity_scores;
    use crate::selection::DEFAULT_TOLERANCE;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_prefers_best_connected_row() {
        // 0 is matched; 1 and 2 are both adjacent to 0, only 2 is adjacent to 3
        let g1 = Graph::from_edges(4, &[(0, 1), (0, 2), (2, 3)]).unwrap();
        let g2 = g1.clone();
        let mut a = Assignment::new(4, 4);
        a.assign(0, 0).unwrap();
        a.assign(3, 3).unwrap();

        let ties = vec![
            Candidate { row: 1, col: 1, score: 1.0 },
            Candidate { row: 2, col: 2, score: 1.0 },
        ];
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let pick = choose_connected(&ties, &g1, &g2, &a, &mut rng).unwrap().unwrap();
            assert_eq!((pick.row, pick.col), (2, 2));
        }
    }

    #[test]
    fn test_prefers_best_connected_col_for_chosen_row() {
        let g1 = Graph::from_edges(3, &[(0, 1), (0, 2)]).unwrap();
        // in g2 only column 2 touches the used vertex 0
        let g2 = Graph::from_edges(3, &[(0, 2)]).unwrap();
        let mut a = Assignment::new(3, 3);
        a.assign(0, 0).unwrap();

        let ties = vec![
            Candidate { row: 1, col: 1, score: 1.0 },
            Candidate { row: 1, col: 2, score: 1.0 },
        ];
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let pick = choose_connected(&ties, &g1, &g2, &a, &mut rng).unwrap().unwrap();
            assert_eq!((pick.row, pick.col), (1, 2));
        }
    }

    #[test]
    fn test_single_and_empty_tie_sets() {
        let g = Graph::new(2);
        let a = Assignment::new(2, 2);
        let mut rng = StdRng::seed_from_u64(0);
        let only = Candidate { row: 1, col: 0, score: 0.3 };

        assert_eq!(choose_connected(&[], &g, &g, &a, &mut rng).unwrap(), None);
        assert_eq!(choose_connected(&[only], &g, &g, &a, &mut rng).unwrap(), Some(only));
    }

    #[test]
    fn test_recovers_identity_on_grid() {
        // 3x3 grid graph, all scores tied: structure alone decides
        let mut edges = Vec::new();
        for r in 0..3 {
            for c in 0..3 {
                let v = r * 3 + c;
                if c < 2 {
                    edges.push((v, v + 1));
                }
                if r < 2 {
                    edges.push((v, v + 3));
                }
            }
        }
        let g = Graph::from_edges(9, &edges).unwrap();
        let mut scores = identity_scores(9);
        // pin the centre so expansion starts there
        scores.set(4, 4, 2.0).unwrap();

        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let alignment = connectivity_weighted(&scores, &g, &g, DEFAULT_TOLERANCE, &mut rng).unwrap();
            assert_eq!(alignment.assignment.to_sentinel_vec(), (0..9).collect::<Vec<i64>>());
            assert_eq!(alignment.fallback_pairs, 0);
        }
    }

    #[test]
    fn test_frontier_exhaustion_falls_back() {
        // two disjoint edges; expansion cannot cross components
        let g = Graph::from_edges(4, &[(0, 1), (2, 3)]).unwrap();
        let scores = identity_scores(4);
        let mut rng = StdRng::seed_from_u64(4);
        let alignment = connectivity_weighted(&scores, &g, &g, DEFAULT_TOLERANCE, &mut rng).unwrap();

        assert_eq!(alignment.score_picks, 2);
        assert_eq!(alignment.fallback_pairs, 2);
        assert!(alignment.assignment.is_complete());
        assert!(alignment.assignment.is_injective());
    }
}
