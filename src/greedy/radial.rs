use super::{Alignment, Matching, Strategy};
use crate::dense::DenseMatrix;
use crate::selection;
use crate::{Graph, Result};
use log::debug;
use rand::Rng;

/// Radial expansion with random tie-breaking.
///
/// After the first pick, candidates are limited to the union of
/// `neighbors(u) x neighbors(v)` over every matched pair `(u, v)`. Each step
/// picks uniformly among entries within `tolerance` of that region's maximum.
/// When the region empties before the assignment is complete the remaining
/// vertices go to the completion fallback.
pub fn random_radial<R: Rng + ?Sized>(
    scores: &DenseMatrix,
    g1: &Graph,
    g2: &Graph,
    tolerance: f64,
    rng: &mut R,
) -> Result<Alignment> {
    let mut m = Matching::new(scores, g1, g2)?;
    let mut local = m.working.clone();
    let mut matched: Vec<(usize, usize)> = Vec::new();

    while m.remaining() > 0 {
        let pick = match selection::pick_near_max(&local, tolerance, rng) {
            Some(pick) => pick,
            None => {
                debug!(
                    "random-radial: neighborhood exhausted with {} pairs left",
                    m.remaining()
                );
                break;
            }
        };
        m.take(pick)?;
        matched.push((pick.row, pick.col));

        local.invalidate_all();
        for &(u, v) in &matched {
            local.copy_region_from(&m.working, g1.neighbors(u)?, g2.neighbors(v)?)?;
        }
    }

    m.finish(Strategy::RandomRadial)
}

/// Deterministic radial expansion, one branch at a time.
///
/// The outer loop seeds with the global maximum of the remaining scores; the
/// inner loop then takes up to `min(deg(i), deg(j))` best pairs from the
/// seed's neighborhood `neighbors(i) x neighbors(j)`.
pub fn branch_radial(scores: &DenseMatrix, g1: &Graph, g2: &Graph) -> Result<Alignment> {
    let mut m = Matching::new(scores, g1, g2)?;

    'outer: while m.remaining() > 0 {
        let seed = match m.working.global_max() {
            Some(seed) => seed,
            None => break,
        };
        m.take(seed)?;

        let n1 = g1.neighbors(seed.row)?;
        let n2 = g2.neighbors(seed.col)?;
        let mut local = DenseMatrix::restricted(&m.working, n1, n2)?;

        for _ in 0..n1.len().min(n2.len()) {
            if m.working.is_all_invalidated() {
                break 'outer;
            }
            let pick = match local.global_max() {
                Some(pick) => pick,
                None => break,
            };
            m.take(pick)?;
            local.invalidate(pick.row, pick.col)?;
        }
    }

    m.finish(Strategy::BranchRadial)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::greedy::tests::{identity_scores, random_graph};
    use crate::selection::DEFAULT_TOLERANCE;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn two_triangles() -> Graph {
        Graph::from_edges(6, &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)]).unwrap()
    }

    #[test]
    fn test_random_radial_stays_in_component() {
        let g = two_triangles();
        let scores = identity_scores(6);

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let alignment = random_radial(&scores, &g, &g, DEFAULT_TOLERANCE, &mut rng).unwrap();

            // one triangle is matched by score, the other by the fallback
            assert_eq!(alignment.score_picks, 3);
            assert_eq!(alignment.fallback_pairs, 3);
            assert!(alignment.assignment.is_complete());
            assert!(alignment.assignment.is_injective());
            assert!((alignment.total_score - 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_random_radial_uses_accumulated_neighborhood() {
        // star 0-{1,2,3} in both graphs; leaf scores favour identity
        let g = Graph::from_edges(4, &[(0, 1), (0, 2), (0, 3)]).unwrap();
        let scores = DenseMatrix::from_fn(4, 4, |r, c| match (r, c) {
            (0, 0) => 2.0,
            (r, c) if r == c => 1.0,
            _ => 0.2,
        });
        let mut rng = StdRng::seed_from_u64(8);
        let alignment = random_radial(&scores, &g, &g, DEFAULT_TOLERANCE, &mut rng).unwrap();

        // leaves are reachable only through the hub's neighborhood
        assert_eq!(alignment.assignment.to_sentinel_vec(), vec![0, 1, 2, 3]);
        assert_eq!(alignment.fallback_pairs, 0);
    }

    #[test]
    fn test_branch_radial_walks_seed_neighborhood() {
        let g = two_triangles();
        let scores = identity_scores(6);
        let alignment = branch_radial(&scores, &g, &g).unwrap();

        // second seed restarts the walk in the other triangle
        assert_eq!(alignment.assignment.to_sentinel_vec(), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(alignment.fallback_pairs, 0);
    }

    #[test]
    fn test_branch_radial_inner_loop_bounded_by_degree() {
        // hub 0 with three leaves in g1, two in g2
        let g1 = Graph::from_edges(4, &[(0, 1), (0, 2), (0, 3)]).unwrap();
        let g2 = Graph::from_edges(4, &[(0, 1), (0, 2)]).unwrap();
        let scores = DenseMatrix::from_fn(4, 4, |r, c| if r == c { 1.0 } else { 0.5 });
        let alignment = branch_radial(&scores, &g1, &g2).unwrap();

        assert!(alignment.assignment.is_complete());
        assert_eq!(alignment.fallback_pairs, 0);
        assert_eq!(alignment.assignment.to_sentinel_vec(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_branch_radial_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(5);
        let g1 = random_graph(9, 0.4, &mut rng);
        let g2 = random_graph(9, 0.4, &mut rng);
        let scores = DenseMatrix::from_fn(9, 9, |_, _| rng.gen::<f64>());

        let first = branch_radial(&scores, &g1, &g2).unwrap();
        let second = branch_radial(&scores, &g1, &g2).unwrap();
        assert_eq!(first, second);
    }
}
