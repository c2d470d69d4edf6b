use crate::assignment::Assignment;
use crate::dense::DenseMatrix;
use crate::{AlignError, Graph, Result};

/// Sum of the scores of all assigned pairs. Invalidated cells contribute
/// nothing.
pub fn total_score(assignment: &Assignment, scores: &DenseMatrix) -> Result<f64> {
    let mut total = 0.0;
    for (u, v) in assignment.pairs() {
        total += scores.score(u, v)?.unwrap_or(0.0);
    }
    Ok(total)
}

/// Number of graph-1 edges `(u, w)` with both ends assigned whose images
/// `(f(u), f(w))` are edges of graph 2.
pub fn conserved_edges(assignment: &Assignment, g1: &Graph, g2: &Graph) -> Result<usize> {
    if assignment.g1_len() != g1.num_vertices() {
        return Err(AlignError::DimensionMismatch {
            expected: g1.num_vertices(),
            found: assignment.g1_len(),
        });
    }

    let mut conserved = 0;
    for (u, w) in g1.edges() {
        if let (Some(x), Some(y)) = (assignment.get(u), assignment.get(w)) {
            if g2.has_edge(x, y)? {
                conserved += 1;
            }
        }
    }
    Ok(conserved)
}

/// Fraction of graph-1 edges conserved by the assignment; zero for an
/// edgeless graph 1.
pub fn edge_correctness(assignment: &Assignment, g1: &Graph, g2: &Graph) -> Result<f64> {
    let edges = g1.num_edges();
    if edges == 0 {
        return Ok(0.0);
    }
    Ok(conserved_edges(assignment, g1, g2)? as f64 / edges as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path4() -> Graph {
        Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]).unwrap()
    }

    #[test]
    fn test_total_score() {
        let scores = DenseMatrix::from_rows(vec![vec![0.5, f64::NEG_INFINITY], vec![0.25, 1.0]])
            .unwrap();
        let mut a = Assignment::new(2, 2);
        a.assign(0, 1).unwrap();
        a.assign(1, 0).unwrap();
        assert_eq!(total_score(&a, &scores).unwrap(), 0.25);
    }

    #[test]
    fn test_identity_conserves_everything() {
        let g = path4();
        let mut a = Assignment::new(4, 4);
        for v in 0..4 {
            a.assign(v, v).unwrap();
        }
        assert_eq!(conserved_edges(&a, &g, &g).unwrap(), 3);
        assert_eq!(edge_correctness(&a, &g, &g).unwrap(), 1.0);
    }

    #[test]
    fn test_partial_conservation() {
        let g = path4();
        let mut a = Assignment::new(4, 4);
        // 0->0, 1->2, 2->1, 3->3: only edge (1,2) survives
        for (u, v) in [(0, 0), (1, 2), (2, 1), (3, 3)] {
            a.assign(u, v).unwrap();
        }
        assert_eq!(conserved_edges(&a, &g, &g).unwrap(), 1);
        assert!((edge_correctness(&a, &g, &g).unwrap() - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_unassigned_endpoints_are_skipped() {
        let g = path4();
        let mut a = Assignment::new(4, 4);
        a.assign(0, 0).unwrap();
        assert_eq!(conserved_edges(&a, &g, &g).unwrap(), 0);
        assert_eq!(edge_correctness(&a, &Graph::new(4), &g).unwrap(), 0.0);
    }

    #[test]
    fn test_size_mismatch() {
        let a = Assignment::new(3, 4);
        assert!(conserved_edges(&a, &path4(), &path4()).is_err());
    }
}
