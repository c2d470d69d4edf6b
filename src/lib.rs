use itertools::Itertools;

/// Undirected binary graph stored as sorted neighbor lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    /// Number of vertices
    n: usize,
    /// neighbors[v] = ascending list of vertices adjacent to v
    neighbors: Vec<Vec<usize>>,
}

impl Graph {
    /// Graph with `n` isolated vertices
    pub fn new(n: usize) -> Self {
        Graph {
            n,
            neighbors: vec![Vec::new(); n],
        }
    }

    /// Builds a graph from a square 0/1 adjacency matrix; row `v` lists the
    /// neighbors of `v`.
    pub fn from_adjacency_matrix(adj: Vec<Vec<u8>>) -> Result<Self> {
        let n = adj.len();
        let mut neighbors = Vec::with_capacity(n);
        for row in &adj {
            if row.len() != n {
                return Err(AlignError::NotSquare {
                    rows: n,
                    cols: row.len(),
                });
            }
            neighbors.push(row.iter().positions(|&x| x != 0).collect());
        }
        Ok(Graph { n, neighbors })
    }

    /// Builds an undirected graph from an edge list.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Result<Self> {
        let mut neighbors = vec![Vec::new(); n];
        for &(u, v) in edges {
            for vertex in [u, v] {
                if vertex >= n {
                    return Err(AlignError::VertexOutOfBounds { vertex, len: n });
                }
            }
            neighbors[u].push(v);
            if u != v {
                neighbors[v].push(u);
            }
        }
        for list in &mut neighbors {
            list.sort_unstable();
            list.dedup();
        }
        Ok(Graph { n, neighbors })
    }

    /// Every nonzero entry of a square matrix becomes an edge.
    pub fn from_matrix<M: Matrix>(matrix: &M) -> Result<Self> {
        let (rows, cols) = matrix.shape();
        if rows != cols {
            return Err(AlignError::NotSquare { rows, cols });
        }
        let mut neighbors = Vec::with_capacity(rows);
        for v in 0..rows {
            let mut list = Vec::new();
            for u in 0..cols {
                let value = matrix.value(v, u)?;
                if value != 0.0 && !value.is_nan() {
                    list.push(u);
                }
            }
            neighbors.push(list);
        }
        Ok(Graph {
            n: rows,
            neighbors,
        })
    }

    pub fn num_vertices(&self) -> usize {
        self.n
    }

    pub fn neighbors(&self, v: usize) -> Result<&[usize]> {
        self.neighbors
            .get(v)
            .map(Vec::as_slice)
            .ok_or(AlignError::VertexOutOfBounds {
                vertex: v,
                len: self.n,
            })
    }

    pub fn degree(&self, v: usize) -> Result<usize> {
        Ok(self.neighbors(v)?.len())
    }

    pub fn has_edge(&self, u: usize, v: usize) -> Result<bool> {
        if v >= self.n {
            return Err(AlignError::VertexOutOfBounds {
                vertex: v,
                len: self.n,
            });
        }
        Ok(self.neighbors(u)?.binary_search(&v).is_ok())
    }

    /// Undirected edges `(u, v)` with `u <= v`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.neighbors.iter().enumerate().flat_map(|(u, list)| {
            list.iter()
                .filter(move |&&v| u <= v)
                .map(move |&v| (u, v))
        })
    }

    pub fn num_edges(&self) -> usize {
        self.edges().count()
    }
}

// Module declarations
pub mod assignment;
pub mod batch;
pub mod completion;
pub mod dense;
pub mod error;
pub mod greedy;
pub mod matrix;
pub mod parser;
pub mod quality;
pub mod selection;
pub mod sparse;

pub use assignment::Assignment;
pub use batch::{align_batch, best_of, AlignJob};
pub use dense::DenseMatrix;
pub use error::{AlignError, Result};
pub use greedy::{align, AlignConfig, Alignment, Strategy};
pub use matrix::{Candidate, Cell, Matrix};
pub use sparse::SymSparseMatrix;

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Graph {
        Graph::from_edges(3, &[(0, 1), (1, 2), (2, 0)]).unwrap()
    }

    #[test]
    fn test_graph_creation() {
        let g = Graph::new(3);
        assert_eq!(g.num_vertices(), 3);
        assert!(g.neighbors(0).unwrap().is_empty());
        assert_eq!(g.num_edges(), 0);
    }

    #[test]
    fn test_from_edges_sorted_and_symmetric() {
        let g = Graph::from_edges(4, &[(3, 0), (0, 1), (1, 0)]).unwrap();
        assert_eq!(g.neighbors(0).unwrap(), &[1, 3]);
        assert_eq!(g.neighbors(3).unwrap(), &[0]);
        assert_eq!(g.num_edges(), 2);
        assert!(g.has_edge(1, 0).unwrap());
        assert!(!g.has_edge(1, 3).unwrap());
    }

    #[test]
    fn test_from_adjacency_matrix() {
        let g = Graph::from_adjacency_matrix(vec![vec![0, 1, 1], vec![1, 0, 1], vec![1, 1, 0]])
            .unwrap();
        assert_eq!(g, triangle());

        let bad = Graph::from_adjacency_matrix(vec![vec![0, 1], vec![1]]);
        assert!(matches!(bad, Err(AlignError::NotSquare { .. })));
    }

    #[test]
    fn test_from_sparse_matrix() {
        let mut m = SymSparseMatrix::new(3);
        m.insert(0, 1, 1.0).unwrap();
        m.insert(2, 1, 1.0).unwrap();
        let g = Graph::from_matrix(&m).unwrap();
        assert_eq!(g.neighbors(1).unwrap(), &[0, 2]);
        assert_eq!(g.degree(0).unwrap(), 1);
    }

    #[test]
    fn test_vertex_bounds() {
        let g = triangle();
        assert!(matches!(
            g.neighbors(3),
            Err(AlignError::VertexOutOfBounds { vertex: 3, len: 3 })
        ));
        assert!(g.has_edge(0, 7).is_err());
        assert!(Graph::from_edges(2, &[(0, 2)]).is_err());
    }
}
