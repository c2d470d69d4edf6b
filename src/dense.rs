use crate::matrix::{Candidate, Cell, Matrix};
use crate::{AlignError, Result};
use itertools::iproduct;

/// Row-major dense score matrix over a `rows x cols` grid.
///
/// Strategies mutate their own clones; invalidation is irreversible within
/// one instance.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl DenseMatrix {
    /// Matrix of valid zero scores.
    pub fn new(rows: usize, cols: usize) -> Self {
        DenseMatrix {
            rows,
            cols,
            cells: vec![Cell::Valid(0.0); rows * cols],
        }
    }

    /// Matrix with every cell invalidated.
    pub fn invalidated(rows: usize, cols: usize) -> Self {
        DenseMatrix {
            rows,
            cols,
            cells: vec![Cell::Invalidated; rows * cols],
        }
    }

    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let cells = iproduct!(0..rows, 0..cols)
            .map(|(r, c)| Cell::from(f(r, c)))
            .collect();
        DenseMatrix { rows, cols, cells }
    }

    /// Builds a matrix from nested rows; every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(n_rows * n_cols);

        for row in rows {
            if row.len() != n_cols {
                return Err(AlignError::DimensionMismatch {
                    expected: n_cols,
                    found: row.len(),
                });
            }
            cells.extend(row.into_iter().map(Cell::from));
        }

        Ok(DenseMatrix {
            rows: n_rows,
            cols: n_cols,
            cells,
        })
    }

    /// Copies any matrix into dense form.
    pub fn from_matrix<M: Matrix>(matrix: &M) -> Result<Self> {
        let (rows, cols) = matrix.shape();
        let mut cells = Vec::with_capacity(rows * cols);
        for (r, c) in iproduct!(0..rows, 0..cols) {
            cells.push(Cell::from(matrix.value(r, c)?));
        }
        Ok(DenseMatrix { rows, cols, cells })
    }

    fn offset(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.rows || col >= self.cols {
            return Err(AlignError::IndexOutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(row * self.cols + col)
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Cell> {
        let idx = self.offset(row, col)?;
        Ok(self.cells[idx])
    }

    /// Valid score at `(row, col)`, `None` if invalidated.
    pub fn score(&self, row: usize, col: usize) -> Result<Option<f64>> {
        Ok(self.get(row, col)?.score())
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        let idx = self.offset(row, col)?;
        self.cells[idx] = Cell::from(value);
        Ok(())
    }

    /// Invalidates every cell of `row` and every cell of `col`.
    pub fn invalidate(&mut self, row: usize, col: usize) -> Result<()> {
        self.offset(row, col)?;
        let cols = self.cols;
        for cell in &mut self.cells[row * cols..(row + 1) * cols] {
            *cell = Cell::Invalidated;
        }
        for r in 0..self.rows {
            self.cells[r * cols + col] = Cell::Invalidated;
        }
        Ok(())
    }

    pub fn invalidate_all(&mut self) {
        self.cells.fill(Cell::Invalidated);
    }

    /// Largest valid entry; the first one in row-major order wins ties.
    /// `None` once every cell is invalidated.
    pub fn global_max(&self) -> Option<Candidate> {
        self.candidates().fold(None, |best, cand| match best {
            Some(b) if b.score >= cand.score => Some(b),
            _ => Some(cand),
        })
    }

    pub fn is_all_invalidated(&self) -> bool {
        !self.cells.iter().any(|cell| cell.is_valid())
    }

    pub fn valid_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_valid()).count()
    }

    /// Iterates the valid cells in row-major order.
    pub fn candidates(&self) -> impl Iterator<Item = Candidate> + '_ {
        let cols = self.cols;
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            cell.score().map(|score| Candidate {
                row: idx / cols,
                col: idx % cols,
                score,
            })
        })
    }

    /// Copies the cells of `source` addressed by `rows x cols` into `self`,
    /// leaving every other cell untouched.
    pub fn copy_region_from(
        &mut self,
        source: &DenseMatrix,
        rows: &[usize],
        cols: &[usize],
    ) -> Result<()> {
        if source.shape() != self.shape() {
            return Err(AlignError::DimensionMismatch {
                expected: self.rows * self.cols,
                found: source.rows * source.cols,
            });
        }
        for (&r, &c) in iproduct!(rows, cols) {
            let idx = source.offset(r, c)?;
            self.cells[idx] = source.cells[idx];
        }
        Ok(())
    }

    /// Invalidates `self`, then copies only the `rows x cols` region of `source`.
    pub fn restrict_to(
        &mut self,
        source: &DenseMatrix,
        rows: &[usize],
        cols: &[usize],
    ) -> Result<()> {
        self.invalidate_all();
        self.copy_region_from(source, rows, cols)
    }

    /// New matrix holding only the `rows x cols` region of `source`.
    pub fn restricted(source: &DenseMatrix, rows: &[usize], cols: &[usize]) -> Result<Self> {
        let mut local = DenseMatrix::invalidated(source.rows, source.cols);
        local.copy_region_from(source, rows, cols)?;
        Ok(local)
    }
}

impl Matrix for DenseMatrix {
    fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    fn value(&self, row: usize, col: usize) -> Result<f64> {
        Ok(self.get(row, col)?.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_a() -> DenseMatrix {
        DenseMatrix::from_rows(vec![
            vec![0.1, 0.2, 0.9, 0.3],
            vec![0.4, 0.5, 0.6, 0.2],
            vec![0.3, 0.8, 0.1, 0.7],
            vec![0.2, 0.1, 0.4, 0.6],
        ])
        .unwrap()
    }

    #[test]
    fn test_global_max() {
        let m = scenario_a();
        let best = m.global_max().unwrap();
        assert_eq!((best.row, best.col), (0, 2));
        assert_eq!(best.score, 0.9);
    }

    #[test]
    fn test_global_max_prefers_first_tie() {
        let m = DenseMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
        let best = m.global_max().unwrap();
        assert_eq!((best.row, best.col), (0, 1));
    }

    #[test]
    fn test_zero_is_a_valid_score() {
        let m = DenseMatrix::new(2, 2);
        let best = m.global_max().unwrap();
        assert_eq!(best.score, 0.0);
        assert!(!m.is_all_invalidated());
    }

    #[test]
    fn test_invalidate_row_and_col() {
        let mut m = scenario_a();
        m.invalidate(0, 2).unwrap();

        for c in 0..4 {
            assert_eq!(m.get(0, c).unwrap(), Cell::Invalidated);
        }
        for r in 0..4 {
            assert_eq!(m.get(r, 2).unwrap(), Cell::Invalidated);
        }
        assert_eq!(m.valid_count(), 9);

        let best = m.global_max().unwrap();
        assert_eq!((best.row, best.col), (2, 1));
    }

    #[test]
    fn test_invalidated_rows_never_return() {
        let mut m = scenario_a();
        let mut seen_rows = Vec::new();
        let mut seen_cols = Vec::new();

        while let Some(best) = m.global_max() {
            assert!(!seen_rows.contains(&best.row));
            assert!(!seen_cols.contains(&best.col));
            seen_rows.push(best.row);
            seen_cols.push(best.col);
            m.invalidate(best.row, best.col).unwrap();
        }

        assert_eq!(seen_rows.len(), 4);
        assert!(m.is_all_invalidated());
    }

    #[test]
    fn test_out_of_bounds() {
        let mut m = DenseMatrix::new(2, 3);
        assert!(matches!(
            m.get(2, 0),
            Err(AlignError::IndexOutOfBounds { row: 2, col: 0, rows: 2, cols: 3 })
        ));
        assert!(m.set(0, 3, 1.0).is_err());
        assert!(m.invalidate(5, 0).is_err());
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let result = DenseMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(
            result,
            Err(AlignError::DimensionMismatch { expected: 2, found: 1 })
        ));
    }

    #[test]
    fn test_restrict_to_neighbor_region() {
        let source = scenario_a();
        let mut local = source.clone();
        local.restrict_to(&source, &[1, 3], &[0, 3]).unwrap();

        assert_eq!(local.valid_count(), 4);
        assert_eq!(local.score(1, 0).unwrap(), Some(0.4));
        assert_eq!(local.score(3, 3).unwrap(), Some(0.6));
        assert_eq!(local.score(0, 2).unwrap(), None);

        let best = local.global_max().unwrap();
        assert_eq!((best.row, best.col), (3, 3));
    }

    #[test]
    fn test_copy_region_accumulates() {
        let source = scenario_a();
        let mut local = DenseMatrix::restricted(&source, &[0], &[0]).unwrap();
        local.copy_region_from(&source, &[2], &[1]).unwrap();

        assert_eq!(local.valid_count(), 2);
        assert_eq!(local.global_max().unwrap().score, 0.8);
    }

    #[test]
    fn test_restrict_keeps_source_invalidation() {
        let mut source = scenario_a();
        source.invalidate(1, 0).unwrap();
        let local = DenseMatrix::restricted(&source, &[1, 3], &[0, 3]).unwrap();
        assert_eq!(local.valid_count(), 1);
    }

    #[test]
    fn test_restrict_rejects_bad_indices() {
        let source = scenario_a();
        assert!(DenseMatrix::restricted(&source, &[4], &[0]).is_err());
        let mut other = DenseMatrix::new(3, 3);
        assert!(other.copy_region_from(&source, &[0], &[0]).is_err());
    }

    #[test]
    fn test_all_invalidated() {
        let m = DenseMatrix::invalidated(3, 2);
        assert!(m.is_all_invalidated());
        assert!(m.global_max().is_none());
        assert_eq!(m.value(0, 0).unwrap(), f64::NEG_INFINITY);
    }
}
