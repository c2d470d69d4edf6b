use crate::Result;

/// Read access shared by the dense and sparse-symmetric score matrices.
pub trait Matrix {
    /// `(rows, cols)`
    fn shape(&self) -> (usize, usize);

    /// Value at `(row, col)`. Invalidated cells read as `f64::NEG_INFINITY`.
    fn value(&self, row: usize, col: usize) -> Result<f64>;

    fn rows(&self) -> usize {
        self.shape().0
    }

    fn cols(&self) -> usize {
        self.shape().1
    }

    fn is_square(&self) -> bool {
        let (rows, cols) = self.shape();
        rows == cols
    }
}

/// A single cell of a working score matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    Valid(f64),
    /// Never selectable again within this matrix instance.
    Invalidated,
}

impl Cell {
    pub fn score(self) -> Option<f64> {
        match self {
            Cell::Valid(score) => Some(score),
            Cell::Invalidated => None,
        }
    }

    pub fn is_valid(self) -> bool {
        matches!(self, Cell::Valid(_))
    }
}

impl From<f64> for Cell {
    /// `-inf` and NaN carry no usable score and map to `Invalidated`.
    fn from(value: f64) -> Self {
        if value.is_nan() || value == f64::NEG_INFINITY {
            Cell::Invalidated
        } else {
            Cell::Valid(value)
        }
    }
}

impl From<Cell> for f64 {
    fn from(cell: Cell) -> Self {
        cell.score().unwrap_or(f64::NEG_INFINITY)
    }
}

/// A selectable `(row, col)` pair and its score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub row: usize,
    pub col: usize,
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_from_float() {
        assert_eq!(Cell::from(0.0), Cell::Valid(0.0));
        assert_eq!(Cell::from(-3.5), Cell::Valid(-3.5));
        assert_eq!(Cell::from(f64::NEG_INFINITY), Cell::Invalidated);
        assert_eq!(Cell::from(f64::NAN), Cell::Invalidated);
    }

    #[test]
    fn test_cell_into_float() {
        assert_eq!(f64::from(Cell::Valid(0.25)), 0.25);
        assert_eq!(f64::from(Cell::Invalidated), f64::NEG_INFINITY);
    }
}
