use crate::dense::DenseMatrix;
use crate::matrix::Matrix;
use crate::{AlignError, Result};
use std::collections::HashMap;
use std::fmt;

/// Weight inserted for every edge read from an edge-list file.
pub const DEFAULT_ENTRY: f64 = 1.0;

/// Symmetric `size x size` matrix storing only nonzero entries.
///
/// `(i, j)` and `(j, i)` share one slot keyed by the packed triangular index
/// `min + max * (max + 1) / 2`.
#[derive(Debug, Clone, Default)]
pub struct SymSparseMatrix {
    size: usize,
    entries: HashMap<usize, f64>,
}

/// Number of slots in the packed lower triangle of a `size x size` matrix.
/// Every packed index of such a matrix fits in `usize` once this succeeds.
pub fn packed_len(size: usize) -> Result<usize> {
    size.checked_add(1)
        .and_then(|next| size.checked_mul(next))
        .map(|twice| twice / 2)
        .ok_or(AlignError::SizeOverflow {
            rows: size,
            cols: size,
        })
}

fn packed_index(i: usize, j: usize) -> usize {
    if i <= j {
        i + j * (j + 1) / 2
    } else {
        j + i * (i + 1) / 2
    }
}

impl SymSparseMatrix {
    pub fn new(size: usize) -> Self {
        SymSparseMatrix {
            size,
            entries: HashMap::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of stored (nonzero) entries, counting each symmetric pair once.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Storage key for `(i, j)`; fails when either index is out of range or
    /// the packed index does not fit in `usize`.
    fn key(&self, i: usize, j: usize) -> Result<usize> {
        if i >= self.size || j >= self.size {
            return Err(AlignError::IndexOutOfBounds {
                row: i,
                col: j,
                rows: self.size,
                cols: self.size,
            });
        }
        let (lo, hi) = (i.min(j), i.max(j));
        hi.checked_add(1)
            .and_then(|next| hi.checked_mul(next))
            .and_then(|twice| (twice / 2).checked_add(lo))
            .ok_or(AlignError::SizeOverflow {
                rows: self.size,
                cols: self.size,
            })
    }

    pub fn get(&self, i: usize, j: usize) -> Result<f64> {
        let key = self.key(i, j)?;
        Ok(self
            .entries
            .get(&key)
            .copied()
            .unwrap_or(0.0))
    }

    /// Sets `(i, j)` and `(j, i)`. Writing zero removes the entry.
    pub fn insert(&mut self, i: usize, j: usize, value: f64) -> Result<()> {
        let key = self.key(i, j)?;
        if value == 0.0 {
            self.entries.remove(&key);
        } else {
            self.entries.insert(key, value);
        }
        Ok(())
    }

    pub fn has_edge(&self, i: usize, j: usize) -> Result<bool> {
        Ok(self.get(i, j)? != 0.0)
    }

    /// Vertices with a nonzero entry in row `vertex`, ascending.
    pub fn neighbors(&self, vertex: usize) -> Result<Vec<usize>> {
        if vertex >= self.size {
            return Err(AlignError::VertexOutOfBounds {
                vertex,
                len: self.size,
            });
        }
        let mut out = Vec::new();
        for other in 0..self.size {
            if self.entries.contains_key(&self.key(vertex, other)?) {
                out.push(other);
            }
        }
        Ok(out)
    }

    pub fn row_sums(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.size];
        for (i, j, value) in self.iter() {
            sums[i] += value;
            if i != j {
                sums[j] += value;
            }
        }
        sums
    }

    /// Stored entries as `(i, j, value)` with `i <= j`, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.entries.iter().map(|(&key, &value)| {
            let (i, j) = unpack_index(key);
            (i, j, value)
        })
    }

    /// Kronecker product `self ⊗ other`, which is again symmetric. Fails with
    /// `SizeOverflow` when the product's packed storage cannot be indexed.
    pub fn kron(&self, other: &SymSparseMatrix) -> Result<SymSparseMatrix> {
        let size = self
            .size
            .checked_mul(other.size)
            .ok_or(AlignError::SizeOverflow {
                rows: self.size,
                cols: other.size,
            })?;
        packed_len(size)?;
        let mut product = SymSparseMatrix::new(size);
        for (a_i, a_j, a_val) in self.iter() {
            for (b_i, b_j, b_val) in other.iter() {
                let value = a_val * b_val;
                // Each stored pair stands for both (i, j) and (j, i); the
                // cross terms land on distinct off-diagonal slots.
                product.entries.insert(
                    packed_index(a_i * other.size + b_i, a_j * other.size + b_j),
                    value,
                );
                product.entries.insert(
                    packed_index(a_i * other.size + b_j, a_j * other.size + b_i),
                    value,
                );
            }
        }
        Ok(product)
    }

    /// Returns `D * A * D` for the diagonal matrix `D = diag(diagonal)`.
    pub fn scaled(&self, diagonal: &[f64]) -> Result<SymSparseMatrix> {
        if diagonal.len() != self.size {
            return Err(AlignError::DimensionMismatch {
                expected: self.size,
                found: diagonal.len(),
            });
        }
        let mut out = SymSparseMatrix::new(self.size);
        for (i, j, value) in self.iter() {
            out.insert(i, j, diagonal[i] * value * diagonal[j])?;
        }
        Ok(out)
    }

    /// Dense submatrix of the rows and columns whose mask bit is set.
    pub fn selection(&self, row_mask: &[bool], col_mask: &[bool]) -> Result<DenseMatrix> {
        for mask in [row_mask, col_mask] {
            if mask.len() != self.size {
                return Err(AlignError::DimensionMismatch {
                    expected: self.size,
                    found: mask.len(),
                });
            }
        }
        let rows: Vec<usize> = (0..self.size).filter(|&i| row_mask[i]).collect();
        let cols: Vec<usize> = (0..self.size).filter(|&j| col_mask[j]).collect();

        let mut out = DenseMatrix::new(rows.len(), cols.len());
        for (r, &i) in rows.iter().enumerate() {
            for (c, &j) in cols.iter().enumerate() {
                out.set(r, c, self.get(i, j)?)?;
            }
        }
        Ok(out)
    }

    /// Rebuilds a matrix from the `{size, packed}` transfer layout: row `i`
    /// contributes columns `0..=i`, giving `size * (size + 1) / 2` values.
    pub fn from_packed(size: usize, packed: &[f64]) -> Result<SymSparseMatrix> {
        let expected = packed_len(size)?;
        if packed.len() != expected {
            return Err(AlignError::DimensionMismatch {
                expected,
                found: packed.len(),
            });
        }
        let mut out = SymSparseMatrix::new(size);
        let mut values = packed.iter();
        for i in 0..size {
            for j in 0..=i {
                if let Some(&value) = values.next() {
                    out.insert(i, j, value)?;
                }
            }
        }
        Ok(out)
    }

    pub fn to_packed(&self) -> Vec<f64> {
        let mut packed = Vec::with_capacity(packed_len(self.size).unwrap_or_default());
        for i in 0..self.size {
            for j in 0..=i {
                packed.push(
                    self.entries
                        .get(&packed_index(i, j))
                        .copied()
                        .unwrap_or(0.0),
                );
            }
        }
        packed
    }
}

/// Inverse of `packed_index` for `i <= j`.
fn unpack_index(key: usize) -> (usize, usize) {
    // largest j with j * (j + 1) / 2 <= key
    let mut j = (((8 * key + 1) as f64).sqrt() as usize).saturating_sub(1) / 2;
    while (j + 1) * (j + 2) / 2 <= key {
        j += 1;
    }
    while j * (j + 1) / 2 > key {
        j -= 1;
    }
    (key - j * (j + 1) / 2, j)
}

impl Matrix for SymSparseMatrix {
    fn shape(&self) -> (usize, usize) {
        (self.size, self.size)
    }

    fn value(&self, row: usize, col: usize) -> Result<f64> {
        self.get(row, col)
    }
}

impl PartialEq for SymSparseMatrix {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.entries == other.entries
    }
}

impl fmt::Display for SymSparseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Size: {}*{}", self.size, self.size)?;
        for i in 0..self.size {
            let row: Vec<String> = (0..self.size)
                .map(|j| {
                    let value = self
                        .entries
                        .get(&packed_index(i, j))
                        .copied()
                        .unwrap_or(0.0);
                    value.to_string()
                })
                .collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}
