//! Compressed sparse row matrices.
//!
//! Finite difference operators are returned as [`CsrMatrix`], a lightweight CSR
//! matrix over `f64` supporting the matrix-vector products and row queries
//! needed to apply and inspect them.

use nalgebra::{DMatrix, DVector};

use crate::error::{GeometryError, Result};

/// Compressed Sparse Row (CSR) matrix.
///
/// Stores a sparse matrix in CSR format for efficient matrix-vector multiplication.
#[derive(Debug, Clone, PartialEq)]
pub struct CsrMatrix {
    /// Number of rows.
    rows: usize,
    /// Number of columns.
    cols: usize,
    /// Row pointers: row_ptr[i] is the index in col_idx/values where row i starts.
    /// Length is rows + 1, with row_ptr[rows] = nnz.
    row_ptr: Vec<usize>,
    /// Column indices for each non-zero value.
    col_idx: Vec<usize>,
    /// Non-zero values.
    values: Vec<f64>,
}

impl CsrMatrix {
    /// Create an empty `rows x cols` matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            row_ptr: vec![0; rows + 1],
            col_idx: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Create a CSR matrix from triplets (row, col, value).
    ///
    /// Duplicate entries at the same (row, col) are summed.
    pub fn from_triplets(rows: usize, cols: usize, mut triplets: Vec<(usize, usize, f64)>) -> Self {
        triplets.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));
        Self::from_sorted_triplets(rows, cols, triplets)
    }

    /// Create a CSR matrix from triplets already ordered by (row, col).
    ///
    /// Skips the sort performed by [`CsrMatrix::from_triplets`]. Consecutive
    /// duplicates are summed.
    pub fn from_sorted_triplets<T>(rows: usize, cols: usize, triplets: T) -> Self
    where
        T: IntoIterator<Item = (usize, usize, f64)>,
    {
        let triplets = triplets.into_iter();
        let mut row_ptr = vec![0usize; rows + 1];
        let mut col_idx = Vec::with_capacity(triplets.size_hint().0);
        let mut values = Vec::with_capacity(triplets.size_hint().0);

        let mut prev: Option<(usize, usize)> = None;
        for (row, col, val) in triplets {
            debug_assert!(row < rows && col < cols, "triplet ({}, {}) out of bounds", row, col);

            if prev == Some((row, col)) {
                // Same position: accumulate value
                if let Some(last) = values.last_mut() {
                    *last += val;
                }
                continue;
            }
            debug_assert!(
                prev.map_or(true, |p| p < (row, col)),
                "triplets must be sorted by (row, col)"
            );

            col_idx.push(col);
            values.push(val);
            row_ptr[row + 1] += 1;
            prev = Some((row, col));
        }

        // Per-row counts to offsets
        for r in 0..rows {
            row_ptr[r + 1] += row_ptr[r];
        }

        Self {
            rows,
            cols,
            row_ptr,
            col_idx,
            values,
        }
    }

    /// Stack matrices on top of each other.
    ///
    /// All blocks must have the same number of columns. Rows of `blocks[0]`
    /// come first.
    pub fn vstack(blocks: &[CsrMatrix]) -> Result<Self> {
        let Some(first) = blocks.first() else {
            return Ok(Self::zeros(0, 0));
        };
        let cols = first.cols;

        let mut rows = 0;
        let mut nnz = 0;
        for block in blocks {
            if block.cols != cols {
                return Err(GeometryError::DimensionMismatch {
                    context: "vstack column count",
                    expected: cols,
                    found: block.cols,
                });
            }
            rows += block.rows;
            nnz += block.nnz();
        }

        let mut row_ptr = Vec::with_capacity(rows + 1);
        let mut col_idx = Vec::with_capacity(nnz);
        let mut values = Vec::with_capacity(nnz);
        row_ptr.push(0);

        for block in blocks {
            let offset = col_idx.len();
            row_ptr.extend(block.row_ptr[1..].iter().map(|&p| p + offset));
            col_idx.extend_from_slice(&block.col_idx);
            values.extend_from_slice(&block.values);
        }

        Ok(Self {
            rows,
            cols,
            row_ptr,
            col_idx,
            values,
        })
    }

    /// Get the number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.rows
    }

    /// Get the number of columns.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.cols
    }

    /// Get the shape as `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Get the number of non-zero entries.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Iterate over the stored `(col, value)` entries of row `i`.
    ///
    /// # Panics
    /// Panics if `i >= nrows()`.
    pub fn row(&self, i: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let range = self.row_ptr[i]..self.row_ptr[i + 1];
        self.col_idx[range.clone()]
            .iter()
            .copied()
            .zip(self.values[range].iter().copied())
    }

    /// Get the entry at `(i, j)`, or zero if it is not stored.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        if i >= self.rows {
            return 0.0;
        }
        let range = self.row_ptr[i]..self.row_ptr[i + 1];
        match self.col_idx[range.clone()].binary_search(&j) {
            Ok(k) => self.values[range.start + k],
            Err(_) => 0.0,
        }
    }

    /// Sum of each row.
    pub fn row_sums(&self) -> DVector<f64> {
        DVector::from_fn(self.rows, |i, _| self.row(i).map(|(_, v)| v).sum())
    }

    /// Multiply matrix by vector: y = A * x.
    pub fn mul_vec(&self, x: &DVector<f64>) -> DVector<f64> {
        let mut y = DVector::zeros(self.rows);
        self.mul_vec_add(x, &mut y);
        y
    }

    /// Multiply matrix by vector, adding to existing vector: y += A * x.
    pub fn mul_vec_add(&self, x: &DVector<f64>, y: &mut DVector<f64>) {
        assert_eq!(x.len(), self.cols, "Vector dimension mismatch");
        assert_eq!(y.len(), self.rows, "Output dimension mismatch");

        for i in 0..self.rows {
            let start = self.row_ptr[i];
            let end = self.row_ptr[i + 1];

            let mut sum = 0.0;
            for k in start..end {
                sum += self.values[k] * x[self.col_idx[k]];
            }
            y[i] += sum;
        }
    }

    /// Expand into a dense matrix.
    ///
    /// Intended for inspecting small operators.
    pub fn to_dense(&self) -> DMatrix<f64> {
        let mut dense = DMatrix::zeros(self.rows, self.cols);
        for i in 0..self.rows {
            for (j, v) in self.row(i) {
                dense[(i, j)] += v;
            }
        }
        dense
    }
}
