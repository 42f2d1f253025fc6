//! Sparse matrix representation.
//!
//! Provides a CSR (Compressed Sparse Row) matrix built from scattered
//! `(row, col, value)` triplets. Element stiffness blocks are accumulated
//! as triplets and summed here.

use serde::{Deserialize, Serialize};

use jello_types::Scalar;

/// Compressed Sparse Row (CSR) matrix.
///
/// Stores a sparse matrix in row-major order with sorted, unique column
/// indices per row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsrMatrix {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
    /// Row pointer array (length = rows + 1).
    /// `row_ptr[i]..row_ptr[i+1]` are the indices into `col_idx` and `values`
    /// for non-zeros in row `i`.
    pub row_ptr: Vec<usize>,
    /// Column indices of non-zero entries.
    pub col_idx: Vec<usize>,
    /// Non-zero values.
    pub values: Vec<Scalar>,
}

impl CsrMatrix {
    /// Creates an empty CSR matrix with the given dimensions.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            row_ptr: vec![0; rows + 1],
            col_idx: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Returns the number of stored entries.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Creates a CSR matrix from triplets (row, col, value).
    ///
    /// Duplicate entries are summed, which is what scatter-add assembly
    /// relies on.
    pub fn from_triplets(rows: usize, cols: usize, triplets: &[(usize, usize, Scalar)]) -> Self {
        if triplets.is_empty() {
            return Self::new(rows, cols);
        }

        // Count entries per row
        let mut row_counts = vec![0usize; rows];
        for &(r, _, _) in triplets {
            row_counts[r] += 1;
        }

        let mut bucket_ptr = vec![0usize; rows + 1];
        for i in 0..rows {
            bucket_ptr[i + 1] = bucket_ptr[i] + row_counts[i];
        }

        // Bucket by row, using a write cursor per row
        let mut bucket: Vec<(usize, Scalar)> = vec![(0, 0.0); triplets.len()];
        let mut cursor = bucket_ptr[..rows].to_vec();
        for &(r, c, v) in triplets {
            bucket[cursor[r]] = (c, v);
            cursor[r] += 1;
        }

        // Sort each row by column and merge duplicates
        let mut row_ptr = Vec::with_capacity(rows + 1);
        let mut col_idx = Vec::with_capacity(triplets.len());
        let mut values = Vec::with_capacity(triplets.len());
        row_ptr.push(0);

        for i in 0..rows {
            let row = &mut bucket[bucket_ptr[i]..bucket_ptr[i + 1]];
            row.sort_by_key(|&(c, _)| c);

            let row_start = col_idx.len();
            for &(c, v) in row.iter() {
                if col_idx.len() > row_start && col_idx.last() == Some(&c) {
                    if let Some(last) = values.last_mut() {
                        *last += v;
                    }
                } else {
                    col_idx.push(c);
                    values.push(v);
                }
            }
            row_ptr.push(col_idx.len());
        }

        Self {
            rows,
            cols,
            row_ptr,
            col_idx,
            values,
        }
    }

    /// Returns entry `(row, col)`, zero when not stored.
    pub fn get(&self, row: usize, col: usize) -> Scalar {
        let range = self.row_ptr[row]..self.row_ptr[row + 1];
        match self.col_idx[range.clone()].binary_search(&col) {
            Ok(pos) => self.values[range.start + pos],
            Err(_) => 0.0,
        }
    }

    /// Computes `y = A · x`.
    pub fn mul_vec(&self, x: &[Scalar], y: &mut [Scalar]) {
        for (row, out) in y.iter_mut().enumerate().take(self.rows) {
            let mut sum = 0.0;
            for idx in self.row_ptr[row]..self.row_ptr[row + 1] {
                sum += self.values[idx] * x[self.col_idx[idx]];
            }
            *out = sum;
        }
    }

    /// Checks `|A_ij − A_ji| <= tolerance · max|A|` for every stored entry.
    pub fn is_symmetric(&self, tolerance: Scalar) -> bool {
        if self.rows != self.cols {
            return false;
        }
        let scale = self.values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs())).max(1.0);
        for row in 0..self.rows {
            for idx in self.row_ptr[row]..self.row_ptr[row + 1] {
                let col = self.col_idx[idx];
                if (self.values[idx] - self.get(col, row)).abs() > tolerance * scale {
                    return false;
                }
            }
        }
        true
    }
}
