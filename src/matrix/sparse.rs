// SparseMatrix trait and the CSR implementation used for lattice operators

use std::ops::{Add, Mul};

use faer::sparse::{SparseRowMat, SymbolicSparseRowMat, Triplet};
use faer::traits::ComplexField;
use num_traits::Zero;

use crate::core::traits::MatVec;
use crate::error::MreError;

/// A read‐only sparse matrix supporting y = A * x.
pub trait SparseMatrix<T> {
    /// Number of rows.
    fn nrows(&self) -> usize;
    /// Number of columns.
    fn ncols(&self) -> usize;
    /// Number of stored entries.
    fn nnz(&self) -> usize;
    /// Compute y = A * x.  `x.len() == ncols()`, `y.len() == nrows()`.
    fn spmv(&self, x: &[T], y: &mut [T]);
}

/// Compressed sparse row matrix over faer's owning CSR storage.
pub struct CsrMatrix<T> {
    inner: SparseRowMat<usize, T>,
}

impl<T: ComplexField + Copy + Zero> CsrMatrix<T> {
    /// Build a CSR from raw row‐ptr, col‐idx, and values.
    ///
    /// Column indices must be strictly increasing within each row.
    pub fn from_csr(
        nrows: usize,
        ncols: usize,
        row_ptr: Vec<usize>,
        col_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Result<Self, MreError> {
        // faer's checked constructors panic; reject bad input here instead
        if row_ptr.len() != nrows + 1 || col_idx.len() != values.len() {
            return Err(MreError::DimensionMismatch(format!(
                "{} row pointers and {} column indices for {} rows and {} values",
                row_ptr.len(),
                col_idx.len(),
                nrows,
                values.len()
            )));
        }
        if row_ptr[0] != 0 || row_ptr[nrows] != values.len() || row_ptr.windows(2).any(|w| w[0] > w[1]) {
            return Err(MreError::DimensionMismatch("row_ptr is not a valid prefix sum".into()));
        }
        for row in row_ptr.windows(2) {
            let cols = &col_idx[row[0]..row[1]];
            if cols.iter().any(|&c| c >= ncols) || cols.windows(2).any(|w| w[0] >= w[1]) {
                return Err(MreError::DimensionMismatch(format!(
                    "row columns {cols:?} unsorted or out of range for {ncols} columns"
                )));
            }
        }
        let symbolic = SymbolicSparseRowMat::new_checked(nrows, ncols, row_ptr, None, col_idx);
        Ok(Self { inner: SparseRowMat::new(symbolic, values) })
    }

    /// Build from (row, col, value) triplets; duplicates are summed.
    pub fn from_triplets(nrows: usize, ncols: usize, triplets: Vec<(usize, usize, T)>) -> Result<Self, MreError> {
        let triplets: Vec<Triplet<usize, usize, T>> =
            triplets.into_iter().map(|(r, c, v)| Triplet::new(r, c, v)).collect();
        let inner = SparseRowMat::try_new_from_triplets(nrows, ncols, &triplets).map_err(|e| {
            MreError::DimensionMismatch(format!("cannot assemble {nrows}x{ncols} matrix: {e:?}"))
        })?;
        Ok(Self { inner })
    }

    /// Row pointers, column indices and values of the underlying storage.
    fn parts(&self) -> (&[usize], &[usize], &[T]) {
        let m = self.inner.as_ref();
        (m.symbolic().row_ptr(), m.symbolic().col_idx(), m.val())
    }

    /// Entry (i, j), zero if not stored.
    pub fn get(&self, i: usize, j: usize) -> T {
        let (row_ptr, col_idx, values) = self.parts();
        let (start, end) = (row_ptr[i], row_ptr[i + 1]);
        match col_idx[start..end].binary_search(&j) {
            Ok(k) => values[start + k],
            Err(_) => T::zero(),
        }
    }
}

impl<T: ComplexField + Copy + Zero + Add<Output = T> + Mul<Output = T>> CsrMatrix<T> {
    fn row_dot(&self, i: usize, x: &[T]) -> T {
        let (row_ptr, col_idx, values) = self.parts();
        let mut sum = T::zero();
        for k in row_ptr[i]..row_ptr[i + 1] {
            sum = sum + values[k] * x[col_idx[k]];
        }
        sum
    }
}

impl<T: ComplexField + Copy + Zero + Add<Output = T> + Mul<Output = T>> SparseMatrix<T> for CsrMatrix<T> {
    fn nrows(&self) -> usize {
        self.inner.nrows()
    }
    fn ncols(&self) -> usize {
        self.inner.ncols()
    }
    fn nnz(&self) -> usize {
        let (row_ptr, _, _) = self.parts();
        row_ptr[self.inner.nrows()]
    }
    fn spmv(&self, x: &[T], y: &mut [T]) {
        assert_eq!(x.len(), self.ncols());
        assert_eq!(y.len(), self.nrows());
        for (i, yi) in y.iter_mut().enumerate() {
            *yi = self.row_dot(i, x);
        }
    }
}

#[cfg(feature = "rayon")]
use rayon::prelude::*;

#[cfg(feature = "rayon")]
impl<T: ComplexField + Copy + Zero + Add<Output = T> + Mul<Output = T> + Send + Sync> CsrMatrix<T> {
    /// Parallel SpMV using Rayon
    pub fn spmv_parallel(&self, x: &[T], y: &mut [T]) {
        assert_eq!(x.len(), self.ncols());
        assert_eq!(y.len(), self.nrows());
        y.par_iter_mut().enumerate().for_each(|(i, yi)| {
            *yi = self.row_dot(i, x);
        });
    }
}

/// Operator application on any field backed by a slice.
impl<T, V> MatVec<V> for CsrMatrix<T>
where
    T: ComplexField + Copy + Zero + Add<Output = T> + Mul<Output = T> + Send + Sync,
    V: AsRef<[T]> + AsMut<[T]>,
{
    fn matvec(&self, x: &V, y: &mut V) {
        #[cfg(feature = "rayon")]
        self.spmv_parallel(x.as_ref(), y.as_mut());
        #[cfg(not(feature = "rayon"))]
        self.spmv(x.as_ref(), y.as_mut());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_spmv() {
        // 3×3 identity in CSR: row_ptr=[0,1,2,3], col_idx=[0,1,2], vals=[1,1,1]
        let m = CsrMatrix::from_csr(3, 3, vec![0, 1, 2, 3], vec![0, 1, 2], vec![1.0, 1.0, 1.0]).unwrap();
        let x = vec![2.0, 3.0, 5.0];
        let mut y = vec![0.0; 3];
        m.spmv(&x, &mut y);
        assert_eq!(y, x);
    }

    #[test]
    fn simple_pattern() {
        // 2×3 matrix [[1,2,0],[0,3,4]]
        let m = CsrMatrix::from_csr(2, 3, vec![0, 2, 4], vec![0, 1, 1, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let x = vec![1.0, 1.0, 1.0];
        let mut y = vec![0.0; 2];
        m.spmv(&x, &mut y);
        assert_eq!(y, vec![3.0, 7.0]);
        assert_eq!(m.nnz(), 4);
        assert_eq!(m.get(0, 2), 0.0);
        assert_eq!(m.get(1, 2), 4.0);
    }

    #[test]
    fn triplets_sum_duplicates() {
        let m = CsrMatrix::from_triplets(2, 2, vec![(1, 0, 2.0), (0, 1, 1.0), (1, 0, 0.5), (0, 0, 3.0)]).unwrap();
        assert_eq!(m.nnz(), 3);
        assert_eq!(m.get(1, 0), 2.5);
        assert_eq!(m.get(0, 0), 3.0);
        assert_eq!(m.get(1, 1), 0.0);
        let mut y = vec![0.0; 2];
        m.matvec(&vec![1.0, 1.0], &mut y);
        assert_eq!(y, vec![4.0, 2.5]);
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(CsrMatrix::from_csr(2, 2, vec![0, 1], vec![0], vec![1.0]).is_err());
        assert!(CsrMatrix::from_csr(1, 2, vec![0, 1], vec![5], vec![1.0]).is_err());
        assert!(CsrMatrix::from_csr(1, 3, vec![0, 2], vec![2, 0], vec![1.0, 1.0]).is_err());
        assert!(CsrMatrix::<f64>::from_triplets(1, 1, vec![(0, 3, 1.0)]).is_err());
    }
}
