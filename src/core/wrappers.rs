//! Host implementations of the core traits.
//!
//! This module provides the host-memory vector algebra used by the extrapolator and
//! operator implementations for dense `faer::Mat` and plain closures.
//!
//! # Features
//! - `FieldAlgebra` on `()` for any complex buffer that knows its location, so `let blas = ();`
//!   is the host vector library.
//! - Reductions (norms and inner products) run on Rayon when the `rayon` feature is enabled.
//! - Dense complex matrix-vector products for `faer::Mat<Complex64>`.
//!
//! # References
//! - [faer crate documentation](https://docs.rs/faer)
//! - [num-complex crate documentation](https://docs.rs/num-complex)

use crate::core::traits::{FieldAlgebra, FieldLocation, MatVec, Resident};
use faer::Mat;
use num_complex::Complex64;

/// Host vector algebra over any complex buffer.
///
/// With the `rayon` feature the reductions split across the global thread pool; updates are
/// elementwise and stay serial.
impl<V> FieldAlgebra<V> for ()
where
    V: AsRef<[Complex64]> + AsMut<[Complex64]> + Resident,
{
    fn norm2(&self, x: &V) -> f64 {
        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;
            x.as_ref()
                .par_iter()
                .map(|xi| xi.norm_sqr())
                .reduce(|| 0.0, |acc, v| acc + v)
        }
        #[cfg(not(feature = "rayon"))]
        {
            x.as_ref().iter().map(|xi| xi.norm_sqr()).sum()
        }
    }

    fn scale(&self, a: f64, x: &mut V) {
        for xi in x.as_mut().iter_mut() {
            *xi *= a;
        }
    }

    fn cdot(&self, x: &V, y: &V) -> Complex64 {
        assert_eq!(x.as_ref().len(), y.as_ref().len(), "Fields must have the same length");
        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;
            x.as_ref()
                .par_iter()
                .zip(y.as_ref().par_iter())
                .map(|(xi, yi)| xi.conj() * yi)
                .reduce(|| Complex64::new(0.0, 0.0), |acc, v| acc + v)
        }
        #[cfg(not(feature = "rayon"))]
        {
            x.as_ref()
                .iter()
                .zip(y.as_ref().iter())
                .map(|(xi, yi)| xi.conj() * yi)
                .fold(Complex64::new(0.0, 0.0), |acc, v| acc + v)
        }
    }

    fn re_dot(&self, x: &V, y: &V) -> f64 {
        assert_eq!(x.as_ref().len(), y.as_ref().len(), "Fields must have the same length");
        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;
            x.as_ref()
                .par_iter()
                .zip(y.as_ref().par_iter())
                .map(|(xi, yi)| xi.re * yi.re + xi.im * yi.im)
                .reduce(|| 0.0, |acc, v| acc + v)
        }
        #[cfg(not(feature = "rayon"))]
        {
            x.as_ref()
                .iter()
                .zip(y.as_ref().iter())
                .map(|(xi, yi)| xi.re * yi.re + xi.im * yi.im)
                .sum()
        }
    }

    fn caxpy(&self, a: Complex64, x: &V, y: &mut V) {
        assert_eq!(x.as_ref().len(), y.as_ref().len(), "Fields must have the same length");
        for (yi, xi) in y.as_mut().iter_mut().zip(x.as_ref()) {
            *yi += a * xi;
        }
    }

    fn zero(&self, x: &mut V) {
        x.as_mut().fill(Complex64::new(0.0, 0.0));
    }

    fn location(&self, x: &V) -> FieldLocation {
        x.location()
    }
}

/// Dense complex matrix-vector product for `faer::Mat`.
///
/// Computes `y = A * x`; used as an exact reference operator in tests and small demos.
impl<V> MatVec<V> for Mat<Complex64>
where
    V: AsRef<[Complex64]> + AsMut<[Complex64]>,
{
    fn matvec(&self, x: &V, y: &mut V) {
        let x = x.as_ref();
        let y = y.as_mut();
        assert_eq!(self.nrows(), y.len(), "Output vector y has incorrect length");
        assert_eq!(self.ncols(), x.len(), "Input vector x has incorrect length");
        for i in 0..self.nrows() {
            let mut acc = Complex64::new(0.0, 0.0);
            for j in 0..self.ncols() {
                acc += self[(i, j)] * x[j];
            }
            y[i] = acc;
        }
    }
}

/// Operator backed by a closure `f(x, y)` writing `A x` into `y`.
pub struct FnOperator<F> {
    f: F,
}

impl<F> FnOperator<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<V, F> MatVec<V> for FnOperator<F>
where
    F: Fn(&V, &mut V),
{
    fn matvec(&self, x: &V, y: &mut V) {
        (self.f)(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn cdot_conjugates_left_operand() {
        let blas = ();
        let x = vec![c(0.0, 1.0), c(2.0, 0.0)];
        let y = vec![c(0.0, 1.0), c(1.0, 1.0)];
        // conj(i)*i + 2*(1+i) = 1 + 2 + 2i
        let d = blas.cdot(&x, &y);
        assert_abs_diff_eq!(d.re, 3.0, epsilon = 1e-14);
        assert_abs_diff_eq!(d.im, 2.0, epsilon = 1e-14);
        assert_abs_diff_eq!(blas.re_dot(&x, &y), 3.0, epsilon = 1e-14);
    }

    #[test]
    fn caxpy_scale_zero() {
        let blas = ();
        let x = vec![c(1.0, 0.0), c(0.0, 1.0)];
        let mut y = vec![c(1.0, 1.0), c(0.0, 0.0)];
        blas.caxpy(c(0.0, 2.0), &x, &mut y);
        assert_eq!(y, vec![c(1.0, 3.0), c(-2.0, 0.0)]);
        blas.scale(0.5, &mut y);
        assert_eq!(y, vec![c(0.5, 1.5), c(-1.0, 0.0)]);
        assert_abs_diff_eq!(blas.norm2(&y), 0.25 + 2.25 + 1.0, epsilon = 1e-14);
        blas.zero(&mut y);
        assert_eq!(blas.norm2(&y), 0.0);
    }

    #[test]
    fn dense_matvec_and_closure_operator_agree() {
        let a = Mat::from_fn(2, 2, |i, j| c((i + 1) as f64, j as f64));
        let x = vec![c(1.0, 0.0), c(1.0, -1.0)];
        let mut y_dense = vec![c(0.0, 0.0); 2];
        a.matvec(&x, &mut y_dense);

        let op = FnOperator::new(|x: &Vec<Complex64>, y: &mut Vec<Complex64>| {
            for i in 0..2 {
                y[i] = (0..2).map(|j| c((i + 1) as f64, j as f64) * x[j]).sum();
            }
        });
        let mut y_fn = vec![c(0.0, 0.0); 2];
        op.matvec(&x, &mut y_fn);
        assert_eq!(y_dense, y_fn);
    }
}
