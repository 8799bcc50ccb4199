//! Small dense complex solve for the reduced Gram system G·α = β.
//!
//! The matrix is N×N with N the number of trial vectors, so it is held in a
//! `faer::Mat` that lives only as long as the extrapolation call. The solve is
//! Gaussian elimination with the pivot chosen among the remaining diagonal
//! entries, followed by back-substitution that hands each coefficient to the
//! caller as soon as it is final.
//!
//! # Pivoting
//! - `Symmetric`: rows and columns are exchanged together, so the chosen
//!   diagonal entry becomes the pivot and the unknowns are permuted.
//! - `RowOnly`: only rows of G and β are exchanged. The pivot divided by is
//!   then whatever lands on the diagonal, which for a diagonal G with
//!   increasing entries is zero.
//!
//! # References
//! - Golub & Van Loan, Matrix Computations, §3.4

use crate::config::PivotStrategy;
use faer::Mat;
use num_complex::Complex64;

/// A pivot that failed the magnitude test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Degeneracy {
    /// Elimination step (pivot position) where it happened.
    pub step: usize,
    /// |pivot| at that step.
    pub pivot: f64,
}

/// Reduced system G·α = β.
pub struct ReducedSystem {
    g: Mat<Complex64>,
    beta: Vec<Complex64>,
    /// perm[i] = trial-basis index of the unknown at pivot position i.
    perm: Vec<usize>,
    /// Row selected at each elimination step.
    pivots: Vec<usize>,
}

impl ReducedSystem {
    /// Zero system of size `n`.
    pub fn zeros(n: usize) -> Self {
        Self {
            g: Mat::from_fn(n, n, |_, _| Complex64::new(0.0, 0.0)),
            beta: vec![Complex64::new(0.0, 0.0); n],
            perm: (0..n).collect(),
            pivots: Vec::with_capacity(n),
        }
    }

    /// Build from an explicit matrix and right-hand side.
    ///
    /// # Panics
    /// Panics if `g` is not square or `beta` does not match its size.
    pub fn from_parts(g: Mat<Complex64>, beta: Vec<Complex64>) -> Self {
        assert_eq!(g.nrows(), g.ncols(), "reduced matrix must be square");
        assert_eq!(g.nrows(), beta.len(), "rhs length must match matrix size");
        let n = beta.len();
        Self {
            g,
            beta,
            perm: (0..n).collect(),
            pivots: Vec::with_capacity(n),
        }
    }

    pub fn size(&self) -> usize {
        self.beta.len()
    }

    pub fn g(&self, i: usize, j: usize) -> Complex64 {
        self.g[(i, j)]
    }

    pub fn rhs(&self, i: usize) -> Complex64 {
        self.beta[i]
    }

    pub fn set_rhs(&mut self, i: usize, v: Complex64) {
        self.beta[i] = v;
    }

    /// G_ii = d (real diagonal).
    pub fn set_diagonal(&mut self, i: usize, d: f64) {
        self.g[(i, i)] = Complex64::new(d, 0.0);
    }

    /// G_jk = v and G_kj = conj(v).
    pub fn set_hermitian_pair(&mut self, j: usize, k: usize, v: Complex64) {
        self.g[(j, k)] = v;
        self.g[(k, j)] = v.conj();
    }

    /// Rows chosen at each elimination step (valid after `eliminate`).
    pub fn pivots(&self) -> &[usize] {
        &self.pivots
    }

    /// Trial-basis index of the unknown at each pivot position.
    pub fn permutation(&self) -> &[usize] {
        &self.perm
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        let n = self.size();
        for c in 0..n {
            let t = self.g[(a, c)];
            self.g[(a, c)] = self.g[(b, c)];
            self.g[(b, c)] = t;
        }
        self.beta.swap(a, b);
    }

    fn swap_cols(&mut self, a: usize, b: usize) {
        let n = self.size();
        for r in 0..n {
            let t = self.g[(r, a)];
            self.g[(r, a)] = self.g[(r, b)];
            self.g[(r, b)] = t;
        }
        self.perm.swap(a, b);
    }

    /// Reduce G to upper-triangular form in place.
    ///
    /// A pivot is degenerate when its magnitude is not greater than
    /// `pivot_tol` times the largest initial |G_ii| (this includes zero and
    /// NaN pivots). Elimination always runs to the end; the first degenerate
    /// step, if any, is returned.
    pub fn eliminate(&mut self, strategy: PivotStrategy, pivot_tol: f64) -> Option<Degeneracy> {
        let n = self.size();
        let scale = (0..n).map(|i| self.g[(i, i)].norm()).fold(0.0, f64::max);
        let threshold = pivot_tol * scale;
        let mut degenerate = None;
        self.pivots.clear();

        for i in 0..n {
            // largest remaining diagonal entry, first one on ties
            let mut k = i;
            for j in (i + 1)..n {
                if self.g[(j, j)].norm() > self.g[(k, k)].norm() {
                    k = j;
                }
            }
            if k != i {
                self.swap_rows(i, k);
                if strategy == PivotStrategy::Symmetric {
                    self.swap_cols(i, k);
                }
            }
            self.pivots.push(k);

            let piv = self.g[(i, i)];
            let mag = piv.norm();
            if degenerate.is_none() && !(mag > threshold && mag.is_finite()) {
                degenerate = Some(Degeneracy { step: i, pivot: mag });
            }

            for j in (i + 1)..n {
                let f = self.g[(j, i)] / piv;
                let bi = self.beta[i];
                self.beta[j] -= f * bi;
                for c in 0..n {
                    let gic = self.g[(i, c)];
                    self.g[(j, c)] -= f * gic;
                }
            }
        }
        degenerate
    }

    /// Back-substitute the triangularized system from the last row up.
    ///
    /// `visit(index, alpha)` is called as soon as each coefficient is final,
    /// with `index` the trial-basis index it multiplies. Returns the
    /// coefficients in pivot order.
    pub fn back_substitute(&self, mut visit: impl FnMut(usize, Complex64)) -> Vec<Complex64> {
        let n = self.size();
        let mut alpha = vec![Complex64::new(0.0, 0.0); n];
        for i in (0..n).rev() {
            let mut acc = Complex64::new(0.0, 0.0);
            for j in (i + 1)..n {
                acc += self.g[(i, j)] * alpha[j];
            }
            alpha[i] = (self.beta[i] - acc) / self.g[(i, i)];
            visit(self.perm[i], alpha[i]);
        }
        alpha
    }

    /// Eliminate and back-substitute; coefficients indexed like the unknowns.
    pub fn solve(mut self, strategy: PivotStrategy, pivot_tol: f64) -> (Vec<Complex64>, Option<Degeneracy>) {
        let degenerate = self.eliminate(strategy, pivot_tol);
        let mut out = vec![Complex64::new(0.0, 0.0); self.size()];
        self.back_substitute(|idx, a| out[idx] = a);
        (out, degenerate)
    }
}
