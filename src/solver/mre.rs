//! Minimal-residual extrapolation of an initial guess.
//!
//! Given N earlier solutions p₀..p_{N-1} of systems with the same operator A,
//! this module builds the guess x = Σ α_i p_i that minimizes the residual of
//! A x = b over span{p_i}, so that a Krylov solver started from x needs fewer
//! iterations.
//!
//! # Algorithm
//! 1. Orthonormalize the p_i in place (modified Gram-Schmidt, one pass unless
//!    reorthogonalization is requested).
//! 2. q_i = A p_i, β_i = ⟨p_i, b⟩, G_ii = Re⟨q_i, p_i⟩, G_jk = ⟨p_j, q_k⟩ and
//!    G_kj = conj(G_jk) for j < k.
//! 3. Solve G α = β by pivoted elimination (see [`ReducedSystem`]).
//! 4. In back-substitution order: x += α_i p_i and b -= α_i q_i, unless a
//!    pivot or coefficient is unusable and the guarded policy is in force.
//! 5. Report ‖b‖ / ‖b₀‖.
//!
//! The Gram matrix is filled as if A were self-adjoint. For a
//! non-self-adjoint operator the guess is still a valid linear combination of
//! the trial vectors, but not the residual minimizer.
//!
//! # References
//! - Brower, Ivanov, Levkova, Negele, "Chronological inversion method for the
//!   Dirac matrix in hybrid Monte Carlo", Nucl. Phys. B 484 (1997)
//! - Saad, Y. (2003). Iterative Methods for Sparse Linear Systems, 2nd Edition. SIAM. §5.3

use crate::config::{DegeneracyPolicy, MreOptions, Verbosity};
use crate::core::traits::{FieldAlgebra, MatVec};
use crate::error::MreError;
use crate::solver::reduced::ReducedSystem;
use crate::utils::diagnostics::{DiagnosticSink, LogSink};
use crate::utils::profile::{Profile, Stage};
use crate::utils::stats::{Extrapolation, ExtrapolationStatus};
use num_complex::Complex64;

/// Minimal-residual extrapolator.
///
/// # Type Parameters
/// * `B` - Vector algebra (the host implementation on `()` by default)
pub struct MinResExt<B = ()> {
    options: MreOptions,
    sink: Box<dyn DiagnosticSink>,
    blas: B,
}

impl MinResExt<()> {
    /// Extrapolator over host fields, reporting through `log`.
    pub fn new(options: MreOptions) -> Self {
        Self {
            options,
            sink: Box::new(LogSink),
            blas: (),
        }
    }
}

impl Default for MinResExt<()> {
    fn default() -> Self {
        Self::new(MreOptions::default())
    }
}

impl<B> MinResExt<B> {
    /// Replace the diagnostic sink.
    pub fn with_sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Swap in another vector algebra.
    pub fn with_algebra<B2>(self, blas: B2) -> MinResExt<B2> {
        MinResExt {
            options: self.options,
            sink: self.sink,
            blas,
        }
    }

    pub fn options(&self) -> &MreOptions {
        &self.options
    }

    fn check_location<V>(&self, operand: impl FnOnce() -> String, v: &V) -> Result<(), MreError>
    where
        B: FieldAlgebra<V>,
    {
        let found = self.blas.location(v);
        if found != self.options.location {
            return Err(MreError::Location {
                operand: operand(),
                expected: self.options.location,
                found,
            });
        }
        Ok(())
    }

    /// Orthonormalize `p` in place.
    ///
    /// Each p_i is scaled to unit norm, then its component is removed from
    /// every later p_j. A zero vector is not detected here: it turns into
    /// non-finite entries that the reduced solve later classifies as
    /// degenerate.
    pub fn orthonormalize<V>(&self, p: &mut [V])
    where
        B: FieldAlgebra<V>,
    {
        let passes = if self.options.reorthogonalize { 2 } else { 1 };
        for _ in 0..passes {
            for i in 0..p.len() {
                let p2 = self.blas.norm2(&p[i]);
                self.blas.scale(1.0 / p2.sqrt(), &mut p[i]);
                let (head, tail) = p.split_at_mut(i + 1);
                let pi = &head[i];
                for pj in tail.iter_mut() {
                    let xp = self.blas.cdot(pi, pj);
                    self.blas.caxpy(-xp, pi, pj);
                }
            }
        }
    }

    /// Apply the operator to every trial vector and fill the reduced system.
    fn build_reduced<M, V>(
        &self,
        a: &M,
        b: &V,
        p: &[V],
        q: &mut [V],
        profile: &mut Profile,
    ) -> ReducedSystem
    where
        M: MatVec<V>,
        B: FieldAlgebra<V>,
    {
        let n = p.len();
        let mut sys = ReducedSystem::zeros(n);
        for i in 0..n {
            profile.start(Stage::Gram);
            sys.set_rhs(i, self.blas.cdot(&p[i], b));
            profile.start(Stage::Operator);
            a.matvec(&p[i], &mut q[i]);
            profile.start(Stage::Gram);
            sys.set_diagonal(i, self.blas.re_dot(&q[i], &p[i]));
        }
        for j in 0..n {
            for k in (j + 1)..n {
                sys.set_hermitian_pair(j, k, self.blas.cdot(&p[j], &q[k]));
            }
        }
        if let Some(tol) = self.options.check_hermitian {
            self.check_hermitian(&sys, p, q, tol);
        }
        profile.stop();
        sys
    }

    /// Compare ⟨q_j, p_k⟩ with the stored ⟨p_j, q_k⟩; equal for a self-adjoint operator.
    fn check_hermitian<V>(&self, sys: &ReducedSystem, p: &[V], q: &[V], tol: f64)
    where
        B: FieldAlgebra<V>,
    {
        let n = p.len();
        for j in 0..n {
            for k in j..n {
                let mirrored = self.blas.cdot(&q[j], &p[k]);
                let stored = if j == k {
                    Complex64::new(sys.g(j, j).re, 0.0)
                } else {
                    sys.g(j, k)
                };
                let scale = stored
                    .norm()
                    .max(sys.g(j, j).norm())
                    .max(sys.g(k, k).norm())
                    .max(f64::MIN_POSITIVE);
                let rel = (mirrored - stored).norm() / scale;
                if rel > tol {
                    self.sink.asymmetry(j, k, rel);
                }
            }
        }
    }

    fn finish(&self, result: Extrapolation) -> Extrapolation {
        if self.options.verbosity >= Verbosity::Summarize {
            self.sink.report(&result);
        }
        result
    }

    /// Overwrite `x` with the extrapolated guess for A x = b.
    ///
    /// # Arguments
    /// * `a` - Operator; assumed self-adjoint
    /// * `x` - On output: the guess (its input value is ignored)
    /// * `b` - On input: the right-hand side; on output: the residual b - A x.
    ///   The caller's right-hand side is destroyed; keep a copy if it is needed
    ///   afterwards.
    /// * `p` - Trial vectors; orthonormalized in place
    /// * `q` - Image vectors; on output q_i = A p_i for the orthonormalized p_i
    /// * `profile` - Receives per-stage timings
    ///
    /// # Returns
    /// * `Ok(Extrapolation)` describing the outcome, including a degenerate
    ///   reduced system
    /// * `Err(MreError)` if an operand is in the wrong memory domain or the
    ///   two bases differ in length; nothing is modified in that case
    pub fn extrapolate<M, V>(
        &self,
        a: &M,
        x: &mut V,
        b: &mut V,
        p: &mut [V],
        q: &mut [V],
        profile: &mut Profile,
    ) -> Result<Extrapolation, MreError>
    where
        M: MatVec<V>,
        B: FieldAlgebra<V>,
    {
        self.options.validate()?;
        if p.len() != q.len() {
            return Err(MreError::BasisMismatch { trial: p.len(), image: q.len() });
        }
        self.check_location(|| "x".to_string(), x)?;
        self.check_location(|| "b".to_string(), b)?;
        for (i, (pi, qi)) in p.iter().zip(q.iter()).enumerate() {
            self.check_location(|| format!("p[{i}]"), pi)?;
            self.check_location(|| format!("q[{i}]"), qi)?;
        }

        let n = p.len();
        let b2 = self.blas.norm2(b);
        if n == 0 {
            self.blas.zero(x);
            return Ok(Extrapolation::empty(b2.sqrt()));
        }

        profile.time(Stage::Orthonormalize, || self.orthonormalize(&mut *p));
        let mut sys = self.build_reduced(a, b, p, q, profile);

        // resolve every coefficient before the caller's fields are touched
        let mut order = Vec::with_capacity(n);
        let (degenerate, in_pivot_order) = profile.time(Stage::Solve, || {
            let degenerate = sys.eliminate(self.options.pivoting, self.options.pivot_tol);
            (degenerate, sys.back_substitute(|idx, alpha| order.push((idx, alpha))))
        });
        let pivots = sys.pivots().to_vec();

        // a finite pivot can still yield a non-finite coefficient through overflow
        let status = match degenerate {
            Some(d) => ExtrapolationStatus::Degenerate { step: d.step, pivot: d.pivot },
            None => match in_pivot_order
                .iter()
                .rposition(|a| !(a.re.is_finite() && a.im.is_finite()))
            {
                Some(step) => ExtrapolationStatus::Degenerate { step, pivot: sys.g(step, step).norm() },
                None => ExtrapolationStatus::Converged,
            },
        };

        self.blas.zero(x);
        let zero = Complex64::new(0.0, 0.0);
        if status != ExtrapolationStatus::Converged && self.options.degeneracy == DegeneracyPolicy::Guard {
            return Ok(self.finish(Extrapolation {
                basis_size: n,
                status,
                source_norm: b2.sqrt(),
                residual_norm: b2.sqrt(),
                coefficients: vec![zero; n],
                pivots,
            }));
        }

        let verbose = self.options.verbosity >= Verbosity::Verbose;
        let mut coefficients = vec![zero; n];
        profile.start(Stage::Assemble);
        for (idx, alpha) in order {
            self.blas.caxpy(alpha, &p[idx], x);
            self.blas.caxpy(-alpha, &q[idx], b);
            coefficients[idx] = alpha;
            if verbose {
                self.sink.coefficient(idx, alpha);
            }
        }
        let r2 = self.blas.norm2(b);
        profile.stop();

        Ok(self.finish(Extrapolation {
            basis_size: n,
            status,
            source_norm: b2.sqrt(),
            residual_norm: r2.sqrt(),
            coefficients,
            pivots,
        }))
    }
}
