//! Outcome of one extrapolation call.

use num_complex::Complex64;

/// Classification of an extrapolation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ExtrapolationStatus {
    /// No trial vectors: the guess is zero.
    Empty,
    /// The reduced system was solved with usable pivots.
    Converged,
    /// A pivot at elimination `step` was zero, tiny, or non-finite, or a
    /// coefficient came out non-finite. `pivot` is the offending magnitude.
    Degenerate { step: usize, pivot: f64 },
}

#[derive(Clone, Debug)]
pub struct Extrapolation {
    /// Number of trial vectors used.
    pub basis_size: usize,
    pub status: ExtrapolationStatus,
    /// ‖b‖ on entry.
    pub source_norm: f64,
    /// ‖b‖ on exit (the deflated residual).
    pub residual_norm: f64,
    /// α, indexed like the trial basis. All zero when a degenerate system was guarded.
    pub coefficients: Vec<Complex64>,
    /// Row chosen as pivot at each elimination step.
    pub pivots: Vec<usize>,
}

impl Extrapolation {
    pub(crate) fn empty(source_norm: f64) -> Self {
        Self {
            basis_size: 0,
            status: ExtrapolationStatus::Empty,
            source_norm,
            residual_norm: source_norm,
            coefficients: Vec::new(),
            pivots: Vec::new(),
        }
    }

    /// ‖b_after‖ / ‖b_before‖, or 0 for a zero source.
    pub fn relative_residual(&self) -> f64 {
        if self.source_norm == 0.0 {
            0.0
        } else {
            self.residual_norm / self.source_norm
        }
    }

    pub fn is_degenerate(&self) -> bool {
        matches!(self.status, ExtrapolationStatus::Degenerate { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_source_has_zero_relative_residual() {
        let e = Extrapolation::empty(0.0);
        assert_eq!(e.relative_residual(), 0.0);
        assert!(!e.is_degenerate());
    }

    #[test]
    fn relative_residual_is_ratio() {
        let mut e = Extrapolation::empty(4.0);
        e.residual_norm = 1.0;
        assert_eq!(e.relative_residual(), 0.25);
    }
}
