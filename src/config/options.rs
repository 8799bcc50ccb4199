//! Options for the minimal-residual extrapolator.
//!
//! This module provides the `MreOptions` struct, which selects the memory
//! domain the operands must live in, how the reduced system is pivoted, what
//! happens when it turns out to be singular, and how much is reported.

use crate::core::traits::FieldLocation;
use crate::error::MreError;

/// What to do when elimination meets a zero, tiny, or non-finite pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegeneracyPolicy {
    /// Stop before touching the guess: `x` is left zero and `b` untouched.
    Guard,
    /// Carry on regardless; non-finite coefficients reach `x` and `b`.
    /// The result is still classified as degenerate.
    Propagate,
}

/// How the pivot row is brought into place at each elimination step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PivotStrategy {
    /// Swap rows and columns so the selected diagonal entry is the pivot.
    Symmetric,
    /// Swap rows of G and β only.
    RowOnly,
}

/// How much the extrapolator reports through its diagnostic sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Silent,
    Summarize,
    Verbose,
}

/// Extrapolator parameters.
#[derive(Debug, Clone)]
pub struct MreOptions {
    /// Memory domain every operand must reside in.
    pub location: FieldLocation,
    /// Behavior on a degenerate reduced system.
    pub degeneracy: DegeneracyPolicy,
    /// Pivoting strategy for the reduced solve.
    pub pivoting: PivotStrategy,
    /// Relative pivot threshold against the largest initial |G_ii|.
    pub pivot_tol: f64,
    /// Run a second Gram-Schmidt pass over the trial basis.
    pub reorthogonalize: bool,
    /// Reporting level.
    pub verbosity: Verbosity,
    /// Relative tolerance for the optional Hermiticity check of the reduced matrix.
    pub check_hermitian: Option<f64>,
}

impl Default for MreOptions {
    fn default() -> Self {
        Self {
            location: FieldLocation::Host,
            degeneracy: DegeneracyPolicy::Guard,
            pivoting: PivotStrategy::Symmetric,
            pivot_tol: 1e-13,
            reorthogonalize: false,
            verbosity: Verbosity::Summarize,
            check_hermitian: None,
        }
    }
}

impl MreOptions {
    pub fn with_location(mut self, location: FieldLocation) -> Self {
        self.location = location;
        self
    }

    pub fn with_degeneracy(mut self, policy: DegeneracyPolicy) -> Self {
        self.degeneracy = policy;
        self
    }

    pub fn with_pivoting(mut self, strategy: PivotStrategy) -> Self {
        self.pivoting = strategy;
        self
    }

    pub fn with_pivot_tol(mut self, tol: f64) -> Self {
        self.pivot_tol = tol;
        self
    }

    pub fn with_reorthogonalization(mut self, enabled: bool) -> Self {
        self.reorthogonalize = enabled;
        self
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_hermitian_check(mut self, tol: f64) -> Self {
        self.check_hermitian = Some(tol);
        self
    }

    /// Reject tolerances that cannot be compared against.
    pub fn validate(&self) -> Result<(), MreError> {
        if !self.pivot_tol.is_finite() || self.pivot_tol < 0.0 {
            return Err(MreError::InvalidOption("pivot_tol must be finite and non-negative"));
        }
        if let Some(tol) = self.check_hermitian {
            if !tol.is_finite() || tol < 0.0 {
                return Err(MreError::InvalidOption("check_hermitian tolerance must be finite and non-negative"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let opts = MreOptions::default();
        assert!(opts.validate().is_ok());
        assert_eq!(opts.degeneracy, DegeneracyPolicy::Guard);
        assert_eq!(opts.pivoting, PivotStrategy::Symmetric);
        assert!(!opts.reorthogonalize);
    }

    #[test]
    fn rejects_bad_tolerances() {
        let opts = MreOptions::default().with_pivot_tol(-1.0);
        assert!(matches!(opts.validate(), Err(MreError::InvalidOption(_))));
        let opts = MreOptions::default().with_hermitian_check(f64::NAN);
        assert!(matches!(opts.validate(), Err(MreError::InvalidOption(_))));
    }
}
