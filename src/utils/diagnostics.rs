//! Reporting sinks for extrapolation results.

use num_complex::Complex64;

use crate::utils::stats::{Extrapolation, ExtrapolationStatus};

/// Receives what the extrapolator has to say about one call.
pub trait DiagnosticSink {
    /// Called once per call with the final result.
    fn report(&self, result: &Extrapolation);
    /// Called for each coefficient as it is resolved, at `Verbose` level only.
    fn coefficient(&self, _index: usize, _alpha: Complex64) {}
    /// Called when the reduced matrix fails the optional Hermiticity check.
    fn asymmetry(&self, _row: usize, _col: usize, _relative: f64) {}
}

/// Sink that forwards to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, result: &Extrapolation) {
        match result.status {
            ExtrapolationStatus::Degenerate { step, pivot } => log::warn!(
                "MinResExt: N = {}, degenerate reduced system at step {} (|pivot| = {:e}), |res| / |src| = {:e}",
                result.basis_size,
                step,
                pivot,
                result.relative_residual()
            ),
            _ => log::info!(
                "MinResExt: N = {}, |res| / |src| = {:e}",
                result.basis_size,
                result.relative_residual()
            ),
        }
    }

    fn coefficient(&self, index: usize, alpha: Complex64) {
        log::debug!("MinResExt: alpha[{}] = {:e} {:e}", index, alpha.re, alpha.im);
    }

    fn asymmetry(&self, row: usize, col: usize, relative: f64) {
        log::warn!(
            "MinResExt: reduced matrix not Hermitian at ({}, {}): relative asymmetry {:e}",
            row,
            col,
            relative
        );
    }
}

/// Sink that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&self, _result: &Extrapolation) {}
}
