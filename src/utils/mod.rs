//! Result statistics, diagnostics and profiling.

pub mod diagnostics;
pub mod profile;
pub mod stats;

pub use diagnostics::{DiagnosticSink, LogSink, NullSink};
pub use profile::{Profile, Stage};
pub use stats::{Extrapolation, ExtrapolationStatus};
