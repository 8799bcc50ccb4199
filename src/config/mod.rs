//! Configuration types.

pub mod options;
pub use options::{DegeneracyPolicy, MreOptions, PivotStrategy, Verbosity};
