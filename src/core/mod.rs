//! Core traits and their host implementations.

pub mod traits;
pub mod wrappers;

pub use traits::{FieldAlgebra, FieldLocation, MatVec, Resident};
pub use wrappers::FnOperator;
