//! mrext: minimal-residual extrapolation of initial guesses
//!
//! This crate builds a starting vector for a Krylov solve of A·x = b from earlier solutions of
//! systems with the same lattice operator. The trial vectors are orthonormalized, projected through
//! the operator into a small dense Gram system, and the solution of that system weights the guess.

pub mod config;
pub mod core;
pub mod error;
pub mod field;
pub mod lattice;
pub mod matrix;
pub mod solver;
pub mod utils;

// Re-exports for convenience
pub use config::*;
pub use self::core::*;
pub use error::*;
pub use field::LatticeField;
pub use matrix::*;
pub use solver::*;
pub use utils::*;
