//! Guess extrapolation and the reduced dense solve behind it.

pub mod mre;
pub use mre::MinResExt;

pub mod reduced;
pub use reduced::{Degeneracy, ReducedSystem};
