//! Matrix module: sparse storage for lattice operators.

pub mod sparse;
pub use sparse::{CsrMatrix, SparseMatrix};
