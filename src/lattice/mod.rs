//! Reference lattice operators.

pub mod geometry;
pub mod laplacian;

pub use geometry::LatticeGeometry;
pub use laplacian::{covariant_laplacian, free_laplacian};
