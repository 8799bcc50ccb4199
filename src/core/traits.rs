//! Core field-algebra traits for mrext.

use num_complex::Complex64;

/// Memory domain a field buffer lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldLocation {
    /// Ordinary host memory.
    Host,
    /// Accelerator (device) memory.
    Device,
}

/// Operator application: y ← A x.
pub trait MatVec<V> {
    /// Compute y = A · x.
    fn matvec(&self, x: &V, y: &mut V);
}

/// Anything that can report where its storage lives.
pub trait Resident {
    fn location(&self) -> FieldLocation;
}

/// Vector primitives the extrapolation is written against.
///
/// Every call is synchronous: when it returns, the result is final.
pub trait FieldAlgebra<V> {
    /// ‖x‖².
    fn norm2(&self, x: &V) -> f64;
    /// x ← a·x.
    fn scale(&self, a: f64, x: &mut V);
    /// Conjugate inner product ⟨x, y⟩ = Σ conj(x_k)·y_k.
    fn cdot(&self, x: &V, y: &V) -> Complex64;
    /// Re⟨x, y⟩.
    fn re_dot(&self, x: &V, y: &V) -> f64;
    /// y ← y + a·x.
    fn caxpy(&self, a: Complex64, x: &V, y: &mut V);
    /// x ← 0.
    fn zero(&self, x: &mut V);
    /// Memory domain of `x`.
    fn location(&self, x: &V) -> FieldLocation;
}

