//! Tests for the host field algebra and the operator implementations.
//!
//! The reductions (`norm2`, `cdot`, `re_dot`) are compared against straightforward serial sums
//! on seeded random data, and the sparse lattice operator is checked against a dense copy of
//! itself so the CSR path and the `faer::Mat` path must agree.

use approx::assert_abs_diff_eq;
use faer::Mat;
use mrext::lattice::{covariant_laplacian, LatticeGeometry};
use mrext::{FieldAlgebra, FieldLocation, LatticeField, MatVec, Resident};
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_field(rng: &mut StdRng, n: usize) -> LatticeField {
    (0..n)
        .map(|_| Complex64::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
        .collect::<Vec<_>>()
        .into()
}

/// Reductions on a field long enough to be split across threads.
#[test]
fn reductions_match_serial_sums() {
    let mut rng = StdRng::seed_from_u64(11);
    let n = 4096;
    let x = random_field(&mut rng, n);
    let y = random_field(&mut rng, n);
    let blas = ();

    let mut dot = Complex64::new(0.0, 0.0);
    let mut nrm = 0.0;
    for (xi, yi) in x.as_slice().iter().zip(y.as_slice()) {
        dot += xi.conj() * *yi;
        nrm += xi.norm_sqr();
    }

    let d = blas.cdot(&x, &y);
    assert_abs_diff_eq!(d.re, dot.re, epsilon = 1e-10);
    assert_abs_diff_eq!(d.im, dot.im, epsilon = 1e-10);
    assert_abs_diff_eq!(blas.re_dot(&x, &y), dot.re, epsilon = 1e-10);
    assert_abs_diff_eq!(blas.norm2(&x), nrm, epsilon = 1e-10);

    // ⟨y, x⟩ = conj⟨x, y⟩
    let e = blas.cdot(&y, &x);
    assert_abs_diff_eq!(e.re, d.re, epsilon = 1e-10);
    assert_abs_diff_eq!(e.im, -d.im, epsilon = 1e-10);
}

/// `caxpy` and `scale` compose the way the extrapolator uses them.
#[test]
fn caxpy_then_scale() {
    let mut rng = StdRng::seed_from_u64(5);
    let x = random_field(&mut rng, 64);
    let mut y = random_field(&mut rng, 64);
    let y0 = y.clone();
    let a = Complex64::new(0.25, -1.5);
    let blas = ();

    blas.caxpy(a, &x, &mut y);
    blas.scale(2.0, &mut y);
    for k in 0..64 {
        let expected = (y0.as_slice()[k] + a * x.as_slice()[k]) * 2.0;
        assert_abs_diff_eq!(y.as_slice()[k].re, expected.re, epsilon = 1e-13);
        assert_abs_diff_eq!(y.as_slice()[k].im, expected.im, epsilon = 1e-13);
    }
}

/// The location reported by the algebra is the one the field carries.
#[test]
fn location_follows_the_field() {
    let blas = ();
    let host = LatticeField::zeros(3);
    let device = LatticeField::zeros(3).with_location(FieldLocation::Device);
    assert_eq!(blas.location(&host), FieldLocation::Host);
    assert_eq!(blas.location(&device), FieldLocation::Device);
    assert_eq!(vec![Complex64::new(1.0, 0.0)].location(), FieldLocation::Host);
}

/// CSR lattice operator and its dense copy produce the same image.
#[test]
fn sparse_and_dense_operator_agree() {
    let mut rng = StdRng::seed_from_u64(23);
    let geom = LatticeGeometry::new(&[3, 4, 2]).unwrap();
    let vol = geom.volume();
    let angles: Vec<f64> = (0..vol * geom.ndim()).map(|_| rng.gen_range(-3.0..3.0)).collect();
    let a = covariant_laplacian(&geom, 0.4, &angles).unwrap();
    let dense = Mat::from_fn(vol, vol, |i, j| a.get(i, j));

    let x = random_field(&mut rng, vol);
    let mut y_sparse = LatticeField::zeros(vol);
    let mut y_dense = LatticeField::zeros(vol);
    a.matvec(&x, &mut y_sparse);
    dense.matvec(&x, &mut y_dense);
    for (s, d) in y_sparse.as_slice().iter().zip(y_dense.as_slice()) {
        assert_abs_diff_eq!(s.re, d.re, epsilon = 1e-12);
        assert_abs_diff_eq!(s.im, d.im, epsilon = 1e-12);
    }

    // Hermitian: ⟨x, A y⟩ = ⟨A x, y⟩
    let blas = ();
    let y = random_field(&mut rng, vol);
    let mut ay = LatticeField::zeros(vol);
    a.matvec(&y, &mut ay);
    let lhs = blas.cdot(&x, &ay);
    let rhs = blas.cdot(&y_sparse, &y);
    assert_abs_diff_eq!(lhs.re, rhs.re, epsilon = 1e-10);
    assert_abs_diff_eq!(lhs.im, rhs.im, epsilon = 1e-10);
}
