//! Build an initial guess for a lattice solve from a handful of nearby solutions.
//!
//! Run with `RUST_LOG=info cargo run --example lattice_guess` to see the extrapolator's summary.

use mrext::lattice::{covariant_laplacian, LatticeGeometry};
use mrext::{LatticeField, MatVec, MinResExt, MreOptions, Profile, Verbosity};
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut rng = StdRng::seed_from_u64(2024);
    let geom = LatticeGeometry::new(&[8, 8, 4, 4])?;
    let vol = geom.volume();
    let angles: Vec<f64> = (0..vol * geom.ndim()).map(|_| rng.gen_range(-0.5..0.5)).collect();
    let a = covariant_laplacian(&geom, 0.15, &angles)?;

    // the solution we pretend not to know, and its source
    let x_true: LatticeField = (0..vol)
        .map(|_| Complex64::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
        .collect::<Vec<_>>()
        .into();
    let mut b = LatticeField::zeros(vol);
    a.matvec(&x_true, &mut b);

    // previous solutions: the true one plus decreasing perturbations
    let n = 5;
    let mut p: Vec<LatticeField> = (0..n)
        .map(|k| {
            let eps = 0.5 / (k + 1) as f64;
            x_true
                .as_slice()
                .iter()
                .map(|&v| v + Complex64::new(rng.gen_range(-eps..eps), rng.gen_range(-eps..eps)))
                .collect::<Vec<_>>()
                .into()
        })
        .collect();
    let mut q = vec![LatticeField::zeros(vol); n];

    let options = MreOptions::default()
        .with_verbosity(Verbosity::Verbose)
        .with_reorthogonalization(true);
    let mre = MinResExt::new(options);
    let mut x = LatticeField::zeros(vol);
    let mut profile = Profile::new();
    let result = mre.extrapolate(&a, &mut x, &mut b, &mut p, &mut q, &mut profile)?;

    let err: f64 = x
        .as_slice()
        .iter()
        .zip(x_true.as_slice())
        .map(|(g, t)| (*g - *t).norm_sqr())
        .sum::<f64>()
        .sqrt();
    println!("status           = {:?}", result.status);
    println!("basis size       = {}", result.basis_size);
    println!("|res| / |src|    = {:e}", result.relative_residual());
    println!("|x - x_true|     = {:e}", err);
    println!("\n{profile}");
    Ok(())
}
