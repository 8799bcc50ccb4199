use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mrext::lattice::{covariant_laplacian, LatticeGeometry};
use mrext::{LatticeField, MinResExt, MreOptions, NullSink, Profile};
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_field(rng: &mut StdRng, n: usize) -> LatticeField {
    (0..n)
        .map(|_| Complex64::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
        .collect::<Vec<_>>()
        .into()
}

fn bench_extrapolate(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let geom = LatticeGeometry::new(&[8, 8, 8, 4]).unwrap();
    let vol = geom.volume();
    let angles: Vec<f64> = (0..vol * geom.ndim()).map(|_| rng.gen_range(-1.0..1.0)).collect();
    let a = covariant_laplacian(&geom, 0.1, &angles).unwrap();
    let b = random_field(&mut rng, vol);
    let mre = MinResExt::new(MreOptions::default()).with_sink(NullSink);

    let mut group = c.benchmark_group("extrapolate");
    for n in [2usize, 4, 8] {
        let p: Vec<LatticeField> = (0..n).map(|_| random_field(&mut rng, vol)).collect();
        let q = vec![LatticeField::zeros(vol); n];
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |ben, _| {
            ben.iter(|| {
                let (mut p, mut q, mut b) = (p.clone(), q.clone(), b.clone());
                let mut x = LatticeField::zeros(vol);
                let mut profile = Profile::new();
                let res = mre
                    .extrapolate(black_box(&a), &mut x, &mut b, &mut p, &mut q, &mut profile)
                    .unwrap();
                black_box(res.residual_norm)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_extrapolate);
criterion_main!(benches);
