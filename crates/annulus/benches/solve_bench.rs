use annulus::pipeline::solve_points;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_points(n: usize, seed: u64) -> Vec<(f64, f64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            (
                rng.gen_range(-1000.0..1000.0),
                rng.gen_range(-1000.0..1000.0),
            )
        })
        .collect()
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    for n in [16usize, 64, 256] {
        let pts = random_points(n, 0xC0FFEE);
        group.bench_with_input(BenchmarkId::from_parameter(n), &pts, |b, pts| {
            b.iter(|| solve_points(pts, Some(1)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_solve);
criterion_main!(benches);
