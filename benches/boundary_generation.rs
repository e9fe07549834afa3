use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use naca_mesh::airfoil::boundary::generate_boundary_naive;
use naca_mesh::airfoil::{generate_boundary, Naca00xx, ThicknessProfile};

fn benchmark(c: &mut Criterion) {
    let naca = Naca00xx::naca0012();

    let mut group = c.benchmark_group("Boundary Generation");
    group.sample_size(10);
    for n in [1_000usize, 100_000, 1_000_000] {
        group.bench_with_input(BenchmarkId::new("bulk", n), &n, |b, n| {
            b.iter(|| generate_boundary(black_box(&naca), black_box(*n)))
        });
        group.bench_with_input(BenchmarkId::new("naive", n), &n, |b, n| {
            b.iter(|| generate_boundary_naive(black_box(&naca), black_box(*n)))
        });
    }
    group.finish();

    let xs: Vec<f64> = (0..1_000_000).map(|i| i as f64 / 999_999.0).collect();
    let mut out = vec![0.0; xs.len()];
    c.bench_function("Half Thickness Batch", |b| {
        b.iter(|| naca.half_thickness_into(black_box(&xs), black_box(&mut out)))
    });
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
