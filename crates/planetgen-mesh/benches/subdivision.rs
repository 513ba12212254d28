use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use planetgen_mesh::*;

fn bench_subdivide_shared(c: &mut Criterion) {
    let mut group = c.benchmark_group("subdivide_shared");
    for k in [3u32, 5, 7] {
        group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, &k| {
            b.iter(|| subdivide(octahedron(WHITE), black_box(k), EdgeSharing::Shared))
        });
    }
    group.finish();
}

fn bench_subdivide_per_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("subdivide_per_triangle");
    for k in [3u32, 5, 7] {
        group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, &k| {
            b.iter(|| subdivide(octahedron(WHITE), black_box(k), EdgeSharing::PerTriangle))
        });
    }
    group.finish();
}

fn bench_subdivide_soup(c: &mut Criterion) {
    c.bench_function("subdivide_soup_k5", |b| {
        b.iter(|| subdivide_soup(bipyramid_soup(WHITE), black_box(5)))
    });
}

fn bench_displace(c: &mut Criterion) {
    let mut group = c.benchmark_group("displace");
    let noise = NoiseParams::default();
    let curve = DisplacementCurve::default();
    for k in [3u32, 5, 7] {
        let Ok(sphere) = subdivide(octahedron(WHITE), k, EdgeSharing::Shared) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::from_parameter(k), &sphere, |b, sphere| {
            b.iter(|| {
                let mut mesh = sphere.clone();
                displace(&mut mesh, &noise, &curve)
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_subdivide_shared,
    bench_subdivide_per_triangle,
    bench_subdivide_soup,
    bench_displace,
);
criterion_main!(benches);
