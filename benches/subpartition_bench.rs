//! Criterion benchmarks for separator enumeration and model generation.
//!
//! Uses catalog graphs and seeded G(n, p) graphs so runs are comparable.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use u_subpartition::graph::{catalog, Graph};
use u_subpartition::{build_subpartition_ilp, enumerate_separators, to_lp_string};
use u_subpartition::{FormulationConfig, SubpartitionBuilder};

fn random_graph(n: u32, p: f64) -> Graph {
    let mut rng = StdRng::seed_from_u64(42);
    catalog::gnp(n, p, &mut rng)
}

// ===========================================================================
// Separator enumeration
// ===========================================================================

fn bench_enumerate_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("enumerate_cycle");
    for n in [8u32, 16, 32] {
        let g = catalog::cycle(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &g, |b, g| {
            b.iter(|| {
                let count = enumerate_separators(g, 1, n / 2 + 1).unwrap().count();
                black_box(count)
            });
        });
    }
    group.finish();
}

fn bench_enumerate_all_pairs(c: &mut Criterion) {
    let mut group = c.benchmark_group("enumerate_all_pairs");
    group.sample_size(10);
    for n in [10u32, 14, 18] {
        let g = random_graph(n, 0.3);
        group.bench_with_input(BenchmarkId::new("gnp_p0.3", n), &g, |b, g| {
            b.iter(|| {
                let total: usize = g
                    .non_adjacent_pairs()
                    .into_iter()
                    .map(|(u, v)| enumerate_separators(g, u, v).unwrap().count())
                    .sum();
                black_box(total)
            });
        });
    }
    group.finish();
}

// ===========================================================================
// Model generation
// ===========================================================================

fn bench_build_model(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_model");
    group.sample_size(10);
    for (name, g) in [
        ("claw", catalog::claw()),
        ("path8", catalog::path(8)),
        ("gnp12", random_graph(12, 0.3)),
    ] {
        for k in [2u32, 4] {
            group.bench_with_input(BenchmarkId::new(name, k), &(&g, k), |b, &(g, k)| {
                b.iter(|| black_box(build_subpartition_ilp(g, k).unwrap()));
            });
        }
    }
    group.finish();
}

fn bench_memoized_rebuild(c: &mut Criterion) {
    let g = random_graph(12, 0.3);
    let mut builder = SubpartitionBuilder::new(FormulationConfig::default().with_memoize(true));
    // Warm the cache.
    builder.build(&g, 3).unwrap();
    c.bench_function("memoized_rebuild_gnp12_k3", |b| {
        b.iter(|| black_box(builder.build(&g, 3).unwrap()));
    });
}

fn bench_write_lp(c: &mut Criterion) {
    let model = build_subpartition_ilp(&random_graph(12, 0.3), 4).unwrap();
    c.bench_function("write_lp_gnp12_k4", |b| {
        b.iter(|| black_box(to_lp_string(&model)));
    });
}

criterion_group!(
    benches,
    bench_enumerate_cycle,
    bench_enumerate_all_pairs,
    bench_build_model,
    bench_memoized_rebuild,
    bench_write_lp
);
criterion_main!(benches);
