mod common;

use std::hint::black_box;

use artwork::prelude::{rand01, Attribute, AttributeWeightMap};
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn make_weight_map(count: usize, seed: u64) -> AttributeWeightMap {
    let mut rng = StdRng::seed_from_u64(seed);
    let raw: Vec<f64> = (0..count).map(|_| 0.01 + rng.random::<f64>()).collect();
    let total: f64 = raw.iter().sum();

    raw.into_iter()
        .enumerate()
        .map(|(i, w)| (Attribute::new(format!("A{}", i)), w / total))
        .collect()
}

fn weights_intervals_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("weights/intervals");

    for &n in &[4usize, 16, 64, 256, 1024] {
        group.throughput(common::elements_throughput(n));

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter_batched(
                || make_weight_map(n, 0xC0FFEE),
                |map| black_box(map.intervals()),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn weights_draw_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("weights/draw");

    for &n in &[4usize, 16, 64, 256, 1024] {
        let intervals = make_weight_map(n, 0xDEADBEEF).intervals();
        group.throughput(common::elements_throughput(1));

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            let mut rng = StdRng::seed_from_u64(0xBADC0DE);
            b.iter(|| {
                let sel = intervals.draw(&mut rng);
                black_box(sel);
            });
        });
    }

    // Weights summing to one half: every other draw resolves nothing.
    for &n in &[64usize, 1024] {
        let half: AttributeWeightMap = make_weight_map(n, 0xFACEFEED)
            .iter()
            .map(|(a, w)| (a.clone(), w * 0.5))
            .collect();
        let intervals = half.intervals();

        group.bench_with_input(BenchmarkId::new("half_mass", n), &n, |b, _| {
            let mut rng = StdRng::seed_from_u64(0xFEED);
            b.iter(|| {
                let sel = intervals.resolve(rand01(&mut rng));
                black_box(sel);
            });
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = weights_intervals_benches,
              weights_draw_benches
}
criterion_main!(benches);
