use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sapper_core::*;
use std::hint::black_box;

fn gen_tiers(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for difficulty in Difficulty::PRESETS {
        let config = difficulty.config();
        let (rows, cols) = config.dim();
        let start = (rows / 2, cols / 2);
        group.bench_with_input(
            BenchmarkId::from_parameter(difficulty),
            &config,
            |b, &config| {
                let mut seed = 0;
                b.iter(|| {
                    seed += 1;
                    ClusteredMinefieldGenerator::new(seed, start, ClusterPolicy::default())
                        .generate(black_box(config))
                        .unwrap()
                })
            },
        );
    }
    group.finish();
}

fn first_reveal(c: &mut Criterion) {
    let mut group = c.benchmark_group("first_reveal");
    for difficulty in Difficulty::PRESETS {
        let (rows, cols) = difficulty.config().dim();
        let options = SessionOptions {
            seed: Some(17),
            ..Default::default()
        };
        group.bench_function(BenchmarkId::from_parameter(difficulty), |b| {
            b.iter(|| {
                let mut session = Session::new(difficulty, options).unwrap();
                session.reveal(black_box((rows / 2, cols / 2))).unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, gen_tiers, first_reveal);
criterion_main!(benches);
