//! Wheel and Simulation Benchmarks
//!
//! Single spins, full seeded simulations, and weight editing.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use bw_bench::{prize_table, round_with_bet, SLOT_COUNTS};
use bw_core::GameVariant;
use bw_sim::{run, SimulationConfig};
use bw_wheel::ProbabilityModel;

/// Benchmark one play() call
fn bench_play(c: &mut Criterion) {
    let mut group = c.benchmark_group("play");
    group.throughput(Throughput::Elements(1));

    for &slots in SLOT_COUNTS {
        for variant in [GameVariant::Fair, GameVariant::Tweaked] {
            let mut round = round_with_bet(variant, slots).unwrap();
            let mut rng = ChaCha8Rng::seed_from_u64(42);
            let id = BenchmarkId::new(format!("{variant:?}").to_lowercase(), slots);

            group.bench_function(id, |b| b.iter(|| black_box(round.play(&mut rng))));
        }
    }

    group.finish();
}

/// Benchmark a full simulation reduced to statistics
fn bench_simulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulate");
    group.sample_size(20);

    for runs in [10_000usize, 100_000] {
        group.throughput(Throughput::Elements(runs as u64));
        let config = SimulationConfig::default().with_runs(runs).with_series(false);

        group.bench_with_input(BenchmarkId::new("fair", runs), &config, |b, config| {
            b.iter(|| {
                let mut round = round_with_bet(GameVariant::Fair, 12).unwrap();
                black_box(run(&mut round, config))
            })
        });
    }

    group.finish();
}

/// Benchmark model construction and redistribution
fn bench_weights(c: &mut Criterion) {
    let mut group = c.benchmark_group("weights");

    for &slots in SLOT_COUNTS {
        let prizes = prize_table(slots, 7).unwrap();

        group.bench_with_input(BenchmarkId::new("tiered", slots), &prizes, |b, prizes| {
            b.iter(|| black_box(ProbabilityModel::tiered_by_prize(prizes)))
        });

        group.bench_with_input(BenchmarkId::new("redistribute", slots), &slots, |b, &slots| {
            let mut model = ProbabilityModel::uniform(slots);
            let mut i = 0usize;
            b.iter(|| {
                i = (i + 1) % slots;
                model.redistribute(i, 0.1).unwrap();
                black_box(&model);
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_play, bench_simulate, bench_weights);
criterion_main!(benches);
