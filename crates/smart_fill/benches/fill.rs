mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use smart_fill::prelude::{FillConfig, FillSession, RotationPolicy};

const BUDGETS: [usize; 3] = [500, 2000, 5000];
const REGION_NAMES: [&str; 3] = ["rect", "ellipse", "star"];

fn fill_benches(c: &mut Criterion) {
    for (region_idx, region_name) in REGION_NAMES.iter().enumerate() {
        let mut group = c.benchmark_group(format!("fill/{region_name}"));

        for &budget in &BUDGETS {
            let cfg = FillConfig::new(budget)
                .with_spacing_fraction(0.1)
                .with_rotation(RotationPolicy::QuarterTurns);

            // Preview a run to set meaningful throughput in "placements per iteration".
            let (host, regions, templates) = common::bench_host(3);
            let mut session = FillSession::new(host);
            let mut rng_preview = StdRng::seed_from_u64(0xF111 ^ budget as u64);
            let preview = session
                .fill(&regions[region_idx], &templates, &cfg, &mut rng_preview)
                .map(|r| r.placed)
                .unwrap_or(0);
            group.throughput(common::elements_throughput(preview));

            group.bench_with_input(BenchmarkId::from_parameter(budget), &budget, |b, _| {
                b.iter_batched(
                    || {
                        let (host, regions, templates) = common::bench_host(3);
                        (
                            FillSession::new(host),
                            regions,
                            templates,
                            StdRng::seed_from_u64(0xF111 ^ budget as u64),
                        )
                    },
                    |(mut session, regions, templates, mut rng)| {
                        let report = session.fill(&regions[region_idx], &templates, &cfg, &mut rng);
                        black_box(report.map(|r| r.placed).unwrap_or(0));
                    },
                    BatchSize::SmallInput,
                );
            });
        }

        group.finish();
    }
}

fn overlap_toggle_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill/prevent_overlap");

    for prevent in [true, false] {
        let cfg = FillConfig::new(2000).with_prevent_overlap(prevent);
        group.bench_with_input(BenchmarkId::from_parameter(prevent), &prevent, |b, _| {
            b.iter_batched(
                || {
                    let (host, regions, templates) = common::bench_host(1);
                    (FillSession::new(host), regions, templates, StdRng::seed_from_u64(7))
                },
                |(mut session, regions, templates, mut rng)| {
                    let report = session.fill(&regions[0], &templates, &cfg, &mut rng);
                    black_box(report.map(|r| r.placed).unwrap_or(0));
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = fill_benches, overlap_toggle_benches
}
criterion_main!(benches);
