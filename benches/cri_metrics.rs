use criterion::{criterion_group, criterion_main, Criterion};
use ringside::mc::SamplingEngine;
use ringside::metrics::ResultAggregator;
use ringside::model::SimulationConfig;

fn criterion_benchmark(c: &mut Criterion) {
    let mut engine = SamplingEngine::new(SimulationConfig::default()).unwrap();
    let aggregator = ResultAggregator::replay(8, &engine.simulate_batch(100_000, 0));

    c.bench_function("cri_metrics_summary_100k", |b| {
        b.iter(|| aggregator.summary());
    });
    c.bench_function("cri_metrics_histogram_100k", |b| {
        b.iter(|| aggregator.ko_round_histogram());
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
