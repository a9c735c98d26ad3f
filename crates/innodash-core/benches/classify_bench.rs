//! # Classification Benchmarks
//!
//! Performance benchmarks for the stage classifier and view assembly.
//!
//! Run with: `cargo bench -p innodash-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use innodash_core::{
    DashboardView, Experiment, PipelineFilter, SheetData, group_by_category, pipeline_rows,
    stage_row,
};
use std::hint::black_box;

const STATUSES: [&str; 8] = [
    "unknown",
    "learn",
    "Understand",
    "HYPOTHESIS",
    "wip",
    "auto solve",
    "blocked",
    "",
];

/// Create N experiments cycling through known and unknown statuses.
fn create_experiments(size: usize) -> Vec<Experiment> {
    (0..size)
        .map(|i| {
            Experiment::new(format!("experiment-{i}"), STATUSES[i % STATUSES.len()])
                .with_customers(format!("customer-{}, shared", i % 17))
                .with_usage(if i % 3 == 0 { "0" } else { "weekly" })
        })
        .collect()
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_stage_row(c: &mut Criterion) {
    c.bench_function("stage_row", |b| {
        b.iter(|| {
            for status in STATUSES {
                black_box(stage_row(black_box(status)));
            }
        });
    });
}

fn bench_grouping(c: &mut Criterion) {
    let mut group = c.benchmark_group("group_by_category");

    for size in [100, 1000, 10000].iter() {
        let experiments = create_experiments(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &experiments, |b, exps| {
            b.iter(|| black_box(group_by_category(exps)));
        });
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_rows");
    let filter = PipelineFilter::all().with_customer("shared");

    for size in [100, 1000, 10000].iter() {
        let experiments = create_experiments(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &experiments, |b, exps| {
            b.iter(|| black_box(pipeline_rows(exps, &filter)));
        });
    }

    group.finish();
}

fn bench_dashboard(c: &mut Criterion) {
    let data = SheetData::with_experiments(create_experiments(1000));

    c.bench_function("dashboard_build_1000", |b| {
        b.iter(|| black_box(DashboardView::build(&data, &PipelineFilter::all())));
    });
}

criterion_group!(
    benches,
    bench_stage_row,
    bench_grouping,
    bench_pipeline,
    bench_dashboard
);
criterion_main!(benches);
