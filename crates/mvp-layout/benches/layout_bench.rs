//! Benchmarks for the greedy and graph layout engines.
//!
//! Run with: `cargo bench --package mvp-layout --bench layout_bench`
//!
//! # What is measured
//!
//! | Group            | Input                        | Notes                          |
//! |------------------|------------------------------|--------------------------------|
//! | simple_layout    | 1, 4 and 16 verses           | Linear in text length          |
//! | graph_layout     | 1 verse, 2 and 4 verses      | Graph grows as n * bound       |
//! | graph_word_bound | 4 verses, bound 8/16/64      | Cost of the lookahead window   |
//! | cached_layout    | 1 verse, warm cache          | Hash + clone only              |
//!
//! The graph engine builds `n(n+1)/2 + 2` nodes while `n` stays under the
//! word bound, so a single verse (~25 words) is the expected workload and
//! multi-verse inputs show where the bound starts to matter.
//!
//! # Criterion Output
//!
//! Results are written to `target/criterion/` per group.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use mvp_layout::{CachedLayout, CostModel, GraphLayout, LineLayout, SimpleLayout};
use std::hint::black_box;

// ============================================================================
// Test Data
// ============================================================================

const PHILIPPIANS_1_1: &str = "Paul and Timothy, bondservants of Jesus Christ, To all the \
    saints in Christ Jesus who are in Philippi, with the bishops and deacons: ";

fn verses(count: usize) -> String {
    PHILIPPIANS_1_1.repeat(count)
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_simple(c: &mut Criterion) {
    let mut group = c.benchmark_group("simple_layout");
    let layout = SimpleLayout::default();
    for count in [1usize, 4, 16] {
        let text = verses(count);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &text, |b, text| {
            b.iter(|| layout.layout(black_box(text)));
        });
    }
    group.finish();
}

fn bench_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph_layout");
    let layout = GraphLayout::default();
    for count in [1usize, 2, 4] {
        let text = verses(count);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &text, |b, text| {
            b.iter(|| layout.plan(black_box(text)));
        });
    }
    group.finish();
}

fn bench_word_bound(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph_word_bound");
    let text = verses(4);
    for bound in [8usize, 16, 64] {
        let Ok(layout) = GraphLayout::new(CostModel::default()).with_max_words_per_line(bound)
        else {
            continue;
        };
        group.bench_with_input(BenchmarkId::from_parameter(bound), &text, |b, text| {
            b.iter(|| layout.plan(black_box(text)));
        });
    }
    group.finish();
}

fn bench_cached(c: &mut Criterion) {
    let Ok(cached) = CachedLayout::new(GraphLayout::default(), 16) else {
        return;
    };
    cached.layout(PHILIPPIANS_1_1);
    c.bench_function("cached_layout/warm", |b| {
        b.iter(|| cached.layout(black_box(PHILIPPIANS_1_1)));
    });
}

criterion_group!(
    benches,
    bench_simple,
    bench_graph,
    bench_word_bound,
    bench_cached
);
criterion_main!(benches);
