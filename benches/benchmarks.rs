// benches/benchmarks.rs — Performance benchmarks (criterion)
//
// Hot paths on every request:
//   1. Fallback coach scoring and templating
//   2. Quota check + usage recording under the session lock
//   3. Token estimation of analysis text

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use lucidra::coach;
use lucidra::core::estimate_tokens;
use lucidra::usage::{Plan, PlanTable, UsageGovernor};

// ─── Helpers ────────────────────────────────────────────────────────────────

const SHORT: &str = "Cut costs";
const MEDIUM: &str =
    "We are weighing a price increase while a competitor enters our market with aggressive growth plans.";

fn long_scenario() -> String {
    MEDIUM.repeat(20)
}

// ─── Benchmarks ─────────────────────────────────────────────────────────────

fn bench_coach(c: &mut Criterion) {
    let long = long_scenario();
    let mut group = c.benchmark_group("coach");

    group.bench_function("analyze_short", |b| {
        b.iter(|| coach::analyze(black_box(SHORT)))
    });

    group.bench_function("analyze_medium", |b| {
        b.iter(|| coach::analyze(black_box(MEDIUM)))
    });

    group.bench_function("analyze_long", |b| {
        b.iter(|| coach::analyze(black_box(&long)))
    });

    group.bench_function("score_medium", |b| {
        b.iter(|| coach::score(black_box(MEDIUM)))
    });

    group.finish();
}

fn bench_governor(c: &mut Criterion) {
    let governor = UsageGovernor::in_memory(PlanTable::default());
    for i in 0..1_000 {
        governor.create_session(&format!("session-{i}"), Plan::Premium);
    }
    governor.opt_in("session-500");

    let mut group = c.benchmark_group("governor");

    group.bench_function("can_use_ai", |b| {
        b.iter(|| governor.can_use_ai(black_box("session-500")))
    });

    group.bench_function("record_usage", |b| {
        b.iter(|| governor.record_usage(black_box("session-42"), black_box(1)))
    });

    group.bench_function("usage_snapshot", |b| {
        b.iter(|| governor.usage_snapshot(black_box("session-500")))
    });

    group.finish();
}

fn bench_token_estimation(c: &mut Criterion) {
    let long = long_scenario();
    let mut group = c.benchmark_group("token_estimation");

    group.bench_function("estimate_short", |b| {
        b.iter(|| estimate_tokens(black_box(SHORT)))
    });

    group.bench_function("estimate_long", |b| {
        b.iter(|| estimate_tokens(black_box(&long)))
    });

    group.finish();
}

criterion_group!(benches, bench_coach, bench_governor, bench_token_estimation);
criterion_main!(benches);
