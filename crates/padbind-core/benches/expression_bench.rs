//! Criterion benchmarks for the binding expression engine.
//!
//! Parsing happens only when a binding is edited, but evaluation runs for
//! every mapped control on every input-poll tick, so it must stay in the
//! sub-microsecond class.
//!
//! Run with:
//! ```bash
//! cargo bench --package padbind-core --bench expression_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use padbind_core::device::{ControlQualifier, ControlResolver, ControlState, DeviceQualifier};
use padbind_core::expression::parser::parse;

// ── Fixtures ──────────────────────────────────────────────────────────────────

const SIMPLE: &str = "A";
const QUALIFIED: &str = "`XInput/0/Gamepad:Button A` | Return";
const COMPOUND: &str = "!(A & B) | (`Left Trigger` + `Right Trigger`)";

/// Resolver that answers every lookup from a fixed value, so evaluation
/// cost is all AST walking.
struct FixedResolver(ControlState);

impl ControlResolver for FixedResolver {
    fn resolve(
        &self,
        _control: &ControlQualifier,
        _default_device: &DeviceQualifier,
    ) -> Option<ControlState> {
        Some(self.0)
    }
}

// ── Benchmarks: parsing ───────────────────────────────────────────────────────

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("expression_parse");

    group.bench_function("parse_simple", |b| b.iter(|| parse(black_box(SIMPLE))));
    group.bench_function("parse_qualified", |b| b.iter(|| parse(black_box(QUALIFIED))));
    group.bench_function("parse_compound", |b| b.iter(|| parse(black_box(COMPOUND))));

    group.finish();
}

// ── Benchmarks: evaluation (hot path) ────────────────────────────────────────

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("expression_evaluate");
    let resolver = FixedResolver(0.75);
    let default_device = DeviceQualifier::new("XInput", 0, "Gamepad");

    for (name, text) in [
        ("evaluate_simple", SIMPLE),
        ("evaluate_qualified", QUALIFIED),
        ("evaluate_compound", COMPOUND),
    ] {
        let ast = parse(text).expect("benchmark fixture must parse");
        group.bench_function(name, |b| {
            b.iter(|| black_box(&ast).evaluate(&resolver, &default_device))
        });
    }

    group.finish();
}

// ── Benchmarks: serialisation ────────────────────────────────────────────────

fn bench_display(c: &mut Criterion) {
    let mut group = c.benchmark_group("expression_display");
    let ast = parse(COMPOUND).expect("benchmark fixture must parse");

    group.bench_function("display_compound", |b| {
        b.iter(|| black_box(&ast).to_string())
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_evaluate, bench_display);
criterion_main!(benches);
