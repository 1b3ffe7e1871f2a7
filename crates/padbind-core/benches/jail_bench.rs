//! Criterion benchmarks for the octagonal mouse jail.
//!
//! `lock` runs once per polled mouse sample, so both the inside fast path
//! and the snap path must stay in the 100ns class.
//!
//! Run with:
//! ```bash
//! cargo bench --package padbind-core --bench jail_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use padbind_core::jail::{ExtendedWindowInfo, JailSettings, OctagonalMouseJail, Point};

fn ready_jail() -> OctagonalMouseJail {
    let mut jail = OctagonalMouseJail::new();
    jail.refresh_settings(JailSettings {
        sensitivity: 1.0,
        snapping_distance: 10.0,
        enabled: true,
    });
    jail.update_render_window_info(ExtendedWindowInfo::from_bounds(1, 0.0, 0.0, 800.0, 600.0));
    jail
}

fn bench_octagon_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("jail_generate");
    let window = ExtendedWindowInfo::from_bounds(1, 0.0, 0.0, 800.0, 600.0);

    group.bench_function("generate_800x600", |b| {
        b.iter(|| {
            padbind_core::jail::Octagon::generate(black_box(&window), black_box(1.0))
        })
    });

    group.finish();
}

fn bench_lock(c: &mut Criterion) {
    let mut group = c.benchmark_group("jail_lock");
    let jail = ready_jail();

    // Fast path: sample is already inside the gate.
    group.bench_function("lock_inside", |b| {
        b.iter(|| jail.lock(black_box(Point::new(420.0, 310.0))))
    });

    // Snap path: sample outside, lands on an edge line.
    group.bench_function("lock_outside_edge", |b| {
        b.iter(|| jail.lock(black_box(Point::new(900.0, 420.0))))
    });

    // Vertex path: sample just outside a vertex, inside the snap radius.
    group.bench_function("lock_outside_vertex_snap", |b| {
        b.iter(|| jail.lock(black_box(Point::new(804.0, 303.0))))
    });

    group.finish();
}

criterion_group!(benches, bench_octagon_generate, bench_lock);
criterion_main!(benches);
