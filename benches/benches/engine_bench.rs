//! # Engine Benchmarks
//!
//! Measures per-shot accumulation, engine merge and export.
//!
//! Run: `cargo bench --bench engine_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use qsnap_core::{
    CapturedShot, CircuitLayout, Complex64, EngineConfig, OutputToggles, StateVector, VectorEngine,
};

fn random_like(qubits: u32, seed: u64) -> StateVector {
    let len = 1usize << qubits;
    let mut psi = StateVector::new(
        (0..len)
            .map(|k| {
                let x = (k as u64).wrapping_mul(2654435761).wrapping_add(seed) % 1000;
                Complex64::from_polar(x as f64 / 1000.0, (x as f64) * 0.01)
            })
            .collect(),
    );
    psi.renormalize();
    psi
}

fn engine(qubits: u32, outputs: OutputToggles) -> VectorEngine {
    let targets = (0..4).map(|s| random_like(qubits, 1000 + s)).collect();
    VectorEngine::with_config(
        EngineConfig::new()
            .with_outputs(outputs)
            .with_target_states(targets, true),
    )
}

fn shots(qubits: u32, n: u64) -> Vec<CapturedShot> {
    (0..n)
        .map(|s| {
            CapturedShot::default()
                .with_snapshot(0, random_like(qubits, s))
                .with_snapshot(1, random_like(qubits, s + 7))
        })
        .collect()
}

/// Benchmark one shot per output kind
fn bench_compute_results(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_results");
    let layout = CircuitLayout::new().with_register("q", 6);
    let recorded = shots(6, 1);
    let shot = &recorded[0];

    let cases = [
        ("probabilities", OutputToggles { probabilities: true, ..Default::default() }),
        ("probabilities_ket", OutputToggles { probabilities_ket: true, ..Default::default() }),
        ("density", OutputToggles { density: true, ..Default::default() }),
        ("overlaps", OutputToggles { overlaps: true, ..Default::default() }),
        ("all", OutputToggles::all()),
    ];

    for (name, outputs) in cases {
        let mut eng = engine(6, outputs);
        group.bench_function(name, |b| {
            b.iter(|| black_box(eng.compute_results(&layout, shot)))
        });
    }

    group.finish();
}

/// Benchmark merging two engines of n shots
fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");
    let layout = CircuitLayout::new().with_register("q", 5);
    let outputs = OutputToggles {
        density: true,
        probabilities: true,
        probabilities_ket: true,
        overlaps: true,
        ..Default::default()
    };

    for n in [10u64, 100] {
        let mut a = engine(5, outputs);
        let mut b = a.fork();
        for shot in shots(5, n) {
            a.compute_results(&layout, &shot).unwrap();
            b.compute_results(&layout, &shot).unwrap();
        }
        group.bench_with_input(BenchmarkId::new("pair", n), &(a, b), |bench, (a, b)| {
            bench.iter(|| {
                let mut merged = a.clone();
                merged += b;
                black_box(merged)
            })
        });
    }

    group.finish();
}

/// Benchmark export (normalize + chop)
fn bench_export(c: &mut Criterion) {
    let layout = CircuitLayout::new().with_register("q", 6);
    let mut eng = engine(6, OutputToggles::all());
    for shot in shots(6, 50) {
        eng.compute_results(&layout, &shot).unwrap();
    }

    c.bench_function("export_all_6q", |b| b.iter(|| black_box(eng.export())));
}

criterion_group!(benches, bench_compute_results, bench_merge, bench_export);
criterion_main!(benches);
