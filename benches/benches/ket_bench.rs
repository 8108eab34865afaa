//! # Ket / Probability Benchmarks
//!
//! Measures sparse ket encoding and probability reduction of dense state vectors.
//!
//! Run: `cargo bench --bench ket_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use qsnap_core::{vec_to_ket, Complex64, Probabilities, StateVector, DEFAULT_EPSILON};

/// Uniform superposition over 2^n amplitudes with varying phases
fn uniform(qubits: u32) -> StateVector {
    let len = 1usize << qubits;
    let amp = 1.0 / (len as f64).sqrt();
    StateVector::new(
        (0..len)
            .map(|k| Complex64::from_polar(amp, k as f64 * 0.1))
            .collect(),
    )
}

/// Benchmark sparse ket encoding
fn bench_vec_to_ket(c: &mut Criterion) {
    let mut group = c.benchmark_group("vec_to_ket");

    for qubits in [4u32, 8, 12] {
        let psi = uniform(qubits);
        group.bench_with_input(BenchmarkId::new("uniform", qubits), &psi, |b, psi| {
            b.iter(|| black_box(vec_to_ket(psi.amplitudes(), 2, DEFAULT_EPSILON, &[])))
        });
        group.bench_with_input(BenchmarkId::new("grouped", qubits), &psi, |b, psi| {
            b.iter(|| black_box(vec_to_ket(psi.amplitudes(), 2, DEFAULT_EPSILON, &[1, 3])))
        });
    }

    group.bench_function("basis_state_12", |b| {
        let psi = StateVector::basis(1 << 12, 7);
        b.iter(|| black_box(vec_to_ket(psi.amplitudes(), 2, DEFAULT_EPSILON, &[])))
    });

    group.finish();
}

/// Benchmark probability reduction (dense vs ket form)
fn bench_probabilities(c: &mut Criterion) {
    let mut group = c.benchmark_group("probabilities");

    let psi = uniform(10);
    let ket = vec_to_ket(psi.amplitudes(), 2, DEFAULT_EPSILON, &[]);

    group.bench_function("dense_10", |b| b.iter(|| black_box(psi.probabilities())));
    group.bench_function("ket_10", |b| b.iter(|| black_box(ket.probabilities())));

    group.finish();
}

criterion_group!(benches, bench_vec_to_ket, bench_probabilities);
criterion_main!(benches);
