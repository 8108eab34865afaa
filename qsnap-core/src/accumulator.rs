//! Acumuladores por snapshot
//!
//! Guardam somas NÃO normalizadas sobre os shots. A divisão pelo número
//! total de shots acontece uma única vez, na exportação.
//!
//! ## Estados por chave
//!
//! ```text
//! ausente ──(1ª contribuição)──▶ acumulando ──(contribuições)──▶ acumulando
//! ```
//!
//! A primeira contribuição define o formato (dimensão da matriz, tamanho do
//! vetor); não existe matriz "vazia com zeros".

use std::collections::BTreeMap;

use num_complex::Complex64;

use crate::ket::{Ket, ProbabilityKet};
use crate::vector::CMatrix;

/// Identificador de um ponto de snapshot no circuito
pub type SnapshotKey = u64;

/// Soma elemento a elemento com outra contribuição
///
/// Formatos diferentes são completados com zero, de modo que a soma é total,
/// associativa e comutativa.
pub trait Accumulate: Clone {
    fn accumulate(&mut self, other: &Self);
}

impl Accumulate for Vec<f64> {
    fn accumulate(&mut self, other: &Self) {
        if other.len() > self.len() {
            self.resize(other.len(), 0.0);
        }
        for (s, o) in self.iter_mut().zip(other) {
            *s += o;
        }
    }
}

impl Accumulate for CMatrix {
    fn accumulate(&mut self, other: &Self) {
        if other.dim() > self.dim() {
            self.grow_to(other.dim());
        }
        if other.dim() == self.dim() {
            for (s, o) in self.elements_mut().iter_mut().zip(other.elements()) {
                *s += o;
            }
            return;
        }
        let (dim, odim) = (self.dim(), other.dim());
        let elements = self.elements_mut();
        for (r, row) in other.rows().enumerate().take(odim) {
            for (c, o) in row.iter().enumerate() {
                elements[r * dim + c] += o;
            }
        }
    }
}

impl Accumulate for ProbabilityKet {
    fn accumulate(&mut self, other: &Self) {
        for (label, p) in other {
            *self.entry(label.clone()).or_insert(0.0) += p;
        }
    }
}

/// Soma corrente com estado explícito de "não inicializado"
#[derive(Debug, Clone, PartialEq)]
pub struct Running<T> {
    sum: Option<T>,
}

impl<T> Default for Running<T> {
    fn default() -> Self {
        Self { sum: None }
    }
}

impl<T: Accumulate> Running<T> {
    /// Adiciona uma contribuição; a primeira inicializa a soma
    pub fn add(&mut self, contribution: T) {
        match &mut self.sum {
            Some(sum) => sum.accumulate(&contribution),
            None => self.sum = Some(contribution),
        }
    }

    /// Incorpora outra soma corrente (copia se esta ainda está vazia)
    pub fn merge(&mut self, other: &Running<T>) {
        let Some(theirs) = &other.sum else {
            return;
        };
        match &mut self.sum {
            Some(sum) => sum.accumulate(theirs),
            None => self.sum = Some(theirs.clone()),
        }
    }

    pub fn sum(&self) -> Option<&T> {
        self.sum.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.sum.is_some()
    }
}

fn merge_running<T: Accumulate>(
    into: &mut BTreeMap<SnapshotKey, Running<T>>,
    from: &BTreeMap<SnapshotKey, Running<T>>,
) {
    for (key, running) in from {
        if running.is_initialized() {
            into.entry(*key).or_default().merge(running);
        }
    }
}

fn initialized<T>(
    map: &BTreeMap<SnapshotKey, Running<T>>,
) -> impl Iterator<Item = (SnapshotKey, &T)> {
    map.iter().filter_map(|(k, r)| r.sum.as_ref().map(|s| (*k, s)))
}

/// Conjunto de acumuladores de um motor
#[derive(Debug, Clone, Default)]
pub struct SnapshotAccumulator {
    /// Kets de cada shot, na ordem dos shots
    kets: Vec<BTreeMap<SnapshotKey, Ket>>,
    /// Σ |ψ⟩⟨ψ|
    density: BTreeMap<SnapshotKey, Running<CMatrix>>,
    /// Σ |ψ_i|²
    probs: BTreeMap<SnapshotKey, Running<Vec<f64>>>,
    /// Σ |ψ_label|² (forma ket)
    probs_ket: BTreeMap<SnapshotKey, Running<ProbabilityKet>>,
    /// Produtos internos de cada shot (não somados)
    inner_products: BTreeMap<SnapshotKey, Vec<Vec<Complex64>>>,
    /// Σ |⟨alvo|ψ⟩|²
    overlaps: BTreeMap<SnapshotKey, Running<Vec<f64>>>,
}

impl SnapshotAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra os kets de um shot
    pub fn push_kets(&mut self, kets: BTreeMap<SnapshotKey, Ket>) {
        self.kets.push(kets);
    }

    pub fn add_density(&mut self, key: SnapshotKey, rho: CMatrix) {
        self.density.entry(key).or_default().add(rho);
    }

    pub fn add_probabilities(&mut self, key: SnapshotKey, probs: Vec<f64>) {
        self.probs.entry(key).or_default().add(probs);
    }

    pub fn add_probability_ket(&mut self, key: SnapshotKey, probs: ProbabilityKet) {
        self.probs_ket.entry(key).or_default().add(probs);
    }

    /// Registra os produtos internos de um shot, na ordem dos estados alvo
    pub fn push_inner_products(&mut self, key: SnapshotKey, values: Vec<Complex64>) {
        self.inner_products.entry(key).or_default().push(values);
    }

    pub fn add_overlaps(&mut self, key: SnapshotKey, overlaps: Vec<f64>) {
        self.overlaps.entry(key).or_default().add(overlaps);
    }

    /// Incorpora os acumuladores de outro motor
    pub fn merge(&mut self, other: &SnapshotAccumulator) {
        self.kets.extend(other.kets.iter().cloned());
        merge_running(&mut self.density, &other.density);
        merge_running(&mut self.probs, &other.probs);
        merge_running(&mut self.probs_ket, &other.probs_ket);
        merge_running(&mut self.overlaps, &other.overlaps);
        for (key, shots) in &other.inner_products {
            self.inner_products
                .entry(*key)
                .or_default()
                .extend(shots.iter().cloned());
        }
    }

    pub fn ket_history(&self) -> &[BTreeMap<SnapshotKey, Ket>] {
        &self.kets
    }

    pub fn density(&self, key: SnapshotKey) -> Option<&CMatrix> {
        self.density.get(&key).and_then(Running::sum)
    }

    pub fn densities(&self) -> impl Iterator<Item = (SnapshotKey, &CMatrix)> {
        initialized(&self.density)
    }

    pub fn probabilities(&self, key: SnapshotKey) -> Option<&Vec<f64>> {
        self.probs.get(&key).and_then(Running::sum)
    }

    pub fn all_probabilities(&self) -> impl Iterator<Item = (SnapshotKey, &Vec<f64>)> {
        initialized(&self.probs)
    }

    pub fn probability_ket(&self, key: SnapshotKey) -> Option<&ProbabilityKet> {
        self.probs_ket.get(&key).and_then(Running::sum)
    }

    pub fn probability_kets(&self) -> impl Iterator<Item = (SnapshotKey, &ProbabilityKet)> {
        initialized(&self.probs_ket)
    }

    pub fn inner_products(&self, key: SnapshotKey) -> Option<&[Vec<Complex64>]> {
        self.inner_products.get(&key).map(Vec::as_slice)
    }

    pub fn all_inner_products(&self) -> &BTreeMap<SnapshotKey, Vec<Vec<Complex64>>> {
        &self.inner_products
    }

    pub fn overlaps(&self, key: SnapshotKey) -> Option<&Vec<f64>> {
        self.overlaps.get(&key).and_then(Running::sum)
    }

    pub fn all_overlaps(&self) -> impl Iterator<Item = (SnapshotKey, &Vec<f64>)> {
        initialized(&self.overlaps)
    }

    /// Nenhuma contribuição registrada
    pub fn is_empty(&self) -> bool {
        self.kets.is_empty()
            && self.density.is_empty()
            && self.probs.is_empty()
            && self.probs_ket.is_empty()
            && self.inner_products.is_empty()
            && self.overlaps.is_empty()
    }
}
