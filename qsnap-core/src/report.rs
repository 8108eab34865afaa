//! Exportação dos resultados
//!
//! Divide cada soma acumulada pelo total de shots, aplica o truncamento e
//! emite apenas os campos cuja saída está ligada e cujo acumulador tem
//! entradas. Nunca emite campos vazios ou preenchidos com zeros.

use std::collections::BTreeMap;

use num_complex::Complex64;
use serde::Serialize;

use crate::accumulator::{SnapshotAccumulator, SnapshotKey};
use crate::chop::Chop;
use crate::config::OutputToggles;
use crate::error::SnapshotResult;
use crate::ket::{Ket, ProbabilityKet};
use crate::tally::ShotTally;
use crate::vector::CMatrix;

/// Documento de resultados de um [`VectorEngine`](crate::VectorEngine)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EngineReport {
    /// Total de shots
    pub shots: u64,
    /// Contagem dos resultados de medição
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub counts: BTreeMap<String, u64>,
    /// Kets de cada shot
    #[serde(rename = "quantum_state_ket", skip_serializing_if = "Option::is_none")]
    pub kets: Option<Vec<BTreeMap<SnapshotKey, Ket>>>,
    /// Matrizes densidade médias
    #[serde(skip_serializing_if = "Option::is_none")]
    pub density_matrix: Option<BTreeMap<SnapshotKey, CMatrix>>,
    /// Probabilidades médias (vetor denso)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probabilities: Option<BTreeMap<SnapshotKey, Vec<f64>>>,
    /// Probabilidades médias (forma ket)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probabilities_ket: Option<BTreeMap<SnapshotKey, ProbabilityKet>>,
    /// Produtos internos de cada shot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner_products: Option<BTreeMap<SnapshotKey, Vec<Vec<Complex64>>>>,
    /// Overlaps médios com os estados alvo
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlaps: Option<BTreeMap<SnapshotKey, Vec<f64>>>,
}

impl EngineReport {
    /// Monta o relatório a partir de cópias normalizadas dos acumuladores
    pub(crate) fn build(
        tally: &ShotTally,
        acc: &SnapshotAccumulator,
        outputs: &OutputToggles,
        epsilon: f64,
    ) -> Self {
        let mut report = Self {
            shots: tally.total_shots,
            counts: tally.counts.clone(),
            ..Self::default()
        };

        if outputs.ket && !acc.ket_history().is_empty() {
            report.kets = Some(acc.ket_history().to_vec());
        }

        // produtos internos já foram truncados ao serem registrados
        if outputs.inner_products && !acc.all_inner_products().is_empty() {
            let inprods = acc
                .all_inner_products()
                .iter()
                .map(|(k, shots)| (*k, shots.clone()))
                .collect();
            report.inner_products = Some(inprods);
        }

        let Some(renorm) = tally.renormalization() else {
            return report;
        };

        if outputs.density {
            report.density_matrix = normalized(acc.densities(), epsilon, |rho| rho.scale(renorm));
        }
        if outputs.probabilities {
            report.probabilities =
                normalized(acc.all_probabilities(), epsilon, |p| scale_all(p.iter_mut(), renorm));
        }
        if outputs.probabilities_ket {
            // chaves cujo ket inteiro foi truncado não são emitidas
            report.probabilities_ket =
                normalized(acc.probability_kets(), epsilon, |p| scale_all(p.values_mut(), renorm))
                    .map(|mut kets| {
                        kets.retain(|_, ket| !ket.is_empty());
                        kets
                    })
                    .filter(|kets| !kets.is_empty());
        }
        if outputs.overlaps {
            report.overlaps = normalized(acc.all_overlaps(), epsilon, |p| scale_all(p.iter_mut(), renorm));
        }

        report
    }

    pub fn to_json(&self) -> SnapshotResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> SnapshotResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_value(&self) -> SnapshotResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

fn scale_all<'a>(values: impl Iterator<Item = &'a mut f64>, factor: f64) {
    for v in values {
        *v *= factor;
    }
}

/// Copia, normaliza e trunca cada soma; `None` se não houver nenhuma
fn normalized<'a, T, I, F>(sums: I, epsilon: f64, scale: F) -> Option<BTreeMap<SnapshotKey, T>>
where
    T: Chop + Clone + 'a,
    I: Iterator<Item = (SnapshotKey, &'a T)>,
    F: Fn(&mut T),
{
    let out: BTreeMap<_, _> = sums
        .map(|(key, sum)| {
            let mut value = sum.clone();
            scale(&mut value);
            (key, value.chopped(epsilon))
        })
        .collect();
    (!out.is_empty()).then_some(out)
}
