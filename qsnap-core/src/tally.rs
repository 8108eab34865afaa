//! Contabilidade de shots
//!
//! Total de shots e contagem dos resultados de medição. O total de shots é a
//! única autoridade para normalizar as somas dos acumuladores.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Contagem de shots e resultados
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotTally {
    /// Total de shots registrados
    pub total_shots: u64,
    /// Resultado de medição (registradores clássicos) → ocorrências
    pub counts: BTreeMap<String, u64>,
}

impl ShotTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra um shot e, se houver, seu resultado de medição
    pub fn record(&mut self, outcome: Option<&str>) {
        self.total_shots += 1;
        if let Some(outcome) = outcome {
            *self.counts.entry(outcome.to_string()).or_insert(0) += 1;
        }
    }

    /// Soma outra contagem a esta
    pub fn merge(&mut self, other: &ShotTally) {
        self.total_shots += other.total_shots;
        for (outcome, n) in &other.counts {
            *self.counts.entry(outcome.clone()).or_insert(0) += n;
        }
    }

    /// Fator 1/N para médias; `None` sem shots
    pub fn renormalization(&self) -> Option<f64> {
        (self.total_shots > 0).then(|| 1.0 / self.total_shots as f64)
    }
}
