//! Motor de estatísticas de snapshots
//!
//! Acumula, shot a shot, as estatísticas dos vetores de estado capturados
//! pelo backend e as combina com outros motores.

use std::collections::BTreeMap;
use std::ops::AddAssign;

use num_complex::Complex64;

use crate::accumulator::{SnapshotAccumulator, SnapshotKey};
use crate::backend::{CircuitLayout, SnapshotSource};
use crate::chop::Chop;
use crate::config::{EngineConfig, OutputToggles};
use crate::error::{SnapshotError, SnapshotResult};
use crate::ket::{qudit_count, vec_to_ket, Ket};
use crate::probability::Probabilities;
use crate::report::EngineReport;
use crate::tally::ShotTally;
use crate::vector::StateVector;

/// Motor de estatísticas de vetores de estado
///
/// Cada instância acumula sequencialmente; paralelismo se faz com motores
/// independentes sobre faixas disjuntas de shots, combinados com
/// [`VectorEngine::add`].
#[derive(Debug, Clone, Default)]
pub struct VectorEngine {
    /// Configuração (somente leitura durante a acumulação)
    config: EngineConfig,
    /// Contagem de shots
    tally: ShotTally,
    /// Somas por snapshot
    acc: SnapshotAccumulator,
}

impl VectorEngine {
    /// Cria motor com configuração default (nenhuma saída ligada)
    pub fn new() -> Self {
        Self::default()
    }

    /// Cria motor com configuração customizada
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            tally: ShotTally::new(),
            acc: SnapshotAccumulator::new(),
        }
    }

    /// Lê a configuração de settings JSON e cria o motor
    pub fn from_settings_json(json: &str) -> SnapshotResult<Self> {
        Ok(Self::with_config(EngineConfig::from_json_str(json)?))
    }

    /// Cópia vazia com a mesma configuração (para workers paralelos)
    pub fn fork(&self) -> Self {
        Self::with_config(self.config.clone())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn outputs(&self) -> &OutputToggles {
        &self.config.outputs
    }

    pub fn tally(&self) -> &ShotTally {
        &self.tally
    }

    pub fn total_shots(&self) -> u64 {
        self.tally.total_shots
    }

    pub fn accumulator(&self) -> &SnapshotAccumulator {
        &self.acc
    }

    /// Acumula os resultados de um shot
    ///
    /// O shot é registrado na contagem antes das estatísticas. Se um estado
    /// alvo tiver dimensão diferente de um snapshot, retorna
    /// [`SnapshotError::DimensionMismatch`]; contribuições já aplicadas neste
    /// shot são mantidas.
    pub fn compute_results<S>(&mut self, layout: &CircuitLayout, shot: &S) -> SnapshotResult<()>
    where
        S: SnapshotSource + ?Sized,
    {
        self.tally.record(shot.outcome());

        let snapshots = shot.snapshots();
        if snapshots.is_empty() {
            return Ok(());
        }
        tracing::trace!(snapshots = snapshots.len(), "accumulating shot");

        let outputs = self.config.outputs;

        if outputs.ket_form() {
            let layout_groups = layout.label_groups();
            let kets: BTreeMap<SnapshotKey, Ket> = snapshots
                .iter()
                .map(|(key, psi)| {
                    let groups = self.groups_for(*key, psi, layout, &layout_groups);
                    let ket = vec_to_ket(psi.amplitudes(), self.config.qudit_dim, self.config.epsilon, groups);
                    (*key, ket)
                })
                .collect();
            if outputs.probabilities_ket {
                for (key, ket) in &kets {
                    self.acc.add_probability_ket(*key, ket.probabilities());
                }
            }
            if outputs.ket {
                self.acc.push_kets(kets);
            }
        }

        if outputs.density {
            for (key, psi) in snapshots {
                self.acc.add_density(*key, psi.outer_product());
            }
        }

        if outputs.probabilities {
            for (key, psi) in snapshots {
                self.acc.add_probabilities(*key, psi.probabilities());
            }
        }

        if outputs.target_comparison() && !self.config.target_states.is_empty() {
            for (key, psi) in snapshots {
                let inprods = self.inner_products(psi)?;
                if outputs.overlaps {
                    self.acc.add_overlaps(*key, inprods.probabilities());
                }
                if outputs.inner_products {
                    self.acc.push_inner_products(*key, inprods);
                }
            }
        }

        Ok(())
    }

    /// Agrupamento dos rótulos de um snapshot
    ///
    /// Os registradores só particionam o rótulo quando somam exatamente a
    /// largura do snapshot; caso contrário o rótulo sai sem separadores.
    fn groups_for<'a>(
        &self,
        key: SnapshotKey,
        psi: &StateVector,
        layout: &CircuitLayout,
        groups: &'a [usize],
    ) -> &'a [usize] {
        let width = qudit_count(psi.len(), self.config.qudit_dim);
        let declared = layout.qudit_count();
        if declared == width {
            groups
        } else {
            if declared > 0 {
                tracing::debug!(key, width, declared, "register layout does not match snapshot width, labels ungrouped");
            }
            &[]
        }
    }

    /// Produtos internos ⟨alvo|ψ⟩, truncados, na ordem dos estados alvo
    fn inner_products(&self, psi: &StateVector) -> SnapshotResult<Vec<Complex64>> {
        self.config
            .target_states
            .iter()
            .map(|target| {
                if target.len() != psi.len() {
                    return Err(SnapshotError::DimensionMismatch {
                        target: target.len(),
                        snapshot: psi.len(),
                    });
                }
                Ok(target.inner_product(psi).chopped(self.config.epsilon))
            })
            .collect()
    }

    /// Incorpora os resultados de outro motor
    ///
    /// A contagem de shots é somada primeiro. Somas por chave são somadas;
    /// históricos (kets, produtos internos) são concatenados, os do outro
    /// motor depois dos deste.
    pub fn add(&mut self, other: &VectorEngine) {
        self.tally.merge(&other.tally);
        self.acc.merge(&other.acc);
        tracing::debug!(
            merged_shots = other.tally.total_shots,
            total_shots = self.tally.total_shots,
            "merged engine results"
        );
    }

    /// Relatório normalizado pelo total de shots (não altera o motor)
    pub fn export(&self) -> EngineReport {
        tracing::debug!(shots = self.tally.total_shots, "exporting snapshot statistics");
        EngineReport::build(&self.tally, &self.acc, &self.config.outputs, self.config.epsilon)
    }

    /// Descarta os resultados acumulados, mantendo a configuração
    pub fn reset(&mut self) {
        self.tally = ShotTally::new();
        self.acc = SnapshotAccumulator::new();
    }
}

impl AddAssign<&VectorEngine> for VectorEngine {
    fn add_assign(&mut self, other: &VectorEngine) {
        self.add(other);
    }
}

impl AddAssign for VectorEngine {
    fn add_assign(&mut self, other: VectorEngine) {
        self.add(&other);
    }
}
