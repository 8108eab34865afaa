//! Interface com o backend de simulação
//!
//! O motor não simula nada: a cada shot ele lê, através de
//! [`SnapshotSource`], o vetor de estado final e os vetores capturados em
//! cada ponto de snapshot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::accumulator::SnapshotKey;
use crate::vector::StateVector;

/// Estado capturado por um shot
pub trait SnapshotSource {
    /// Vetor de estado ao final do shot
    fn state(&self) -> &StateVector;

    /// Vetores capturados por chave de snapshot
    fn snapshots(&self) -> &BTreeMap<SnapshotKey, StateVector>;

    /// Resultado de medição dos registradores clássicos, se houver
    fn outcome(&self) -> Option<&str> {
        None
    }
}

/// Shot já executado, com seus snapshots
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapturedShot {
    #[serde(default)]
    pub state: StateVector,
    #[serde(default)]
    pub snapshots: BTreeMap<SnapshotKey, StateVector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
}

impl CapturedShot {
    pub fn new(state: StateVector) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    /// Adiciona um snapshot (builder)
    pub fn with_snapshot(mut self, key: SnapshotKey, vector: StateVector) -> Self {
        self.snapshots.insert(key, vector);
        self
    }

    /// Define o resultado de medição (builder)
    pub fn with_outcome(mut self, outcome: impl Into<String>) -> Self {
        self.outcome = Some(outcome.into());
        self
    }
}

impl SnapshotSource for CapturedShot {
    fn state(&self) -> &StateVector {
        &self.state
    }

    fn snapshots(&self) -> &BTreeMap<SnapshotKey, StateVector> {
        &self.snapshots
    }

    fn outcome(&self) -> Option<&str> {
        self.outcome.as_deref()
    }
}

/// Registrador de qudits declarado no circuito
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuditRegister {
    pub name: String,
    pub size: usize,
}

/// Layout dos registradores do circuito, na ordem de declaração
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitLayout {
    #[serde(default)]
    pub qubit_registers: Vec<QuditRegister>,
}

impl CircuitLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adiciona um registrador (builder)
    pub fn with_register(mut self, name: impl Into<String>, size: usize) -> Self {
        self.qubit_registers.push(QuditRegister {
            name: name.into(),
            size,
        });
        self
    }

    /// Tamanhos dos grupos na ordem do rótulo
    ///
    /// O último registrador declarado ocupa os dígitos mais à esquerda.
    pub fn label_groups(&self) -> Vec<usize> {
        self.qubit_registers.iter().rev().map(|r| r.size).collect()
    }

    /// Total de qudits declarados
    pub fn qudit_count(&self) -> usize {
        self.qubit_registers.iter().map(|r| r.size).sum()
    }
}
