//! Configuração do motor
//!
//! Lida a partir de um documento JSON de settings:
//!
//! ```text
//! {
//!   "chop": 1e-10,
//!   "qudit_dim": 2,
//!   "data": ["densitymatrix", "probs", "targetstatesprobs"],
//!   "target_states": [[[1, 0], [0, 0]], [[0, 0], [1, 0]]],
//!   "renorm_target_states": true
//! }
//! ```
//!
//! Nomes em `data` que não pertencem ao conjunto reconhecido são ignorados.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::chop::DEFAULT_EPSILON;
use crate::error::{SnapshotError, SnapshotResult};
use crate::vector::StateVector;

/// Dimensão default do qudit
pub const DEFAULT_QUDIT_DIM: u64 = 2;

/// Nomes reconhecidos em `data` e a saída que cada um liga
pub const OUTPUT_NAMES: &[(&str, &str)] = &[
    ("quantumstateket", "quantum_state_ket"),
    ("quantumstatesket", "quantum_state_ket"),
    ("densitymatrix", "density_matrix"),
    ("probabilities", "probabilities"),
    ("probs", "probabilities"),
    ("probabilitiesket", "probabilities_ket"),
    ("probsket", "probabilities_ket"),
    ("targetstatesinner", "inner_products"),
    ("targetstatesprobs", "overlaps"),
];

/// Saídas habilitadas (conjunto fechado)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputToggles {
    /// Kets esparsos de cada shot
    pub ket: bool,
    /// Matriz densidade média
    pub density: bool,
    /// Probabilidades na base Z (vetor denso)
    pub probabilities: bool,
    /// Probabilidades na base Z (forma ket)
    pub probabilities_ket: bool,
    /// Produtos internos com os estados alvo, por shot
    pub inner_products: bool,
    /// Overlaps médios com os estados alvo
    pub overlaps: bool,
}

impl OutputToggles {
    /// Todas as saídas ligadas
    pub fn all() -> Self {
        Self {
            ket: true,
            density: true,
            probabilities: true,
            probabilities_ket: true,
            inner_products: true,
            overlaps: true,
        }
    }

    /// Liga a saída correspondente a `name`
    ///
    /// O nome é normalizado (minúsculas, sem espaços nas pontas). Retorna
    /// `false` se o nome não for reconhecido; nesse caso nada muda.
    pub fn enable(&mut self, name: &str) -> bool {
        let name = name.trim().to_lowercase();
        match name.as_str() {
            "quantumstateket" | "quantumstatesket" => self.ket = true,
            "densitymatrix" => self.density = true,
            "probabilities" | "probs" => self.probabilities = true,
            "probabilitiesket" | "probsket" => self.probabilities_ket = true,
            "targetstatesinner" => self.inner_products = true,
            "targetstatesprobs" => self.overlaps = true,
            _ => return false,
        }
        true
    }

    /// Constrói a partir de uma lista de nomes
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut toggles = Self::default();
        for name in names {
            if !toggles.enable(name.as_ref()) {
                tracing::debug!(output = name.as_ref(), "ignoring unrecognized output name");
            }
        }
        toggles
    }

    /// Alguma saída precisa da forma ket?
    pub fn ket_form(&self) -> bool {
        self.ket || self.probabilities_ket
    }

    /// Alguma saída compara com os estados alvo?
    pub fn target_comparison(&self) -> bool {
        self.inner_products || self.overlaps
    }
}

fn default_chop() -> f64 {
    DEFAULT_EPSILON
}

fn default_qudit_dim() -> u64 {
    DEFAULT_QUDIT_DIM
}

fn default_true() -> bool {
    true
}

/// Documento de settings como aparece no JSON
#[derive(Debug, Deserialize)]
struct Settings {
    #[serde(default = "default_chop")]
    chop: f64,
    #[serde(default = "default_qudit_dim")]
    qudit_dim: u64,
    #[serde(default)]
    data: Vec<String>,
    #[serde(default)]
    target_states: Vec<StateVector>,
    #[serde(default = "default_true")]
    renorm_target_states: bool,
}

/// Configuração do [`VectorEngine`](crate::VectorEngine)
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Limiar de truncamento ε
    pub epsilon: f64,
    /// Dimensão de cada qudit (radix dos rótulos)
    pub qudit_dim: u64,
    /// Saídas habilitadas
    pub outputs: OutputToggles,
    /// Estados alvo para produtos internos e overlaps
    pub target_states: Vec<StateVector>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            qudit_dim: DEFAULT_QUDIT_DIM,
            outputs: OutputToggles::default(),
            target_states: Vec::new(),
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lê a configuração de um documento JSON
    pub fn from_json_str(json: &str) -> SnapshotResult<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        Self::from_settings(settings)
    }

    /// Lê a configuração de um valor JSON já parseado
    pub fn from_value(value: serde_json::Value) -> SnapshotResult<Self> {
        let settings: Settings = serde_json::from_value(value)?;
        Self::from_settings(settings)
    }

    /// Lê a configuração de um arquivo JSON
    pub fn from_path(path: impl AsRef<Path>) -> SnapshotResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    fn from_settings(settings: Settings) -> SnapshotResult<Self> {
        let config = Self::new()
            .with_epsilon(settings.chop)
            .with_qudit_dim(settings.qudit_dim)
            .with_outputs(OutputToggles::from_names(&settings.data))
            .with_target_states(settings.target_states, settings.renorm_target_states);
        config.validate()?;
        Ok(config)
    }

    /// Verifica ε e a dimensão do qudit
    pub fn validate(&self) -> SnapshotResult<()> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(SnapshotError::Config(format!(
                "chop must be a non-negative number, got {}",
                self.epsilon
            )));
        }
        if self.qudit_dim < 2 {
            return Err(SnapshotError::Config(format!(
                "qudit_dim must be at least 2, got {}",
                self.qudit_dim
            )));
        }
        Ok(())
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_qudit_dim(mut self, qudit_dim: u64) -> Self {
        self.qudit_dim = qudit_dim;
        self
    }

    pub fn with_outputs(mut self, outputs: OutputToggles) -> Self {
        self.outputs = outputs;
        self
    }

    /// Define os estados alvo, normalizando cada um se `renormalize`
    pub fn with_target_states(mut self, mut states: Vec<StateVector>, renormalize: bool) -> Self {
        if renormalize {
            states.iter_mut().for_each(StateVector::renormalize);
        }
        self.target_states = states;
        self
    }
}
