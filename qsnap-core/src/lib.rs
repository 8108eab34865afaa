//! # ⚛️ qsnap-core — Shot-averaged Snapshot Statistics
//!
//! Acumula estatísticas de vetores de estado capturados ("snapshots") ao
//! longo de vários shots de um circuito quântico: kets esparsos, matrizes
//! densidade, probabilidades na base Z, produtos internos e overlaps com um
//! conjunto fixo de estados alvo.
//!
//! As somas são guardadas sem normalização e divididas pelo total de shots
//! uma única vez, na exportação.
//!
//! ## Computational Complexity
//!
//! Por shot, com K snapshots de dimensão D e T estados alvo:
//! - Ket / probabilidades: O(K × D)
//! - Matriz densidade: O(K × D²)
//! - Produtos internos / overlaps: O(K × T × D)
//!
//! **Merge:** linear no tamanho dos acumuladores do motor incorporado.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │          VectorEngine                           │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  ShotTally (shots + counts)               │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  SnapshotAccumulator (somas por chave)    │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  EngineReport (normaliza + chop)          │  │
//! │  └───────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! ## Exemplo
//!
//! ```
//! use qsnap_core::{CapturedShot, CircuitLayout, EngineConfig, OutputToggles, StateVector, VectorEngine};
//!
//! let outputs = OutputToggles { density: true, probabilities: true, ..Default::default() };
//! let mut engine = VectorEngine::with_config(EngineConfig::new().with_outputs(outputs));
//! let layout = CircuitLayout::new().with_register("q", 1);
//!
//! for v in [[1.0, 0.0], [0.0, 1.0]] {
//!     let shot = CapturedShot::default().with_snapshot(0, StateVector::from_real(&v));
//!     engine.compute_results(&layout, &shot).unwrap();
//! }
//!
//! let report = engine.export();
//! assert_eq!(report.probabilities.unwrap()[&0], vec![0.5, 0.5]);
//! ```

pub mod accumulator;
pub mod backend;
pub mod chop;
pub mod config;
pub mod engine;
pub mod error;
pub mod ket;
pub mod probability;
pub mod report;
pub mod tally;
pub mod vector;

pub use accumulator::{Accumulate, Running, SnapshotAccumulator, SnapshotKey};
pub use backend::{CapturedShot, CircuitLayout, QuditRegister, SnapshotSource};
pub use chop::{Chop, DEFAULT_EPSILON};
pub use config::{EngineConfig, OutputToggles, DEFAULT_QUDIT_DIM, OUTPUT_NAMES};
pub use engine::VectorEngine;
pub use error::{SnapshotError, SnapshotResult};
pub use ket::{basis_label, qudit_count, vec_to_ket, Ket, ProbabilityKet};
pub use probability::Probabilities;
pub use report::EngineReport;
pub use tally::ShotTally;
pub use vector::{CMatrix, StateVector};

pub use num_complex::Complex64;
