//! Tipos de erro para qsnap-core

use thiserror::Error;

/// Resultado customizado para operações de snapshot
pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Erros que podem ocorrer ao acumular ou configurar snapshots
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("target state vector size \"{target}\" should be \"{snapshot}\"")]
    DimensionMismatch { target: usize, snapshot: usize },

    #[error("Invalid settings: {0}")]
    Config(String),

    #[error("Settings JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
