//! Error types for overlap estimation and classification.

use std::path::PathBuf;

use fidelis_embed::{EmbedError, ValidationError};
use fidelis_ir::IrError;
use fidelis_sim::SimError;
use thiserror::Error;

use crate::classifier::PredictionStage;

/// Errors surfaced by estimators, the classifier and the model store.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FidelityError {
    /// Input, weights or options rejected before simulation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The zero-projection estimator was asked to run on an embedding whose
    /// negated tape is not its adjoint.
    #[error("Zero-projection overlap is not exact for '{embedding}': {reason}")]
    PreconditionViolation {
        /// Embedding identifier.
        embedding: &'static str,
        /// Which check failed.
        reason: String,
    },

    /// Circuit construction failed.
    #[error("Circuit construction failed: {0}")]
    Ir(#[from] IrError),

    /// Simulation failed.
    #[error("Simulation failed: {0}")]
    Sim(#[from] SimError),

    /// A prediction ran past its deadline.
    #[error("Prediction exceeded its {timeout_ms} ms deadline after {stage}")]
    DeadlineExceeded {
        /// Last stage completed.
        stage: PredictionStage,
        /// The configured timeout.
        timeout_ms: u128,
    },

    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A file did not hold the expected JSON document.
    #[error("Malformed JSON in {}: {source}", path.display())]
    Parse {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
}

impl From<EmbedError> for FidelityError {
    fn from(err: EmbedError) -> Self {
        match err {
            EmbedError::Validation(e) => FidelityError::Validation(e),
            EmbedError::Ir(e) => FidelityError::Ir(e),
        }
    }
}

/// Result type for kernel operations.
pub type KernelResult<T> = Result<T, FidelityError>;
