//! Error types for feature-map embeddings.

use fidelis_ir::IrError;
use thiserror::Error;

/// Input or configuration rejected before any circuit is simulated.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ValidationError {
    /// More features than qubits.
    #[error("Feature map can encode at most {wires} features (the number of wires), got {features}")]
    TooManyFeatures {
        /// Length of the input vector.
        features: usize,
        /// Number of wires.
        wires: usize,
    },

    /// Weight vector length disagrees with the feature map's parameter count.
    #[error("Feature map '{embedding}' needs {expected} weights, got {got}")]
    ParameterCount {
        /// Embedding identifier.
        embedding: &'static str,
        /// Required number of weights.
        expected: usize,
        /// Supplied number of weights.
        got: usize,
    },

    /// The embedding requires an exact number of features.
    #[error("Feature map '{embedding}' needs {expected} features, got {got}")]
    FeatureCount {
        /// Embedding identifier.
        embedding: &'static str,
        /// Required number of features.
        expected: usize,
        /// Supplied number of features.
        got: usize,
    },

    /// The embedding requires an exact number of wires.
    #[error("Feature map '{embedding}' acts on exactly {expected} wires, got {got}")]
    WireCount {
        /// Embedding identifier.
        embedding: &'static str,
        /// Required number of wires.
        expected: usize,
        /// Supplied number of wires.
        got: usize,
    },

    /// Embeddings need at least one wire.
    #[error("Feature map '{embedding}' needs at least one wire")]
    NoWires {
        /// Embedding identifier.
        embedding: &'static str,
    },

    /// No embedding with this identifier.
    #[error("Unknown embedding '{0}'")]
    UnknownEmbedding(String),

    /// Circuit id or entangler type not supported by the embedding.
    #[error("Embedding '{embedding}' has no variant {variant}")]
    UnknownVariant {
        /// Embedding identifier.
        embedding: String,
        /// Rejected variant id.
        variant: u32,
    },

    /// The hardware-efficient embedding was requested without a data dimension.
    #[error("Embedding '{0}' needs a data dimension")]
    MissingDataDim(String),

    /// Layer count must be positive.
    #[error("Feature maps need at least one layer")]
    ZeroLayers,

    /// Layer count above the supported maximum.
    #[error("Feature maps support at most {max} layers, got {layers}")]
    TooManyLayers {
        /// Requested layers.
        layers: usize,
        /// Supported maximum.
        max: usize,
    },

    /// Unrecognised overlap estimator name.
    #[error("Unknown estimator '{0}' (expected exact, fast or circuit)")]
    UnknownEstimator(String),

    /// Probability vector length disagrees with its class size.
    #[error("Probabilities for class {class} have length {got}, class has {expected} samples")]
    ProbabilityLength {
        /// Class name ("A" or "B").
        class: &'static str,
        /// Class size.
        expected: usize,
        /// Supplied length.
        got: usize,
    },

    /// Probability vector cannot define a distribution.
    #[error("Invalid probabilities for class {class}: {reason}")]
    InvalidProbabilities {
        /// Class name ("A" or "B").
        class: &'static str,
        /// What was wrong.
        reason: String,
    },

    /// Labels must be +1 or -1.
    #[error("Label {label} at index {index} is not +1 or -1")]
    InvalidLabel {
        /// Position in the dataset.
        index: usize,
        /// Offending value.
        label: f64,
    },

    /// A class has no reference samples.
    #[error("Class {class} has no samples")]
    EmptyClass {
        /// Class name ("A" or "B").
        class: &'static str,
    },

    /// A sample count of zero was requested.
    #[error("Sample count must be at least 1")]
    ZeroSamples,

    /// Inputs and labels have different lengths.
    #[error("Got {inputs} inputs but {labels} labels")]
    LengthMismatch {
        /// Number of inputs.
        inputs: usize,
        /// Number of labels.
        labels: usize,
    },

    /// Accuracy was requested on an empty test set.
    #[error("Test set is empty")]
    EmptyTestSet,

    /// Input length disagrees with the model's data dimension.
    #[error("Expected inputs of dimension {expected}, got {got}")]
    DimensionMismatch {
        /// Data dimension of the model.
        expected: usize,
        /// Supplied dimension.
        got: usize,
    },
}

/// Errors produced while encoding an input.
#[derive(Debug, Error)]
pub enum EmbedError {
    /// Input or weights rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Gate could not be placed on the circuit.
    #[error("Circuit construction failed: {0}")]
    Ir(#[from] IrError),
}

/// Result type for embedding operations.
pub type EmbedResult<T> = Result<T, EmbedError>;
