//! Fidelis Kernel
//!
//! Quantum-kernel overlap estimation and the fidelity classifier built on it.
//!
//! Three interchangeable [`OverlapEstimator`] strategies approximate
//! `|⟨φ(query)|φ(reference)⟩|²` for a trained [`Embedding`]:
//!
//! | kind | strategy | qubits |
//! |------|----------|--------|
//! | `exact` | [`ExactOverlap`]: inner product of two statevectors | n |
//! | `fast` | [`ZeroProjectionOverlap`]: all-zero probability after forward and adjoint embedding | n |
//! | `circuit` | [`SwapTestOverlap`]: ancilla ⟨Z⟩ of a swap test | 2n + 1 |
//!
//! A [`FidelityClassifier`] labels a query by its mean overlap with each of
//! two reference classes.
//!
//! # Example
//!
//! ```rust
//! use fidelis_embed::FeatureMapSpec;
//! use fidelis_kernel::{ClassifierModel, FidelityClassifier, PredictOptions, Prediction};
//!
//! let feature_map = FeatureMapSpec::new("qaoa", 1).resolve().unwrap();
//! let model = ClassifierModel::new(
//!     feature_map,
//!     vec![0.0],
//!     1,
//!     vec![vec![0.1], vec![0.2], vec![1.4], vec![1.5]],
//!     vec![1.0, 1.0, -1.0, -1.0],
//! )
//! .unwrap();
//!
//! let classifier = FidelityClassifier::new(model);
//! let label = classifier.predict(&[0.0], &PredictOptions::default()).unwrap();
//! assert_eq!(label, Prediction::Label(1));
//! ```

pub mod classifier;
pub mod config;
pub mod embedding;
pub mod error;
pub mod estimator;
pub mod exact;
pub mod sampling;
pub mod store;
pub mod zero_projection;

pub use classifier::{
    ClassOverlaps, ClassifierModel, FidelityClassifier, OutputMode, PredictOptions, Prediction,
    PredictionStage,
};
pub use config::{ConfigError, KernelConfig};
pub use embedding::Embedding;
pub use error::{FidelityError, KernelResult};
pub use estimator::{EstimatorKind, OverlapEstimator};
pub use exact::ExactOverlap;
pub use sampling::{ClassSampler, rng_from_seed};
pub use store::{LabeledDataset, ModelRecord};
pub use swap_test::SwapTestOverlap;
pub use zero_projection::ZeroProjectionOverlap;

pub use fidelis_sim::MAX_QUBITS;
