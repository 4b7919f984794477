//! Fidelis Feature Maps
//!
//! Variational embeddings that map a classical input vector and a vector of
//! trained weights onto a gate sequence. Each family fixes its own weight
//! layout and parameter-count rule; all of them share one validation contract
//! (no more features than wires, exact weight count) checked before a single
//! gate is placed.
//!
//! | identifier | type | parameter count |
//! |------------|------|-----------------|
//! | `qaoa`, `hva_xxz` | [`ChainEmbedding`] | `L`, `3L`, `2nL` for n = 1, 2, ≥3 |
//! | `shallow_circuit` | [`PhaseEntangledEmbedding`] | as `qaoa` |
//! | `vqc` | [`HardwareEfficientEmbedding`] | `(n(n+3) - 2d) L` |
//! | `hva_tfim_2d` | [`TfimEmbedding`] | `4L`, `2L`, `6L` by coupling style |
//! | `hva_tfim_1d` | [`TfimEmbedding`] | `6L`, `2L`, `7L` by coupling style |
//! | `layered_rotation` | [`LayeredRotationEmbedding`] | `nL` |
//!
//! # Example
//!
//! ```rust
//! use fidelis_embed::{FeatureMap, FeatureMapSpec};
//! use fidelis_ir::{Circuit, QubitId};
//!
//! let map = FeatureMapSpec::new("qaoa", 2).resolve().unwrap();
//! let weights = map.initial_parameters(2);
//! assert_eq!(weights.len(), 6);
//!
//! let mut circuit = Circuit::with_size("embed", 2);
//! map.encode(&mut circuit, &[0.1, -0.4], &weights, &QubitId::range(0, 2))
//!     .unwrap();
//! assert!(!circuit.is_empty());
//! ```

pub mod chain;
pub mod error;
pub mod feature_map;
pub mod hardware;
pub mod layered;
pub mod phase;
pub mod tfim;

pub use chain::{ChainAxis, ChainEmbedding, ChainIdentifier};
pub use error::{EmbedError, EmbedResult, ValidationError};
pub use feature_map::{
    FeatureMap, FeatureMapKind, FeatureMapSpec, INITIAL_WEIGHT, MAX_LAYERS, validate_common,
};
pub use hardware::{HardwareEfficientEmbedding, HardwareEntangler};
pub use layered::LayeredRotationEmbedding;
pub use phase::{PhaseEntangledEmbedding, PhaseEntangler};
pub use tfim::{TFIM_WIRES, TfimCoupling, TfimData, TfimEmbedding};
