//! The feature-map contract and the closed family of embeddings.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use fidelis_ir::{Circuit, QubitId};

use crate::chain::{ChainAxis, ChainEmbedding};
use crate::error::{EmbedResult, ValidationError};
use crate::hardware::{HardwareEfficientEmbedding, HardwareEntangler};
use crate::layered::LayeredRotationEmbedding;
use crate::phase::{PhaseEntangledEmbedding, PhaseEntangler};
use crate::tfim::{TfimCoupling, TfimData, TfimEmbedding};

/// Value of every slot produced by [`FeatureMap::initial_parameters`].
pub const INITIAL_WEIGHT: f64 = 0.001;

/// Largest layer count [`FeatureMapSpec::resolve`] accepts.
pub const MAX_LAYERS: usize = 1024;

/// A parameterized embedding of classical data into a quantum state.
///
/// Implementations append gates to a [`Circuit`] and touch nothing else.
///
/// # Negation invertibility
///
/// The zero-projection overlap estimator relies on the tape recorded with
/// negated inputs and weights, replayed in reverse, being the exact adjoint
/// of the forward tape. That holds when the gate sequence does not depend on
/// the values of `x` and every gate is one whose inverse is itself with
/// negated angles (single-axis rotations, their controlled forms, and the
/// self-inverse fixed gates). Embeddings that cannot guarantee this must
/// return `false` from [`FeatureMap::inverts_by_negation`].
pub trait FeatureMap: Send + Sync + fmt::Debug {
    /// Identifier of the embedding family.
    fn name(&self) -> &'static str;

    /// Number of layers.
    fn layers(&self) -> usize;

    /// Number of trainable weights needed on `num_wires` wires.
    ///
    /// Saturates at `usize::MAX`, which no weight vector can match.
    fn param_count(&self, num_wires: usize) -> usize;

    /// Low-magnitude warm-start weights.
    fn initial_parameters(&self, num_wires: usize) -> Vec<f64> {
        vec![INITIAL_WEIGHT; self.param_count(num_wires)]
    }

    /// Check input and weights against the wires they will be encoded on.
    fn validate(&self, x: &[f64], weights: &[f64], wires: &[QubitId]) -> Result<(), ValidationError> {
        validate_common(self.name(), x, weights, wires.len(), self.param_count(wires.len()))
    }

    /// Append the embedding of `x` onto `wires` of `circuit`.
    ///
    /// Implementations call [`FeatureMap::validate`] before placing any gate.
    fn encode(
        &self,
        circuit: &mut Circuit,
        x: &[f64],
        weights: &[f64],
        wires: &[QubitId],
    ) -> EmbedResult<()>;

    /// Whether the negated, reversed tape is the adjoint of the forward tape.
    fn inverts_by_negation(&self) -> bool {
        true
    }
}

/// The checks every embedding shares: features fit on the wires and the
/// weight count matches.
pub fn validate_common(
    embedding: &'static str,
    x: &[f64],
    weights: &[f64],
    num_wires: usize,
    expected_weights: usize,
) -> Result<(), ValidationError> {
    if num_wires == 0 {
        return Err(ValidationError::NoWires { embedding });
    }
    if x.len() > num_wires {
        return Err(ValidationError::TooManyFeatures {
            features: x.len(),
            wires: num_wires,
        });
    }
    if weights.len() != expected_weights {
        return Err(ValidationError::ParameterCount {
            embedding,
            expected: expected_weights,
            got: weights.len(),
        });
    }
    Ok(())
}

/// Rotation axis for single-qubit encodings and local fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RotationAxis {
    X,
    Y,
    Z,
}

impl RotationAxis {
    pub(crate) fn apply(self, circuit: &mut Circuit, theta: f64, qubit: QubitId) -> EmbedResult<()> {
        match self {
            RotationAxis::X => circuit.rx(theta, qubit)?,
            RotationAxis::Y => circuit.ry(theta, qubit)?,
            RotationAxis::Z => circuit.rz(theta, qubit)?,
        };
        Ok(())
    }
}

/// Encoding block: feature `i` as a rotation on wire `i`, Hadamard on the
/// remaining wires.
pub(crate) fn encode_features(
    circuit: &mut Circuit,
    x: &[f64],
    wires: &[QubitId],
    axis: RotationAxis,
) -> EmbedResult<()> {
    for (i, &wire) in wires.iter().enumerate() {
        match x.get(i) {
            Some(&feature) => axis.apply(circuit, feature, wire)?,
            None => {
                circuit.h(wire)?;
            }
        }
    }
    Ok(())
}

/// Ising coupling `exp(-i w Z_a Z_b)` as CX(b→a), RZ(2w) on a, CX(b→a).
pub(crate) fn zz_entangler(circuit: &mut Circuit, w: f64, a: QubitId, b: QubitId) -> EmbedResult<()> {
    circuit.cx(b, a)?.rz(2.0 * w, a)?.cx(b, a)?;
    Ok(())
}

/// Closed set of embedding families.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeatureMapKind {
    /// Nearest-neighbour Ising chain with periodic boundary.
    Chain(ChainEmbedding),
    /// Local Z fields with controlled-rotation entanglers.
    PhaseEntangled(PhaseEntangledEmbedding),
    /// Hardware-efficient ansatz with all-to-all controlled rotations.
    HardwareEfficient(HardwareEfficientEmbedding),
    /// Four-wire transverse-field Ising ansatz.
    Tfim(TfimEmbedding),
    /// Scalar re-uploading with trainable RY layers.
    LayeredRotation(LayeredRotationEmbedding),
}

impl FeatureMapKind {
    /// Borrow the variant as a trait object.
    pub fn as_feature_map(&self) -> &dyn FeatureMap {
        match self {
            FeatureMapKind::Chain(m) => m,
            FeatureMapKind::PhaseEntangled(m) => m,
            FeatureMapKind::HardwareEfficient(m) => m,
            FeatureMapKind::Tfim(m) => m,
            FeatureMapKind::LayeredRotation(m) => m,
        }
    }

    /// The persisted identifier of this embedding.
    pub fn spec(&self) -> FeatureMapSpec {
        let spec = FeatureMapSpec::new(self.name(), self.layers());
        match self {
            FeatureMapKind::Chain(m) => spec.with_variant(m.axis.id()),
            FeatureMapKind::PhaseEntangled(m) => spec.with_variant(m.entangler.id()),
            FeatureMapKind::HardwareEfficient(m) => spec
                .with_variant(m.entangler.id())
                .with_data_dim(m.data_dim),
            FeatureMapKind::Tfim(m) => spec.with_variant(m.coupling.id()),
            FeatureMapKind::LayeredRotation(_) => spec,
        }
    }
}

impl FeatureMap for FeatureMapKind {
    fn name(&self) -> &'static str {
        self.as_feature_map().name()
    }

    fn layers(&self) -> usize {
        self.as_feature_map().layers()
    }

    fn param_count(&self, num_wires: usize) -> usize {
        self.as_feature_map().param_count(num_wires)
    }

    fn initial_parameters(&self, num_wires: usize) -> Vec<f64> {
        self.as_feature_map().initial_parameters(num_wires)
    }

    fn validate(&self, x: &[f64], weights: &[f64], wires: &[QubitId]) -> Result<(), ValidationError> {
        self.as_feature_map().validate(x, weights, wires)
    }

    fn encode(
        &self,
        circuit: &mut Circuit,
        x: &[f64],
        weights: &[f64],
        wires: &[QubitId],
    ) -> EmbedResult<()> {
        self.as_feature_map().encode(circuit, x, weights, wires)
    }

    fn inverts_by_negation(&self) -> bool {
        self.as_feature_map().inverts_by_negation()
    }
}

fn default_layers() -> usize {
    1
}

/// Persisted form of an embedding choice.
///
/// `variant` is the circuit id (chain: 1/2, phase: 18/19, hardware-efficient:
/// 1/2, TFIM coupling style: 1/2/3); each family has a default when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureMapSpec {
    /// Embedding identifier, e.g. `"qaoa"`.
    pub identifier: String,
    /// Number of layers.
    #[serde(default = "default_layers")]
    pub layers: usize,
    /// Circuit id within the family.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<u32>,
    /// Number of data features (hardware-efficient family only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dim: Option<usize>,
}

impl FeatureMapSpec {
    /// Identifier and layer count with family defaults for the rest.
    pub fn new(identifier: impl Into<String>, layers: usize) -> Self {
        Self {
            identifier: identifier.into(),
            layers,
            variant: None,
            data_dim: None,
        }
    }

    /// Set the circuit id.
    #[must_use]
    pub fn with_variant(mut self, variant: u32) -> Self {
        self.variant = Some(variant);
        self
    }

    /// Set the data dimension.
    #[must_use]
    pub fn with_data_dim(mut self, data_dim: usize) -> Self {
        self.data_dim = Some(data_dim);
        self
    }

    /// Map the identifier to a concrete embedding.
    pub fn resolve(&self) -> Result<FeatureMapKind, ValidationError> {
        if self.layers == 0 {
            return Err(ValidationError::ZeroLayers);
        }
        if self.layers > MAX_LAYERS {
            return Err(ValidationError::TooManyLayers {
                layers: self.layers,
                max: MAX_LAYERS,
            });
        }
        let layers = self.layers;
        let unknown_variant = |variant| ValidationError::UnknownVariant {
            embedding: self.identifier.clone(),
            variant,
        };

        let kind = match self.identifier.as_str() {
            "qaoa" => {
                let id = self.variant.unwrap_or(1);
                let axis = ChainAxis::from_id(id).ok_or_else(|| unknown_variant(id))?;
                FeatureMapKind::Chain(ChainEmbedding::new(layers, axis))
            }
            "hva_xxz" => match self.variant {
                None | Some(1) => FeatureMapKind::Chain(ChainEmbedding::hva_xxz(layers)),
                Some(id) => return Err(unknown_variant(id)),
            },
            "shallow_circuit" => {
                let id = self.variant.unwrap_or(18);
                let entangler = PhaseEntangler::from_id(id).ok_or_else(|| unknown_variant(id))?;
                FeatureMapKind::PhaseEntangled(PhaseEntangledEmbedding::new(layers, entangler))
            }
            "vqc" => {
                let id = self.variant.unwrap_or(1);
                let entangler =
                    HardwareEntangler::from_id(id).ok_or_else(|| unknown_variant(id))?;
                let data_dim = self
                    .data_dim
                    .ok_or_else(|| ValidationError::MissingDataDim(self.identifier.clone()))?;
                FeatureMapKind::HardwareEfficient(HardwareEfficientEmbedding::new(
                    layers, data_dim, entangler,
                ))
            }
            "hva_tfim_2d" | "hva_tfim_1d" => {
                let id = self.variant.unwrap_or(1);
                let coupling = TfimCoupling::from_id(id).ok_or_else(|| unknown_variant(id))?;
                let data = if self.identifier == "hva_tfim_2d" {
                    TfimData::TwoD
                } else {
                    TfimData::OneD
                };
                FeatureMapKind::Tfim(TfimEmbedding::new(layers, data, coupling))
            }
            "layered_rotation" => {
                FeatureMapKind::LayeredRotation(LayeredRotationEmbedding::new(layers))
            }
            other => return Err(ValidationError::UnknownEmbedding(other.to_string())),
        };

        debug!(
            identifier = %self.identifier,
            layers,
            variant = ?self.variant,
            "resolved feature map"
        );
        Ok(kind)
    }
}

impl fmt::Display for FeatureMapSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(layers={}", self.identifier, self.layers)?;
        if let Some(v) = self.variant {
            write!(f, ", variant={v}")?;
        }
        if let Some(d) = self.data_dim {
            write!(f, ", data_dim={d}")?;
        }
        write!(f, ")")
    }
}
