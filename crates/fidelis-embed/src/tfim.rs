//! Four-wire transverse-field Ising ("hva_tfim") embeddings.

use serde::{Deserialize, Serialize};

use fidelis_ir::{Circuit, QubitId};

use crate::error::{EmbedResult, ValidationError};
use crate::feature_map::{FeatureMap, validate_common, zz_entangler};

/// Wire count of every TFIM embedding.
pub const TFIM_WIRES: usize = 4;

/// Coupled wire pairs, in application order.
const PAIRS: [(usize, usize); 4] = [(0, 1), (2, 3), (0, 3), (1, 2)];

/// How many features the embedding uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TfimData {
    /// Two features, on wires 0 and 2.
    TwoD,
    /// One feature, on wire 0.
    OneD,
}

impl TfimData {
    fn features(self) -> usize {
        match self {
            TfimData::TwoD => 2,
            TfimData::OneD => 1,
        }
    }
}

/// Weight sharing across the couplings and transverse fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TfimCoupling {
    /// Style 1: data drives some couplings, the rest are independent weights.
    Independent,
    /// Style 2: one coupling weight and one field weight per layer.
    Shared,
    /// Style 3: every coupling and field has its own weight.
    Full,
}

impl TfimCoupling {
    /// Look up a coupling style.
    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            1 => Some(TfimCoupling::Independent),
            2 => Some(TfimCoupling::Shared),
            3 => Some(TfimCoupling::Full),
            _ => None,
        }
    }

    /// The coupling style id.
    pub fn id(self) -> u32 {
        match self {
            TfimCoupling::Independent => 1,
            TfimCoupling::Shared => 2,
            TfimCoupling::Full => 3,
        }
    }
}

/// Hamiltonian-variational ansatz of the 2x2 transverse-field Ising model.
///
/// Every layer is a Hadamard block, four ZZ couplings and an RX field block;
/// features enter through the field block and, for style 1, the couplings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TfimEmbedding {
    /// Number of layers.
    pub layers: usize,
    /// One- or two-feature data upload.
    pub data: TfimData,
    /// Weight-sharing style.
    pub coupling: TfimCoupling,
}

impl TfimEmbedding {
    /// Create a TFIM embedding.
    pub fn new(layers: usize, data: TfimData, coupling: TfimCoupling) -> Self {
        Self {
            layers,
            data,
            coupling,
        }
    }

    fn weights_per_layer(&self) -> usize {
        match (self.data, self.coupling) {
            (TfimData::TwoD, TfimCoupling::Independent) => 4,
            (TfimData::TwoD, TfimCoupling::Shared) => 2,
            (TfimData::TwoD, TfimCoupling::Full) => 6,
            (TfimData::OneD, TfimCoupling::Independent) => 6,
            (TfimData::OneD, TfimCoupling::Shared) => 2,
            (TfimData::OneD, TfimCoupling::Full) => 7,
        }
    }

    /// ZZ angles for [`PAIRS`] and RX angles for wires 0..4 of one layer.
    fn layer_angles(&self, x: &[f64], w: &[f64]) -> ([f64; 4], [f64; 4]) {
        match (self.data, self.coupling) {
            (TfimData::TwoD, TfimCoupling::Independent) => {
                ([x[0], x[1], w[0], w[1]], [x[0], w[2], x[1], w[3]])
            }
            (TfimData::TwoD, TfimCoupling::Shared) => ([w[0]; 4], [x[0], w[1], x[1], w[1]]),
            (TfimData::TwoD, TfimCoupling::Full) => {
                ([w[0], w[1], w[2], w[3]], [x[0], w[4], x[1], w[5]])
            }
            (TfimData::OneD, TfimCoupling::Independent) => {
                ([x[0], w[0], w[1], w[2]], [x[0], w[3], w[4], w[5]])
            }
            (TfimData::OneD, TfimCoupling::Shared) => ([w[0]; 4], [x[0], w[1], w[1], w[1]]),
            (TfimData::OneD, TfimCoupling::Full) => {
                ([w[0], w[1], w[2], w[3]], [x[0], w[4], w[5], w[6]])
            }
        }
    }
}

impl FeatureMap for TfimEmbedding {
    fn name(&self) -> &'static str {
        match self.data {
            TfimData::TwoD => "hva_tfim_2d",
            TfimData::OneD => "hva_tfim_1d",
        }
    }

    fn layers(&self) -> usize {
        self.layers
    }

    fn param_count(&self, _num_wires: usize) -> usize {
        self.weights_per_layer().saturating_mul(self.layers)
    }

    fn validate(&self, x: &[f64], weights: &[f64], wires: &[QubitId]) -> Result<(), ValidationError> {
        if wires.len() != TFIM_WIRES {
            return Err(ValidationError::WireCount {
                embedding: self.name(),
                expected: TFIM_WIRES,
                got: wires.len(),
            });
        }
        validate_common(self.name(), x, weights, wires.len(), self.param_count(wires.len()))?;
        if x.len() != self.data.features() {
            return Err(ValidationError::FeatureCount {
                embedding: self.name(),
                expected: self.data.features(),
                got: x.len(),
            });
        }
        Ok(())
    }

    fn encode(
        &self,
        circuit: &mut Circuit,
        x: &[f64],
        weights: &[f64],
        wires: &[QubitId],
    ) -> EmbedResult<()> {
        self.validate(x, weights, wires)?;
        let per_layer = self.weights_per_layer();

        for l in 0..self.layers {
            let w = &weights[l * per_layer..(l + 1) * per_layer];
            let (zz, fields) = self.layer_angles(x, w);

            for &wire in wires {
                circuit.h(wire)?;
            }
            for (&(a, b), &angle) in PAIRS.iter().zip(&zz) {
                zz_entangler(circuit, angle, wires[a], wires[b])?;
            }
            for (&wire, &angle) in wires.iter().zip(&fields) {
                circuit.rx(angle, wire)?;
            }
        }
        Ok(())
    }
}
