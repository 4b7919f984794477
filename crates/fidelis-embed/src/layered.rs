//! Scalar re-uploading embedding with trainable RY layers.

use serde::{Deserialize, Serialize};

use fidelis_ir::{Circuit, QubitId};

use crate::error::{EmbedResult, ValidationError};
use crate::feature_map::FeatureMap;

/// `x[0]` as RX on every wire, then RY(w[l·n + i]) on wire `i`, per layer;
/// a final RX(x[0]) block closes the circuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayeredRotationEmbedding {
    /// Number of layers.
    pub layers: usize,
}

impl LayeredRotationEmbedding {
    /// Create a layered rotation embedding.
    pub fn new(layers: usize) -> Self {
        Self { layers }
    }
}

impl FeatureMap for LayeredRotationEmbedding {
    fn name(&self) -> &'static str {
        "layered_rotation"
    }

    fn layers(&self) -> usize {
        self.layers
    }

    fn param_count(&self, num_wires: usize) -> usize {
        num_wires.saturating_mul(self.layers)
    }

    fn encode(
        &self,
        circuit: &mut Circuit,
        x: &[f64],
        weights: &[f64],
        wires: &[QubitId],
    ) -> EmbedResult<()> {
        self.validate(x, weights, wires)?;
        let Some(&feature) = x.first() else {
            return Err(ValidationError::FeatureCount {
                embedding: self.name(),
                expected: 1,
                got: 0,
            }
            .into());
        };
        let n = wires.len();

        for l in 0..self.layers {
            for (i, &wire) in wires.iter().enumerate() {
                circuit.rx(feature, wire)?.ry(weights[l * n + i], wire)?;
            }
        }
        for &wire in wires {
            circuit.rx(feature, wire)?;
        }
        Ok(())
    }
}
