//! Hardware-efficient ("vqc") embedding with all-to-all controlled rotations.

use serde::{Deserialize, Serialize};

use fidelis_ir::{Circuit, QubitId};

use crate::error::{EmbedResult, ValidationError};
use crate::feature_map::{FeatureMap, RotationAxis, validate_common};

/// Controlled rotation used between every ordered pair of wires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HardwareEntangler {
    /// Type 1: controlled RX.
    Crx,
    /// Type 2: controlled RZ.
    Crz,
}

impl HardwareEntangler {
    /// Look up an entangler type.
    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            1 => Some(HardwareEntangler::Crx),
            2 => Some(HardwareEntangler::Crz),
            _ => None,
        }
    }

    /// The entangler type id.
    pub fn id(self) -> u32 {
        match self {
            HardwareEntangler::Crx => 1,
            HardwareEntangler::Crz => 2,
        }
    }
}

/// Trainable RX/RZ blocks around data re-uploading, entangled all-to-all.
///
/// Each layer holds `n(n+3) - 2d` weights, laid out as
///
/// | slots | gates |
/// |-------|-------|
/// | `[0, n-d)` | RX on the non-data wires |
/// | `[n-d, 2n-d)` | RZ on every wire |
/// | `[2n-d, n(n+1)-d)` | controlled rotations, `n(n-1)` ordered pairs |
/// | `[n(n+1)-d, n(n+2)-2d)` | second RX on the non-data wires |
/// | `[n(n+2)-2d, n(n+3)-2d)` | second RZ on every wire |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardwareEfficientEmbedding {
    /// Number of layers.
    pub layers: usize,
    /// Number of data features; the first `data_dim` wires carry data.
    pub data_dim: usize,
    /// Controlled rotation type.
    pub entangler: HardwareEntangler,
}

impl HardwareEfficientEmbedding {
    /// Create a hardware-efficient embedding.
    pub fn new(layers: usize, data_dim: usize, entangler: HardwareEntangler) -> Self {
        Self {
            layers,
            data_dim,
            entangler,
        }
    }

    /// Weights per layer on `num_wires` wires.
    pub fn weights_per_layer(&self, num_wires: usize) -> usize {
        num_wires
            .saturating_mul(num_wires.saturating_add(3))
            .saturating_sub(self.data_dim.saturating_mul(2))
    }

    /// Slot of the controlled rotation with `control` and `target` within a layer.
    fn pair_slot(&self, n: usize, control: usize, target: usize) -> usize {
        let packed = if target < control { target } else { target - 1 };
        2 * n - self.data_dim + control * (n - 1) + packed
    }

    fn entangle(&self, circuit: &mut Circuit, w: f64, control: QubitId, target: QubitId) -> EmbedResult<()> {
        match self.entangler {
            HardwareEntangler::Crx => circuit.crx(w, control, target)?,
            HardwareEntangler::Crz => circuit.crz(w, control, target)?,
        };
        Ok(())
    }
}

impl FeatureMap for HardwareEfficientEmbedding {
    fn name(&self) -> &'static str {
        "vqc"
    }

    fn layers(&self) -> usize {
        self.layers
    }

    fn param_count(&self, num_wires: usize) -> usize {
        self.weights_per_layer(num_wires).saturating_mul(self.layers)
    }

    fn validate(&self, x: &[f64], weights: &[f64], wires: &[QubitId]) -> Result<(), ValidationError> {
        if self.data_dim > wires.len() {
            return Err(ValidationError::TooManyFeatures {
                features: self.data_dim,
                wires: wires.len(),
            });
        }
        if x.len() != self.data_dim {
            return Err(ValidationError::FeatureCount {
                embedding: self.name(),
                expected: self.data_dim,
                got: x.len(),
            });
        }
        validate_common(self.name(), x, weights, wires.len(), self.param_count(wires.len()))
    }

    fn encode(
        &self,
        circuit: &mut Circuit,
        x: &[f64],
        weights: &[f64],
        wires: &[QubitId],
    ) -> EmbedResult<()> {
        self.validate(x, weights, wires)?;
        let n = wires.len();
        let d = self.data_dim;
        let per_layer = self.weights_per_layer(n);

        for l in 0..self.layers {
            let w = &weights[l * per_layer..(l + 1) * per_layer];

            for (&feature, &wire) in x.iter().zip(wires) {
                circuit.rx(feature, wire)?;
            }
            for (i, &wire) in wires[d..].iter().enumerate() {
                circuit.rx(w[i], wire)?;
            }
            for (i, &wire) in wires.iter().enumerate() {
                RotationAxis::Z.apply(circuit, w[n - d + i], wire)?;
            }

            for control in (0..n).rev() {
                for target in (0..n).rev() {
                    if control == target {
                        continue;
                    }
                    let slot = self.pair_slot(n, control, target);
                    self.entangle(circuit, w[slot], wires[control], wires[target])?;
                }
            }

            for (&feature, &wire) in x.iter().zip(wires) {
                circuit.rx(feature, wire)?;
            }
            for (i, &wire) in wires[d..].iter().enumerate() {
                circuit.rx(w[n * (n + 1) - d + i], wire)?;
            }
            for (i, &wire) in wires.iter().enumerate() {
                RotationAxis::Z.apply(circuit, w[n * (n + 2) - 2 * d + i], wire)?;
            }
        }
        Ok(())
    }
}
