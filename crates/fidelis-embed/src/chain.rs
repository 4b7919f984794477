//! Ising-chain ("qaoa") embedding.
//!
//! Example, one layer, four wires, two features:
//!
//! ```text
//! |0> - RX(x1) - ZZ --------- ZZ - RY(w4) -
//! |0> - RX(x2) - ZZ - ZZ -------- RY(w5) -
//! |0> - H ------------ ZZ - ZZ ---- RY(w6) -
//! |0> - H ----------------- ZZ - ZZ RY(w7) -
//! ```
//!
//! The encoding block is repeated once more after the last layer.

use serde::{Deserialize, Serialize};

use fidelis_ir::{Circuit, QubitId};

use crate::error::EmbedResult;
use crate::feature_map::{FeatureMap, RotationAxis, encode_features, zz_entangler};

/// Which axes carry the data and the local fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainAxis {
    /// Circuit id 1: RX encoding, RY local fields.
    XEncodeYLocal,
    /// Circuit id 2: RY encoding, RX local fields.
    YEncodeXLocal,
}

impl ChainAxis {
    /// Look up a circuit id.
    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            1 => Some(ChainAxis::XEncodeYLocal),
            2 => Some(ChainAxis::YEncodeXLocal),
            _ => None,
        }
    }

    /// The circuit id.
    pub fn id(self) -> u32 {
        match self {
            ChainAxis::XEncodeYLocal => 1,
            ChainAxis::YEncodeXLocal => 2,
        }
    }

    fn encoding(self) -> RotationAxis {
        match self {
            ChainAxis::XEncodeYLocal => RotationAxis::X,
            ChainAxis::YEncodeXLocal => RotationAxis::Y,
        }
    }

    fn local(self) -> RotationAxis {
        match self {
            ChainAxis::XEncodeYLocal => RotationAxis::Y,
            ChainAxis::YEncodeXLocal => RotationAxis::X,
        }
    }
}

/// Identifier the chain was requested under. Both build the same circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainIdentifier {
    /// `qaoa`
    #[default]
    Qaoa,
    /// `hva_xxz`, fixed to circuit id 1.
    HvaXxz,
}

/// 1-D nearest-neighbour Ising coupling with periodic boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainEmbedding {
    /// Number of layers.
    pub layers: usize,
    /// Encoding and local-field axes.
    pub axis: ChainAxis,
    /// Identifier written back to model records.
    #[serde(default)]
    pub identifier: ChainIdentifier,
}

impl ChainEmbedding {
    /// Create a chain embedding.
    pub fn new(layers: usize, axis: ChainAxis) -> Self {
        Self {
            layers,
            axis,
            identifier: ChainIdentifier::Qaoa,
        }
    }

    /// The `hva_xxz` chain: RX encoding, RY local fields.
    pub fn hva_xxz(layers: usize) -> Self {
        Self {
            layers,
            axis: ChainAxis::XEncodeYLocal,
            identifier: ChainIdentifier::HvaXxz,
        }
    }
}

/// Weights for the chain topology: `L` on one wire, `3L` on two, `2nL` beyond.
pub(crate) fn chain_param_count(num_wires: usize, layers: usize) -> usize {
    match num_wires {
        1 => layers,
        2 => layers.saturating_mul(3),
        n => n.saturating_mul(2).saturating_mul(layers),
    }
}

impl FeatureMap for ChainEmbedding {
    fn name(&self) -> &'static str {
        match self.identifier {
            ChainIdentifier::Qaoa => "qaoa",
            ChainIdentifier::HvaXxz => "hva_xxz",
        }
    }

    fn layers(&self) -> usize {
        self.layers
    }

    fn param_count(&self, num_wires: usize) -> usize {
        chain_param_count(num_wires, self.layers)
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
        let local = self.axis.local();

        for l in 0..self.layers {
            encode_features(circuit, x, wires, self.axis.encoding())?;

            match n {
                1 => local.apply(circuit, weights[l], wires[0])?,
                2 => {
                    zz_entangler(circuit, weights[3 * l + 2], wires[0], wires[1])?;
                    for (i, &wire) in wires.iter().enumerate() {
                        local.apply(circuit, weights[3 * l + i], wire)?;
                    }
                }
                _ => {
                    let offset = 2 * n * l;
                    for i in 0..n {
                        // the last pair closes the ring
                        zz_entangler(circuit, weights[offset + i], wires[i], wires[(i + 1) % n])?;
                    }
                    for (i, &wire) in wires.iter().enumerate() {
                        local.apply(circuit, weights[offset + n + i], wire)?;
                    }
                }
            }
        }

        encode_features(circuit, x, wires, self.axis.encoding())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EmbedError, ValidationError};

    fn wires(n: u32) -> Vec<QubitId> {
        QubitId::range(0, n)
    }

    #[test]
    fn test_param_counts() {
        let map = ChainEmbedding::new(2, ChainAxis::XEncodeYLocal);
        assert_eq!(map.param_count(1), 2);
        assert_eq!(map.param_count(2), 6);
        assert_eq!(map.param_count(4), 16);
    }

    #[test]
    fn test_single_wire_gate_sequence() {
        let map = ChainEmbedding::new(1, ChainAxis::XEncodeYLocal);
        let mut circuit = Circuit::with_size("chain", 1);
        map.encode(&mut circuit, &[0.3], &[0.001], &wires(1)).unwrap();

        let names: Vec<_> = circuit.instructions().iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["rx", "ry", "rx"]);
    }

    #[test]
    fn test_unused_wires_get_hadamards() {
        let map = ChainEmbedding::new(1, ChainAxis::YEncodeXLocal);
        let mut circuit = Circuit::with_size("chain", 4);
        let weights = map.initial_parameters(4);
        map.encode(&mut circuit, &[0.1, 0.2], &weights, &wires(4)).unwrap();

        let counts = circuit.gate_counts();
        // two encoding blocks, two unused wires each
        assert_eq!(counts.get("h"), Some(&4));
        assert_eq!(counts.get("ry"), Some(&4));
        assert_eq!(counts.get("cx"), Some(&8));
        assert_eq!(counts.get("rz"), Some(&4));
        assert_eq!(counts.get("rx"), Some(&4));
    }

    #[test]
    fn test_periodic_boundary() {
        let map = ChainEmbedding::new(1, ChainAxis::XEncodeYLocal);
        let mut circuit = Circuit::with_size("chain", 3);
        map.encode(&mut circuit, &[0.1], &map.initial_parameters(3), &wires(3))
            .unwrap();

        // third entangler couples wire 2 back to wire 0: CX(0 → 2)
        let cx: Vec<_> = circuit
            .instructions()
            .iter()
            .filter(|i| i.name() == "cx")
            .map(|i| (i.qubits[0].0, i.qubits[1].0))
            .collect();
        assert_eq!(cx[4], (0, 2));
    }

    #[test]
    fn test_rejects_wrong_weight_count() {
        let map = ChainEmbedding::new(1, ChainAxis::XEncodeYLocal);
        let mut circuit = Circuit::with_size("chain", 2);
        let err = map
            .encode(&mut circuit, &[0.1], &[0.0; 2], &wires(2))
            .unwrap_err();
        assert!(matches!(
            err,
            EmbedError::Validation(ValidationError::ParameterCount {
                expected: 3,
                got: 2,
                ..
            })
        ));
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_rejects_too_many_features() {
        let map = ChainEmbedding::new(1, ChainAxis::XEncodeYLocal);
        let mut circuit = Circuit::with_size("chain", 1);
        let err = map
            .encode(&mut circuit, &[0.1, 0.2], &[0.0], &wires(1))
            .unwrap_err();
        assert!(matches!(
            err,
            EmbedError::Validation(ValidationError::TooManyFeatures { features: 2, wires: 1 })
        ));
    }
}
