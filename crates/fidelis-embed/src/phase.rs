//! Phase-entangled ("shallow_circuit") embedding, circuits 18 and 19.

use serde::{Deserialize, Serialize};

use fidelis_ir::{Circuit, QubitId};

use crate::chain::chain_param_count;
use crate::error::EmbedResult;
use crate::feature_map::{FeatureMap, RotationAxis, encode_features};

/// Controlled rotation used between wires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseEntangler {
    /// Circuit 18.
    Crz,
    /// Circuit 19.
    Crx,
}

impl PhaseEntangler {
    /// Look up a circuit id.
    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            18 => Some(PhaseEntangler::Crz),
            19 => Some(PhaseEntangler::Crx),
            _ => None,
        }
    }

    /// The circuit id.
    pub fn id(self) -> u32 {
        match self {
            PhaseEntangler::Crz => 18,
            PhaseEntangler::Crx => 19,
        }
    }

    fn apply(self, circuit: &mut Circuit, w: f64, control: QubitId, target: QubitId) -> EmbedResult<()> {
        match self {
            PhaseEntangler::Crz => circuit.crz(w, control, target)?,
            PhaseEntangler::Crx => circuit.crx(w, control, target)?,
        };
        Ok(())
    }
}

/// RX data encoding, RZ local fields and controlled-rotation couplings.
///
/// The weight layout matches the chain embedding; on three or more wires the
/// slot `2nl + 2n - 1` of each layer is reserved and never read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseEntangledEmbedding {
    /// Number of layers.
    pub layers: usize,
    /// Controlled rotation type.
    pub entangler: PhaseEntangler,
}

impl PhaseEntangledEmbedding {
    /// Create a phase-entangled embedding.
    pub fn new(layers: usize, entangler: PhaseEntangler) -> Self {
        Self { layers, entangler }
    }
}

impl FeatureMap for PhaseEntangledEmbedding {
    fn name(&self) -> &'static str {
        "shallow_circuit"
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

        for l in 0..self.layers {
            encode_features(circuit, x, wires, RotationAxis::X)?;

            match n {
                1 => RotationAxis::Z.apply(circuit, weights[l], wires[0])?,
                2 => {
                    for (i, &wire) in wires.iter().enumerate() {
                        RotationAxis::Z.apply(circuit, weights[3 * l + i], wire)?;
                    }
                    self.entangler
                        .apply(circuit, weights[3 * l + 2], wires[1], wires[0])?;
                }
                _ => {
                    let offset = 2 * n * l;
                    for (i, &wire) in wires.iter().enumerate() {
                        RotationAxis::Z.apply(circuit, weights[offset + i], wire)?;
                    }
                    self.entangler
                        .apply(circuit, weights[offset + n], wires[n - 1], wires[0])?;
                    for i in 1..n - 1 {
                        self.entangler
                            .apply(circuit, weights[offset + n + i], wires[i], wires[i + 1])?;
                    }
                }
            }
        }

        encode_features(circuit, x, wires, RotationAxis::X)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_wire_coupling_direction() {
        let map = PhaseEntangledEmbedding::new(1, PhaseEntangler::Crx);
        let mut circuit = Circuit::with_size("phase", 2);
        map.encode(&mut circuit, &[0.4, 0.5], &[0.1, 0.2, 0.3], &QubitId::range(0, 2))
            .unwrap();

        let crx: Vec<_> = circuit
            .instructions()
            .iter()
            .filter(|i| i.name() == "crx")
            .collect();
        assert_eq!(crx.len(), 1);
        assert_eq!(crx[0].qubits, vec![QubitId(1), QubitId(0)]);
    }

    #[test]
    fn test_ring_couplings_on_four_wires() {
        let map = PhaseEntangledEmbedding::new(1, PhaseEntangler::Crz);
        let weights: Vec<f64> = (0..8).map(|k| k as f64).collect();
        let mut circuit = Circuit::with_size("phase", 4);
        map.encode(&mut circuit, &[0.1], &weights, &QubitId::range(0, 4))
            .unwrap();

        let couplings: Vec<_> = circuit
            .instructions()
            .iter()
            .filter_map(|i| match i.gate {
                fidelis_ir::StandardGate::CRz(w) => Some((w, i.qubits[0].0, i.qubits[1].0)),
                _ => None,
            })
            .collect();
        assert_eq!(couplings, vec![(4.0, 3, 0), (5.0, 1, 2), (6.0, 2, 3)]);
    }

    #[test]
    fn test_ids() {
        assert_eq!(PhaseEntangler::from_id(18), Some(PhaseEntangler::Crz));
        assert_eq!(PhaseEntangler::from_id(19).map(PhaseEntangler::id), Some(19));
        assert_eq!(PhaseEntangler::from_id(11), None);
    }
}
