//! A feature map bound to its trained weights.

use fidelis_embed::{FeatureMap, ValidationError};
use fidelis_ir::{Circuit, QubitId};
use fidelis_sim::{MAX_QUBITS, SimError, Statevector};

use crate::error::KernelResult;

/// Feature map, weights and wire count shared by every overlap evaluation.
///
/// Read-only; estimators borrow it from many threads at once.
#[derive(Debug, Clone, Copy)]
pub struct Embedding<'a> {
    feature_map: &'a dyn FeatureMap,
    weights: &'a [f64],
    num_wires: usize,
}

impl<'a> Embedding<'a> {
    /// Bind `weights` to `feature_map` on `num_wires` wires.
    pub fn new(
        feature_map: &'a dyn FeatureMap,
        weights: &'a [f64],
        num_wires: usize,
    ) -> KernelResult<Self> {
        if num_wires > MAX_QUBITS as usize {
            return Err(SimError::TooManyQubits {
                requested: u32::try_from(num_wires).unwrap_or(u32::MAX),
                max: MAX_QUBITS,
            }
            .into());
        }
        let expected = feature_map.param_count(num_wires);
        if weights.len() != expected {
            return Err(ValidationError::ParameterCount {
                embedding: feature_map.name(),
                expected,
                got: weights.len(),
            }
            .into());
        }
        Ok(Self {
            feature_map,
            weights,
            num_wires,
        })
    }

    /// The feature map.
    pub fn feature_map(&self) -> &'a dyn FeatureMap {
        self.feature_map
    }

    /// The trained weights.
    pub fn weights(&self) -> &'a [f64] {
        self.weights
    }

    /// Number of wires one embedded input occupies.
    pub fn num_wires(&self) -> usize {
        self.num_wires
    }

    /// Wire count as a register width.
    pub(crate) fn width(&self) -> u32 {
        // bounded by MAX_QUBITS in `new`
        self.num_wires as u32
    }

    /// Append the embedding of `x` onto `wires` of `circuit`.
    pub fn encode_on(&self, circuit: &mut Circuit, x: &[f64], wires: &[QubitId]) -> KernelResult<()> {
        self.feature_map.encode(circuit, x, self.weights, wires)?;
        Ok(())
    }

    /// The embedding circuit of `x` on wires `0..n`.
    pub fn circuit(&self, x: &[f64]) -> KernelResult<Circuit> {
        let mut circuit = Circuit::with_size(self.feature_map.name(), self.width());
        self.encode_on(&mut circuit, x, &QubitId::range(0, self.width()))?;
        Ok(circuit)
    }

    /// The embedded state |φ(x)⟩.
    pub fn state(&self, x: &[f64]) -> KernelResult<Statevector> {
        Ok(Statevector::from_circuit(&self.circuit(x)?)?)
    }
}
