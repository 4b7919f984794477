//! Circuit instructions combining gates with operands.

use serde::{Deserialize, Serialize};

use crate::gate::StandardGate;
use crate::qubit::QubitId;

/// A gate applied to concrete qubits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The gate.
    pub gate: StandardGate,
    /// Qubits this instruction operates on, controls first.
    pub qubits: Vec<QubitId>,
}

impl Instruction {
    /// Create a gate instruction.
    pub fn gate(gate: StandardGate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            gate,
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Create a two-qubit gate instruction.
    pub fn two_qubit_gate(gate: StandardGate, q1: QubitId, q2: QubitId) -> Self {
        Self::gate(gate, [q1, q2])
    }

    /// Create a three-qubit gate instruction.
    pub fn three_qubit_gate(gate: StandardGate, q1: QubitId, q2: QubitId, q3: QubitId) -> Self {
        Self::gate(gate, [q1, q2, q3])
    }

    /// Get the gate name.
    pub fn name(&self) -> &'static str {
        self.gate.name()
    }

    /// The same operands with the gate's angles negated.
    #[must_use]
    pub fn negated(&self) -> Self {
        Self {
            gate: self.gate.negated(),
            qubits: self.qubits.clone(),
        }
    }
}
