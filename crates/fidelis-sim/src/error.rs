//! Error types for the simulator crate.

use thiserror::Error;

/// Errors produced by statevector simulation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// Requested register does not fit the simulator.
    #[error("Cannot simulate {requested} qubits (maximum is {max})")]
    TooManyQubits {
        /// Qubits requested.
        requested: u32,
        /// Largest supported register.
        max: u32,
    },

    /// Circuit width does not match the register.
    #[error("Circuit has {got} qubits but the statevector has {expected}")]
    WidthMismatch {
        /// Width of the statevector.
        expected: u32,
        /// Width of the circuit or other state.
        got: u32,
    },

    /// Observable matrix has the wrong shape.
    #[error("Observable must be {expected}x{expected}, got {rows}x{cols}")]
    ObservableDimension {
        /// Required dimension 2^n.
        expected: usize,
        /// Rows supplied.
        rows: usize,
        /// Columns supplied.
        cols: usize,
    },

    /// A gate or observable references a qubit outside the register.
    #[error("Qubit {qubit} is outside the {num_qubits}-qubit register")]
    QubitOutOfRange {
        /// The offending qubit index.
        qubit: u32,
        /// Register width.
        num_qubits: u32,
    },

    /// Instruction carries the wrong number of operands for its gate.
    #[error("Gate '{gate_name}' acts on {expected} qubits, got {got}")]
    OperandCount {
        /// Gate name.
        gate_name: &'static str,
        /// Operands the gate needs.
        expected: u32,
        /// Operands supplied.
        got: usize,
    },

    /// Instruction names the same qubit twice.
    #[error("Gate '{gate_name}' uses qubit {qubit} more than once")]
    DuplicateQubit {
        /// Gate name.
        gate_name: &'static str,
        /// The repeated qubit index.
        qubit: u32,
    },
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;
