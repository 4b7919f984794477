//! Fidelis Circuit Intermediate Representation
//!
//! This crate provides the gate set and the circuit tape that feature maps
//! write into and the statevector simulator reads from.
//!
//! # Overview
//!
//! A [`Circuit`] is an ordered list of [`Instruction`]s over a fixed number
//! of qubits. Every gate carries concrete `f64` angles: embeddings are
//! evaluated for one classical input and one weight vector at a time, so
//! there is nothing left to bind symbolically.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`] addresses a wire of the circuit
//! - **Gates**: [`StandardGate`] for the built-in gate set
//! - **Instructions**: [`Instruction`] combining a gate with its operands
//! - **Circuit**: [`Circuit`] builder API
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use fidelis_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell_state", 2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.len(), 2);
//! ```
//!
//! # Inversion by negation
//!
//! Rotations satisfy `R(θ)⁻¹ = R(−θ)`. The zero-projection overlap estimator
//! relies on this: it re-runs an embedding with negated angles and appends the
//! resulting tape in reverse. [`StandardGate::inverts_by_negation`] reports
//! whether a gate has the property, and [`Circuit::append_negation_inverse`]
//! refuses tapes containing a gate that does not.
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Inverts by negation |
//! |------|--------|---------------------|
//! | `I`, `X`, `Y`, `Z`, `H` | 1 | yes (self-inverse) |
//! | `S`, `Sdg`, `T`, `Tdg` | 1 | no |
//! | `Rx`, `Ry`, `Rz`, `P` | 1 | yes |
//! | `U` | 1 | no |
//! | `CX`, `CZ`, `Swap` | 2 | yes (self-inverse) |
//! | `CRx`, `CRy`, `CRz` | 2 | yes |
//! | `CSwap` | 3 | yes (self-inverse) |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::Instruction;
pub use qubit::QubitId;
