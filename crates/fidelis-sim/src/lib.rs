//! Fidelis Statevector Simulator
//!
//! Exact, deterministic simulation of [`fidelis_ir::Circuit`] tapes. The
//! full 2ⁿ amplitude vector is kept in memory, so cost grows exponentially
//! with the qubit count; this is the governing resource constraint for every
//! overlap estimator built on top.
//!
//! # Memory
//!
//! | Qubits | Memory |
//! |--------|--------|
//! | 10 | ~16 KB |
//! | 15 | ~512 KB |
//! | 20 | ~16 MB |
//! | 26 | ~1 GB |
//!
//! The swap test needs `2n + 1` qubits, so a 12-qubit embedding already
//! costs a 25-qubit register.
//!
//! # Example
//!
//! ```rust
//! use fidelis_ir::{Circuit, QubitId};
//! use fidelis_sim::{Observable, Statevector};
//!
//! let mut circuit = Circuit::with_size("bell", 2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! let state = Statevector::from_circuit(&circuit).unwrap();
//! let p0 = state.expectation(&Observable::ZeroProjector).unwrap();
//! assert!((p0 - 0.5).abs() < 1e-12);
//! ```

pub mod error;
pub mod observable;
pub mod statevector;

pub use error::{SimError, SimResult};
pub use observable::{Observable, zero_projector};
pub use statevector::{MAX_QUBITS, Statevector};
