//! Observables whose expectation values the simulator reports.

use fidelis_ir::QubitId;
use ndarray::Array2;
use num_complex::Complex64;

/// A Hermitian observable over the whole register.
#[derive(Debug, Clone, PartialEq)]
pub enum Observable {
    /// Dense Hermitian matrix of shape 2ⁿ × 2ⁿ, row index = basis state.
    Hermitian(Array2<Complex64>),
    /// Rank-1 projector |0…0⟩⟨0…0|, evaluated without building the matrix.
    ZeroProjector,
    /// Pauli-Z on a single qubit.
    PauliZ(QubitId),
}

/// Dense projector onto the all-zero basis state of `num_qubits` qubits.
///
/// Allocates 4ⁿ entries; prefer [`Observable::ZeroProjector`] beyond a
/// handful of qubits.
pub fn zero_projector(num_qubits: u32) -> Array2<Complex64> {
    let dim = 1usize << num_qubits;
    let mut proj = Array2::zeros((dim, dim));
    proj[[0, 0]] = Complex64::new(1.0, 0.0);
    proj
}
