//! Statevector simulation engine.

use ndarray::{Array1, ArrayView1};
use num_complex::Complex64;
use std::f64::consts::PI;
use tracing::debug;

use fidelis_ir::{Circuit, Instruction, StandardGate};

use crate::error::{SimError, SimResult};
use crate::observable::Observable;

/// Largest register the simulator will allocate (2^26 amplitudes ≈ 1 GB).
pub const MAX_QUBITS: u32 = 26;

/// A statevector representing a quantum state.
///
/// Qubit `i` is bit `i` of the basis-state index.
#[derive(Debug, Clone, PartialEq)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: u32,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: u32) -> SimResult<Self> {
        if num_qubits > MAX_QUBITS {
            return Err(SimError::TooManyQubits {
                requested: num_qubits,
                max: MAX_QUBITS,
            });
        }
        let size = 1usize << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Ok(Self {
            amplitudes,
            num_qubits,
        })
    }

    /// Simulate a circuit from |0...0⟩.
    pub fn from_circuit(circuit: &Circuit) -> SimResult<Self> {
        let mut state = Self::new(circuit.num_qubits())?;
        state.run(circuit)?;
        Ok(state)
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// The amplitude vector.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Borrow the amplitudes as an ndarray view.
    pub fn view(&self) -> ArrayView1<'_, Complex64> {
        ArrayView1::from(&self.amplitudes[..])
    }

    /// Basis-state probabilities |a_i|².
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Squared norm; 1 up to rounding after unitary evolution.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Apply every instruction of a circuit in order.
    pub fn run(&mut self, circuit: &Circuit) -> SimResult<()> {
        if circuit.num_qubits() != self.num_qubits {
            return Err(SimError::WidthMismatch {
                expected: self.num_qubits,
                got: circuit.num_qubits(),
            });
        }
        debug!(
            num_qubits = self.num_qubits,
            instructions = circuit.len(),
            "running circuit"
        );
        for instruction in circuit.instructions() {
            self.apply(instruction)?;
        }
        Ok(())
    }

    /// Apply an instruction to the statevector.
    ///
    /// Nothing is applied unless the operands match the gate and fit the register.
    pub fn apply(&mut self, instruction: &Instruction) -> SimResult<()> {
        self.check_operands(instruction)?;
        let qubits: Vec<usize> = instruction.qubits.iter().map(|q| q.index()).collect();
        self.apply_standard_gate(&instruction.gate, &qubits);
        Ok(())
    }

    fn check_operands(&self, instruction: &Instruction) -> SimResult<()> {
        let expected = instruction.gate.num_qubits();
        if instruction.qubits.len() != expected as usize {
            return Err(SimError::OperandCount {
                gate_name: instruction.name(),
                expected,
                got: instruction.qubits.len(),
            });
        }
        for (i, qubit) in instruction.qubits.iter().enumerate() {
            if qubit.0 >= self.num_qubits {
                return Err(SimError::QubitOutOfRange {
                    qubit: qubit.0,
                    num_qubits: self.num_qubits,
                });
            }
            if instruction.qubits[..i].contains(qubit) {
                return Err(SimError::DuplicateQubit {
                    gate_name: instruction.name(),
                    qubit: qubit.0,
                });
            }
        }
        Ok(())
    }

    /// ⟨self|other⟩, conjugate-linear in `self`.
    pub fn inner(&self, other: &Statevector) -> SimResult<Complex64> {
        if other.num_qubits != self.num_qubits {
            return Err(SimError::WidthMismatch {
                expected: self.num_qubits,
                got: other.num_qubits,
            });
        }
        Ok(self
            .amplitudes
            .iter()
            .zip(&other.amplitudes)
            .map(|(a, b)| a.conj() * b)
            .sum())
    }

    /// Squared overlap |⟨self|other⟩|².
    pub fn fidelity(&self, other: &Statevector) -> SimResult<f64> {
        Ok(self.inner(other)?.norm_sqr())
    }

    /// Expectation value ⟨ψ|O|ψ⟩ of a Hermitian observable.
    pub fn expectation(&self, observable: &Observable) -> SimResult<f64> {
        match observable {
            Observable::ZeroProjector => Ok(self.amplitudes[0].norm_sqr()),
            Observable::PauliZ(qubit) => {
                if qubit.0 >= self.num_qubits {
                    return Err(SimError::QubitOutOfRange {
                        qubit: qubit.0,
                        num_qubits: self.num_qubits,
                    });
                }
                let mask = 1 << qubit.index();
                Ok(self
                    .amplitudes
                    .iter()
                    .enumerate()
                    .map(|(i, a)| {
                        if i & mask == 0 {
                            a.norm_sqr()
                        } else {
                            -a.norm_sqr()
                        }
                    })
                    .sum())
            }
            Observable::Hermitian(matrix) => {
                let dim = self.amplitudes.len();
                let (rows, cols) = matrix.dim();
                if rows != dim || cols != dim {
                    return Err(SimError::ObservableDimension {
                        expected: dim,
                        rows,
                        cols,
                    });
                }
                let psi = Array1::from(self.amplitudes.clone());
                let o_psi = matrix.dot(&psi);
                let value: Complex64 = psi.iter().zip(o_psi.iter()).map(|(a, b)| a.conj() * b).sum();
                // Imaginary part is rounding noise for Hermitian input.
                Ok(value.re)
            }
        }
    }

    /// Apply a standard gate.
    fn apply_standard_gate(&mut self, gate: &StandardGate, qubits: &[usize]) {
        match *gate {
            // Single-qubit gates
            StandardGate::I => {}
            StandardGate::X => self.apply_x(qubits[0]),
            StandardGate::Y => self.apply_y(qubits[0]),
            StandardGate::Z => self.apply_z(qubits[0]),
            StandardGate::H => self.apply_h(qubits[0]),
            StandardGate::S => self.apply_phase(qubits[0], PI / 2.0),
            StandardGate::Sdg => self.apply_phase(qubits[0], -PI / 2.0),
            StandardGate::T => self.apply_phase(qubits[0], PI / 4.0),
            StandardGate::Tdg => self.apply_phase(qubits[0], -PI / 4.0),
            StandardGate::Rx(t) => self.apply_1q(qubits[0], 0, rx_matrix(t)),
            StandardGate::Ry(t) => self.apply_1q(qubits[0], 0, ry_matrix(t)),
            StandardGate::Rz(t) => self.apply_rz(qubits[0], 0, t),
            StandardGate::P(t) => self.apply_phase(qubits[0], t),
            StandardGate::U(t, p, l) => self.apply_1q(qubits[0], 0, u_matrix(t, p, l)),

            // Two-qubit gates
            StandardGate::CX => self.apply_cx(qubits[0], qubits[1]),
            StandardGate::CZ => self.apply_cz(qubits[0], qubits[1]),
            StandardGate::Swap => self.apply_swap(qubits[0], qubits[1]),
            StandardGate::CRx(t) => self.apply_1q(qubits[1], 1 << qubits[0], rx_matrix(t)),
            StandardGate::CRy(t) => self.apply_1q(qubits[1], 1 << qubits[0], ry_matrix(t)),
            StandardGate::CRz(t) => self.apply_rz(qubits[1], 1 << qubits[0], t),

            // Three-qubit gates
            StandardGate::CSwap => self.apply_cswap(qubits[0], qubits[1], qubits[2]),
        }
    }

    // =========================================================================
    // Single-qubit gate implementations
    // =========================================================================

    fn apply_x(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_y(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let i_val = Complex64::new(0.0, 1.0);
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let tmp = self.amplitudes[i];
                self.amplitudes[i] = -i_val * self.amplitudes[j];
                self.amplitudes[j] = i_val * tmp;
            }
        }
    }

    fn apply_z(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask != 0 {
                self.amplitudes[i] = -self.amplitudes[i];
            }
        }
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    fn apply_phase(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase = Complex64::from_polar(1.0, theta);
        for i in 0..self.amplitudes.len() {
            if i & mask != 0 {
                self.amplitudes[i] *= phase;
            }
        }
    }

    /// RZ on `qubit`, restricted to basis states where all `ctrl_mask` bits are set.
    fn apply_rz(&mut self, qubit: usize, ctrl_mask: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase_0 = Complex64::from_polar(1.0, -theta / 2.0);
        let phase_1 = Complex64::from_polar(1.0, theta / 2.0);
        for i in 0..self.amplitudes.len() {
            if i & ctrl_mask != ctrl_mask {
                continue;
            }
            if i & mask == 0 {
                self.amplitudes[i] *= phase_0;
            } else {
                self.amplitudes[i] *= phase_1;
            }
        }
    }

    /// Dense 2x2 unitary on `qubit`, restricted to basis states where all
    /// `ctrl_mask` bits are set. A zero mask applies it unconditionally.
    fn apply_1q(&mut self, qubit: usize, ctrl_mask: usize, m: [[Complex64; 2]; 2]) {
        let mask = 1 << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 && i & ctrl_mask == ctrl_mask {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = m[0][0] * a + m[0][1] * b;
                self.amplitudes[j] = m[1][0] * a + m[1][1] * b;
            }
        }
    }

    // =========================================================================
    // Two-qubit gate implementations
    // =========================================================================

    fn apply_cx(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                let j = i | tgt_mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_cz(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if (i & ctrl_mask != 0) && (i & tgt_mask != 0) {
                self.amplitudes[i] = -self.amplitudes[i];
            }
        }
    }

    fn apply_swap(&mut self, q1: usize, q2: usize) {
        let mask1 = 1 << q1;
        let mask2 = 1 << q2;
        for i in 0..self.amplitudes.len() {
            let b1 = (i & mask1) != 0;
            let b2 = (i & mask2) != 0;
            if b1 && !b2 {
                let j = (i & !mask1) | mask2;
                self.amplitudes.swap(i, j);
            }
        }
    }

    // =========================================================================
    // Three-qubit gate implementations
    // =========================================================================

    fn apply_cswap(&mut self, control: usize, t1: usize, t2: usize) {
        let ctrl_mask = 1 << control;
        let t1_mask = 1 << t1;
        let t2_mask = 1 << t2;
        for i in 0..self.amplitudes.len() {
            if i & ctrl_mask != 0 {
                let b1 = (i & t1_mask) != 0;
                let b2 = (i & t2_mask) != 0;
                if b1 && !b2 {
                    let j = (i & !t1_mask) | t2_mask;
                    self.amplitudes.swap(i, j);
                }
            }
        }
    }
}

fn rx_matrix(theta: f64) -> [[Complex64; 2]; 2] {
    let c = Complex64::new((theta / 2.0).cos(), 0.0);
    let neg_i_s = Complex64::new(0.0, -(theta / 2.0).sin());
    [[c, neg_i_s], [neg_i_s, c]]
}

fn ry_matrix(theta: f64) -> [[Complex64; 2]; 2] {
    let c = Complex64::new((theta / 2.0).cos(), 0.0);
    let s = Complex64::new((theta / 2.0).sin(), 0.0);
    [[c, -s], [s, c]]
}

fn u_matrix(theta: f64, phi: f64, lambda: f64) -> [[Complex64; 2]; 2] {
    let c = (theta / 2.0).cos();
    let s = (theta / 2.0).sin();
    let e_il = Complex64::from_polar(1.0, lambda);
    let e_ip = Complex64::from_polar(1.0, phi);
    let e_ipl = Complex64::from_polar(1.0, phi + lambda);
    [
        [Complex64::new(c, 0.0), -e_il * s],
        [e_ip * s, e_ipl * c],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use fidelis_ir::QubitId;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    fn run(circuit: &Circuit) -> Statevector {
        Statevector::from_circuit(circuit).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let sv = Statevector::new(2).unwrap();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(1.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[2], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[3], Complex64::new(0.0, 0.0)));
    }

    #[test]
    fn test_too_many_qubits() {
        assert!(matches!(
            Statevector::new(MAX_QUBITS + 1),
            Err(SimError::TooManyQubits { .. })
        ));
    }

    #[test]
    fn test_hadamard() {
        let mut sv = Statevector::new(1).unwrap();
        sv.apply_h(0);

        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(sqrt2_inv, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(sqrt2_inv, 0.0)));
    }

    #[test]
    fn test_bell_state() {
        let mut sv = Statevector::new(2).unwrap();
        sv.apply_h(0);
        sv.apply_cx(0, 1);

        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(sqrt2_inv, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[2], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[3], Complex64::new(sqrt2_inv, 0.0)));
    }

    #[test]
    fn test_rx_pi_flips() {
        let mut circuit = Circuit::with_size("rx", 1);
        circuit.rx(PI, QubitId(0)).unwrap();
        let sv = run(&circuit);
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, -1.0)));
    }

    #[test]
    fn test_ry_rotation() {
        let mut circuit = Circuit::with_size("ry", 1);
        circuit.ry(PI / 2.0, QubitId(0)).unwrap();
        let sv = run(&circuit);
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(sqrt2_inv, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(sqrt2_inv, 0.0)));
    }

    #[test]
    fn test_controlled_rotation_needs_control() {
        // Control in |0⟩: CRX does nothing.
        let mut idle = Circuit::with_size("crx", 2);
        idle.crx(PI, QubitId(0), QubitId(1)).unwrap();
        let sv = run(&idle);
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(1.0, 0.0)));

        // Control in |1⟩: target flips (up to phase).
        let mut active = Circuit::with_size("crx", 2);
        active.x(QubitId(0)).unwrap();
        active.crx(PI, QubitId(0), QubitId(1)).unwrap();
        let sv = run(&active);
        assert!((sv.amplitudes[0b11].norm_sqr() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_crz_matches_cx_rz_cx_on_control_one() {
        // With the control held at |1⟩, CRZ reduces to a plain RZ on the target.
        let mut a = Circuit::with_size("a", 2);
        a.h(QubitId(0)).unwrap();
        a.x(QubitId(1)).unwrap();
        a.crz(0.8, QubitId(1), QubitId(0)).unwrap();
        a.h(QubitId(0)).unwrap();

        let mut b = Circuit::with_size("b", 2);
        b.h(QubitId(0)).unwrap();
        b.x(QubitId(1)).unwrap();
        b.rz(0.8, QubitId(0)).unwrap();
        b.h(QubitId(0)).unwrap();

        let pa = run(&a).probabilities();
        let pb = run(&b).probabilities();
        for (x, y) in pa.iter().zip(&pb) {
            assert!((x - y).abs() < 1e-10);
        }
    }

    #[test]
    fn test_cswap_swaps_only_with_control() {
        let mut circuit = Circuit::with_size("cswap", 3);
        circuit.x(QubitId(1)).unwrap();
        circuit.cswap(QubitId(0), QubitId(1), QubitId(2)).unwrap();
        assert!((run(&circuit).amplitudes[0b010].norm() - 1.0).abs() < 1e-10);

        circuit.x(QubitId(0)).unwrap();
        circuit.cswap(QubitId(0), QubitId(1), QubitId(2)).unwrap();
        assert!((run(&circuit).amplitudes[0b101].norm() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_u_gate_matches_ry() {
        let mut u = Circuit::with_size("u", 1);
        u.u(0.9, 0.0, 0.0, QubitId(0)).unwrap();
        let mut ry = Circuit::with_size("ry", 1);
        ry.ry(0.9, QubitId(0)).unwrap();
        let a = run(&u);
        let b = run(&ry);
        assert!((a.fidelity(&b).unwrap() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_pauli_z_expectation() {
        let mut circuit = Circuit::with_size("z", 2);
        circuit.x(QubitId(1)).unwrap();
        let sv = run(&circuit);
        assert!((sv.expectation(&Observable::PauliZ(QubitId(0))).unwrap() - 1.0).abs() < 1e-12);
        assert!((sv.expectation(&Observable::PauliZ(QubitId(1))).unwrap() + 1.0).abs() < 1e-12);
        assert!(matches!(
            sv.expectation(&Observable::PauliZ(QubitId(2))),
            Err(SimError::QubitOutOfRange { .. })
        ));
    }

    #[test]
    fn test_dense_projector_matches_fast_path() {
        let mut circuit = Circuit::with_size("mix", 2);
        circuit.ry(0.7, QubitId(0)).unwrap();
        circuit.rx(1.3, QubitId(1)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        let sv = run(&circuit);
        let dense = sv
            .expectation(&Observable::Hermitian(crate::zero_projector(2)))
            .unwrap();
        let fast = sv.expectation(&Observable::ZeroProjector).unwrap();
        assert!((dense - fast).abs() < 1e-12);
    }

    #[test]
    fn test_observable_dimension_checked() {
        let sv = Statevector::new(2).unwrap();
        let err = sv
            .expectation(&Observable::Hermitian(crate::zero_projector(1)))
            .unwrap_err();
        assert!(matches!(err, SimError::ObservableDimension { expected: 4, .. }));
    }

    #[test]
    fn test_width_mismatch() {
        let circuit = Circuit::with_size("wide", 3);
        let mut sv = Statevector::new(2).unwrap();
        assert!(matches!(
            sv.run(&circuit),
            Err(SimError::WidthMismatch { expected: 2, got: 3 })
        ));
    }

    #[test]
    fn test_apply_rejects_unchecked_operands() {
        let mut sv = Statevector::new(1).unwrap();
        let before = sv.clone();

        let out_of_range = Instruction::single_qubit_gate(StandardGate::H, QubitId(5));
        assert!(matches!(
            sv.apply(&out_of_range),
            Err(SimError::QubitOutOfRange {
                qubit: 5,
                num_qubits: 1
            })
        ));

        let short = Instruction::gate(StandardGate::CX, [QubitId(0)]);
        assert!(matches!(
            sv.apply(&short),
            Err(SimError::OperandCount {
                gate_name: "cx",
                expected: 2,
                got: 1
            })
        ));

        let mut wide = Statevector::new(2).unwrap();
        let repeated = Instruction::two_qubit_gate(StandardGate::CX, QubitId(1), QubitId(1));
        assert!(matches!(
            wide.apply(&repeated),
            Err(SimError::DuplicateQubit { qubit: 1, .. })
        ));
        assert_eq!(sv, before);
    }
}
