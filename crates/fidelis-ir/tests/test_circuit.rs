//! Integration tests for circuit tapes.

use fidelis_ir::{Circuit, Instruction, IrError, QubitId, StandardGate};
use proptest::prelude::*;

fn arb_invertible_gate() -> impl Strategy<Value = StandardGate> {
    prop_oneof![
        Just(StandardGate::H),
        Just(StandardGate::X),
        Just(StandardGate::CX),
        (-3.0..3.0f64).prop_map(StandardGate::Rx),
        (-3.0..3.0f64).prop_map(StandardGate::Ry),
        (-3.0..3.0f64).prop_map(StandardGate::Rz),
        (-3.0..3.0f64).prop_map(StandardGate::CRx),
        (-3.0..3.0f64).prop_map(StandardGate::CRz),
    ]
}

fn build(gates: &[StandardGate]) -> Circuit {
    let mut circuit = Circuit::with_size("tape", 2);
    for gate in gates {
        let qubits = if gate.num_qubits() == 2 {
            vec![QubitId(0), QubitId(1)]
        } else {
            vec![QubitId(1)]
        };
        circuit
            .apply(Instruction::gate(*gate, qubits))
            .unwrap();
    }
    circuit
}

#[test]
fn test_gate_counts() {
    let mut circuit = Circuit::with_size("counts", 3);
    for q in QubitId::range(0, 3) {
        circuit.h(q).unwrap();
    }
    circuit.cswap(QubitId(0), QubitId(1), QubitId(2)).unwrap();

    let counts = circuit.gate_counts();
    assert_eq!(counts.get("h"), Some(&3));
    assert_eq!(counts.get("cswap"), Some(&1));
}

#[test]
fn test_negation_inverse_rejects_t_without_mutating() {
    let mut negated = Circuit::with_size("neg", 1);
    negated.rx(0.2, QubitId(0)).unwrap().t(QubitId(0)).unwrap();

    let mut circuit = Circuit::with_size("fwd", 1);
    circuit.h(QubitId(0)).unwrap();
    let err = circuit.append_negation_inverse(&negated).unwrap_err();
    assert!(matches!(err, IrError::NotNegationInvertible { .. }));
    assert_eq!(circuit.len(), 1);
}

proptest! {
    #[test]
    fn prop_negation_inverse_reverses_tape(
        gates in prop::collection::vec(arb_invertible_gate(), 0..16)
    ) {
        let negated = build(&gates);

        let mut circuit = Circuit::with_size("fwd", 2);
        circuit.append_negation_inverse(&negated).unwrap();
        prop_assert_eq!(circuit.len(), gates.len());

        let reversed: Vec<_> = circuit.instructions().iter().rev().map(|i| i.gate).collect();
        prop_assert_eq!(reversed, gates);
    }

    #[test]
    fn prop_double_negation_is_identity(theta in -10.0..10.0f64) {
        for gate in [StandardGate::Rx(theta), StandardGate::CRy(theta), StandardGate::P(theta)] {
            prop_assert_eq!(gate.negated().negated(), gate);
        }
    }
}
