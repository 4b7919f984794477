//! Integration tests for the three overlap estimators.

use fidelis_embed::{
    ChainAxis, ChainEmbedding, EmbedResult, FeatureMap, FeatureMapKind, FeatureMapSpec,
    HardwareEfficientEmbedding, HardwareEntangler, LayeredRotationEmbedding,
    PhaseEntangledEmbedding, PhaseEntangler, TfimCoupling, TfimData, TfimEmbedding,
    ValidationError,
};
use fidelis_ir::{Circuit, QubitId};
use fidelis_kernel::{
    Embedding, EstimatorKind, ExactOverlap, FidelityError, OverlapEstimator, SwapTestOverlap,
    ZeroProjectionOverlap,
};
use proptest::prelude::*;

const TOL: f64 = 1e-9;

/// Single-qubit Euler rotations; `U` is not inverted by negating its angles.
#[derive(Debug)]
struct EulerEmbedding {
    declared: bool,
}

impl FeatureMap for EulerEmbedding {
    fn name(&self) -> &'static str {
        "euler"
    }

    fn layers(&self) -> usize {
        1
    }

    fn param_count(&self, num_wires: usize) -> usize {
        num_wires
    }

    fn encode(
        &self,
        circuit: &mut Circuit,
        x: &[f64],
        weights: &[f64],
        wires: &[QubitId],
    ) -> EmbedResult<()> {
        self.validate(x, weights, wires)?;
        for (i, &wire) in wires.iter().enumerate() {
            let theta = x.get(i).copied().unwrap_or(0.0);
            circuit.u(theta, weights[i], 0.3, wire)?;
        }
        Ok(())
    }

    fn inverts_by_negation(&self) -> bool {
        self.declared
    }
}

fn single_wire_chain() -> FeatureMapKind {
    FeatureMapKind::Chain(ChainEmbedding::new(1, ChainAxis::XEncodeYLocal))
}

/// (feature map, wires, features) covering every family.
fn families() -> Vec<(FeatureMapKind, usize, usize)> {
    vec![
        (FeatureMapKind::Chain(ChainEmbedding::new(2, ChainAxis::XEncodeYLocal)), 2, 2),
        (FeatureMapKind::Chain(ChainEmbedding::new(1, ChainAxis::YEncodeXLocal)), 3, 2),
        (
            FeatureMapKind::PhaseEntangled(PhaseEntangledEmbedding::new(1, PhaseEntangler::Crx)),
            3,
            3,
        ),
        (
            FeatureMapKind::HardwareEfficient(HardwareEfficientEmbedding::new(
                1,
                2,
                HardwareEntangler::Crz,
            )),
            3,
            2,
        ),
        (FeatureMapKind::LayeredRotation(LayeredRotationEmbedding::new(2)), 2, 1),
        (
            FeatureMapKind::Tfim(TfimEmbedding::new(1, TfimData::TwoD, TfimCoupling::Full)),
            4,
            2,
        ),
    ]
}

#[test]
fn test_single_qubit_closed_form() {
    // RX(2a)|0⟩ against RX(2b)|0⟩ once the local weight vanishes.
    let map = single_wire_chain();
    let weights = [0.0];
    let embedding = Embedding::new(&map, &weights, 1).unwrap();

    for (a, b) in [(0.3, 0.3), (0.1, 0.9), (-0.4, 1.2), (0.0, std::f64::consts::FRAC_PI_2)] {
        let expected = f64::cos(a - b).powi(2);
        for kind in [EstimatorKind::Exact, EstimatorKind::Fast, EstimatorKind::Circuit] {
            let got = kind.estimator().estimate(&[a], &[b], &embedding).unwrap();
            assert!((got - expected).abs() < TOL, "{kind}: {got} vs {expected}");
        }
    }
}

#[test]
fn test_trained_single_qubit_self_overlap() {
    let map = FeatureMapSpec::new("qaoa", 1).resolve().unwrap();
    let weights = [0.001];
    let embedding = Embedding::new(&map, &weights, 1).unwrap();
    let overlap = ExactOverlap.estimate(&[0.3], &[0.3], &embedding).unwrap();
    assert!((overlap - 1.0).abs() < TOL);
}

#[test]
fn test_swap_test_matches_exact_for_every_family() {
    for (map, n, d) in families() {
        let weights: Vec<f64> = (0..map.param_count(n)).map(|k| 0.1 * k as f64 - 0.4).collect();
        let embedding = Embedding::new(&map, &weights, n).unwrap();
        let a: Vec<f64> = (0..d).map(|k| 0.3 + 0.2 * k as f64).collect();
        let b: Vec<f64> = (0..d).map(|k| -0.5 + 0.4 * k as f64).collect();

        let exact = ExactOverlap.estimate(&a, &b, &embedding).unwrap();
        let swap = SwapTestOverlap.estimate(&a, &b, &embedding).unwrap();
        assert!((exact - swap).abs() < TOL, "{}: {exact} vs {swap}", map.name());
    }
}

#[test]
fn test_swap_test_register_layout() {
    let map = single_wire_chain();
    let weights = [0.2];
    let embedding = Embedding::new(&map, &weights, 1).unwrap();
    let circuit = SwapTestOverlap::circuit(&[0.1], &[0.5], &embedding).unwrap();

    assert_eq!(circuit.num_qubits(), 3);
    let counts = circuit.gate_counts();
    assert_eq!(counts.get("cswap"), Some(&1));
    assert_eq!(counts.get("h"), Some(&2));
}

#[test]
fn test_mean_overlap_is_arithmetic_mean() {
    let (map, n, _) = families().swap_remove(0);
    let weights = map.initial_parameters(n);
    let embedding = Embedding::new(&map, &weights, n).unwrap();
    let query = [0.2, -0.1];
    let refs: Vec<Vec<f64>> = vec![vec![0.0, 0.0], vec![0.5, 0.4], vec![-0.7, 0.3]];
    let refs: Vec<&[f64]> = refs.iter().map(Vec::as_slice).collect();

    for kind in [EstimatorKind::Exact, EstimatorKind::Fast, EstimatorKind::Circuit] {
        let estimator = kind.estimator();
        let singles: f64 = refs
            .iter()
            .map(|r| estimator.estimate(&query, r, &embedding).unwrap())
            .sum::<f64>()
            / refs.len() as f64;
        let mean = estimator.mean_overlap(&query, &refs, &embedding).unwrap();
        assert!((mean - singles).abs() < TOL, "{kind}");
    }
}

#[test]
fn test_mean_overlap_rejects_dimension_mismatch() {
    let map = single_wire_chain();
    let weights = [0.0];
    let embedding = Embedding::new(&map, &weights, 1).unwrap();
    let refs: [&[f64]; 1] = [&[0.1, 0.2]];
    for kind in [EstimatorKind::Exact, EstimatorKind::Fast, EstimatorKind::Circuit] {
        let err = kind.estimator().mean_overlap(&[0.1], &refs, &embedding).unwrap_err();
        assert!(
            matches!(
                err,
                FidelityError::Validation(ValidationError::DimensionMismatch { .. })
            ),
            "{kind}"
        );
    }
}

#[test]
fn test_embedding_rejects_wrong_weight_count() {
    let map = single_wire_chain();
    let weights = [0.0, 0.1];
    let err = Embedding::new(&map, &weights, 1).unwrap_err();
    assert!(matches!(
        err,
        FidelityError::Validation(ValidationError::ParameterCount {
            expected: 1,
            got: 2,
            ..
        })
    ));
}

#[test]
fn test_fast_refuses_undeclared_embedding() {
    let map = EulerEmbedding { declared: false };
    let weights = [0.4, 0.2];
    let embedding = Embedding::new(&map, &weights, 2).unwrap();

    let err = ZeroProjectionOverlap
        .estimate(&[0.1, 0.2], &[0.3, 0.4], &embedding)
        .unwrap_err();
    assert!(matches!(
        err,
        FidelityError::PreconditionViolation { embedding: "euler", .. }
    ));

    // the other strategies make no such assumption
    let exact = ExactOverlap.estimate(&[0.1, 0.2], &[0.3, 0.4], &embedding).unwrap();
    let swap = SwapTestOverlap.estimate(&[0.1, 0.2], &[0.3, 0.4], &embedding).unwrap();
    assert!((exact - swap).abs() < TOL);
}

#[test]
fn test_fast_checks_each_gate_of_declared_embedding() {
    let map = EulerEmbedding { declared: true };
    let weights = [0.4];
    let embedding = Embedding::new(&map, &weights, 1).unwrap();
    let refs: [&[f64]; 2] = [&[0.3], &[0.5]];

    let err = ZeroProjectionOverlap
        .mean_overlap(&[0.1], &refs, &embedding)
        .unwrap_err();
    match err {
        FidelityError::PreconditionViolation { reason, .. } => assert!(reason.contains("'u'")),
        other => panic!("unexpected error: {other}"),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_zero_projection_matches_exact(
        family in 0usize..6,
        seed in prop::collection::vec(-1.5f64..1.5, 64),
    ) {
        let (map, n, d) = families().swap_remove(family);
        let count = map.param_count(n);
        let weights = &seed[..count];
        let a = &seed[count..count + d];
        let b = &seed[count + d..count + 2 * d];
        let embedding = Embedding::new(&map, weights, n).unwrap();

        let exact = ExactOverlap.estimate(a, b, &embedding).unwrap();
        let fast = ZeroProjectionOverlap.estimate(a, b, &embedding).unwrap();
        prop_assert!((exact - fast).abs() < 1e-8, "{}: {} vs {}", map.name(), exact, fast);
    }

    #[test]
    fn prop_overlap_is_bounded_and_symmetric(
        a in -2.0f64..2.0,
        b in -2.0f64..2.0,
        w in -2.0f64..2.0,
    ) {
        let map = single_wire_chain();
        let weights = [w];
        let embedding = Embedding::new(&map, &weights, 1).unwrap();
        let ab = ExactOverlap.estimate(&[a], &[b], &embedding).unwrap();
        let ba = ExactOverlap.estimate(&[b], &[a], &embedding).unwrap();
        prop_assert!((-1e-12..=1.0 + 1e-12).contains(&ab));
        prop_assert!((ab - ba).abs() < 1e-10);
    }
}
