//! Integration tests for the fidelity classifier.

use std::time::Duration;

use fidelis_embed::{FeatureMapSpec, ValidationError};
use fidelis_kernel::{
    ClassifierModel, EstimatorKind, FidelityClassifier, FidelityError, OutputMode, PredictOptions,
    Prediction,
};

/// Two-wire chain with vanishing weights: |φ(x)⟩ = RX(2x₀) ⊗ RX(2x₁) |00⟩.
///
/// Against the references below the margin is ½·sin(2a)·sin(2b)·sin²(1), so
/// the sign of the margin is the sign of x₀·x₁ for |xᵢ| < π/2.
fn quadrant_classifier() -> FidelityClassifier {
    let feature_map = FeatureMapSpec::new("qaoa", 1).resolve().unwrap();
    let model = ClassifierModel::new(
        feature_map,
        vec![0.0; 3],
        2,
        vec![
            vec![0.5, 0.5],
            vec![-0.5, -0.5],
            vec![0.5, -0.5],
            vec![-0.5, 0.5],
        ],
        vec![1.0, 1.0, -1.0, -1.0],
    )
    .unwrap();
    FidelityClassifier::new(model)
}

fn held_out() -> (Vec<Vec<f64>>, Vec<f64>) {
    let inputs = vec![
        vec![0.3, 0.6],
        vec![0.7, 0.4],
        vec![-0.4, -0.7],
        vec![-0.6, -0.3],
        vec![0.4, -0.6],
        vec![0.7, -0.3],
        vec![-0.3, 0.5],
        vec![-0.7, 0.7],
    ];
    let labels = inputs
        .iter()
        .map(|x| if x[0] * x[1] > 0.0 { 1.0 } else { -1.0 })
        .collect();
    (inputs, labels)
}

#[test]
fn test_separable_quadrants_are_classified_perfectly() {
    let classifier = quadrant_classifier();
    let (inputs, labels) = held_out();
    for kind in [EstimatorKind::Exact, EstimatorKind::Fast, EstimatorKind::Circuit] {
        let options = PredictOptions::default().with_estimator(kind);
        let accuracy = classifier.accuracy(&inputs, &labels, &options).unwrap();
        assert_eq!(accuracy, 1.0, "{kind}");
    }
}

#[test]
fn test_sequential_accuracy_matches_parallel() {
    let classifier = quadrant_classifier();
    let (inputs, mut labels) = held_out();
    labels[0] = -labels[0];
    labels[5] = -labels[5];

    let parallel = classifier
        .accuracy(&inputs, &labels, &PredictOptions::default())
        .unwrap();
    let sequential = classifier
        .accuracy(&inputs, &labels, &PredictOptions::default().with_parallel(false))
        .unwrap();
    assert_eq!(parallel, 0.75);
    assert_eq!(sequential, parallel);
}

#[test]
fn test_margin_matches_closed_form() {
    let classifier = quadrant_classifier();
    let (a, b) = (0.3_f64, -0.6_f64);
    let options = PredictOptions::default().with_output(OutputMode::Margin);
    let margin = classifier.predict(&[a, b], &options).unwrap().value();
    let expected = 0.5 * (2.0 * a).sin() * (2.0 * b).sin() * 1.0_f64.sin().powi(2);
    assert!((margin - expected).abs() < 1e-10);
}

#[test]
fn test_tie_predicts_zero_and_counts_as_miss() {
    // on an axis the margin vanishes
    let classifier = quadrant_classifier();
    let prediction = classifier
        .predict(&[0.0, 0.4], &PredictOptions::default())
        .unwrap();
    assert_eq!(prediction, Prediction::Label(0));

    let accuracy = classifier
        .accuracy(&[vec![0.0, 0.4]], &[1.0], &PredictOptions::default())
        .unwrap();
    assert_eq!(accuracy, 0.0);
}

#[test]
fn test_full_class_prediction_is_deterministic() {
    let classifier = quadrant_classifier();
    let options = PredictOptions::default().with_output(OutputMode::Margin);
    let first = classifier.predict(&[0.2, 0.3], &options).unwrap();
    let second = classifier.predict(&[0.2, 0.3], &options).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_seeded_sampling_is_reproducible() {
    let classifier = quadrant_classifier();
    let options = PredictOptions::default()
        .with_output(OutputMode::Margin)
        .with_sample_count(5)
        .with_probabilities(vec![0.7, 0.3], vec![0.5, 0.5])
        .with_seed(11);
    let first = classifier.class_overlaps(&[0.2, 0.3], &options).unwrap();
    let second = classifier.class_overlaps(&[0.2, 0.3], &options).unwrap();
    assert_eq!(first, second);
    assert!(first.mean_a > 0.0 && first.mean_a <= 1.0);
}

#[test]
fn test_probability_length_mismatch_is_rejected() {
    let classifier = quadrant_classifier();
    let options = PredictOptions::default()
        .with_sample_count(4)
        .with_probabilities(vec![0.2, 0.3, 0.5], vec![0.5, 0.5]);
    let err = classifier.predict(&[0.2, 0.3], &options).unwrap_err();
    assert!(matches!(
        err,
        FidelityError::Validation(ValidationError::ProbabilityLength {
            class: "A",
            expected: 2,
            got: 3
        })
    ));
}

#[test]
fn test_zero_sample_count_is_rejected() {
    let classifier = quadrant_classifier();
    let options = PredictOptions::default().with_sample_count(0);
    let err = classifier.predict(&[0.2, 0.3], &options).unwrap_err();
    assert!(matches!(
        err,
        FidelityError::Validation(ValidationError::ZeroSamples)
    ));
}

#[test]
fn test_accuracy_validates_test_set() {
    let classifier = quadrant_classifier();
    let options = PredictOptions::default();

    let err = classifier.accuracy(&[], &[], &options).unwrap_err();
    assert!(matches!(
        err,
        FidelityError::Validation(ValidationError::EmptyTestSet)
    ));

    let err = classifier
        .accuracy(&[vec![0.1, 0.1]], &[1.0, -1.0], &options)
        .unwrap_err();
    assert!(matches!(
        err,
        FidelityError::Validation(ValidationError::LengthMismatch { inputs: 1, labels: 2 })
    ));

    let err = classifier
        .accuracy(&[vec![0.1, 0.1]], &[2.0], &options)
        .unwrap_err();
    assert!(matches!(
        err,
        FidelityError::Validation(ValidationError::InvalidLabel { index: 0, .. })
    ));
}

#[test]
fn test_accuracy_aborts_on_first_error() {
    let classifier = quadrant_classifier();
    let inputs = vec![vec![0.1, 0.1], vec![0.1, 0.1, 0.1]];
    let err = classifier
        .accuracy(&inputs, &[1.0, 1.0], &PredictOptions::default())
        .unwrap_err();
    assert!(matches!(
        err,
        FidelityError::Validation(ValidationError::DimensionMismatch { .. })
    ));
}

#[test]
fn test_deadline_is_enforced() {
    let classifier = quadrant_classifier();
    let options = PredictOptions::default().with_timeout(Duration::ZERO);
    let err = classifier.predict(&[0.2, 0.3], &options).unwrap_err();
    assert!(matches!(err, FidelityError::DeadlineExceeded { .. }));

    let generous = PredictOptions::default().with_timeout(Duration::from_secs(60));
    assert!(classifier.predict(&[0.2, 0.3], &generous).is_ok());
}

#[test]
fn test_model_rejects_too_many_features() {
    let feature_map = FeatureMapSpec::new("qaoa", 1).resolve().unwrap();
    let err = ClassifierModel::new(
        feature_map,
        vec![0.0],
        1,
        vec![vec![0.1, 0.2], vec![0.3, 0.4]],
        vec![1.0, -1.0],
    )
    .unwrap_err();
    assert!(matches!(
        err,
        FidelityError::Validation(ValidationError::TooManyFeatures { features: 2, wires: 1 })
    ));
}

#[test]
fn test_kernel_matrix_is_symmetric_with_unit_diagonal() {
    let classifier = quadrant_classifier();
    let (inputs, _) = held_out();
    let gram = classifier
        .kernel_matrix(&inputs, EstimatorKind::Fast)
        .unwrap();
    assert_eq!(gram.dim(), (inputs.len(), inputs.len()));
    for i in 0..inputs.len() {
        assert!((gram[[i, i]] - 1.0).abs() < 1e-10);
        for j in 0..inputs.len() {
            assert!((gram[[i, j]] - gram[[j, i]]).abs() < 1e-10);
        }
    }
}
