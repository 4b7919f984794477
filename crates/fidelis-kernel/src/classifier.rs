//! Fidelity classifier: mean-overlap comparison against two labeled classes.

use std::fmt;
use std::time::{Duration, Instant};

use ndarray::Array2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};

use fidelis_embed::{FeatureMap, FeatureMapKind, ValidationError};
use fidelis_ir::QubitId;

use crate::embedding::Embedding;
use crate::error::{FidelityError, KernelResult};
use crate::estimator::EstimatorKind;
use crate::sampling::{ClassSampler, rng_from_seed};

/// A trained embedding plus its labeled reference data, split by class.
///
/// Class A holds the `+1` samples, class B the `-1` samples.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierModel {
    feature_map: FeatureMapKind,
    weights: Vec<f64>,
    num_wires: usize,
    input_dim: usize,
    class_a: Vec<Vec<f64>>,
    class_b: Vec<Vec<f64>>,
}

impl ClassifierModel {
    /// Build a model, validating weights, inputs and labels.
    pub fn new(
        feature_map: FeatureMapKind,
        weights: Vec<f64>,
        num_wires: usize,
        inputs: Vec<Vec<f64>>,
        labels: Vec<f64>,
    ) -> KernelResult<Self> {
        if inputs.len() != labels.len() {
            return Err(ValidationError::LengthMismatch {
                inputs: inputs.len(),
                labels: labels.len(),
            }
            .into());
        }
        validate_labels(&labels)?;

        // register width and weight count, before any wire list is built
        let width = Embedding::new(&feature_map, &weights, num_wires)?.width();

        let input_dim = inputs.first().map_or(0, Vec::len);
        let wires = QubitId::range(0, width);
        for x in &inputs {
            if x.len() != input_dim {
                return Err(ValidationError::DimensionMismatch {
                    expected: input_dim,
                    got: x.len(),
                }
                .into());
            }
            feature_map.validate(x, &weights, &wires)?;
        }

        let mut class_a = Vec::new();
        let mut class_b = Vec::new();
        for (x, y) in inputs.into_iter().zip(labels) {
            if y > 0.0 {
                class_a.push(x);
            } else {
                class_b.push(x);
            }
        }
        if class_a.is_empty() {
            return Err(ValidationError::EmptyClass { class: "A" }.into());
        }
        if class_b.is_empty() {
            return Err(ValidationError::EmptyClass { class: "B" }.into());
        }

        let model = Self {
            feature_map,
            weights,
            num_wires,
            input_dim,
            class_a,
            class_b,
        };
        debug!(
            feature_map = model.feature_map.name(),
            num_wires,
            class_a = model.class_a.len(),
            class_b = model.class_b.len(),
            "classifier model ready"
        );
        Ok(model)
    }

    /// The embedding family.
    pub fn feature_map(&self) -> &FeatureMapKind {
        &self.feature_map
    }

    /// Trained weights.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Wires per embedded input.
    pub fn num_wires(&self) -> usize {
        self.num_wires
    }

    /// Dimension of every input.
    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    /// Samples labeled `+1`.
    pub fn class_a(&self) -> &[Vec<f64>] {
        &self.class_a
    }

    /// Samples labeled `-1`.
    pub fn class_b(&self) -> &[Vec<f64>] {
        &self.class_b
    }

    /// The feature map bound to the trained weights.
    pub fn embedding(&self) -> KernelResult<Embedding<'_>> {
        Embedding::new(&self.feature_map, &self.weights, self.num_wires)
    }
}

fn validate_labels(labels: &[f64]) -> Result<(), ValidationError> {
    match labels
        .iter()
        .enumerate()
        .find(|&(_, &y)| y != 1.0 && y != -1.0)
    {
        Some((index, &label)) => Err(ValidationError::InvalidLabel { index, label }),
        None => Ok(()),
    }
}

/// Discrete label or continuous margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// `+1`, `-1`, or `0` on an exact tie.
    #[default]
    Label,
    /// `mean_a - mean_b`.
    Margin,
}

/// Result of one prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Prediction {
    /// Discrete class label.
    Label(i8),
    /// Signed overlap margin.
    Margin(f64),
}

impl Prediction {
    /// The prediction as a number.
    pub fn value(&self) -> f64 {
        match *self {
            Prediction::Label(label) => f64::from(label),
            Prediction::Margin(margin) => margin,
        }
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prediction::Label(label) => write!(f, "{label:+}"),
            Prediction::Margin(margin) => write!(f, "{margin:+.6}"),
        }
    }
}

/// Options for [`FidelityClassifier::predict`].
#[derive(Debug, Clone, PartialEq)]
pub struct PredictOptions {
    /// Draws per class; `None` uses every sample once.
    pub sample_count: Option<usize>,
    /// Sampling weights for class A.
    pub probs_a: Option<Vec<f64>>,
    /// Sampling weights for class B.
    pub probs_b: Option<Vec<f64>>,
    /// Label or margin.
    pub output: OutputMode,
    /// Overlap strategy.
    pub estimator: EstimatorKind,
    /// RNG seed for subset sampling.
    pub seed: Option<u64>,
    /// Per-query deadline.
    pub timeout: Option<Duration>,
    /// Evaluate test queries in parallel in [`FidelityClassifier::accuracy`].
    pub parallel: bool,
}

impl Default for PredictOptions {
    fn default() -> Self {
        Self {
            sample_count: None,
            probs_a: None,
            probs_b: None,
            output: OutputMode::Label,
            estimator: EstimatorKind::Exact,
            seed: None,
            timeout: None,
            parallel: true,
        }
    }
}

impl PredictOptions {
    /// Draw `count` references per class.
    #[must_use]
    pub fn with_sample_count(mut self, count: usize) -> Self {
        self.sample_count = Some(count);
        self
    }

    /// Set the sampling weights of both classes.
    #[must_use]
    pub fn with_probabilities(mut self, probs_a: Vec<f64>, probs_b: Vec<f64>) -> Self {
        self.probs_a = Some(probs_a);
        self.probs_b = Some(probs_b);
        self
    }

    /// Set the output mode.
    #[must_use]
    pub fn with_output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    /// Set the overlap strategy.
    #[must_use]
    pub fn with_estimator(mut self, estimator: EstimatorKind) -> Self {
        self.estimator = estimator;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the per-query deadline.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Enable or disable parallel evaluation of test queries.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Stages of a single prediction, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionStage {
    /// Reference subsets drawn.
    SampleSelected,
    /// Mean overlap with class A known.
    OverlapA,
    /// Mean overlap with class B known.
    OverlapB,
    /// Label or margin produced.
    LabelEmitted,
}

impl fmt::Display for PredictionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PredictionStage::SampleSelected => "sample_selected",
            PredictionStage::OverlapA => "overlap_a_computed",
            PredictionStage::OverlapB => "overlap_b_computed",
            PredictionStage::LabelEmitted => "label_emitted",
        };
        f.write_str(name)
    }
}

/// Deadline for one prediction, checked between stages.
struct Deadline {
    start: Instant,
    timeout: Option<Duration>,
}

impl Deadline {
    fn start(timeout: Option<Duration>) -> Self {
        Self {
            start: Instant::now(),
            timeout,
        }
    }

    fn reached(&self, stage: PredictionStage) -> KernelResult<()> {
        trace!(%stage, elapsed_us = self.start.elapsed().as_micros() as u64, "prediction stage");
        match self.timeout {
            Some(timeout) if self.start.elapsed() >= timeout => Err(FidelityError::DeadlineExceeded {
                stage,
                timeout_ms: timeout.as_millis(),
            }),
            _ => Ok(()),
        }
    }
}

/// Mean overlaps of a query with both classes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassOverlaps {
    /// Mean overlap with class A.
    pub mean_a: f64,
    /// Mean overlap with class B.
    pub mean_b: f64,
}

impl ClassOverlaps {
    /// `mean_a - mean_b`.
    pub fn margin(&self) -> f64 {
        self.mean_a - self.mean_b
    }

    /// `+1` if class A is closer, `-1` if class B is, `0` on a tie.
    pub fn label(&self) -> i8 {
        if self.mean_a > self.mean_b {
            1
        } else if self.mean_a < self.mean_b {
            -1
        } else {
            0
        }
    }

    /// Label or margin, as requested.
    pub fn prediction(&self, output: OutputMode) -> Prediction {
        match output {
            OutputMode::Label => Prediction::Label(self.label()),
            OutputMode::Margin => Prediction::Margin(self.margin()),
        }
    }
}

/// Classifies queries by comparing their mean overlap with each class.
#[derive(Debug, Clone)]
pub struct FidelityClassifier {
    model: ClassifierModel,
}

impl FidelityClassifier {
    /// Wrap a model.
    pub fn new(model: ClassifierModel) -> Self {
        Self { model }
    }

    /// The underlying model.
    pub fn model(&self) -> &ClassifierModel {
        &self.model
    }

    /// Predict the label (or margin) of `query`.
    #[instrument(skip_all, fields(estimator = %options.estimator))]
    pub fn predict(&self, query: &[f64], options: &PredictOptions) -> KernelResult<Prediction> {
        let deadline = Deadline::start(options.timeout);
        let prediction = self
            .overlaps_within(query, options, &deadline)?
            .prediction(options.output);
        deadline.reached(PredictionStage::LabelEmitted)?;
        Ok(prediction)
    }

    /// Mean overlaps of `query` with both classes.
    pub fn class_overlaps(&self, query: &[f64], options: &PredictOptions) -> KernelResult<ClassOverlaps> {
        let deadline = Deadline::start(options.timeout);
        self.overlaps_within(query, options, &deadline)
    }

    fn overlaps_within(
        &self,
        query: &[f64],
        options: &PredictOptions,
        deadline: &Deadline,
    ) -> KernelResult<ClassOverlaps> {
        let model = &self.model;
        let sampler_a = ClassSampler::new(
            "A",
            model.class_a.len(),
            options.sample_count,
            options.probs_a.as_deref(),
        )?;
        let sampler_b = ClassSampler::new(
            "B",
            model.class_b.len(),
            options.sample_count,
            options.probs_b.as_deref(),
        )?;
        if query.len() != model.input_dim {
            return Err(ValidationError::DimensionMismatch {
                expected: model.input_dim,
                got: query.len(),
            }
            .into());
        }
        let embedding = model.embedding()?;
        let estimator = options.estimator.estimator();

        let mut rng = rng_from_seed(options.seed);
        let subset_a = sampler_a.draw(&model.class_a, &mut rng);
        let subset_b = sampler_b.draw(&model.class_b, &mut rng);
        deadline.reached(PredictionStage::SampleSelected)?;

        let mean_a = estimator.mean_overlap(query, &subset_a, &embedding)?;
        deadline.reached(PredictionStage::OverlapA)?;

        let mean_b = estimator.mean_overlap(query, &subset_b, &embedding)?;
        deadline.reached(PredictionStage::OverlapB)?;

        Ok(ClassOverlaps { mean_a, mean_b })
    }

    /// Fraction of test inputs whose predicted label equals the true label.
    ///
    /// Ties predict `0` and therefore always count as misclassified. Any error
    /// aborts the whole evaluation.
    #[instrument(skip_all, fields(queries = inputs.len(), estimator = %options.estimator))]
    pub fn accuracy(&self, inputs: &[Vec<f64>], labels: &[f64], options: &PredictOptions) -> KernelResult<f64> {
        if inputs.len() != labels.len() {
            return Err(ValidationError::LengthMismatch {
                inputs: inputs.len(),
                labels: labels.len(),
            }
            .into());
        }
        if inputs.is_empty() {
            return Err(ValidationError::EmptyTestSet.into());
        }
        validate_labels(labels)?;

        let options = options.clone().with_output(OutputMode::Label);
        let classify = |(x, &y): (&Vec<f64>, &f64)| -> KernelResult<bool> {
            Ok(self.predict(x, &options)?.value() == y)
        };

        let hits: Vec<bool> = if options.parallel {
            inputs
                .par_iter()
                .zip(labels.par_iter())
                .map(classify)
                .collect::<KernelResult<_>>()?
        } else {
            inputs
                .iter()
                .zip(labels)
                .map(classify)
                .collect::<KernelResult<_>>()?
        };

        let correct = hits.iter().filter(|&&hit| hit).count();
        let accuracy = correct as f64 / inputs.len() as f64;
        info!(correct, total = inputs.len(), accuracy, "accuracy evaluated");
        Ok(accuracy)
    }

    /// Gram matrix `K[i][j]` = overlap of `inputs[i]` (query) with `inputs[j]`.
    #[instrument(skip_all, fields(size = inputs.len(), %estimator))]
    pub fn kernel_matrix(&self, inputs: &[Vec<f64>], estimator: EstimatorKind) -> KernelResult<Array2<f64>> {
        let embedding = self.model.embedding()?;
        let strategy = estimator.estimator();

        let rows = inputs
            .par_iter()
            .map(|a| {
                inputs
                    .iter()
                    .map(|b| strategy.estimate(a, b, &embedding))
                    .collect::<KernelResult<Vec<f64>>>()
            })
            .collect::<KernelResult<Vec<Vec<f64>>>>()?;

        let n = inputs.len();
        let mut gram = Array2::zeros((n, n));
        for (i, row) in rows.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                gram[[i, j]] = value;
            }
        }
        Ok(gram)
    }
}
