//! Shared helpers for CLI commands.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use fidelis_kernel::{EstimatorKind, FidelityClassifier, KernelConfig, ModelRecord, PredictOptions};

/// Command-line flags that override the configuration.
#[derive(Debug, Default)]
pub struct Overrides {
    pub estimator: Option<String>,
    pub samples: Option<usize>,
    pub seed: Option<u64>,
    pub sequential: bool,
}

impl Overrides {
    /// Prediction options: config values, replaced by any flag given.
    pub fn predict_options(&self, config: &KernelConfig) -> Result<PredictOptions> {
        let mut options = config.predict_options()?;
        if let Some(estimator) = &self.estimator {
            options.estimator = parse_estimator(estimator)?;
        }
        if let Some(samples) = self.samples {
            options.sample_count = Some(samples);
        }
        if let Some(seed) = self.seed {
            options.seed = Some(seed);
        }
        if self.sequential {
            options.parallel = false;
        }
        Ok(options)
    }
}

/// Parse an estimator name.
pub fn parse_estimator(name: &str) -> Result<EstimatorKind> {
    Ok(name.parse::<EstimatorKind>()?)
}

/// Parse a comma-separated list of numbers.
pub fn parse_vector(text: &str) -> Result<Vec<f64>> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .with_context(|| format!("Invalid number '{s}' in '{text}'"))
        })
        .collect()
}

/// Load a model record and build its classifier.
pub fn load_classifier(path: &Path) -> Result<FidelityClassifier> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }
    let record = ModelRecord::from_file(path)?;
    debug!(path = %path.display(), feature_map = %record.feature_map, "loaded model record");
    let model = record
        .into_model()
        .with_context(|| format!("Invalid model in {}", path.display()))?;
    Ok(FidelityClassifier::new(model))
}
