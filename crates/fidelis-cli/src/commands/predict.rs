//! Predict command implementation.

use std::path::Path;

use anyhow::Result;
use console::style;

use fidelis_embed::FeatureMap;
use fidelis_kernel::{KernelConfig, OutputMode};

use super::common::{Overrides, load_classifier, parse_vector};

/// Execute the predict command.
pub fn execute(
    model: &Path,
    query: &str,
    overrides: &Overrides,
    probs_a: Option<&str>,
    probs_b: Option<&str>,
    margin: bool,
    config: &KernelConfig,
) -> Result<()> {
    let classifier = load_classifier(model)?;
    let query = parse_vector(query)?;

    let mut options = overrides.predict_options(config)?;
    if margin {
        options.output = OutputMode::Margin;
    }
    options.probs_a = probs_a.map(parse_vector).transpose()?;
    options.probs_b = probs_b.map(parse_vector).transpose()?;

    let model = classifier.model();
    eprintln!(
        "{} Classifying {:?} with {} on {} wires ({} estimator)",
        style("→").cyan().bold(),
        query,
        style(model.feature_map().name()).green(),
        model.num_wires(),
        style(options.estimator).yellow()
    );

    let overlaps = classifier.class_overlaps(&query, &options)?;
    eprintln!("  Mean overlap A: {:.6}", overlaps.mean_a);
    eprintln!("  Mean overlap B: {:.6}", overlaps.mean_b);

    println!("{}", overlaps.prediction(options.output));
    Ok(())
}
