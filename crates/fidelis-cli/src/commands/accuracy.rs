//! Accuracy command implementation.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use fidelis_kernel::{KernelConfig, LabeledDataset};

use super::common::{Overrides, load_classifier};

/// Execute the accuracy command.
pub fn execute(model: &Path, test: &Path, overrides: &Overrides, config: &KernelConfig) -> Result<()> {
    let classifier = load_classifier(model)?;
    let dataset = LabeledDataset::from_file(test)
        .with_context(|| format!("Failed to load test set {}", test.display()))?;
    let options = overrides.predict_options(config)?;

    eprintln!(
        "{} Evaluating {} test samples ({} estimator)",
        style("→").cyan().bold(),
        dataset.len(),
        style(options.estimator).yellow()
    );

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Computing overlaps...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let start = Instant::now();
    let result = classifier.accuracy(&dataset.inputs, &dataset.labels, &options);
    spinner.finish_and_clear();
    let accuracy = result?;

    eprintln!(
        "{} Done in {} ms",
        style("✓").green().bold(),
        style(start.elapsed().as_millis()).yellow()
    );
    println!("{accuracy:.4}");
    Ok(())
}
