//! Kernel command implementation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use fidelis_kernel::KernelConfig;

use super::common::{load_classifier, parse_estimator};

/// Execute the kernel command.
pub fn execute(
    model: &Path,
    estimator: Option<&str>,
    output: Option<&Path>,
    config: &KernelConfig,
) -> Result<()> {
    let classifier = load_classifier(model)?;
    let kind = match estimator {
        Some(name) => parse_estimator(name)?,
        None => config.estimator_kind()?,
    };

    let model = classifier.model();
    let inputs: Vec<Vec<f64>> = model
        .class_a()
        .iter()
        .chain(model.class_b())
        .cloned()
        .collect();
    let gram = classifier.kernel_matrix(&inputs, kind)?;
    let rows: Vec<Vec<f64>> = gram.rows().into_iter().map(|row| row.to_vec()).collect();

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&rows)?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        eprintln!(
            "{} {}x{} kernel matrix written to {}",
            style("OK").green().bold(),
            rows.len(),
            rows.len(),
            path.display()
        );
        return Ok(());
    }

    eprintln!(
        "{} Kernel matrix ({} estimator; class A rows first, {} of {})",
        style("→").cyan().bold(),
        style(kind).yellow(),
        model.class_a().len(),
        rows.len()
    );
    for row in &rows {
        let line: Vec<String> = row.iter().map(|v| format!("{v:.4}")).collect();
        println!("{}", line.join(" "));
    }
    Ok(())
}
