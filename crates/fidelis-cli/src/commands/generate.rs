//! Generate command implementation.
//!
//! `fidelis generate --dataset quadrants|blobs --size <n> --output <json> [--embedding <id>]`

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use rand::Rng;
use rand::rngs::StdRng;

use fidelis_embed::{FeatureMap, FeatureMapKind, FeatureMapSpec, TFIM_WIRES};
use fidelis_kernel::{LabeledDataset, ModelRecord, rng_from_seed};

/// Execute the generate command.
pub fn execute(
    dataset: &str,
    size: usize,
    margin: f64,
    seed: Option<u64>,
    embedding: Option<&str>,
    layers: usize,
    output: &Path,
) -> Result<()> {
    if size == 0 {
        anyhow::bail!("--size must be greater than 0");
    }
    let mut rng = rng_from_seed(seed);
    let data = match dataset.to_lowercase().as_str() {
        "quadrants" => quadrants(&mut rng, size, margin)?,
        "blobs" => blobs(&mut rng, size),
        other => anyhow::bail!("Unknown dataset: '{other}'. Available: quadrants, blobs"),
    };
    let positives = data.labels.iter().filter(|&&y| y > 0.0).count();

    match embedding {
        Some(id) => {
            let spec = FeatureMapSpec::new(id, layers).with_data_dim(2);
            let feature_map = spec.resolve()?;
            let num_wires = match feature_map {
                FeatureMapKind::Tfim(_) => TFIM_WIRES,
                _ => 2,
            };
            let record = ModelRecord {
                feature_map: feature_map.spec(),
                weights: feature_map.initial_parameters(num_wires),
                num_wires,
                inputs: data.inputs,
                labels: data.labels,
            };
            record
                .clone()
                .into_model()
                .with_context(|| format!("Embedding '{id}' cannot hold this dataset"))?;
            record.to_file(output)?;
        }
        None => data.to_file(output)?,
    }

    eprintln!(
        "{} {} samples ({} labeled +1) written to {}",
        style("OK").green().bold(),
        size,
        positives,
        output.display()
    );
    Ok(())
}

/// Uniform points in [-1, 1]² labeled by the sign of x₀·x₁, kept at least
/// `margin` away from both axes.
fn quadrants(rng: &mut StdRng, size: usize, margin: f64) -> Result<LabeledDataset> {
    if !(0.0..1.0).contains(&margin) {
        anyhow::bail!("--margin must lie in [0, 1), got {margin}");
    }
    let mut data = LabeledDataset::default();
    while data.len() < size {
        let x: [f64; 2] = [rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)];
        if x[0].abs() < margin || x[1].abs() < margin {
            continue;
        }
        data.labels.push(if x[0] * x[1] > 0.0 { 1.0 } else { -1.0 });
        data.inputs.push(x.to_vec());
    }
    Ok(data)
}

/// Class -1 uniform in [-1, 1]²; class +1 uniform in [1, 2]² or [-2, -1]².
fn blobs(rng: &mut StdRng, size: usize) -> LabeledDataset {
    let mut data = LabeledDataset::default();
    for _ in 0..size {
        if rng.gen_bool(0.5) {
            data.inputs.push(vec![rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)]);
            data.labels.push(-1.0);
        } else {
            let range = if rng.gen_bool(0.5) { -2.0..-1.0 } else { 1.0..2.0 };
            data.inputs
                .push(vec![rng.gen_range(range.clone()), rng.gen_range(range)]);
            data.labels.push(1.0);
        }
    }
    data
}
