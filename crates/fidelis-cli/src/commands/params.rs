//! Params command implementation.

use anyhow::Result;
use serde::Serialize;

use fidelis_embed::{FeatureMap, FeatureMapSpec};
use fidelis_kernel::MAX_QUBITS;

#[derive(Serialize)]
struct ParamsReport {
    feature_map: FeatureMapSpec,
    num_wires: usize,
    param_count: usize,
    initial_parameters: Vec<f64>,
}

/// Execute the params command.
pub fn execute(
    embedding: &str,
    wires: usize,
    layers: usize,
    variant: Option<u32>,
    data_dim: Option<usize>,
) -> Result<()> {
    if wires > MAX_QUBITS as usize {
        anyhow::bail!("At most {MAX_QUBITS} wires can be simulated, got {wires}");
    }

    let mut spec = FeatureMapSpec::new(embedding, layers);
    spec.variant = variant;
    spec.data_dim = data_dim;

    let feature_map = spec.resolve()?;
    let report = ParamsReport {
        feature_map: feature_map.spec(),
        num_wires: wires,
        param_count: feature_map.param_count(wires),
        initial_parameters: feature_map.initial_parameters(wires),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
