//! The overlap-estimator abstraction and its three strategies.

use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use fidelis_embed::ValidationError;

use crate::embedding::Embedding;
use crate::error::KernelResult;
use crate::exact::ExactOverlap;
use crate::swap_test::SwapTestOverlap;
use crate::zero_projection::ZeroProjectionOverlap;

/// Which overlap strategy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimatorKind {
    /// Classical inner product of two statevectors.
    #[default]
    Exact,
    /// Zero-state projection after forward and adjoint embedding.
    Fast,
    /// Swap test on two registers and an ancilla.
    Circuit,
}

impl EstimatorKind {
    /// Instantiate the strategy.
    pub fn estimator(self) -> Box<dyn OverlapEstimator> {
        match self {
            EstimatorKind::Exact => Box::new(ExactOverlap),
            EstimatorKind::Fast => Box::new(ZeroProjectionOverlap),
            EstimatorKind::Circuit => Box::new(SwapTestOverlap),
        }
    }

    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            EstimatorKind::Exact => "exact",
            EstimatorKind::Fast => "fast",
            EstimatorKind::Circuit => "circuit",
        }
    }
}

impl fmt::Display for EstimatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EstimatorKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exact" => Ok(EstimatorKind::Exact),
            "fast" | "zero-projection" => Ok(EstimatorKind::Fast),
            "circuit" | "swap-test" => Ok(EstimatorKind::Circuit),
            _ => Err(ValidationError::UnknownEstimator(s.to_string())),
        }
    }
}

/// Estimates |⟨φ(query)|φ(reference)⟩|² for an embedding.
pub trait OverlapEstimator: Send + Sync {
    /// The strategy implemented.
    fn kind(&self) -> EstimatorKind;

    /// Register width needed for an embedding on `num_wires` wires.
    fn required_qubits(&self, num_wires: usize) -> usize;

    /// Overlap of one query with one reference sample.
    fn estimate(&self, query: &[f64], reference: &[f64], embedding: &Embedding<'_>) -> KernelResult<f64>;

    /// Arithmetic mean of the overlaps of `query` with every reference.
    ///
    /// References are evaluated in parallel; the reduction runs in input
    /// order so the result does not depend on scheduling.
    fn mean_overlap(
        &self,
        query: &[f64],
        references: &[&[f64]],
        embedding: &Embedding<'_>,
    ) -> KernelResult<f64> {
        let overlaps = references
            .par_iter()
            .map(|reference| self.estimate(query, reference, embedding))
            .collect::<KernelResult<Vec<f64>>>()?;
        mean(&overlaps)
    }
}

/// Mean of a non-empty slice.
pub(crate) fn mean(values: &[f64]) -> KernelResult<f64> {
    if values.is_empty() {
        return Err(ValidationError::ZeroSamples.into());
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Query and reference must have the same dimension.
pub(crate) fn check_dimensions(query: &[f64], reference: &[f64]) -> KernelResult<()> {
    if query.len() != reference.len() {
        return Err(ValidationError::DimensionMismatch {
            expected: reference.len(),
            got: query.len(),
        }
        .into());
    }
    Ok(())
}
