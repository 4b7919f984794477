//! Exact overlap from two independently prepared statevectors.

use rayon::prelude::*;
use tracing::trace;

use crate::embedding::Embedding;
use crate::error::KernelResult;
use crate::estimator::{EstimatorKind, OverlapEstimator, check_dimensions, mean};

/// |⟨φ(a)|φ(b)⟩|² computed from the full amplitude vectors.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactOverlap;

impl OverlapEstimator for ExactOverlap {
    fn kind(&self) -> EstimatorKind {
        EstimatorKind::Exact
    }

    fn required_qubits(&self, num_wires: usize) -> usize {
        num_wires
    }

    fn estimate(&self, query: &[f64], reference: &[f64], embedding: &Embedding<'_>) -> KernelResult<f64> {
        check_dimensions(query, reference)?;
        let a = embedding.state(query)?;
        let b = embedding.state(reference)?;
        Ok(a.fidelity(&b)?)
    }

    fn mean_overlap(
        &self,
        query: &[f64],
        references: &[&[f64]],
        embedding: &Embedding<'_>,
    ) -> KernelResult<f64> {
        // the query state is shared by every pair
        let query_state = embedding.state(query)?;
        trace!(references = references.len(), "exact mean overlap");

        let overlaps = references
            .par_iter()
            .map(|reference| -> KernelResult<f64> {
                check_dimensions(query, reference)?;
                let state = embedding.state(reference)?;
                Ok(query_state.fidelity(&state)?)
            })
            .collect::<KernelResult<Vec<f64>>>()?;
        mean(&overlaps)
    }
}
