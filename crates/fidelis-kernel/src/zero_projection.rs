//! Zero-projection ("fast") overlap.
//!
//! For `|φ(x)⟩ = U(x, w)|0⟩` the overlap is
//! `|⟨0|U(q, w)† U(r, w)|0⟩|²`, the probability of the all-zero outcome after
//! running the reference forward and the query backward. The backward tape is
//! recorded by encoding `-q` with `-w` and replaying it in reverse, which is
//! `U(q, w)†` only when every gate inverts by negation. Both that capability
//! and each recorded gate are checked before any state is allocated.

use rayon::prelude::*;

use fidelis_ir::{Circuit, IrError, QubitId};
use fidelis_sim::{Observable, Statevector};

use crate::embedding::Embedding;
use crate::error::{FidelityError, KernelResult};
use crate::estimator::{EstimatorKind, OverlapEstimator, check_dimensions, mean};

/// Overlap as ⟨0…0|ψ⟩ after the forward and adjoint embeddings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroProjectionOverlap;

impl ZeroProjectionOverlap {
    /// Record the negated embedding of `query`, to be appended in reverse.
    fn adjoint_tape(query: &[f64], embedding: &Embedding<'_>) -> KernelResult<Circuit> {
        let feature_map = embedding.feature_map();
        if !feature_map.inverts_by_negation() {
            return Err(FidelityError::PreconditionViolation {
                embedding: feature_map.name(),
                reason: "embedding does not declare negation-invertible gates".to_string(),
            });
        }

        let neg_query: Vec<f64> = query.iter().map(|v| -v).collect();
        let neg_weights: Vec<f64> = embedding.weights().iter().map(|w| -w).collect();
        let width = embedding.width();
        let mut tape = Circuit::with_size("adjoint", width);
        feature_map.encode(&mut tape, &neg_query, &neg_weights, &QubitId::range(0, width))?;

        if let Some(bad) = tape
            .instructions()
            .iter()
            .find(|inst| !inst.gate.inverts_by_negation())
        {
            return Err(FidelityError::PreconditionViolation {
                embedding: feature_map.name(),
                reason: format!("gate '{}' is not inverted by negating its angles", bad.name()),
            });
        }
        Ok(tape)
    }

    fn project(reference: &[f64], adjoint: &Circuit, embedding: &Embedding<'_>) -> KernelResult<f64> {
        let mut circuit = embedding.circuit(reference)?;
        circuit
            .append_negation_inverse(adjoint)
            .map_err(|e| match e {
                IrError::NotNegationInvertible { gate_name } => {
                    FidelityError::PreconditionViolation {
                        embedding: embedding.feature_map().name(),
                        reason: format!("gate '{gate_name}' is not inverted by negating its angles"),
                    }
                }
                other => FidelityError::Ir(other),
            })?;
        let state = Statevector::from_circuit(&circuit)?;
        Ok(state.expectation(&Observable::ZeroProjector)?.clamp(0.0, 1.0))
    }
}

impl OverlapEstimator for ZeroProjectionOverlap {
    fn kind(&self) -> EstimatorKind {
        EstimatorKind::Fast
    }

    fn required_qubits(&self, num_wires: usize) -> usize {
        num_wires
    }

    fn estimate(&self, query: &[f64], reference: &[f64], embedding: &Embedding<'_>) -> KernelResult<f64> {
        check_dimensions(query, reference)?;
        let adjoint = Self::adjoint_tape(query, embedding)?;
        Self::project(reference, &adjoint, embedding)
    }

    fn mean_overlap(
        &self,
        query: &[f64],
        references: &[&[f64]],
        embedding: &Embedding<'_>,
    ) -> KernelResult<f64> {
        for reference in references {
            check_dimensions(query, reference)?;
        }
        let adjoint = Self::adjoint_tape(query, embedding)?;
        let overlaps = references
            .par_iter()
            .map(|reference| Self::project(reference, &adjoint, embedding))
            .collect::<KernelResult<Vec<f64>>>()?;
        mean(&overlaps)
    }
}
