//! Reference-subset selection for one class.

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use fidelis_embed::ValidationError;

/// How references are drawn from a class.
#[derive(Debug, Clone)]
pub enum ClassSampler {
    /// Every sample, once. Models an infinite-shot measurement.
    Full,
    /// `count` uniform draws with replacement.
    Uniform {
        /// Number of draws.
        count: usize,
    },
    /// `count` weighted draws with replacement.
    Weighted {
        /// Number of draws.
        count: usize,
        /// Per-sample distribution.
        dist: WeightedIndex<f64>,
    },
}

impl ClassSampler {
    /// Validate the sampling options of one class.
    ///
    /// `probs`, when given, must have one entry per sample and form a valid
    /// distribution even if the whole class is used.
    pub fn new(
        class: &'static str,
        class_len: usize,
        sample_count: Option<usize>,
        probs: Option<&[f64]>,
    ) -> Result<Self, ValidationError> {
        if class_len == 0 {
            return Err(ValidationError::EmptyClass { class });
        }
        let dist = match probs {
            Some(p) if p.len() != class_len => {
                return Err(ValidationError::ProbabilityLength {
                    class,
                    expected: class_len,
                    got: p.len(),
                });
            }
            Some(p) => Some(WeightedIndex::new(p.iter().copied()).map_err(|e| {
                ValidationError::InvalidProbabilities {
                    class,
                    reason: e.to_string(),
                }
            })?),
            None => None,
        };

        match (sample_count, dist) {
            (Some(0), _) => Err(ValidationError::ZeroSamples),
            (None, _) => Ok(ClassSampler::Full),
            (Some(count), None) => Ok(ClassSampler::Uniform { count }),
            (Some(count), Some(dist)) => Ok(ClassSampler::Weighted { count, dist }),
        }
    }

    /// Draw the reference subset.
    pub fn draw<'a>(&self, samples: &'a [Vec<f64>], rng: &mut StdRng) -> Vec<&'a [f64]> {
        match self {
            ClassSampler::Full => samples.iter().map(Vec::as_slice).collect(),
            ClassSampler::Uniform { count } => (0..*count)
                .map(|_| samples[rng.gen_range(0..samples.len())].as_slice())
                .collect(),
            ClassSampler::Weighted { count, dist } => (0..*count)
                .map(|_| samples[dist.sample(rng)].as_slice())
                .collect(),
        }
    }
}

/// Seeded generator, or one seeded from OS entropy.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
