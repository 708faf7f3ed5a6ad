//! Synthetic training data for the bootstrap model.
//!
//! Used when no persisted model exists. Features are uniform in `[0, 10)`;
//! the target is a fixed linear blend in which the mitigation signal
//! (feature 7) dominates downward, clipped to `[0, 10]`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::features::{FEATURE_COUNT, MITIGATION_FEATURE};

/// Paired feature rows and targets.
#[derive(Debug, Clone)]
pub struct SyntheticDataset {
    pub features: Vec<[f64; FEATURE_COUNT]>,
    pub targets: Vec<f64>,
}

/// `0.5·f0 + 0.4·f3 + 0.2·f1 − 1.5·f7`, clipped to `[0, 10]`.
#[must_use]
pub fn synthetic_target(row: &[f64; FEATURE_COUNT]) -> f64 {
    (0.5 * row[0] + 0.4 * row[3] + 0.2 * row[1] - 1.5 * row[MITIGATION_FEATURE]).clamp(0.0, 10.0)
}

/// Generate `sample_count` rows from a seeded RNG.
#[must_use]
pub fn generate(sample_count: usize, seed: u64) -> SyntheticDataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let features: Vec<[f64; FEATURE_COUNT]> = (0..sample_count)
        .map(|_| std::array::from_fn(|_| rng.gen_range(0.0..10.0)))
        .collect();
    let targets = features.iter().map(synthetic_target).collect();
    SyntheticDataset { features, targets }
}
