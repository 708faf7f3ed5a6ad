//! Least-squares regression tree used as the weak learner.
//!
//! Nodes live in a flat arena. Children are always pushed after their
//! parent, so every child index is strictly greater than its parent's;
//! `validate` relies on that to reject cyclic or dangling persisted trees.

use serde::{Deserialize, Serialize};

use super::features::FEATURE_COUNT;
use crate::error::RiskModelError;

/// Growth limits for a single tree.
#[derive(Debug, Clone, Copy)]
pub struct TreeParams {
    pub max_depth: usize,
    pub min_samples_leaf: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone, Copy)]
struct SplitCandidate {
    feature: usize,
    threshold: f64,
    gain: f64,
}

/// A fitted regression tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

impl RegressionTree {
    /// Fit a tree to `targets` by greedy variance reduction.
    #[must_use]
    pub fn fit(features: &[[f64; FEATURE_COUNT]], targets: &[f64], params: TreeParams) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        let indices: Vec<usize> = (0..targets.len()).collect();
        tree.grow(features, targets, indices, 0, params);
        tree
    }

    fn grow(
        &mut self,
        features: &[[f64; FEATURE_COUNT]],
        targets: &[f64],
        indices: Vec<usize>,
        depth: usize,
        params: TreeParams,
    ) -> usize {
        let node_id = self.nodes.len();
        self.nodes.push(Node::Leaf {
            value: mean_of(targets, &indices),
        });

        let min_leaf = params.min_samples_leaf.max(1);
        if depth >= params.max_depth || indices.len() < 2 * min_leaf {
            return node_id;
        }
        let Some(split) = best_split(features, targets, &indices, min_leaf) else {
            return node_id;
        };

        let (left_indices, right_indices): (Vec<usize>, Vec<usize>) = indices
            .into_iter()
            .partition(|&i| features[i][split.feature] <= split.threshold);

        let left = self.grow(features, targets, left_indices, depth + 1, params);
        let right = self.grow(features, targets, right_indices, depth + 1, params);
        self.nodes[node_id] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        node_id
    }

    /// Walk the tree for one row. A malformed tree yields `0.0`.
    #[must_use]
    pub fn predict(&self, row: &[f64; FEATURE_COUNT]) -> f64 {
        let mut idx = 0;
        loop {
            match self.nodes.get(idx) {
                Some(Node::Leaf { value }) => return *value,
                Some(Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = row.get(*feature).copied().unwrap_or(0.0);
                    idx = if value <= *threshold { *left } else { *right };
                }
                None => return 0.0,
            }
        }
    }

    /// Number of nodes (leaves and splits).
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Reject empty trees, out-of-range features, and child links that do
    /// not point strictly forward.
    pub(crate) fn validate(&self) -> Result<(), RiskModelError> {
        if self.nodes.is_empty() {
            return Err(RiskModelError::InvalidModel("empty tree".into()));
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Leaf { value } if !value.is_finite() => {
                    return Err(RiskModelError::InvalidModel(format!(
                        "non-finite leaf at node {idx}"
                    )));
                }
                Node::Leaf { .. } => {}
                Node::Split {
                    feature,
                    left,
                    right,
                    ..
                } => {
                    if *feature >= FEATURE_COUNT {
                        return Err(RiskModelError::InvalidModel(format!(
                            "feature {feature} out of range at node {idx}"
                        )));
                    }
                    for child in [*left, *right] {
                        if child <= idx || child >= self.nodes.len() {
                            return Err(RiskModelError::InvalidModel(format!(
                                "bad child link {child} at node {idx}"
                            )));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean_of(targets: &[f64], indices: &[usize]) -> f64 {
    if indices.is_empty() {
        return 0.0;
    }
    indices.iter().map(|&i| targets[i]).sum::<f64>() / indices.len() as f64
}

/// Find the split with the largest reduction in squared error.
#[allow(clippy::cast_precision_loss)]
fn best_split(
    features: &[[f64; FEATURE_COUNT]],
    targets: &[f64],
    indices: &[usize],
    min_leaf: usize,
) -> Option<SplitCandidate> {
    if indices.len() < 2 {
        return None;
    }
    let total: f64 = indices.iter().map(|&i| targets[i]).sum();
    let parent_score = total * total / indices.len() as f64;

    let mut best: Option<SplitCandidate> = None;
    let mut order = indices.to_vec();
    for feature in 0..FEATURE_COUNT {
        order.sort_by(|&a, &b| features[a][feature].total_cmp(&features[b][feature]));

        let mut left_sum = 0.0;
        for pos in 0..order.len() - 1 {
            left_sum += targets[order[pos]];
            let left_n = pos + 1;
            let right_n = order.len() - left_n;
            if left_n < min_leaf || right_n < min_leaf {
                continue;
            }
            let current = features[order[pos]][feature];
            let next = features[order[pos + 1]][feature];
            if next <= current {
                continue;
            }

            let right_sum = total - left_sum;
            let split_score =
                left_sum * left_sum / left_n as f64 + right_sum * right_sum / right_n as f64;
            let gain = split_score - parent_score;
            if gain > best.map_or(1e-12, |b| b.gain) {
                best = Some(SplitCandidate {
                    feature,
                    threshold: (current + next) / 2.0,
                    gain,
                });
            }
        }
    }
    best
}
