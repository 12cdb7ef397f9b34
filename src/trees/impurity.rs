//! Impurity criteria
use crate::data::dataset::WholeNumber;
use crate::error::TreeError;
use nalgebra::DVector;
use std::collections::HashMap;
use std::str::FromStr;

/// Criterion measuring the class disorder of a set of labels.
///
/// Both criteria are non-negative and evaluate to 0 exactly when all labels
/// are identical. The criterion is chosen by name at model construction,
/// unknown names are rejected before any data is seen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Impurity {
    /// -Σ p·log2(p) over the empirical class probabilities.
    Entropy,
    /// 1 - Σ p² over the empirical class probabilities.
    Gini,
}

impl FromStr for Impurity {
    type Err = TreeError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "entropy" => Ok(Self::Entropy),
            "gini" => Ok(Self::Gini),
            other => Err(TreeError::InvalidConfiguration(format!(
                "Unknown impurity criterion '{}', expected 'entropy' or 'gini'.",
                other
            ))),
        }
    }
}

impl Impurity {
    /// Measures the disorder of a non-empty label vector.
    pub fn measure<YT: WholeNumber>(&self, y: &DVector<YT>) -> f64 {
        let num_samples = y.len() as f64;
        let counts = class_counts(y);

        match self {
            Self::Entropy => counts
                .iter()
                .map(|&(_, count)| {
                    let p = count as f64 / num_samples;
                    -p * p.log2()
                })
                .sum(),
            Self::Gini => {
                1.0 - counts
                    .iter()
                    .map(|&(_, count)| {
                        let p = count as f64 / num_samples;
                        p * p
                    })
                    .sum::<f64>()
            }
        }
    }
}

/// Counts the occurrences of each distinct label, ascending by label so
/// every accumulation over the classes is deterministic.
pub(crate) fn class_counts<YT: WholeNumber>(y: &DVector<YT>) -> Vec<(YT, usize)> {
    let mut counts = HashMap::new();
    for label in y.iter() {
        *counts.entry(*label).or_insert(0usize) += 1;
    }

    let mut counts = counts.into_iter().collect::<Vec<_>>();
    counts.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    counts
}
