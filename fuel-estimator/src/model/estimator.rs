//! Regression estimators that operate on encoded feature vectors.

use serde::{Deserialize, Serialize};

use crate::Error;

/// A node in a regression tree.
///
/// Split nodes send a sample to `left` when `x[feature] < threshold`, and to
/// `right` otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// A single regression tree stored as a flat array of nodes, rooted at index
/// 0. Children always come after their parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    fn validate(&self, width: usize) -> Result<(), Error> {
        if self.nodes.is_empty() {
            return Err(Error::InvalidArtifact("tree has no nodes".to_string()));
        }
        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= width {
                        return Err(Error::InvalidArtifact(format!(
                            "node {} splits on feature {}, but only {} features are encoded",
                            i, feature, width
                        )));
                    }
                    if threshold.is_nan() {
                        return Err(Error::InvalidArtifact(format!(
                            "node {} has a NaN threshold",
                            i
                        )));
                    }
                    for child in [*left, *right] {
                        if child <= i || child >= self.nodes.len() {
                            return Err(Error::InvalidArtifact(format!(
                                "node {} has out-of-order child {}",
                                i, child
                            )));
                        }
                    }
                }
                Node::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(Error::InvalidArtifact(format!(
                            "leaf {} has a non-finite value",
                            i
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    fn predict(&self, features: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if features[*feature] < *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

/// The final stage of a model pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Estimator {
    /// `intercept + coefficients · x`
    Linear {
        intercept: f64,
        coefficients: Vec<f64>,
    },
    /// Additive ensemble of regression trees: `base_score + Σ tree(x)`.
    TreeEnsemble {
        #[serde(default)]
        base_score: f64,
        trees: Vec<Tree>,
    },
}

impl Estimator {
    /// Check that the estimator can consume feature vectors of the given
    /// width. Once this passes, [`Estimator::predict`] cannot index out of
    /// bounds or loop.
    pub fn validate(&self, width: usize) -> Result<(), Error> {
        match self {
            Self::Linear {
                intercept,
                coefficients,
            } => {
                if coefficients.len() != width {
                    return Err(Error::InvalidArtifact(format!(
                        "linear estimator has {} coefficients, but {} features are encoded",
                        coefficients.len(),
                        width
                    )));
                }
                if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
                    return Err(Error::InvalidArtifact(
                        "linear estimator has non-finite weights".to_string(),
                    ));
                }
                Ok(())
            }
            Self::TreeEnsemble { base_score, trees } => {
                if !base_score.is_finite() {
                    return Err(Error::InvalidArtifact(
                        "tree ensemble has a non-finite base score".to_string(),
                    ));
                }
                trees.iter().try_for_each(|tree| tree.validate(width))
            }
        }
    }

    /// Evaluate the estimator on an encoded, validated feature vector.
    pub fn predict(&self, features: &[f64]) -> f64 {
        match self {
            Self::Linear {
                intercept,
                coefficients,
            } => {
                intercept
                    + coefficients
                        .iter()
                        .zip(features)
                        .map(|(c, x)| c * x)
                        .sum::<f64>()
            }
            Self::TreeEnsemble { base_score, trees } => {
                base_score + trees.iter().map(|t| t.predict(features)).sum::<f64>()
            }
        }
    }
}
