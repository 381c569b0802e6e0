//! Random forest inference over trees exported from a fitted
//! scikit-learn `RandomForestClassifier`.
//!
//! The model file is JSON:
//!
//! ```json
//! {
//!   "classes": [0, 1],
//!   "n_features": 8,
//!   "estimators": [
//!     {
//!       "children_left":  [1, -1, -1],
//!       "children_right": [2, -1, -1],
//!       "feature":        [3, -2, -2],
//!       "threshold":      [5.5, -2.0, -2.0],
//!       "value":          [[10, 10], [9, 1], [1, 9]]
//!     }
//!   ]
//! }
//! ```
//!
//! Each estimator uses the flat node arrays of `tree_`: a node is a leaf when
//! `children_left == -1`, and a sample goes left when
//! `x[feature] <= threshold`. `value` holds one class distribution per node
//! (counts or fractions; each leaf is normalized before averaging).

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

const LEAF: i64 = -1;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("could not read model file: {0}")]
    Io(#[from] std::io::Error),

    #[error("model file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid model: {0}")]
    Invalid(String),

    #[error("expected {expected} features, got {actual}")]
    FeatureCount { expected: usize, actual: usize },
}

#[derive(Debug, Clone, Deserialize)]
pub struct DecisionTree {
    children_left: Vec<i64>,
    children_right: Vec<i64>,
    feature: Vec<i64>,
    threshold: Vec<f64>,
    value: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RandomForest {
    classes: Vec<f64>,
    n_features: usize,
    estimators: Vec<DecisionTree>,
}

impl DecisionTree {
    fn validate(&self, index: usize, n_features: usize, n_classes: usize) -> Result<(), ModelError> {
        let invalid = |msg: String| ModelError::Invalid(format!("estimator {index}: {msg}"));
        let n_nodes = self.children_left.len();

        if n_nodes == 0 {
            return Err(invalid("tree has no nodes".to_string()));
        }
        if [
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
            self.value.len(),
        ]
        .iter()
        .any(|&len| len != n_nodes)
        {
            return Err(invalid("node arrays differ in length".to_string()));
        }

        for node in 0..n_nodes {
            let (left, right) = (self.children_left[node], self.children_right[node]);
            if left == LEAF {
                let dist = &self.value[node];
                if dist.len() != n_classes {
                    return Err(invalid(format!(
                        "leaf {node} has {} class weights, expected {n_classes}",
                        dist.len()
                    )));
                }
                if dist.iter().any(|w| !w.is_finite() || *w < 0.0) || dist.iter().sum::<f64>() <= 0.0
                {
                    return Err(invalid(format!("leaf {node} has no usable class weights")));
                }
                continue;
            }
            // Children always follow their parent, so traversal terminates.
            for child in [left, right] {
                if child <= node as i64 || child >= n_nodes as i64 {
                    return Err(invalid(format!("node {node} has child {child} out of range")));
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature as usize >= n_features {
                return Err(invalid(format!("node {node} splits on unknown feature {feature}")));
            }
        }
        Ok(())
    }

    /// Normalized class distribution of the leaf reached by `x`.
    fn leaf_distribution(&self, x: &[f64]) -> Vec<f64> {
        let mut node = 0usize;
        while self.children_left[node] != LEAF {
            // Inputs are compared at single precision, as they were during fitting.
            let value = f64::from(x[self.feature[node] as usize] as f32);
            node = if value <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        let dist = &self.value[node];
        let total: f64 = dist.iter().sum();
        dist.iter().map(|w| w / total).collect()
    }
}

impl RandomForest {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ModelError> {
        let forest: RandomForest = serde_json::from_str(raw)?;
        forest.validate()?;
        Ok(forest)
    }

    fn validate(&self) -> Result<(), ModelError> {
        if self.classes.is_empty() {
            return Err(ModelError::Invalid("no classes".to_string()));
        }
        if self.estimators.is_empty() {
            return Err(ModelError::Invalid("no estimators".to_string()));
        }
        for (index, tree) in self.estimators.iter().enumerate() {
            tree.validate(index, self.n_features, self.classes.len())?;
        }
        Ok(())
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_estimators(&self) -> usize {
        self.estimators.len()
    }

    /// Mean of the per-tree leaf distributions, one probability per class.
    pub fn predict_proba(&self, x: &[f64]) -> Result<Vec<f64>, ModelError> {
        if x.len() != self.n_features {
            return Err(ModelError::FeatureCount {
                expected: self.n_features,
                actual: x.len(),
            });
        }
        let mut proba = vec![0.0; self.classes.len()];
        for tree in &self.estimators {
            for (acc, p) in proba.iter_mut().zip(tree.leaf_distribution(x)) {
                *acc += p;
            }
        }
        let n = self.estimators.len() as f64;
        proba.iter_mut().for_each(|p| *p /= n);
        Ok(proba)
    }

    /// Label of the most probable class; ties go to the lowest class index.
    pub fn predict(&self, x: &[f64]) -> Result<f64, ModelError> {
        let proba = self.predict_proba(x)?;
        let mut best = 0;
        for (i, p) in proba.iter().enumerate().skip(1) {
            if *p > proba[best] {
                best = i;
            }
        }
        Ok(self.classes[best])
    }
}
