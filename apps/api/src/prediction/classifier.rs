//! Classifier seam for the prediction endpoint.
//!
//! `AppState` holds an `Arc<dyn CandidateClassifier>`. The forest loaded from
//! `MODEL_PATH` is the default; `UnavailableClassifier` stands in when no
//! model file exists so the CRUD endpoints still serve.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::prediction::features::COMPETENCIAS;
use crate::prediction::forest::RandomForest;

#[async_trait]
pub trait CandidateClassifier: Send + Sync {
    /// Class label for one feature vector ordered as [`COMPETENCIAS`].
    async fn classify(&self, features: &[f64]) -> Result<f64, AppError>;
}

#[async_trait]
impl CandidateClassifier for RandomForest {
    async fn classify(&self, features: &[f64]) -> Result<f64, AppError> {
        self.predict(features)
            .map_err(|e| AppError::Prediction(e.to_string()))
    }
}

pub struct UnavailableClassifier {
    pub model_path: String,
}

#[async_trait]
impl CandidateClassifier for UnavailableClassifier {
    async fn classify(&self, _features: &[f64]) -> Result<f64, AppError> {
        Err(AppError::ModelUnavailable(format!(
            "no classifier loaded from '{}'",
            self.model_path
        )))
    }
}

/// Loads the forest at `path`. A missing file yields `UnavailableClassifier`;
/// a present but invalid one is a startup error.
pub fn load_classifier(path: &str) -> anyhow::Result<Arc<dyn CandidateClassifier>> {
    if !Path::new(path).exists() {
        warn!("Model file '{path}' not found; prediction endpoints will return 503");
        return Ok(Arc::new(UnavailableClassifier {
            model_path: path.to_string(),
        }));
    }

    let forest = RandomForest::from_path(path)
        .with_context(|| format!("failed to load classifier from '{path}'"))?;
    if forest.n_features() != COMPETENCIAS.len() {
        anyhow::bail!(
            "classifier at '{path}' expects {} features, the competency vector has {}",
            forest.n_features(),
            COMPETENCIAS.len()
        );
    }

    info!(
        "Classifier loaded from '{path}' ({} trees)",
        forest.n_estimators()
    );
    Ok(Arc::new(forest))
}
