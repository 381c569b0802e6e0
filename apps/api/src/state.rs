use std::sync::Arc;

use sqlx::MySqlPool;

use crate::prediction::classifier::CandidateClassifier;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: MySqlPool,
    /// Scores applications for the prediction endpoints. Loaded once at startup.
    pub classifier: Arc<dyn CandidateClassifier>,
}
