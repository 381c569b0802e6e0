use axum::{extract::State, Json};
use serde::Serialize;
use tracing::info;

use crate::candidaturas::handlers::{require_id, CandidaturaIdQuery};
use crate::candidaturas::queries::list_competencias;
use crate::errors::AppError;
use crate::extract::ValidQuery;
use crate::models::candidatura::Competencia;
use crate::prediction::classifier::CandidateClassifier;
use crate::prediction::features::{feature_vector, Verdict};
use crate::state::AppState;

const NO_SCORES: &str = "No se encontraron competencias para la candidatura proporcionada.";

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub prediction: Verdict,
}

/// GET /predict_bucket (also GET /predict)
///
/// Scores an application from its stored competency marks.
pub async fn handle_predict(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<CandidaturaIdQuery>,
) -> Result<Json<PredictionResponse>, AppError> {
    let id = require_id(params.id_candidatura)?;

    let competencias = list_competencias(&state.db, id).await?;
    let prediction = score_application(state.classifier.as_ref(), &competencias).await?;

    info!("Application {id} classified as {prediction:?}");
    Ok(Json(PredictionResponse { prediction }))
}

/// Feature vector → classifier → verdict. An application without any stored
/// score is a 404.
pub async fn score_application(
    classifier: &dyn CandidateClassifier,
    competencias: &[Competencia],
) -> Result<Verdict, AppError> {
    if competencias.is_empty() {
        return Err(AppError::NotFound(NO_SCORES.to_string()));
    }

    let features = feature_vector(competencias);
    let class = classifier.classify(&features).await?;
    Ok(Verdict::from_class(class))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::response::IntoResponse;
    use tower::ServiceExt;

    use crate::prediction::classifier::UnavailableClassifier;
    use crate::prediction::forest::tests::{forest_json, stump};
    use crate::prediction::forest::RandomForest;
    use crate::test_support::{insert_competencia, mysql_pool};

    /// Records the vector it was asked about and answers a fixed class.
    struct Recording {
        class: f64,
        seen: Mutex<Vec<f64>>,
    }

    #[async_trait]
    impl CandidateClassifier for Recording {
        async fn classify(&self, features: &[f64]) -> Result<f64, AppError> {
            *self.seen.lock().unwrap() = features.to_vec();
            Ok(self.class)
        }
    }

    fn score(name: &str, nota: f64) -> Competencia {
        Competencia {
            id_candidatura: 7,
            nombre_competencia: name.to_string(),
            nota: Some(nota),
        }
    }

    /// Admits when Profesionalidad > 6.
    fn professionalism_forest() -> RandomForest {
        RandomForest::from_json(&forest_json(
            vec![stump(0, 6.0, [4.0, 1.0], [0.0, 5.0])],
            8,
        ))
        .unwrap()
    }

    #[tokio::test]
    async fn test_no_scores_is_not_found_with_message() {
        let classifier = Recording {
            class: 1.0,
            seen: Mutex::new(Vec::new()),
        };
        let err = score_application(&classifier, &[]).await.unwrap_err();
        assert!(matches!(&err, AppError::NotFound(msg) if msg == NO_SCORES));
        assert!(classifier.seen.lock().unwrap().is_empty());

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body["error"]["message"],
            "No se encontraron competencias para la candidatura proporcionada."
        );
    }

    #[tokio::test]
    async fn test_scores_reach_classifier_in_model_order() {
        let classifier = Recording {
            class: 0.0,
            seen: Mutex::new(Vec::new()),
        };
        let competencias = [
            score("Iniciativa", 8.0),
            score("Dominio", 3.0),
            score("Desconocida", 10.0),
            score("Profesionalidad", 5.0),
        ];

        let verdict = score_application(&classifier, &competencias).await.unwrap();
        assert_eq!(verdict, Verdict::Rechazado);
        assert_eq!(
            *classifier.seen.lock().unwrap(),
            vec![5.0, 3.0, 0.0, 0.0, 0.0, 0.0, 0.0, 8.0]
        );
    }

    #[tokio::test]
    async fn test_forest_verdict_end_to_end() {
        let forest = professionalism_forest();

        let strong = [score("Profesionalidad", 9.0), score("Dominio", 2.0)];
        assert_eq!(
            score_application(&forest, &strong).await.unwrap(),
            Verdict::Admitido
        );

        let weak = [score("Profesionalidad", 6.0), score("Dominio", 10.0)];
        assert_eq!(
            score_application(&forest, &weak).await.unwrap(),
            Verdict::Rechazado
        );
    }

    #[tokio::test]
    async fn test_missing_model_is_service_unavailable() {
        let classifier = UnavailableClassifier {
            model_path: "model.json".to_string(),
        };
        let err = score_application(&classifier, &[score("Dominio", 5.0)])
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_db_predict_endpoint() {
        let Some(pool) = mysql_pool().await else {
            return;
        };
        insert_competencia(&pool, 11, "Profesionalidad", 9).await;
        insert_competencia(&pool, 11, "Liderazgo", 2).await;

        let app = crate::routes::build_router(AppState {
            db: pool,
            classifier: Arc::new(professionalism_forest()),
        });

        let response = app
            .clone()
            .oneshot(
                Request::get("/predict_bucket?id_candidatura=11")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["prediction"], "Admitido");

        let response = app
            .oneshot(
                Request::get("/predict?id_candidatura=12")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
