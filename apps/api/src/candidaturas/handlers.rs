//! Axum route handlers for `candidaturas` and their `competencias`.

use axum::{extract::State, Json};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::candidaturas::queries::{self, CandidaturaChanges, CandidaturaFilter, SORTABLE_COLUMNS};
use crate::errors::AppError;
use crate::extract::ValidQuery;
use crate::listing::{non_blank, sort_column, SortOrder};
use crate::models::candidatura::{Candidatura, Competencia};
use crate::models::Detail;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListCandidaturasQuery {
    pub estado: Option<String>,
    pub puesto: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CandidaturaIdQuery {
    pub id_candidatura: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateCandidaturaQuery {
    pub id_candidatura: Option<i32>,
    pub nombre_candidato: Option<String>,
    pub apellidos_candidato: Option<String>,
    pub email_candidato: Option<String>,
    pub telefono: Option<String>,
    pub puesto: Option<String>,
    pub estado: Option<String>,
    pub fecha_candidatura: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct CandidaturasResponse {
    pub candidaturas: Vec<Candidatura>,
}

#[derive(Debug, Serialize)]
pub struct CompetenciasResponse {
    pub competencias: Vec<Competencia>,
}

impl ListCandidaturasQuery {
    fn into_filter(self) -> Result<CandidaturaFilter, AppError> {
        if self.limit.is_some_and(|l| l < 0) || self.offset.is_some_and(|o| o < 0) {
            return Err(AppError::Validation(
                "limit and offset must not be negative".to_string(),
            ));
        }
        Ok(CandidaturaFilter {
            estado: non_blank(self.estado.as_deref()).map(String::from),
            puesto: non_blank(self.puesto.as_deref()).map(String::from),
            search: non_blank(self.search.as_deref()).map(String::from),
            sort_by: sort_column(self.sort_by.as_deref(), SORTABLE_COLUMNS)?,
            order: SortOrder::parse(self.order.as_deref())?,
            limit: self.limit,
            offset: self.offset,
        })
    }
}

impl UpdateCandidaturaQuery {
    fn into_parts(self) -> Result<(i32, CandidaturaChanges), AppError> {
        let id = require_id(self.id_candidatura)?;
        let changes = CandidaturaChanges {
            nombre_candidato: self.nombre_candidato,
            apellidos_candidato: self.apellidos_candidato,
            email_candidato: self.email_candidato,
            telefono: self.telefono,
            puesto: self.puesto,
            estado: self.estado,
            fecha_candidatura: self.fecha_candidatura,
        };
        if changes.is_empty() {
            return Err(AppError::Validation(
                "at least one field to update is required".to_string(),
            ));
        }
        Ok((id, changes))
    }
}

pub(crate) fn require_id(id: Option<i32>) -> Result<i32, AppError> {
    id.ok_or_else(|| AppError::Validation("id_candidatura is required".to_string()))
}

/// GET /all_candidaturas
pub async fn handle_list_candidaturas(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<ListCandidaturasQuery>,
) -> Result<Json<CandidaturasResponse>, AppError> {
    let filter = params.into_filter()?;
    let candidaturas = queries::list_candidaturas(&state.db, &filter).await?;
    Ok(Json(CandidaturasResponse { candidaturas }))
}

/// GET /candidatura
pub async fn handle_get_candidatura(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<CandidaturaIdQuery>,
) -> Result<Json<Candidatura>, AppError> {
    let id = require_id(params.id_candidatura)?;
    queries::find_candidatura(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Application not found".to_string()))
}

/// PUT /update_candidatura
pub async fn handle_update_candidatura(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<UpdateCandidaturaQuery>,
) -> Result<Json<Detail>, AppError> {
    let (id, changes) = params.into_parts()?;
    if !queries::update_candidatura(&state.db, id, &changes).await? {
        return Err(AppError::NotFound("Application not found".to_string()));
    }
    Ok(Json(Detail {
        detail: "Application updated successfully",
    }))
}

/// DELETE /delete_candidatura
///
/// Removes the application's competency scores in the same transaction.
pub async fn handle_delete_candidatura(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<CandidaturaIdQuery>,
) -> Result<Json<Detail>, AppError> {
    let id = require_id(params.id_candidatura)?;
    if !queries::delete_candidatura(&state.db, id).await? {
        return Err(AppError::NotFound("Application not found".to_string()));
    }
    Ok(Json(Detail {
        detail: "Application deleted successfully",
    }))
}

/// GET /competencias
pub async fn handle_list_competencias(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<CandidaturaIdQuery>,
) -> Result<Json<CompetenciasResponse>, AppError> {
    let id = require_id(params.id_candidatura)?;
    let competencias = queries::list_competencias(&state.db, id).await?;
    Ok(Json(CompetenciasResponse { competencias }))
}
