use axum::{extract::State, Json};
use serde::Serialize;

use crate::db::list_tables;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TablesResponse {
    pub tables: Vec<String>,
}

/// GET /tables
/// Lists the tables of the connected schema.
pub async fn tables_handler(
    State(state): State<AppState>,
) -> Result<Json<TablesResponse>, AppError> {
    let tables = list_tables(&state.db).await?;
    Ok(Json(TablesResponse { tables }))
}
