//! Axum route handlers for the `empleados` table.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::empleados::queries::{self, EmpleadoChanges, EmpleadoFilter, SORTABLE_COLUMNS};
use crate::errors::AppError;
use crate::extract::{lenient_bool, ValidQuery};
use crate::listing::{non_blank, sort_column, SortOrder};
use crate::models::empleado::Empleado;
use crate::models::Detail;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListEmpleadosQuery {
    pub rol: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_logged: Option<bool>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEmpleadoQuery {
    pub email: Option<String>,
    pub nombre_empleado: Option<String>,
    pub apellidos_empleado: Option<String>,
    pub password: Option<String>,
    pub rol: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_logged: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct EmpleadosResponse {
    pub empleados: Vec<Empleado>,
}

impl ListEmpleadosQuery {
    fn into_filter(self) -> Result<EmpleadoFilter, AppError> {
        Ok(EmpleadoFilter {
            sort_by: sort_column(self.sort_by.as_deref(), SORTABLE_COLUMNS)?,
            order: SortOrder::parse(self.order.as_deref())?,
            rol: non_blank(self.rol.as_deref()).map(String::from),
            is_logged: self.is_logged,
            search: non_blank(self.search.as_deref()).map(String::from),
        })
    }
}

impl UpdateEmpleadoQuery {
    fn into_parts(self) -> Result<(String, EmpleadoChanges), AppError> {
        let email = require_email(self.email.as_deref())?;
        let changes = EmpleadoChanges {
            nombre_empleado: self.nombre_empleado,
            apellidos_empleado: self.apellidos_empleado,
            password: self.password,
            rol: self.rol,
            is_logged: self.is_logged,
        };
        if changes.is_empty() {
            return Err(AppError::Validation(
                "at least one field to update is required".to_string(),
            ));
        }
        Ok((email, changes))
    }
}

fn require_email(raw: Option<&str>) -> Result<String, AppError> {
    non_blank(raw)
        .map(String::from)
        .ok_or_else(|| AppError::Validation("email is required".to_string()))
}

/// GET /all_empleados
pub async fn handle_list_empleados(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<ListEmpleadosQuery>,
) -> Result<Json<EmpleadosResponse>, AppError> {
    let filter = params.into_filter()?;
    let empleados = queries::list_empleados(&state.db, &filter).await?;
    Ok(Json(EmpleadosResponse { empleados }))
}

/// GET /empleado
pub async fn handle_get_empleado(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<EmailQuery>,
) -> Result<Json<Empleado>, AppError> {
    let email = require_email(params.email.as_deref())?;
    queries::find_empleado(&state.db, &email)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))
}

/// PUT /update_empleado
///
/// Every field is optional; omitted fields keep their stored value.
pub async fn handle_update_empleado(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<UpdateEmpleadoQuery>,
) -> Result<Json<Detail>, AppError> {
    let (email, changes) = params.into_parts()?;
    if !queries::update_empleado(&state.db, &email, &changes).await? {
        return Err(AppError::NotFound("Employee not found".to_string()));
    }
    Ok(Json(Detail {
        detail: "Employee updated successfully",
    }))
}

/// DELETE /delete_empleado
pub async fn handle_delete_empleado(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<EmailQuery>,
) -> Result<Json<Detail>, AppError> {
    let email = require_email(params.email.as_deref())?;
    if !queries::delete_empleado(&state.db, &email).await? {
        return Err(AppError::NotFound("Employee not found".to_string()));
    }
    Ok(Json(Detail {
        detail: "Employee deleted successfully",
    }))
}
