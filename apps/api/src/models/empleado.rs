use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of `empleados`. The `password` column is never selected into it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Empleado {
    pub email_empleado: String,
    pub nombre_empleado: Option<String>,
    pub apellidos_empleado: Option<String>,
    pub rol: Option<String>,
    pub is_logged: Option<bool>,
}

/// Column list matching [`Empleado`].
pub const EMPLEADO_COLUMNS: &str =
    "email_empleado, nombre_empleado, apellidos_empleado, rol, is_logged";
