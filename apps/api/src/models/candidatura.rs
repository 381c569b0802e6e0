use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Candidatura {
    pub id_candidatura: i32,
    pub nombre_candidato: Option<String>,
    pub apellidos_candidato: Option<String>,
    pub email_candidato: Option<String>,
    pub telefono: Option<String>,
    pub puesto: Option<String>,
    pub estado: Option<String>,
    pub fecha_candidatura: Option<NaiveDate>,
}

pub const CANDIDATURA_COLUMNS: &str = "id_candidatura, nombre_candidato, apellidos_candidato, \
    email_candidato, telefono, puesto, estado, fecha_candidatura";

/// One assessed competency of an application.
/// `nota` is read as `nota + 0E0`, which MySQL types as DOUBLE for integer
/// and decimal columns alike.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Competencia {
    pub id_candidatura: i32,
    pub nombre_competencia: String,
    pub nota: Option<f64>,
}
