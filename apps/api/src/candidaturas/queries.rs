use chrono::NaiveDate;
use sqlx::{MySql, MySqlPool, QueryBuilder};
use tracing::info;

use crate::listing::{like_pattern, SortOrder, LIKE_ESCAPE};
use crate::models::candidatura::{Candidatura, Competencia, CANDIDATURA_COLUMNS};

pub const SORTABLE_COLUMNS: &[&str] = &[
    "id_candidatura",
    "nombre_candidato",
    "apellidos_candidato",
    "puesto",
    "estado",
    "fecha_candidatura",
];

/// Upper bound on a single page of applications.
pub const MAX_PAGE_SIZE: i64 = 500;

#[derive(Debug, Clone, Default)]
pub struct CandidaturaFilter {
    pub estado: Option<String>,
    pub puesto: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<&'static str>,
    pub order: SortOrder,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct CandidaturaChanges {
    pub nombre_candidato: Option<String>,
    pub apellidos_candidato: Option<String>,
    pub email_candidato: Option<String>,
    pub telefono: Option<String>,
    pub puesto: Option<String>,
    pub estado: Option<String>,
    pub fecha_candidatura: Option<NaiveDate>,
}

impl CandidaturaChanges {
    pub fn is_empty(&self) -> bool {
        self.nombre_candidato.is_none()
            && self.apellidos_candidato.is_none()
            && self.email_candidato.is_none()
            && self.telefono.is_none()
            && self.puesto.is_none()
            && self.estado.is_none()
            && self.fecha_candidatura.is_none()
    }
}

pub fn build_list_query(filter: &CandidaturaFilter) -> QueryBuilder<'static, MySql> {
    let mut builder = QueryBuilder::<MySql>::new(format!(
        "SELECT {CANDIDATURA_COLUMNS} FROM candidaturas WHERE 1=1"
    ));

    if let Some(estado) = &filter.estado {
        builder.push(" AND estado = ");
        builder.push_bind(estado.clone());
    }

    if let Some(puesto) = &filter.puesto {
        builder.push(" AND puesto = ");
        builder.push_bind(puesto.clone());
    }

    if let Some(search) = &filter.search {
        let pattern = like_pattern(search);
        builder.push(" AND (nombre_candidato LIKE ");
        builder.push_bind(pattern.clone());
        builder.push(LIKE_ESCAPE);
        builder.push(" OR apellidos_candidato LIKE ");
        builder.push_bind(pattern.clone());
        builder.push(LIKE_ESCAPE);
        builder.push(" OR email_candidato LIKE ");
        builder.push_bind(pattern);
        builder.push(LIKE_ESCAPE);
        builder.push(")");
    }

    if let Some(column) = filter.sort_by {
        builder.push(format!(" ORDER BY {column} {}", filter.order.as_sql()));
    }

    if filter.limit.is_some() || filter.offset.is_some() {
        let limit = filter.limit.unwrap_or(MAX_PAGE_SIZE).clamp(0, MAX_PAGE_SIZE);
        builder.push(" LIMIT ");
        builder.push_bind(limit);
        builder.push(" OFFSET ");
        builder.push_bind(filter.offset.unwrap_or(0).max(0));
    }

    builder
}

pub async fn list_candidaturas(
    pool: &MySqlPool,
    filter: &CandidaturaFilter,
) -> Result<Vec<Candidatura>, sqlx::Error> {
    build_list_query(filter)
        .build_query_as::<Candidatura>()
        .fetch_all(pool)
        .await
}

pub async fn find_candidatura(
    pool: &MySqlPool,
    id_candidatura: i32,
) -> Result<Option<Candidatura>, sqlx::Error> {
    sqlx::query_as::<_, Candidatura>(&format!(
        "SELECT {CANDIDATURA_COLUMNS} FROM candidaturas WHERE id_candidatura = ?"
    ))
    .bind(id_candidatura)
    .fetch_optional(pool)
    .await
}

async fn candidatura_exists(pool: &MySqlPool, id_candidatura: i32) -> Result<bool, sqlx::Error> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM candidaturas WHERE id_candidatura = ?")
            .bind(id_candidatura)
            .fetch_one(pool)
            .await?;
    Ok(count > 0)
}

/// COALESCE partial update. Returns `false` when the application does not exist.
pub async fn update_candidatura(
    pool: &MySqlPool,
    id_candidatura: i32,
    changes: &CandidaturaChanges,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE candidaturas
        SET
            nombre_candidato = COALESCE(?, nombre_candidato),
            apellidos_candidato = COALESCE(?, apellidos_candidato),
            email_candidato = COALESCE(?, email_candidato),
            telefono = COALESCE(?, telefono),
            puesto = COALESCE(?, puesto),
            estado = COALESCE(?, estado),
            fecha_candidatura = COALESCE(?, fecha_candidatura)
        WHERE id_candidatura = ?
        "#,
    )
    .bind(changes.nombre_candidato.as_deref())
    .bind(changes.apellidos_candidato.as_deref())
    .bind(changes.email_candidato.as_deref())
    .bind(changes.telefono.as_deref())
    .bind(changes.puesto.as_deref())
    .bind(changes.estado.as_deref())
    .bind(changes.fecha_candidatura)
    .bind(id_candidatura)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return candidatura_exists(pool, id_candidatura).await;
    }

    info!("Updated application {id_candidatura}");
    Ok(true)
}

/// Deletes an application together with its competency scores.
/// Returns `false` when the application does not exist.
pub async fn delete_candidatura(pool: &MySqlPool, id_candidatura: i32) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let scores = sqlx::query("DELETE FROM competencias WHERE id_candidatura = ?")
        .bind(id_candidatura)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM candidaturas WHERE id_candidatura = ?")
        .bind(id_candidatura)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        tx.rollback().await?;
        return Ok(false);
    }

    tx.commit().await?;
    info!(
        "Deleted application {id_candidatura} and {} competency scores",
        scores.rows_affected()
    );
    Ok(true)
}

pub async fn list_competencias(
    pool: &MySqlPool,
    id_candidatura: i32,
) -> Result<Vec<Competencia>, sqlx::Error> {
    sqlx::query_as::<_, Competencia>(
        r#"
        SELECT id_candidatura, nombre_competencia, nota + 0E0 AS nota
        FROM competencias
        WHERE id_candidatura = ?
        "#,
    )
    .bind(id_candidatura)
    .fetch_all(pool)
    .await
}
