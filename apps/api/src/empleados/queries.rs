use sqlx::{MySql, MySqlPool, QueryBuilder};
use tracing::info;

use crate::listing::{like_pattern, SortOrder, LIKE_ESCAPE};
use crate::models::empleado::{Empleado, EMPLEADO_COLUMNS};

/// Columns accepted by `sort_by` on the employee list.
pub const SORTABLE_COLUMNS: &[&str] = &[
    "email_empleado",
    "nombre_empleado",
    "apellidos_empleado",
    "rol",
];

#[derive(Debug, Clone, Default)]
pub struct EmpleadoFilter {
    pub rol: Option<String>,
    pub is_logged: Option<bool>,
    pub search: Option<String>,
    pub sort_by: Option<&'static str>,
    pub order: SortOrder,
}

/// Fields of a partial update. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct EmpleadoChanges {
    pub nombre_empleado: Option<String>,
    pub apellidos_empleado: Option<String>,
    pub password: Option<String>,
    pub rol: Option<String>,
    pub is_logged: Option<bool>,
}

impl EmpleadoChanges {
    pub fn is_empty(&self) -> bool {
        self.nombre_empleado.is_none()
            && self.apellidos_empleado.is_none()
            && self.password.is_none()
            && self.rol.is_none()
            && self.is_logged.is_none()
    }
}

/// Builds the employee list query. Filter values are bound; the sort column
/// comes from [`SORTABLE_COLUMNS`].
pub fn build_list_query(filter: &EmpleadoFilter) -> QueryBuilder<'static, MySql> {
    let mut builder =
        QueryBuilder::<MySql>::new(format!("SELECT {EMPLEADO_COLUMNS} FROM empleados WHERE 1=1"));

    if let Some(rol) = &filter.rol {
        builder.push(" AND rol = ");
        builder.push_bind(rol.clone());
    }

    if let Some(is_logged) = filter.is_logged {
        builder.push(" AND is_logged = ");
        builder.push_bind(is_logged);
    }

    if let Some(search) = &filter.search {
        let pattern = like_pattern(search);
        builder.push(" AND (nombre_empleado LIKE ");
        builder.push_bind(pattern.clone());
        builder.push(LIKE_ESCAPE);
        builder.push(" OR apellidos_empleado LIKE ");
        builder.push_bind(pattern.clone());
        builder.push(LIKE_ESCAPE);
        builder.push(" OR email_empleado LIKE ");
        builder.push_bind(pattern);
        builder.push(LIKE_ESCAPE);
        builder.push(")");
    }

    if let Some(column) = filter.sort_by {
        builder.push(format!(" ORDER BY {column} {}", filter.order.as_sql()));
    }

    builder
}

pub async fn list_empleados(
    pool: &MySqlPool,
    filter: &EmpleadoFilter,
) -> Result<Vec<Empleado>, sqlx::Error> {
    build_list_query(filter)
        .build_query_as::<Empleado>()
        .fetch_all(pool)
        .await
}

pub async fn find_empleado(pool: &MySqlPool, email: &str) -> Result<Option<Empleado>, sqlx::Error> {
    sqlx::query_as::<_, Empleado>(&format!(
        "SELECT {EMPLEADO_COLUMNS} FROM empleados WHERE email_empleado = ?"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await
}

async fn empleado_exists(pool: &MySqlPool, email: &str) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM empleados WHERE email_empleado = ?")
        .bind(email)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

/// Applies a COALESCE partial update. Returns `false` when no employee has `email`.
pub async fn update_empleado(
    pool: &MySqlPool,
    email: &str,
    changes: &EmpleadoChanges,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE empleados
        SET
            nombre_empleado = COALESCE(?, nombre_empleado),
            apellidos_empleado = COALESCE(?, apellidos_empleado),
            password = COALESCE(?, password),
            rol = COALESCE(?, rol),
            is_logged = COALESCE(?, is_logged)
        WHERE email_empleado = ?
        "#,
    )
    .bind(changes.nombre_empleado.as_deref())
    .bind(changes.apellidos_empleado.as_deref())
    .bind(changes.password.as_deref())
    .bind(changes.rol.as_deref())
    .bind(changes.is_logged)
    .bind(email)
    .execute(pool)
    .await?;

    // Unchanged values can report zero affected rows on servers without FOUND_ROWS.
    if result.rows_affected() == 0 {
        return empleado_exists(pool, email).await;
    }

    info!("Updated employee {email}");
    Ok(true)
}

/// Returns `false` when no employee has `email`.
pub async fn delete_empleado(pool: &MySqlPool, email: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM empleados WHERE email_empleado = ?")
        .bind(email)
        .execute(pool)
        .await?;

    let deleted = result.rows_affected() > 0;
    if deleted {
        info!("Deleted employee {email}");
    }
    Ok(deleted)
}
