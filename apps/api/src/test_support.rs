//! MySQL fixtures for tests that need a live server.
//!
//! Set `TEST_DATABASE_URL` to run them; without it they return early. The
//! pool holds a single connection so the `TEMPORARY` tables created here
//! shadow any real ones for every query the test issues.

use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;

const SCHEMA: [&str; 3] = [
    r#"
    CREATE TEMPORARY TABLE empleados (
        email_empleado VARCHAR(255) PRIMARY KEY,
        nombre_empleado VARCHAR(255),
        apellidos_empleado VARCHAR(255),
        password VARCHAR(255),
        rol VARCHAR(64),
        is_logged TINYINT(1)
    )
    "#,
    r#"
    CREATE TEMPORARY TABLE candidaturas (
        id_candidatura INT PRIMARY KEY,
        nombre_candidato VARCHAR(255),
        apellidos_candidato VARCHAR(255),
        email_candidato VARCHAR(255),
        telefono VARCHAR(32),
        puesto VARCHAR(128),
        estado VARCHAR(64),
        fecha_candidatura DATE
    )
    "#,
    r#"
    CREATE TEMPORARY TABLE competencias (
        id_candidatura INT NOT NULL,
        nombre_competencia VARCHAR(64) NOT NULL,
        nota INT
    )
    "#,
];

pub async fn mysql_pool() -> Option<MySqlPool> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let pool = MySqlPoolOptions::new()
        .max_connections(1)
        .connect(&url)
        .await
        .expect("TEST_DATABASE_URL is set but the server is unreachable");
    for ddl in SCHEMA {
        sqlx::query(ddl)
            .execute(&pool)
            .await
            .expect("failed to create temporary tables");
    }
    Some(pool)
}

pub async fn insert_empleado(pool: &MySqlPool, email: &str, nombre: &str, rol: &str) {
    sqlx::query(
        "INSERT INTO empleados (email_empleado, nombre_empleado, apellidos_empleado, password, rol, is_logged) \
         VALUES (?, ?, 'Pérez', 'x', ?, 0)",
    )
    .bind(email)
    .bind(nombre)
    .bind(rol)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn insert_candidatura(pool: &MySqlPool, id: i32, nombre: &str) {
    sqlx::query(
        "INSERT INTO candidaturas (id_candidatura, nombre_candidato, estado) VALUES (?, ?, 'pendiente')",
    )
    .bind(id)
    .bind(nombre)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn insert_competencia(pool: &MySqlPool, id: i32, nombre: &str, nota: i32) {
    sqlx::query(
        "INSERT INTO competencias (id_candidatura, nombre_competencia, nota) VALUES (?, ?, ?)",
    )
    .bind(id)
    .bind(nombre)
    .bind(nota)
    .execute(pool)
    .await
    .unwrap();
}
