use anyhow::Result;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;
use tracing::info;

use crate::config::Config;

/// Creates and returns a MySQL connection pool.
pub async fn create_pool(config: &Config) -> Result<MySqlPool> {
    info!(
        "Connecting to MySQL database '{}'...",
        config.database.database_name()
    );

    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(config.database.connect_options()?)
        .await?;

    info!("MySQL connection pool established");
    Ok(pool)
}

/// Table names of the connected schema.
pub async fn list_tables(pool: &MySqlPool) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>("SHOW TABLES")
        .fetch_all(pool)
        .await
}
