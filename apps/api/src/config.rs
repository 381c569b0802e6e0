use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::mysql::MySqlConnectOptions;

/// Origins allowed by the CORS layer when `CORS_ALLOWED_ORIGINS` is unset.
const DEFAULT_CORS_ORIGINS: [&str; 3] = [
    "http://localhost:5173",
    "https://dt-empieza-por-educar-docker.onrender.com",
    "https://empieza-por-educar.onrender.com",
];

/// Application configuration loaded from environment variables.
/// Startup fails if the database cannot be described from them.
#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub max_connections: u32,
    pub port: u16,
    pub model_path: String,
    pub cors_allowed_origins: Vec<String>,
    pub rust_log: String,
}

/// Either a full connection URL or the discrete `DB_*` parts.
#[derive(Debug, Clone, PartialEq)]
pub enum DatabaseConfig {
    Url(String),
    Parts {
        user: String,
        password: String,
        host: String,
        port: u16,
        database: String,
    },
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> Result<MySqlConnectOptions> {
        match self {
            DatabaseConfig::Url(url) => {
                MySqlConnectOptions::from_str(url).context("DATABASE_URL is not a valid MySQL URL")
            }
            DatabaseConfig::Parts {
                user,
                password,
                host,
                port,
                database,
            } => Ok(MySqlConnectOptions::new()
                .host(host)
                .port(*port)
                .username(user)
                .password(password)
                .database(database)),
        }
    }

    /// Schema name, used by log lines only.
    pub fn database_name(&self) -> &str {
        match self {
            DatabaseConfig::Url(url) => url
                .rsplit('/')
                .next()
                .and_then(|tail| tail.split('?').next())
                .unwrap_or_default(),
            DatabaseConfig::Parts { database, .. } => database,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| {
            get(key).with_context(|| format!("Required environment variable '{key}' is not set"))
        };

        let database = match get("DATABASE_URL") {
            Some(url) => DatabaseConfig::Url(url),
            None => DatabaseConfig::Parts {
                user: require("DB_USER")?,
                password: lookup("DB_PASSWORD").unwrap_or_default(),
                host: require("DB_HOST")?,
                port: get("DB_PORT")
                    .unwrap_or_else(|| "3306".to_string())
                    .parse::<u16>()
                    .context("DB_PORT must be a valid port number")?,
                database: require("DB_DATABASE")?,
            },
        };

        let cors_allowed_origins = match get("CORS_ALLOWED_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect(),
            None => DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
        };

        Ok(Config {
            database,
            max_connections: get("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "10".to_string())
                .parse::<u32>()
                .context("DB_MAX_CONNECTIONS must be a positive integer")?,
            port: get("PORT")
                .unwrap_or_else(|| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            model_path: get("MODEL_PATH").unwrap_or_else(|| "models/model_web.json".to_string()),
            cors_allowed_origins,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
