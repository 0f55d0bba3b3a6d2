//! Database primitives: connection settings, the shared pool and the employee store.

mod employees;

use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

pub use employees::{EmployeeStore, SeaOrmEmployeeStore};

/// Shared connection pool alias.
pub type DbPool = DatabaseConnection;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("invalid database setting {key}: {value}")]
    InvalidSetting { key: &'static str, value: String },
    #[error(transparent)]
    Query(#[from] DbErr),
}

pub type DbResult<T> = Result<T, DbError>;

const IN_MEMORY_URL: &str = "sqlite::memory:";
// In-memory SQLite lives as long as one pooled connection does.
const IN_MEMORY_LIFETIME: Duration = Duration::from_secs(60 * 60 * 24 * 365);

/// Environment-driven connection settings.
#[derive(Clone, Debug, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default)]
    pub log_statements: bool,
}

fn default_url() -> String {
    IN_MEMORY_URL.to_string()
}

fn default_max_connections() -> u32 {
    10
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self::new(default_url())
    }
}

impl DatabaseSettings {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: default_max_connections(),
            log_statements: false,
        }
    }

    /// Reads `DATABASE_URL`, `DB_MAX_CONNECTIONS` and `DB_LOG_STATEMENTS`.
    pub fn from_env() -> DbResult<Self> {
        let mut settings = Self::new(std::env::var("DATABASE_URL").unwrap_or_else(|_| default_url()));
        if let Ok(raw) = std::env::var("DB_MAX_CONNECTIONS") {
            settings.max_connections = raw.trim().parse().map_err(|_| DbError::InvalidSetting {
                key: "DB_MAX_CONNECTIONS",
                value: raw.clone(),
            })?;
        }
        settings.log_statements = std::env::var("DB_LOG_STATEMENTS")
            .ok()
            .map(|val| matches!(val.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        Ok(settings)
    }

    pub fn is_in_memory(&self) -> bool {
        self.url.starts_with(IN_MEMORY_URL) || self.url.contains("mode=memory")
    }
}

/// Open the pool described by `settings`.
pub async fn connect(settings: &DatabaseSettings) -> DbResult<DbPool> {
    let mut options = ConnectOptions::new(settings.url.clone());
    options
        .max_connections(settings.max_connections)
        .sqlx_logging(settings.log_statements);
    if settings.is_in_memory() {
        options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(IN_MEMORY_LIFETIME)
            .max_lifetime(IN_MEMORY_LIFETIME);
    }
    let pool = Database::connect(options).await?;
    info!(backend = ?pool.get_database_backend(), in_memory = settings.is_in_memory(), "database connected");
    Ok(pool)
}
