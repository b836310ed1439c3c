use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::database::postgres::PgRepository;
use crate::database::repository::Document;
use crate::models::{Binder, Card, Collection, Group, Idol, User};

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Document serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

const COLLECTIONS: [&str; 6] = [
    Binder::COLLECTION,
    Card::COLLECTION,
    Collection::COLLECTION,
    Group::COLLECTION,
    Idol::COLLECTION,
    User::COLLECTION,
];

/// Owns the Postgres pool and hands out typed repositories over it.
#[derive(Clone)]
pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let url = config
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        info!("Connected database pool (max {} connections)", config.max_connections);
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the document tables and the email uniqueness index when missing.
    pub async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        for table in COLLECTIONS {
            let ddl = format!(
                "CREATE TABLE IF NOT EXISTS \"{table}\" (\
                 \"id\" TEXT PRIMARY KEY, \
                 \"seq\" BIGSERIAL, \
                 \"doc\" JSONB NOT NULL)"
            );
            sqlx::query(&ddl).execute(&self.pool).await?;
        }

        let index = format!(
            "CREATE UNIQUE INDEX IF NOT EXISTS users_email_key ON \"{}\" ((\"doc\" ->> 'email'))",
            User::COLLECTION
        );
        sqlx::query(&index).execute(&self.pool).await?;

        info!("Schema ready for {} collections", COLLECTIONS.len());
        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub fn repository<T: Document>(&self) -> PgRepository<T> {
        PgRepository::new(self.pool.clone())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }
}
