use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

use crate::config;
use crate::database::store::StoreError;

/// Connect to the database named by DATABASE_URL, with pool sizing from config
pub async fn connect() -> Result<PgPool, StoreError> {
    let url = std::env::var("DATABASE_URL")
        .map_err(|_| StoreError::Connection("DATABASE_URL is not set".to_string()))?;

    let db_config = &config::config().database;

    let pool = PgPoolOptions::new()
        .max_connections(db_config.max_connections)
        .acquire_timeout(Duration::from_secs(db_config.connect_timeout_secs))
        .connect(&url)
        .await?;

    info!("Created database pool ({} max connections)", db_config.max_connections);
    Ok(pool)
}

/// Bring the schema up to date. Idempotent, runs at startup.
pub async fn migrate(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            password_digest TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bars (
            id UUID PRIMARY KEY,
            owner_id UUID NOT NULL REFERENCES users(id),
            fields JSONB NOT NULL DEFAULT '{}'::jsonb,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS bars_owner_id_idx ON bars (owner_id)")
        .execute(pool)
        .await?;

    Ok(())
}
