use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

use crate::config::DatabaseConfig;

const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id              UUID PRIMARY KEY,
    email           TEXT NOT NULL UNIQUE,
    token           TEXT NOT NULL UNIQUE,
    hashed_password TEXT NOT NULL,
    created_at      TIMESTAMPTZ NOT NULL,
    updated_at      TIMESTAMPTZ NOT NULL
)"#;

const CREATE_RECIPES: &str = r#"
CREATE TABLE IF NOT EXISTS recipes (
    id          UUID PRIMARY KEY,
    ingredient  TEXT NOT NULL CHECK (ingredient <> ''),
    temperature DOUBLE PRECISION NOT NULL CHECK (temperature BETWEEN 180 AND 350),
    time        DOUBLE PRECISION NOT NULL CHECK (time BETWEEN 2 AND 24),
    fuel        TEXT NOT NULL CHECK (fuel <> ''),
    directions  TEXT NOT NULL CHECK (directions <> ''),
    owner       UUID NOT NULL REFERENCES users (id),
    created_at  TIMESTAMPTZ NOT NULL,
    updated_at  TIMESTAMPTZ NOT NULL
)"#;

const CREATE_RECIPES_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS recipes_created_at_idx ON recipes (created_at)";

/// Connection pool setup and schema bootstrap for the PostgreSQL backend
pub struct DatabaseManager;

impl DatabaseManager {
    /// Opens a pool sized by `config` and makes sure the tables exist
    pub async fn connect(url: &str, config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        Self::bootstrap(&pool).await?;
        info!("Connected to PostgreSQL ({} max connections)", config.max_connections);
        Ok(pool)
    }

    async fn bootstrap(pool: &PgPool) -> Result<(), sqlx::Error> {
        for statement in [CREATE_USERS, CREATE_RECIPES, CREATE_RECIPES_INDEX] {
            sqlx::query(statement).execute(pool).await?;
        }
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }
}
