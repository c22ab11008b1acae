use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{Bar, User};
use crate::database::store::{BarStore, StoreError, UserStore};

/// PostgreSQL-backed Bar store
pub struct PgBarStore {
    pool: PgPool,
}

impl PgBarStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BarStore for PgBarStore {
    async fn select_all(&self) -> Result<Vec<Bar>, StoreError> {
        let bars = sqlx::query_as::<_, Bar>(
            "SELECT id, owner_id, fields, created_at, updated_at FROM bars ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(bars)
    }

    async fn select_owned(&self, owner_id: Uuid) -> Result<Vec<Bar>, StoreError> {
        let bars = sqlx::query_as::<_, Bar>(
            "SELECT id, owner_id, fields, created_at, updated_at FROM bars \
             WHERE owner_id = $1 ORDER BY created_at",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bars)
    }

    async fn select_one(&self, id: Uuid) -> Result<Option<Bar>, StoreError> {
        let bar = sqlx::query_as::<_, Bar>(
            "SELECT id, owner_id, fields, created_at, updated_at FROM bars WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(bar)
    }

    async fn insert(&self, owner_id: Uuid, fields: Map<String, Value>) -> Result<Bar, StoreError> {
        let bar = sqlx::query_as::<_, Bar>(
            "INSERT INTO bars (id, owner_id, fields) VALUES ($1, $2, $3) \
             RETURNING id, owner_id, fields, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(sqlx::types::Json(fields))
        .fetch_one(&self.pool)
        .await?;

        Ok(bar)
    }

    async fn update_fields(&self, id: Uuid, fields: Map<String, Value>) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE bars SET fields = fields || $2, updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .bind(sqlx::types::Json(fields))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("bar {} not found", id)));
        }

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM bars WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("bar {} not found", id)));
        }

        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// PostgreSQL-backed User store
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn select_one(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_digest, created_at, updated_at \
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn select_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_digest, created_at, updated_at \
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn insert(
        &self,
        name: &str,
        email: &str,
        password_digest: &str,
    ) -> Result<User, StoreError> {
        let result = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, name, email, password_digest) VALUES ($1, $2, $3, $4) \
             RETURNING id, name, email, password_digest, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(email)
        .bind(password_digest)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                StoreError::Conflict(format!("email {} is already registered", email)),
            ),
            Err(e) => Err(e.into()),
        }
    }
}
