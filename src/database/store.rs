use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{Bar, User};

/// Errors surfaced by the record store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Persistence seam for Bar records. Handlers only see this trait; the
/// fetch-then-mutate ordering for update/delete lives in the handlers so the
/// ownership check always runs between the two calls.
#[async_trait]
pub trait BarStore: Send + Sync {
    async fn select_all(&self) -> Result<Vec<Bar>, StoreError>;

    async fn select_owned(&self, owner_id: Uuid) -> Result<Vec<Bar>, StoreError>;

    async fn select_one(&self, id: Uuid) -> Result<Option<Bar>, StoreError>;

    /// Persist a new record. The owner is always the authenticated requester;
    /// client-supplied owner values never reach this call.
    async fn insert(&self, owner_id: Uuid, fields: Map<String, Value>) -> Result<Bar, StoreError>;

    /// Merge the given (already sanitized) fields into an existing record.
    async fn update_fields(&self, id: Uuid, fields: Map<String, Value>) -> Result<(), StoreError>;

    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;

    /// Connectivity probe for the health endpoint
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Persistence seam for User records
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn select_one(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    async fn select_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn insert(
        &self,
        name: &str,
        email: &str,
        password_digest: &str,
    ) -> Result<User, StoreError>;
}
