use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_digest: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Public profile shape returned from the auth endpoints
    pub fn to_api_value(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "email": self.email,
            "created_at": self.created_at,
        })
    }

    /// Compact shape embedded as the resolved owner of a record
    pub fn to_embedded_value(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
        })
    }
}
