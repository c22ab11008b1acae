use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Map, Value};
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::models::User;

/// A venue record. Descriptive fields (name, city, address, price, ...) are an
/// open set with no enforced schema, stored as a JSON document alongside the
/// fixed identity columns.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Bar {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub fields: sqlx::types::Json<Map<String, Value>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Bar {
    /// Flatten the record into its wire shape. Lists carry the owner as a bare
    /// id; the single-record read passes the resolved owner for embedding.
    pub fn to_api_value(&self, owner: Option<&User>) -> Value {
        let mut map = Map::new();
        map.insert("id".to_string(), json!(self.id));
        match owner {
            Some(user) => map.insert("owner".to_string(), user.to_embedded_value()),
            None => map.insert("owner".to_string(), json!(self.owner_id)),
        };
        for (key, value) in self.fields.iter() {
            map.insert(key.clone(), value.clone());
        }
        map.insert("created_at".to_string(), json!(self.created_at));
        map.insert("updated_at".to_string(), json!(self.updated_at));
        Value::Object(map)
    }

    /// Wire shape for a list of records
    pub fn to_api_value_array(bars: &[Bar]) -> Value {
        Value::Array(bars.iter().map(|bar| bar.to_api_value(None)).collect())
    }
}
