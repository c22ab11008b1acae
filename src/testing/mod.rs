use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::auth::{self, Claims};
use crate::database::models::{Bar, User};
use crate::database::store::{BarStore, StoreError, UserStore};
use crate::AppState;

/// In-memory Bar store so router tests run without a database
#[derive(Default)]
pub struct MemoryBarStore {
    bars: Mutex<HashMap<Uuid, Bar>>,
}

#[async_trait]
impl BarStore for MemoryBarStore {
    async fn select_all(&self) -> Result<Vec<Bar>, StoreError> {
        let bars = self.bars.lock().unwrap();
        let mut all: Vec<Bar> = bars.values().cloned().collect();
        all.sort_by_key(|bar| bar.created_at);
        Ok(all)
    }

    async fn select_owned(&self, owner_id: Uuid) -> Result<Vec<Bar>, StoreError> {
        let bars = self.bars.lock().unwrap();
        let mut owned: Vec<Bar> = bars
            .values()
            .filter(|bar| bar.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by_key(|bar| bar.created_at);
        Ok(owned)
    }

    async fn select_one(&self, id: Uuid) -> Result<Option<Bar>, StoreError> {
        Ok(self.bars.lock().unwrap().get(&id).cloned())
    }

    async fn insert(&self, owner_id: Uuid, fields: Map<String, Value>) -> Result<Bar, StoreError> {
        let now = Utc::now();
        let bar = Bar {
            id: Uuid::new_v4(),
            owner_id,
            fields: sqlx::types::Json(fields),
            created_at: now,
            updated_at: now,
        };
        self.bars.lock().unwrap().insert(bar.id, bar.clone());
        Ok(bar)
    }

    async fn update_fields(&self, id: Uuid, fields: Map<String, Value>) -> Result<(), StoreError> {
        let mut bars = self.bars.lock().unwrap();
        let bar = bars
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("bar {} not found", id)))?;
        bar.fields.extend(fields);
        bar.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.bars
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("bar {} not found", id)))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// In-memory User store
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<HashMap<Uuid, User>>,
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn select_one(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn select_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn insert(
        &self,
        name: &str,
        email: &str,
        password_digest: &str,
    ) -> Result<User, StoreError> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|user| user.email == email) {
            return Err(StoreError::Conflict(format!(
                "email {} is already registered",
                email
            )));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            password_digest: password_digest.to_string(),
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }
}

/// Fresh handler state over empty in-memory stores
pub fn test_state() -> AppState {
    AppState {
        bars: Arc::new(MemoryBarStore::default()),
        users: Arc::new(MemoryUserStore::default()),
    }
}

/// Insert a user and issue a bearer token for them
pub async fn seed_user(state: &AppState, name: &str, email: &str) -> (User, String) {
    let digest = auth::password_digest("password");
    let user = state
        .users
        .insert(name, email, &digest)
        .await
        .expect("seed user");
    let token =
        auth::generate_token(Claims::new(user.id, user.name.clone())).expect("seed token");
    (user, token)
}
