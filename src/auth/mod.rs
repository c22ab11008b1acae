use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id of the token holder
    pub sub: Uuid,
    pub name: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, name: String) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.jwt_expiry_hours;
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            sub: user_id,
            name,
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug)]
pub enum TokenError {
    TokenGeneration(String),
    InvalidSecret,
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenError::TokenGeneration(msg) => write!(f, "token generation error: {}", msg),
            TokenError::InvalidSecret => write!(f, "invalid token secret"),
        }
    }
}

impl std::error::Error for TokenError {}

pub fn generate_token(claims: Claims) -> Result<String, TokenError> {
    let secret = &config::config().security.jwt_secret;

    if secret.is_empty() {
        return Err(TokenError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::default();

    encode(&header, &claims, &encoding_key)
        .map_err(|e| TokenError::TokenGeneration(e.to_string()))
}

/// Salted SHA-256 digest used for stored passwords.
pub fn password_digest(password: &str) -> String {
    let salt = &config::config().security.password_salt;

    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}
