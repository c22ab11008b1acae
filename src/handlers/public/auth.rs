use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{self, Claims};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /auth/register - Create an account and receive a bearer token
pub async fn register(
    Extension(state): Extension<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<Value> {
    let name = payload.name.trim();
    let email = payload.email.trim().to_lowercase();

    if name.is_empty() {
        return Err(ApiError::bad_request("name is required"));
    }
    if email.is_empty() {
        return Err(ApiError::bad_request("email is required"));
    }
    if payload.password.trim().is_empty() {
        return Err(ApiError::bad_request("password is required"));
    }

    let digest = auth::password_digest(&payload.password);
    let user = state.users.insert(name, &email, &digest).await?;

    let token = auth::generate_token(Claims::new(user.id, user.name.clone())).map_err(|e| {
        tracing::error!("token generation failed: {}", e);
        ApiError::internal_server_error("Failed to issue token")
    })?;

    Ok(ApiResponse::created(json!({
        "token": token,
        "user": user.to_api_value(),
    })))
}

/// POST /auth/login - Exchange credentials for a bearer token
pub async fn login(
    Extension(state): Extension<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Value> {
    let email = payload.email.trim().to_lowercase();

    let user = state
        .users
        .select_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("invalid email or password"))?;

    if auth::password_digest(&payload.password) != user.password_digest {
        return Err(ApiError::unauthorized("invalid email or password"));
    }

    let token = auth::generate_token(Claims::new(user.id, user.name.clone())).map_err(|e| {
        tracing::error!("token generation failed: {}", e);
        ApiError::internal_server_error("Failed to issue token")
    })?;

    Ok(ApiResponse::success(json!({
        "token": token,
        "user": user.to_api_value(),
    })))
}
