use axum::{extract::Path, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::database::models::Bar;
use crate::database::sanitize::sanitize_fields;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct BarPayload {
    pub bar: Map<String, Value>,
}

/// GET /user_bars - List the requester's bars
pub async fn list_mine(
    Extension(state): Extension<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Value> {
    let bars = state.bars.select_owned(auth_user.user_id).await?;

    Ok(ApiResponse::success(json!({
        "bars": Bar::to_api_value_array(&bars)
    })))
}

/// GET /bars/:id - Fetch one bar with its owner resolved and embedded
pub async fn get(
    Path(id): Path<Uuid>,
    Extension(state): Extension<AppState>,
    Extension(_auth_user): Extension<AuthUser>,
) -> ApiResult<Value> {
    let bar = state
        .bars
        .select_one(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("bar {} not found", id)))?;

    // Resolve the owner reference before serializing the response
    let owner = state.users.select_one(bar.owner_id).await?;

    Ok(ApiResponse::success(json!({
        "bar": bar.to_api_value(owner.as_ref())
    })))
}

/// POST /bars - Create a bar owned by the requester. Any owner value in the
/// payload is discarded; the authenticated identity always wins.
pub async fn create(
    Extension(state): Extension<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<BarPayload>,
) -> ApiResult<Value> {
    let fields = sanitize_fields(payload.bar);

    let bar = state.bars.insert(auth_user.user_id, fields).await?;

    Ok(ApiResponse::created(json!({
        "bar": bar.to_api_value(None)
    })))
}

/// PATCH /bars/:id - Merge non-blank fields into an existing bar.
///
/// Ordering is load-bearing: fetch, then check ownership, then write. The
/// merge is never issued when the requester is not the owner.
pub async fn update(
    Path(id): Path<Uuid>,
    Extension(state): Extension<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<BarPayload>,
) -> ApiResult<()> {
    let patch = sanitize_fields(payload.bar);

    let bar = state
        .bars
        .select_one(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("bar {} not found", id)))?;

    if bar.owner_id != auth_user.user_id {
        return Err(ApiError::forbidden("only the owner can modify this bar"));
    }

    // A fully-blank payload is a no-op, not an error
    if !patch.is_empty() {
        state.bars.update_fields(id, patch).await?;
    }

    Ok(ApiResponse::no_content())
}

/// DELETE /bars/:id - Remove a bar after the ownership check passes
pub async fn delete(
    Path(id): Path<Uuid>,
    Extension(state): Extension<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<()> {
    let bar = state
        .bars
        .select_one(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("bar {} not found", id)))?;

    if bar.owner_id != auth_user.user_id {
        return Err(ApiError::forbidden("only the owner can delete this bar"));
    }

    state.bars.delete(id).await?;

    Ok(ApiResponse::no_content())
}
