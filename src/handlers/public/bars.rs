use axum::Extension;
use serde_json::{json, Value};

use crate::database::models::Bar;
use crate::middleware::{ApiResponse, ApiResult};
use crate::AppState;

/// GET /bars - List every bar. The only unauthenticated resource route.
pub async fn list(Extension(state): Extension<AppState>) -> ApiResult<Value> {
    let bars = state.bars.select_all().await?;

    Ok(ApiResponse::success(json!({
        "bars": Bar::to_api_value_array(&bars)
    })))
}
