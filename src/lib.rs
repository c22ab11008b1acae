use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;

#[cfg(test)]
pub mod testing;


use database::store::{BarStore, UserStore};

/// Shared handler context. The stores are trait objects so tests can swap in
/// an in-memory implementation without a running database.
#[derive(Clone)]
pub struct AppState {
    pub bars: Arc<dyn BarStore>,
    pub users: Arc<dyn UserStore>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Public auth routes (token acquisition)
        .merge(auth_routes())
        // Bar resource
        .merge(bars_routes())
        // Global middleware
        .layer(Extension(state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn auth_routes() -> Router {
    use axum::routing::post;
    use handlers::public::auth;

    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
}

fn bars_routes() -> Router {
    use axum::routing::post;
    use handlers::{protected, public};

    // Everything except the full listing requires a verified bearer token.
    let protected = Router::new()
        .route("/user_bars", get(protected::bars::list_mine))
        .route("/bars", post(protected::bars::create))
        .route(
            "/bars/:id",
            get(protected::bars::get)
                .patch(protected::bars::update)
                .delete(protected::bars::delete),
        )
        .route_layer(axum::middleware::from_fn(middleware::bearer_auth_middleware));

    Router::new()
        .route("/bars", get(public::bars::list))
        .merge(protected)
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "Bars API",
        "version": version,
        "description": "Venue listing REST API built with Rust (Axum)",
        "endpoints": {
            "home": "/ (public)",
            "health": "/health (public)",
            "auth": "/auth/register, /auth/login (public - token acquisition)",
            "bars": "GET /bars (public), POST /bars, GET|PATCH|DELETE /bars/:id (protected)",
            "user_bars": "GET /user_bars (protected)",
        }
    }))
}

async fn health(Extension(state): Extension<AppState>) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match state.bars.ping().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string()
            })),
        ),
    }
}
