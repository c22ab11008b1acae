use std::sync::Arc;

use bars_api::database::{manager, postgres::PgBarStore, postgres::PgUserStore};
use bars_api::{app, AppState};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    // Initialize configuration (this loads the config singleton)
    let config = bars_api::config::config();

    tracing_subscriber::fmt::init();
    tracing::info!("Starting Bars API in {:?} mode", config.environment);

    let pool = manager::connect()
        .await
        .unwrap_or_else(|e| panic!("failed to connect to database: {}", e));

    manager::migrate(&pool)
        .await
        .unwrap_or_else(|e| panic!("failed to run schema migration: {}", e));

    let state = AppState {
        bars: Arc::new(PgBarStore::new(pool.clone())),
        users: Arc::new(PgUserStore::new(pool)),
    };

    let app = app(state);

    // Allow tests or deployments to override port via env
    let port = std::env::var("BARS_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 Bars API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
