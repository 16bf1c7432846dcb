pub mod error;
pub mod extract;
mod handlers;
mod middleware;
mod routes;

use axum::{routing::get, Router};
use sqlx::{Pool, Sqlite};

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db: Pool<Sqlite>,
    pub session_ttl_days: i64,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "Backend is running" }))
        .merge(routes::api_routes())
        .layer(axum::middleware::from_fn(middleware::log_requests))
        .with_state(state)
}

pub async fn run_server(pool: Pool<Sqlite>, config: &Config) -> anyhow::Result<()> {
    let state = AppState {
        db: pool,
        session_ttl_days: config.session_ttl_days,
    };
    let app = app(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutdown signal received");
    }
}
