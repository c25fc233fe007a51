//! HTTP server initialization and routing.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::StatusCode;
use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::auth;
use crate::invoice;
use crate::shared::state::AppState;
use crate::ui;
use crate::webhook;

/// Builds the application router. Kept separate from `run` so the
/// integration tests can drive it in-process.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/webhook",
            post(webhook::receive_webhook).get(webhook::list_invoices),
        )
        .route("/api/auth/login", post(auth::login))
        .route("/api/accept-invoice", post(invoice::accept_invoice))
        .route("/health", get(health_check))
        .route("/", get(ui::index_page))
        .route("/login", get(ui::login_page))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run(state: Arc<AppState>) -> Result<()> {
    let addr = format!(
        "{}:{}",
        state.config.server.host, state.config.server.port
    );
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Starting HTTP server on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.ok();
    info!("Shutdown signal received");
}

pub async fn health_check() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "ok",
            "service": "invoice-bridge",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}
