//! HTTP surface: the upload form, its submission endpoint and a JSON API.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use super::handlers;
use crate::core::models::OcrLanguage;
use crate::core::orchestrators::OcrSearchOrchestrator;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<OcrSearchOrchestrator>,
    pub default_language: OcrLanguage,
    pub max_upload_bytes: usize,
}

pub fn create_router(state: AppState) -> Router {
    let max_upload_bytes = state.max_upload_bytes;

    Router::new()
        .route("/", get(handlers::index))
        .route("/process", post(handlers::process_form))
        .route("/api/process", post(handlers::api_process))
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

pub async fn serve(state: AppState, bind_address: &str) -> anyhow::Result<()> {
    let addr: SocketAddr = bind_address
        .parse()
        .with_context(|| format!("Invalid bind address: {}", bind_address))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    log::info!("[WEB] Listening on http://{}", addr);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("[WEB] Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        log::error!("[WEB] Failed to listen for shutdown signal: {}", error);
        std::future::pending::<()>().await;
    }
    log::info!("[WEB] Shutdown requested");
}
