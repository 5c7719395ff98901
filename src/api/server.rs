//! Router construction and the serve loop.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::pipeline::ModerationPipeline;

use super::handlers;

#[derive(Error, Debug)]
pub enum ServeError {
    #[error("invalid bind address `{addr}`: {source}")]
    BindAddr {
        addr: String,
        source: std::net::AddrParseError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ModerationPipeline>,
    pub config: Arc<Config>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/v1/classify", post(handlers::classify))
        .route("/v1/queue", get(handlers::list_pending))
        .route("/v1/queue/:id", get(handlers::get_item))
        .route("/v1/queue/:id/claim", post(handlers::claim_item))
        .route("/v1/queue/:id/decide", post(handlers::decide_item))
        .route("/v1/analytics/overview", get(handlers::analytics_overview))
        .route("/v1/analytics/timeline", get(handlers::analytics_timeline))
        .route(
            "/v1/analytics/moderator-performance",
            get(handlers::analytics_moderator_performance),
        )
        .route("/v1/analytics/export", get(handlers::analytics_export))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Bind and serve until ctrl-c.
pub async fn start_server(
    pipeline: Arc<ModerationPipeline>,
    config: Arc<Config>,
) -> Result<(), ServeError> {
    let addr: std::net::SocketAddr =
        config.bind_addr.parse().map_err(|source| ServeError::BindAddr {
            addr: config.bind_addr.clone(),
            source,
        })?;

    let app = build_router(AppState { pipeline, config });
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "moderation API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown signal received");
        })
        .await?;
    Ok(())
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
