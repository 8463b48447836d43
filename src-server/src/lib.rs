//! ListaPro Companion Server
//!
//! Layered like the rest of the app:
//! - config: environment-driven settings
//! - probes: health, readiness and metrics
//! - proxy: `/api/lists` and `/api/tasks` forwarded to the REST backend
//!
//! Anything else is served from the built UI when a static dir is set.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{any, get};
use axum::Router;
use thiserror::Error;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod probes;
mod proxy;

pub use config::{ConfigError, ServerConfig};
use probes::ProcessMetrics;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub metrics: Arc<ProcessMetrics>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let metrics = ProcessMetrics::new(&config.version, &config.environment);
        Self {
            config: Arc::new(config),
            metrics: Arc::new(metrics),
            http: reqwest::Client::new(),
        }
    }
}

async fn count_requests(State(state): State<AppState>, request: Request, next: Next) -> Response {
    state.metrics.record_request();
    next.run(request).await
}

pub fn router(state: AppState) -> Router {
    let app = Router::new()
        .route("/api/health", get(probes::health_handler))
        .route("/api/ready", get(probes::ready_handler))
        .route("/api/metrics", get(probes::metrics_handler))
        .route("/api/lists", any(proxy::proxy_handler))
        .route("/api/lists/{*rest}", any(proxy::proxy_handler))
        .route("/api/tasks/{*rest}", any(proxy::proxy_handler));

    let app = match &state.config.static_dir {
        Some(dir) => {
            let index = ServeFile::new(dir.join("index.html"));
            app.fallback_service(ServeDir::new(dir).fallback(index))
        }
        None => app,
    };

    app.layer(middleware::from_fn_with_state(state.clone(), count_requests))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until Ctrl-C
pub async fn serve(config: ServerConfig) -> Result<(), ServerError> {
    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        upstream = %config.upstream_url,
        environment = %config.environment,
        "listapro server listening"
    );

    axum::serve(listener, router(AppState::new(config)))
        .with_graceful_shutdown(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %err, "failed to listen for shutdown signal");
            }
            tracing::info!("shutting down");
        })
        .await?;
    Ok(())
}
