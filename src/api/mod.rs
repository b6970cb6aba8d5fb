// src/api/mod.rs — HTTP API for scenario analysis and AI usage

pub mod handlers;
pub mod types;

use axum::http::{HeaderName, HeaderValue};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::core::ScenarioService;
use crate::infra::config::ServerConfig;

/// Header carrying the client's session token, in both directions.
pub const SESSION_HEADER: &str = "x-session-id";

const DEV_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://localhost:5173",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:5173",
];

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub service: Arc<ScenarioService>,
}

impl ApiState {
    pub fn new(service: Arc<ScenarioService>) -> Self {
        Self { service }
    }
}

/// Build the axum router with all API routes.
pub fn build_router(state: ApiState) -> Router {
    let session = HeaderName::from_static(SESSION_HEADER);
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(
            DEV_ORIGINS.into_iter().map(HeaderValue::from_static),
        ))
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([session]);

    let scenario = Router::new()
        .route("/suggest", post(handlers::suggest))
        .route("/opt-in", post(handlers::opt_in))
        .route("/opt-out", post(handlers::opt_out))
        .route("/usage", get(handlers::usage))
        .route("/coaching-tips", get(handlers::coaching_tips));

    Router::new()
        .nest("/api/v1/scenario", scenario)
        .route("/api/v1/health", get(handlers::health))
        .layer(cors)
        .with_state(state)
}

/// Serve the API until the process is stopped.
pub async fn start_server(config: &ServerConfig, state: ApiState) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let router = build_router(state);

    tracing::info!("API server listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down API server");
        })
        .await?;
    Ok(())
}
