pub mod config;
pub mod error;
pub mod health;
pub mod logging;
pub mod model;
pub mod routes;
pub mod state;
pub mod store;

pub use config::{CliArgs, ServerConfig};
pub use error::{ApiError, ErrorCode};
pub use logging::{LoggingConfig, init_logging};
pub use state::AppState;
pub use store::Store;

use anyhow::Result;
use axum::Router;
use axum::routing::get;
use health::HealthChecker;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builds the full application router: the REST API plus health probes.
/// Exposed separately from [`run_server`] so tests can drive the router
/// without binding a socket.
pub fn app_router(state: Arc<AppState>) -> Router {
    let health_checker = Arc::new(HealthChecker::new(state.clone()));
    let health_routes = Router::new()
        .route("/health", get(health::liveness_handler))
        .route("/ready", get(health::readiness_handler))
        .route("/health/components", get(health::components_handler))
        .with_state(health_checker);

    routes::api_router().with_state(state).merge(health_routes)
}

pub async fn run_server(config: ServerConfig) -> Result<()> {
    let config = Arc::new(config);
    let state = Arc::new(AppState::new(config.clone()));

    tracing::info!(
        bind = %config.http_bind_address,
        seed = config.seed_demo_data,
        "starting storefront server",
    );

    let router = app_router(state);
    let listener = TcpListener::bind(config.http_bind_address).await?;
    let actual_addr = listener.local_addr()?;
    tracing::info!(bind = %actual_addr, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)
}

/// Resolves when SIGINT or SIGTERM arrives, letting in-flight requests
/// drain before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install ctrl-c handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("failed to install sigterm handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
