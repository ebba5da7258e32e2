mod config;
mod error;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::auth::{AuthProvider, GoTrueAuth};
use crate::services::backend::{HttpBackend, ResearchBackend};

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error("{0}")]
    Leptos(String),
    #[error("failed to bind port {port}: {source}")]
    Bind { port: u16, source: std::io::Error },
    #[error("server failed: {0}")]
    Serve(std::io::Error),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    match dotenvy::dotenv() {
        Ok(path) => tracing::info!(path = %path.display(), "loaded environment file"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "ignoring unreadable .env file"),
    }

    if let Err(e) = run().await {
        tracing::error!(error = %e, "medgem failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let config = ServerConfig::from_env()?;

    // Auth and backend are non-fatal: their routes answer 503 when missing.
    let auth: Option<Arc<dyn AuthProvider>> = match config.auth.as_ref().map(GoTrueAuth::new) {
        Some(Ok(client)) => {
            tracing::info!("auth provider configured");
            Some(Arc::new(client))
        }
        Some(Err(e)) => {
            tracing::warn!(error = %e, "auth provider unavailable; auth routes disabled");
            None
        }
        None => {
            tracing::warn!("AUTH_URL not set; auth routes disabled");
            None
        }
    };

    let backend: Option<Arc<dyn ResearchBackend>> = match config.backend.as_ref().map(HttpBackend::new) {
        Some(Ok(client)) => {
            tracing::info!("research backend configured");
            Some(Arc::new(client))
        }
        Some(Err(e)) => {
            tracing::warn!(error = %e, "research backend unavailable; research routes disabled");
            None
        }
        None => {
            tracing::warn!("BACKEND_URL not set; research routes disabled");
            None
        }
    };

    let port = config.port;
    let state = state::AppState::new(config, auth, backend);
    let app = routes::leptos_app(state).map_err(StartupError::Leptos)?;

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .map_err(|source| StartupError::Bind { port, source })?;

    tracing::info!(%port, "medgem listening");
    axum::serve(listener, app).await.map_err(StartupError::Serve)
}
