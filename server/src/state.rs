//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! Handlers are stateless forwarders: the state only holds configuration
//! and `Arc`-shared clients for the auth provider and the research backend,
//! each `None` when not configured.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::services::auth::AuthProvider;
use crate::services::backend::ResearchBackend;

/// Shared application state, injected into Axum handlers via State extractor.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub auth: Option<Arc<dyn AuthProvider>>,
    pub backend: Option<Arc<dyn ResearchBackend>>,
}

impl AppState {
    #[must_use]
    pub fn new(
        config: ServerConfig,
        auth: Option<Arc<dyn AuthProvider>>,
        backend: Option<Arc<dyn ResearchBackend>>,
    ) -> Self {
        Self { config: Arc::new(config), auth, backend }
    }

    /// The auth provider, or 503 when it is not configured.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unavailable`] when auth is disabled.
    pub fn auth(&self) -> Result<&Arc<dyn AuthProvider>, ApiError> {
        self.auth.as_ref().ok_or(ApiError::Unavailable("auth provider"))
    }

    /// The research backend, or 503 when it is not configured.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unavailable`] when the backend is disabled.
    pub fn backend(&self) -> Result<&Arc<dyn ResearchBackend>, ApiError> {
        self.backend.as_ref().ok_or(ApiError::Unavailable("research backend"))
    }
}

#[cfg(test)]
#[path = "state_helpers_test.rs"]
pub mod test_helpers;

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
