//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the same-origin `/api/*` endpoints and stitches them
//! with Leptos SSR rendering under a single Axum router. Static assets
//! built by cargo-leptos are served from `/pkg`.

pub mod auth;
pub mod research;

use std::path::PathBuf;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::{get, post};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// API routes shared by every page of the app.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/session", get(auth::session))
        .route("/api/auth/sign-in", post(auth::sign_in))
        .route("/api/auth/sign-up", post(auth::sign_up))
        .route("/api/auth/sign-out", post(auth::sign_out))
        .route("/auth/callback", get(auth::callback))
        .route("/api/chat/start", post(research::chat_start))
        .route("/api/chat", post(research::chat))
        .route(
            "/api/upload",
            post(research::upload).layer(DefaultBodyLimit::max(research::UPLOAD_BODY_LIMIT)),
        )
        .route("/api/generate", post(research::generate))
        .route("/api/research", get(research::research))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// Full application: API routes + Leptos SSR + `/pkg` assets.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `[[workspace.metadata.leptos]]` section).
pub fn leptos_app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(api_routes(state)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http()))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
