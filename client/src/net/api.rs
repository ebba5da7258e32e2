//! Typed REST client for the same-origin `/api/*` surface.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `None`/[`ApiError::Unavailable`]
//! since these endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, ApiError>`; views turn the error into a
//! banner string. Nothing here panics, so a failed request can never take
//! down hydration.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

#[cfg(feature = "hydrate")]
use serde::Serialize;
#[cfg(feature = "hydrate")]
use serde::de::DeserializeOwned;

use super::types::{
    ChatMessageRequest, ChatMessageResponse, ChatStartRequest, ChatStartResponse, ErrorBody, GenerateRequest,
    GenerateResponse, ResearchResponse, SignInRequest, SignUpRequest, SignUpResponse, User,
};
#[cfg(feature = "hydrate")]
use super::types::UploadResponse;

/// Failure modes of an `/api/*` call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The session cookie is missing or expired.
    #[error("not authenticated")]
    Unauthenticated,
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),
    /// The server answered with a non-success status.
    #[error("{message}")]
    Status { status: u16, message: String },
    /// The response body did not match the expected schema.
    #[error("unexpected response: {0}")]
    Decode(String),
    /// Called outside the browser.
    #[error("not available on server")]
    Unavailable,
}

/// Query pairs for `GET /api/research`; the HTTP client encodes them.
#[cfg(any(feature = "hydrate", test))]
fn research_query(project_id: &str, selection_id: u32) -> [(&'static str, String); 2] {
    [("projectId", project_id.to_owned()), ("selectionId", selection_id.to_string())]
}

/// Map a non-success status and raw body to an [`ApiError`].
///
/// Prefers the server's `{ "error": ... }` message when present.
fn error_from_status(status: u16, body: &str) -> ApiError {
    if status == 401 {
        return ApiError::Unauthenticated;
    }
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error)
        .ok()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("request failed: {status}"));
    ApiError::Status { status, message }
}

#[cfg(feature = "hydrate")]
async fn read_json<T: DeserializeOwned>(resp: gloo_net::http::Response) -> Result<T, ApiError> {
    if !resp.ok() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(error_from_status(status, &body));
    }
    resp.json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(feature = "hydrate")]
async fn post_json<B: Serialize, T: DeserializeOwned>(url: &str, body: &B) -> Result<T, ApiError> {
    let resp = gloo_net::http::Request::post(url)
        .json(body)
        .map_err(|e| ApiError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    read_json(resp).await
}

/// Fetch the current session user from `/api/auth/session`.
/// Returns `None` if not authenticated or on the server.
pub async fn fetch_session() -> Option<User> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get("/api/auth/session")
            .send()
            .await
            .ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<User>().await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Sign in with email and password; the server sets the session cookie.
///
/// # Errors
///
/// Returns the provider's rejection message or a transport error.
pub async fn sign_in(req: &SignInRequest) -> Result<User, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        post_json("/api/auth/sign-in", req).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = req;
        Err(ApiError::Unavailable)
    }
}

/// Create an account. The provider normally answers by emailing a link.
///
/// # Errors
///
/// Returns the provider's rejection message or a transport error.
pub async fn sign_up(req: &SignUpRequest) -> Result<SignUpResponse, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        post_json("/api/auth/sign-up", req).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = req;
        Err(ApiError::Unavailable)
    }
}

/// Sign out by calling `POST /api/auth/sign-out`.
pub async fn sign_out() {
    #[cfg(feature = "hydrate")]
    {
        match gloo_net::http::Request::post("/api/auth/sign-out").send().await {
            Ok(resp) if !resp.ok() => log::warn!("sign-out returned {}", resp.status()),
            Ok(_) => {}
            Err(e) => log::warn!("sign-out request failed: {e}"),
        }
    }
}

/// Initiate a chat session for a project and return the greeting.
///
/// # Errors
///
/// Returns an error if the request fails or the backend rejects it.
pub async fn start_chat(req: &ChatStartRequest) -> Result<ChatStartResponse, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        post_json("/api/chat/start", req).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = req;
        Err(ApiError::Unavailable)
    }
}

/// Send one chat message and return the assistant reply.
///
/// # Errors
///
/// Returns an error if the request fails or the backend rejects it.
pub async fn send_message(req: &ChatMessageRequest) -> Result<ChatMessageResponse, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        post_json("/api/chat", req).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = req;
        Err(ApiError::Unavailable)
    }
}

/// Upload one browser file as multipart form data.
///
/// # Errors
///
/// Returns an error if the form cannot be built, the request fails, or the
/// backend rejects the file.
#[cfg(feature = "hydrate")]
pub async fn upload_file(
    file: &web_sys::File,
    user_id: &str,
    project_id: Option<&str>,
) -> Result<UploadResponse, ApiError> {
    let form = web_sys::FormData::new().map_err(|_| ApiError::Network("form data unavailable".to_owned()))?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(|_| ApiError::Network("could not attach file".to_owned()))?;
    form.append_with_str("user_id", user_id)
        .map_err(|_| ApiError::Network("could not attach user id".to_owned()))?;
    if let Some(project_id) = project_id {
        form.append_with_str("project_id", project_id)
            .map_err(|_| ApiError::Network("could not attach project id".to_owned()))?;
    }

    let resp = gloo_net::http::Request::post("/api/upload")
        .body(form)
        .map_err(|e| ApiError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    read_json(resp).await
}

/// Request hypothesis/paper generation for a set of uploaded files.
///
/// # Errors
///
/// Returns an error if the request fails or generation is rejected.
pub async fn generate(req: &GenerateRequest) -> Result<GenerateResponse, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        post_json("/api/generate", req).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = req;
        Err(ApiError::Unavailable)
    }
}

/// Fetch the generated paper text for one selected hypothesis.
///
/// # Errors
///
/// Returns an error if the request fails or the backend has no paper.
pub async fn fetch_research(project_id: &str, selection_id: u32) -> Result<ResearchResponse, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get("/api/research")
            .query(research_query(project_id, selection_id))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_json(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (project_id, selection_id);
        Err(ApiError::Unavailable)
    }
}
