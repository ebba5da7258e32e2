//! HTTP error type for the `/api/*` surface.
//!
//! Every failing route answers `{"error": "<message>"}` with a status code
//! chosen here, so handlers only return `Result<_, ApiError>` and use `?`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use client::net::types::ErrorBody;

use crate::services::auth::AuthError;
use crate::services::backend::BackendError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("not authenticated")]
    Unauthenticated,
    #[error("user does not match the signed-in session")]
    UserMismatch,
    #[error("file too large (max 10MB)")]
    PayloadTooLarge,
    #[error("{0} is not configured")]
    Unavailable(&'static str),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated | Self::Auth(AuthError::InvalidToken) => StatusCode::UNAUTHORIZED,
            Self::UserMismatch => StatusCode::FORBIDDEN,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Auth(AuthError::Rejected { status, .. }) => match status {
                401 | 403 => StatusCode::UNAUTHORIZED,
                429 => StatusCode::TOO_MANY_REQUESTS,
                400..=499 => StatusCode::BAD_REQUEST,
                _ => StatusCode::BAD_GATEWAY,
            },
            Self::Auth(_) | Self::Backend(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Message sent to the browser. Upstream details stay in the logs.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Auth(AuthError::Rejected { message, .. }) => message.clone(),
            Self::Auth(AuthError::InvalidToken) => Self::Unauthenticated.to_string(),
            Self::Auth(_) => "auth provider unavailable".to_owned(),
            Self::Backend(_) => "research backend request failed".to_owned(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, %status, "request failed");
        } else {
            tracing::debug!(error = %self, %status, "request rejected");
        }
        (status, Json(ErrorBody { error: self.public_message() })).into_response()
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
