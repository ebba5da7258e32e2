//! Shared wire DTOs for the client/server boundary.
//!
//! DESIGN
//! ======
//! The `server` crate depends on this crate with the `ssr` feature and uses
//! these same types for its `/api/*` handlers, so both sides of the
//! same-origin API agree on one schema.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// An authenticated user as returned by `/api/auth/session`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Auth provider user identifier (UUID string).
    pub id: String,
    /// Account email, if the provider exposes one.
    #[serde(default)]
    pub email: Option<String>,
}

/// Email + password credentials for `POST /api/auth/sign-in`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Account creation payload for `POST /api/auth/sign-up`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    /// Generated `CLT-...` identifier stored as user metadata.
    pub client_id: String,
    /// Where the confirmation email should send the user back to.
    pub redirect_to: String,
}

/// Result of a sign-up call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpResponse {
    /// `true` when the provider sent a confirmation email instead of
    /// starting a session right away.
    pub confirmation_sent: bool,
}

/// `POST /api/chat/start` payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatStartRequest {
    pub user_id: String,
    pub project_id: String,
}

/// Greeting returned when a chat session is initiated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatStartResponse {
    pub reply: String,
}

/// `POST /api/chat` payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessageRequest {
    pub user_id: String,
    pub project_id: String,
    pub message: String,
}

/// Assistant reply to a chat message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessageResponse {
    pub response: String,
}

/// Result of `POST /api/upload`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub file_id: String,
}

/// `POST /api/generate` payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub user_id: String,
    pub project_id: String,
    pub file_ids: Vec<String>,
}

/// A backend-generated candidate research direction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hypothesis {
    pub title: String,
    pub description: String,
}

/// Generation output: hypotheses plus an optional LaTeX paper source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub paper_id: String,
    #[serde(default)]
    pub hypotheses: Vec<Hypothesis>,
    #[serde(default)]
    pub latex: Option<String>,
}

/// Query for `GET /api/research`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchQuery {
    pub project_id: String,
    pub selection_id: u32,
}

/// Generated paper text for one selection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchResponse {
    pub paper: String,
}

/// JSON error body returned by every failing `/api/*` route.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
