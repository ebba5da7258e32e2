//! Auth provider client for the GoTrue REST surface (`/auth/v1/*`).
//!
//! SYSTEM CONTEXT
//! ==============
//! Routes talk to the provider only through [`AuthProvider`], so tests can
//! swap in a mock. The provider's access token is the session token the
//! server keeps in the browser's HttpOnly cookie.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::AuthConfig;

const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProviderUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Result of a password sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSession {
    pub access_token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: ProviderUser,
}

/// Result of a sign-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpOutcome {
    /// `false` when the provider auto-confirmed the account.
    pub confirmation_sent: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("auth http client build failed: {0}")]
    HttpClientBuild(String),
    #[error("auth provider request failed: {0}")]
    Request(String),
    /// The provider answered with a non-success status.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("session token is invalid or expired")]
    InvalidToken,
    #[error("unexpected auth provider response: {0}")]
    Decode(String),
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderSession, AuthError>;

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        client_id: &str,
        redirect_to: &str,
    ) -> Result<SignUpOutcome, AuthError>;

    /// Resolve the user behind an access token.
    async fn user(&self, access_token: &str) -> Result<ProviderUser, AuthError>;

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;
}

// =============================================================================
// GOTRUE CLIENT
// =============================================================================

pub struct GoTrueAuth {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl GoTrueAuth {
    /// Build a client for the configured provider.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::HttpClientBuild`] if the HTTP client cannot be
    /// constructed.
    pub fn new(config: &AuthConfig) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| AuthError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.url.clone(), anon_key: config.anon_key.clone() })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url)
    }

    async fn read(response: reqwest::Response) -> Result<String, AuthError> {
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| AuthError::Request(e.to_string()))?;
        if !(200..300).contains(&status) {
            return Err(AuthError::Rejected { status, message: parse_error_message(&text, status) });
        }
        Ok(text)
    }
}

#[async_trait]
impl AuthProvider for GoTrueAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderSession, AuthError> {
        let response = self
            .http
            .post(self.endpoint("token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| AuthError::Request(e.to_string()))?;
        parse_session(&Self::read(response).await?)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        client_id: &str,
        redirect_to: &str,
    ) -> Result<SignUpOutcome, AuthError> {
        let response = self
            .http
            .post(self.endpoint("signup"))
            .query(&[("redirect_to", redirect_to)])
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "data": { "client_id": client_id },
            }))
            .send()
            .await
            .map_err(|e| AuthError::Request(e.to_string()))?;
        parse_sign_up(&Self::read(response).await?)
    }

    async fn user(&self, access_token: &str) -> Result<ProviderUser, AuthError> {
        let response = self
            .http
            .get(self.endpoint("user"))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthError::Request(e.to_string()))?;
        match Self::read(response).await {
            Ok(text) => serde_json::from_str(&text).map_err(|e| AuthError::Decode(e.to_string())),
            Err(AuthError::Rejected { status: 401 | 403, .. }) => Err(AuthError::InvalidToken),
            Err(e) => Err(e),
        }
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let response = self
            .http
            .post(self.endpoint("logout"))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthError::Request(e.to_string()))?;
        Self::read(response).await.map(|_| ())
    }
}

// =============================================================================
// PARSING
// =============================================================================

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
    user: ProviderUser,
}

fn default_expires_in() -> i64 {
    3600
}

#[derive(Deserialize)]
struct ErrorResponse {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

/// Best human-readable message from a provider error body.
pub(crate) fn parse_error_message(body: &str, status: u16) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|e| e.error_description.or(e.msg).or(e.message).or(e.error))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("auth provider returned {status}"))
}

pub(crate) fn parse_session(body: &str) -> Result<ProviderSession, AuthError> {
    let token: TokenResponse = serde_json::from_str(body).map_err(|e| AuthError::Decode(e.to_string()))?;
    Ok(ProviderSession { access_token: token.access_token, expires_in: token.expires_in, user: token.user })
}

/// A sign-up answer carrying a session means the account was auto-confirmed.
pub(crate) fn parse_sign_up(body: &str) -> Result<SignUpOutcome, AuthError> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| AuthError::Decode(e.to_string()))?;
    let has_session = value.get("access_token").is_some_and(|t| !t.is_null());
    Ok(SignUpOutcome { confirmation_sent: !has_session })
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
