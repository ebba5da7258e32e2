//! Auth routes: email/password sessions proxied to the auth provider.
//!
//! The provider's access token never reaches page scripts. It lives in an
//! HttpOnly cookie and every authenticated request resolves it back to a
//! user through [`AuthUser`].

use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Redirect};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use client::net::types::{SignInRequest, SignUpRequest, SignUpResponse, User};
use time::Duration;

use crate::error::ApiError;
use crate::services::auth::ProviderUser;
use crate::state::AppState;

pub(crate) const COOKIE_NAME: &str = "medgem_session";

/// Where the sign-up confirmation email lands by default.
const CALLBACK_PATH: &str = "/auth/callback";

fn to_user(user: ProviderUser) -> User {
    User { id: user.id, email: user.email }
}

fn session_cookie(value: String, secure: bool, max_age: Duration) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(max_age)
        .build()
}

/// Keep confirmation links on our own origin.
///
/// Anything that is not `public_origin` itself or a path below it falls
/// back to `{public_origin}/auth/callback`.
pub(crate) fn confirmation_redirect(public_origin: &str, requested: &str) -> String {
    let requested = requested.trim();
    let same_origin = requested
        .strip_prefix(public_origin)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'));
    if same_origin {
        requested.to_owned()
    } else {
        format!("{public_origin}{CALLBACK_PATH}")
    }
}

fn require_credentials(email: &str, password: &str) -> Result<(), ApiError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(ApiError::BadRequest("email and password are required".into()));
    }
    Ok(())
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated user extracted from the session cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user: User,
}

impl AuthUser {
    /// Reject a request whose body names a different user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UserMismatch`] when `user_id` is not the session user.
    pub fn ensure(&self, user_id: &str) -> Result<(), ApiError> {
        if self.user.id == user_id { Ok(()) } else { Err(ApiError::UserMismatch) }
    }
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let provider = app_state.auth()?;

        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(ApiError::Unauthenticated);
        }

        let user = provider.user(token).await?;
        Ok(Self { user: to_user(user) })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /api/auth/session`: return the signed-in user.
pub async fn session(auth: AuthUser) -> Json<User> {
    Json(auth.user)
}

/// `POST /api/auth/sign-in`: password grant, then set the session cookie.
pub async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<SignInRequest>,
) -> Result<(CookieJar, Json<User>), ApiError> {
    require_credentials(&req.email, &req.password)?;
    let provider = state.auth()?;

    let session = provider.sign_in(req.email.trim(), &req.password).await?;
    tracing::info!(user_id = %session.user.id, "signed in");

    let cookie = session_cookie(
        session.access_token,
        state.config.cookie_secure,
        Duration::seconds(session.expires_in),
    );
    Ok((jar.add(cookie), Json(to_user(session.user))))
}

/// `POST /api/auth/sign-up`: create the account; the provider emails a link.
pub async fn sign_up(
    State(state): State<AppState>,
    Json(req): Json<SignUpRequest>,
) -> Result<Json<SignUpResponse>, ApiError> {
    require_credentials(&req.email, &req.password)?;
    let provider = state.auth()?;

    let redirect_to = confirmation_redirect(&state.config.public_origin, &req.redirect_to);
    let outcome = provider
        .sign_up(req.email.trim(), &req.password, &req.client_id, &redirect_to)
        .await?;
    tracing::info!(client_id = %req.client_id, confirmation_sent = outcome.confirmation_sent, "account created");

    Ok(Json(SignUpResponse { confirmation_sent: outcome.confirmation_sent }))
}

/// `POST /api/auth/sign-out`: revoke the token upstream and clear the cookie.
///
/// Always answers 204: a dead upstream session must not keep the browser
/// signed in.
pub async fn sign_out(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let token = jar.get(COOKIE_NAME).map(|c| c.value().to_owned()).unwrap_or_default();
    if let (false, Some(provider)) = (token.is_empty(), state.auth.as_ref()) {
        if let Err(e) = provider.sign_out(&token).await {
            tracing::warn!(error = %e, "provider sign-out failed");
        }
    }

    let cookie = session_cookie(String::new(), state.config.cookie_secure, Duration::ZERO);
    (jar.add(cookie), StatusCode::NO_CONTENT)
}

/// `GET /auth/callback`: landing page for the confirmation email.
pub async fn callback() -> Redirect {
    Redirect::temporary("/login?confirmed=1")
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
