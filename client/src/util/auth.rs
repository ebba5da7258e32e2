//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Authenticated pages (dashboard, new project, project, account) apply
//! identical unauthenticated redirect behavior; the login page applies the
//! inverse.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::AuthState;

/// Whether a guarded page should leave for `/login`.
#[must_use]
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.loading && state.user.is_none()
}

/// Whether the login page should leave for the dashboard.
#[must_use]
pub fn should_redirect_authed(state: &AuthState) -> bool {
    !state.loading && state.user.is_some()
}

/// Redirect to `/login` whenever auth has loaded and no user is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_unauth(&auth.get()) {
            navigate("/login", NavigateOptions::default());
        }
    });
}

/// Redirect to `/` once an existing session is known.
pub fn install_authed_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_authed(&auth.get()) {
            navigate("/", NavigateOptions::default());
        }
    });
}
