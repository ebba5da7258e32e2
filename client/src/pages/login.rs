//! Login page with sign-in and sign-up modes.
//!
//! SYSTEM CONTEXT
//! ==============
//! Talks to the same-origin `/api/auth/*` routes. A successful sign-in sets
//! the session cookie server side; the page then resolves `AuthState` and
//! leaves for the dashboard. Sign-up only sends the confirmation email.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::net::api::ApiError;
use crate::state::auth::AuthState;
use crate::util::auth::install_authed_redirect;

const ALREADY_REGISTERED: &str = "Email already in use. Please sign in instead.";
const RATE_LIMITED: &str = "Too many attempts. Please wait a few minutes before trying again.";
const CONFIRMATION_SENT: &str = "Check your email for the confirmation link!";

/// Which form the page shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    SignIn,
    SignUp,
}

/// User-facing text for an auth failure, plus whether to switch to sign-in.
fn describe_auth_error(err: &ApiError) -> (String, bool) {
    let message = err.to_string();
    let lower = message.to_ascii_lowercase();
    if lower.contains("already registered") {
        return (ALREADY_REGISTERED.to_owned(), true);
    }
    let rate_limited = matches!(err, ApiError::Status { status: 429, .. })
        || lower.contains("rate limit")
        || lower.contains("too many");
    if rate_limited {
        return (RATE_LIMITED.to_owned(), false);
    }
    (message, false)
}

/// Validate the sign-up form and return the trimmed email.
fn validate_sign_up(email: &str, password: &str, confirm: &str) -> Result<String, &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter an email and password.");
    }
    if password != confirm {
        return Err("Passwords do not match");
    }
    Ok(email.to_owned())
}

/// Validate the sign-in form and return the trimmed email.
fn validate_sign_in(email: &str, password: &str) -> Result<String, &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter an email and password.");
    }
    Ok(email.to_owned())
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    let query = use_query_map();
    install_authed_redirect(auth, navigate.clone());

    let mode = RwSignal::new(Mode::SignIn);
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let info = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    Effect::new(move || {
        if query.get().get("confirmed").is_some() {
            info.set(Some("Email confirmed. Please sign in.".to_owned()));
        }
    });

    let toggle_mode = move |_| {
        mode.update(|m| *m = if *m == Mode::SignIn { Mode::SignUp } else { Mode::SignIn });
        error.set(None);
        info.set(None);
        confirm.set(String::new());
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        error.set(None);
        info.set(None);
        let password_value = password.get_untracked();

        match mode.get_untracked() {
            Mode::SignIn => {
                let email_value = match validate_sign_in(&email.get_untracked(), &password_value) {
                    Ok(v) => v,
                    Err(msg) => {
                        error.set(Some(msg.to_owned()));
                        return;
                    }
                };
                busy.set(true);

                #[cfg(feature = "hydrate")]
                {
                    let navigate = navigate.clone();
                    leptos::task::spawn_local(async move {
                        let req = crate::net::types::SignInRequest { email: email_value, password: password_value };
                        match crate::net::api::sign_in(&req).await {
                            Ok(user) => {
                                log::info!("signed in as {}", user.id);
                                auth.update(|a| a.resolve(Some(user)));
                                navigate("/", leptos_router::NavigateOptions::default());
                            }
                            Err(e) => error.set(Some(describe_auth_error(&e).0)),
                        }
                        busy.set(false);
                    });
                }
                #[cfg(not(feature = "hydrate"))]
                let _ = (email_value, &navigate);
            }
            Mode::SignUp => {
                let email_value = match validate_sign_up(
                    &email.get_untracked(),
                    &password_value,
                    &confirm.get_untracked(),
                ) {
                    Ok(v) => v,
                    Err(msg) => {
                        error.set(Some(msg.to_owned()));
                        return;
                    }
                };
                busy.set(true);

                #[cfg(feature = "hydrate")]
                leptos::task::spawn_local(async move {
                    let origin = web_sys::window()
                        .and_then(|w| w.location().origin().ok())
                        .unwrap_or_default();
                    let req = crate::net::types::SignUpRequest {
                        email: email_value,
                        password: password_value,
                        client_id: crate::util::client_id::new_client_id(),
                        redirect_to: format!("{origin}/auth/callback"),
                    };
                    match crate::net::api::sign_up(&req).await {
                        Ok(_) => {
                            info.set(Some(CONFIRMATION_SENT.to_owned()));
                            password.set(String::new());
                            confirm.set(String::new());
                        }
                        Err(e) => {
                            let (message, switch_to_sign_in) = describe_auth_error(&e);
                            error.set(Some(message));
                            if switch_to_sign_in {
                                mode.set(Mode::SignIn);
                            }
                        }
                    }
                    busy.set(false);
                });
                #[cfg(not(feature = "hydrate"))]
                let _ = email_value;
            }
        }
    };

    let is_sign_up = move || mode.get() == Mode::SignUp;

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"MedGem"</h1>
                <p class="login-card__subtitle">
                    {move || if is_sign_up() { "Create an account" } else { "Sign in to your account" }}
                </p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        autocomplete="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <Show when=is_sign_up>
                        <input
                            class="login-input"
                            type="password"
                            placeholder="Confirm password"
                            prop:value=move || confirm.get()
                            on:input=move |ev| confirm.set(event_target_value(&ev))
                        />
                    </Show>
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || match (busy.get(), is_sign_up()) {
                            (true, _) => "Please wait...",
                            (false, true) => "Sign Up",
                            (false, false) => "Sign In",
                        }}
                    </button>
                </form>
                <Show when=move || error.get().is_some()>
                    <p class="login-message login-message--error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <Show when=move || info.get().is_some()>
                    <p class="login-message">{move || info.get().unwrap_or_default()}</p>
                </Show>
                <div class="login-divider"></div>
                <button class="login-toggle" type="button" on:click=toggle_mode>
                    {move || {
                        if is_sign_up() { "Already have an account? Sign in" } else { "Need an account? Sign up" }
                    }}
                </button>
            </div>
        </div>
    }
}
