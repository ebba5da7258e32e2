//! Account page showing the signed-in user and a sign-out action.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::navbar::Navbar;
use crate::state::auth::AuthState;
use crate::util::auth::install_unauth_redirect;

#[component]
pub fn AccountPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_unauth_redirect(auth, use_navigate());

    Effect::new(move || {
        if let Some(id) = auth.get().user_id() {
            #[cfg(feature = "hydrate")]
            log::info!("current user id: {id}");
            #[cfg(not(feature = "hydrate"))]
            let _ = id;
        }
    });

    let signing_out = RwSignal::new(false);
    let on_sign_out = move |_| {
        if signing_out.get_untracked() {
            return;
        }
        signing_out.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            crate::net::api::sign_out().await;
            auth.update(|a| a.resolve(None));
            if let Some(w) = web_sys::window() {
                if let Err(e) = w.location().set_href("/login") {
                    log::warn!("redirect to /login failed: {e:?}");
                }
            }
        });
    };

    let user_id = move || auth.get().user_id().map(str::to_owned).unwrap_or_default();
    let email = move || {
        auth.get()
            .user
            .and_then(|u| u.email)
            .unwrap_or_else(|| "(no email)".to_owned())
    };

    view! {
        <div class="account-page">
            <Navbar/>
            <main class="account-page__content">
                <h1>"Account"</h1>
                <dl class="account-page__details">
                    <dt>"Email"</dt>
                    <dd>{email}</dd>
                    <dt>"User ID"</dt>
                    <dd class="account-page__mono">{user_id}</dd>
                </dl>
                <button class="btn btn--danger" on:click=on_sign_out disabled=move || signing_out.get()>
                    {move || if signing_out.get() { "Signing out..." } else { "Sign Out" }}
                </button>
            </main>
        </div>
    }
}
