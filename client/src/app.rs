//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::{
    account::AccountPage, dashboard::DashboardPage, login::LoginPage, new_project::NewProjectPage,
    project::ProjectPage,
};
use crate::state::{auth::AuthState, chat::ChatState};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the shared auth and chat contexts, resolves the session once on
/// startup, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    let chat = RwSignal::new(ChatState::default());
    provide_context(auth);
    provide_context(chat);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let user = crate::net::api::fetch_session().await;
        auth.update(|a| a.resolve(user));
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/medgem.css"/>
        <Title text="MedGem"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("") view=DashboardPage/>
                <Route path=StaticSegment("account") view=AccountPage/>
                <Route path=(StaticSegment("projects"), StaticSegment("new")) view=NewProjectPage/>
                <Route path=(StaticSegment("projects"), ParamSegment("id")) view=ProjectPage/>
            </Routes>
        </Router>
    }
}
