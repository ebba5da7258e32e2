//! Dashboard page listing recent projects and the new-project tile.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. Projects are read from the
//! browser's recent-projects list; there is no server-side project index.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::navbar::Navbar;
use crate::components::new_project_button::NewProjectButton;
use crate::components::project_card::ProjectCard;
use crate::state::auth::AuthState;
use crate::state::projects::RecentProjects;
use crate::util::auth::install_unauth_redirect;

/// Dashboard page. Redirects to `/login` if the user is not authenticated.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_unauth_redirect(auth, use_navigate());

    let recent = RwSignal::new(RecentProjects::default());
    Effect::new(move || recent.set(crate::util::storage::load_recent_projects()));

    view! {
        <Show
            when=move || !auth.get().loading && auth.get().user.is_some()
            fallback=move || {
                view! {
                    <div class="dashboard-page">
                        <p>{move || if auth.get().loading { "Loading..." } else { "Redirecting to login..." }}</p>
                    </div>
                }
            }
        >
            <div class="dashboard-page">
                <Navbar/>
                <main class="dashboard-page__content">
                    <h1 class="dashboard-page__title">"Projects"</h1>
                    <div class="dashboard-page__cards">
                        <NewProjectButton/>
                        <For
                            each=move || recent.get().items
                            key=|project| project.id.clone()
                            children=move |project| view! { <ProjectCard project=project/> }
                        />
                    </div>
                    <Show when=move || recent.get().items.is_empty()>
                        <p class="dashboard-page__empty">"No projects yet. Start one to see it here."</p>
                    </Show>
                </main>
            </div>
        </Show>
    }
}
