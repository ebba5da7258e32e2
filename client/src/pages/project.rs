//! Project workspace page: chat sidebar plus the research paper panel.

use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::components::chat_panel::ChatPanel;
use crate::components::navbar::Navbar;
use crate::components::research_paper_panel::ResearchPaperPanel;
use crate::state::auth::AuthState;
use crate::util::auth::install_unauth_redirect;

#[component]
pub fn ProjectPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_unauth_redirect(auth, use_navigate());

    let params = use_params_map();
    let project_id = Signal::derive(move || params.get().get("id").unwrap_or_default());

    // Opening a project moves it to the front of the dashboard list.
    Effect::new(move || {
        let id = project_id.get();
        if !id.is_empty() {
            crate::util::storage::record_recent_project(&id, None, &crate::util::time::today_label());
        }
    });

    view! {
        <div class="project-page">
            <Navbar/>
            <div class="project-page__body">
                <ChatPanel project_id=project_id/>
                <ResearchPaperPanel project_id=project_id/>
            </div>
        </div>
    }
}
