//! Dashboard tile that starts the new-project flow.

use leptos::prelude::*;

#[component]
pub fn NewProjectButton() -> impl IntoView {
    view! {
        <a class="project-card project-card--new" href="/projects/new">
            <span class="project-card__plus" aria-hidden="true">
                "+"
            </span>
            <span class="project-card__title">"New Project"</span>
        </a>
    }
}
