//! Dashboard card for one recent project.

use leptos::prelude::*;

use crate::state::projects::ProjectSummary;

/// A clickable card linking to `/projects/{id}`.
#[component]
pub fn ProjectCard(project: ProjectSummary) -> impl IntoView {
    let href = format!("/projects/{}", project.id);
    let (from, to) = project.gradient();
    let gradient_id = project.gradient_id();
    let fill = format!("url(#{gradient_id})");

    view! {
        <a class="project-card" href=href>
            <svg class="project-card__icon" viewBox="0 0 64 52" aria-hidden="true">
                <defs>
                    <linearGradient id=gradient_id x1="0" y1="0" x2="1" y2="1">
                        <stop offset="0%" stop-color=from></stop>
                        <stop offset="100%" stop-color=to></stop>
                    </linearGradient>
                </defs>
                <path d="M4 8a4 4 0 0 1 4-4h16l6 6h26a4 4 0 0 1 4 4v30a4 4 0 0 1-4 4H8a4 4 0 0 1-4-4z" fill=fill></path>
            </svg>
            <span class="project-card__title">{project.title}</span>
            <span class="project-card__meta">"Last Opened: " {project.last_opened}</span>
        </a>
    }
}
