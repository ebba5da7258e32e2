//! Tabbed main area of the project page: hypothesis selections, the
//! research paper for the selected card, and the documents list.
//!
//! SYSTEM CONTEXT
//! ==============
//! Hypotheses come from the generation cache in local storage. The paper
//! for a selection is fetched from `/api/research` whenever the selection
//! (or project) changes while the Research tab is visible.

use leptos::prelude::*;

use crate::components::documents_panel::DocumentsPanel;
use crate::components::download_button::DownloadButton;
use crate::state::paper::{PaperContent, PaperState, PaperTab};
use crate::util::markdown::render_markdown_html;

#[component]
pub fn ResearchPaperPanel(#[prop(into)] project_id: Signal<String>) -> impl IntoView {
    let paper = RwSignal::new(PaperState::default());

    // Cache is browser-only; load after mount so SSR and hydrate agree.
    Effect::new(move || {
        let (hypotheses, latex) = crate::util::storage::load_generation();
        paper.set(PaperState::from_cache(hypotheses, latex));
    });

    // Re-arm the fetch when the project changes.
    Effect::new(move || {
        project_id.track();
        paper.update(|p| {
            if let Some(selected) = p.selected.take() {
                p.select(selected);
            }
        });
    });

    Effect::new(move || {
        let Some(selection) = paper.with(PaperState::fetch_target) else {
            return;
        };
        let project = project_id.get_untracked();
        if project.is_empty() {
            return;
        }
        paper.update(|p| p.begin_fetch(selection));

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = crate::net::api::fetch_research(&project, selection)
                .await
                .map(|resp| resp.paper)
                .map_err(|e| {
                    log::error!("research fetch failed for selection {selection}: {e}");
                    e.to_string()
                });
            paper.update(|p| {
                p.finish_fetch(selection, result);
            });
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = project;
    });

    let latex = Signal::derive(move || paper.get().latex.unwrap_or_default());

    view! {
        <section class="paper-panel">
            <nav class="paper-panel__tabs">
                {PaperTab::ALL
                    .into_iter()
                    .map(|tab| {
                        view! {
                            <button
                                class="paper-panel__tab"
                                class:paper-panel__tab--active=move || paper.get().tab == tab
                                on:click=move |_| paper.update(|p| p.set_tab(tab))
                            >
                                {tab.label()}
                            </button>
                        }
                    })
                    .collect::<Vec<_>>()}
                <span class="paper-panel__spacer"></span>
                <Show when=move || paper.get().latex.is_some()>
                    <DownloadButton file_name="paper.tex" contents=latex label="Download LaTeX" mime="application/x-tex"/>
                </Show>
            </nav>
            <div class="paper-panel__body">
                {move || match paper.get().tab {
                    PaperTab::Selections => view! { <SelectionsGrid paper=paper/> }.into_any(),
                    PaperTab::Research => view! { <ResearchView paper=paper/> }.into_any(),
                    PaperTab::Documents => view! { <DocumentsPanel/> }.into_any(),
                }}
            </div>
        </section>
    }
}

#[component]
fn SelectionsGrid(paper: RwSignal<PaperState>) -> impl IntoView {
    view! {
        <div class="selections-grid">
            {move || {
                let state = paper.get();
                state
                    .hypotheses
                    .iter()
                    .zip(1_u32..)
                    .map(|(hypothesis, card)| {
                        let expanded = state.expanded == Some(card);
                        let selected = state.selected == Some(card);
                        view! {
                            <div
                                class="selection-card"
                                class:selection-card--selected=selected
                                class:selection-card--expanded=expanded
                                on:click=move |_| {
                                    paper.update(|p| {
                                        p.select(card);
                                    });
                                }
                            >
                                <div class="selection-card__header">
                                    <span class="selection-card__number">{format!("#{card}")}</span>
                                    <span class="selection-card__title">{hypothesis.title.clone()}</span>
                                    <button
                                        class="selection-card__expand"
                                        title=if expanded { "Collapse" } else { "Expand" }
                                        on:click=move |ev: leptos::ev::MouseEvent| {
                                            ev.stop_propagation();
                                            paper.update(|p| p.toggle_expand(card));
                                        }
                                    >
                                        {if expanded { "−" } else { "+" }}
                                    </button>
                                </div>
                                <p class="selection-card__description">{hypothesis.description.clone()}</p>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}

#[component]
fn ResearchView(paper: RwSignal<PaperState>) -> impl IntoView {
    move || {
        let state = paper.get();
        if state.selected.is_none() {
            return view! {
                <p class="research-view__empty">"Please select an option from the Selections tab first."</p>
            }
            .into_any();
        }
        match state.content {
            PaperContent::Idle | PaperContent::Loading => {
                view! { <p class="research-view__loading">"Loading research paper..."</p> }.into_any()
            }
            PaperContent::Loaded(text) => {
                let rendered = render_markdown_html(&text);
                view! { <article class="research-view__paper" inner_html=rendered></article> }.into_any()
            }
            PaperContent::Failed(message) => {
                view! { <p class="research-view__error">{message}</p> }.into_any()
            }
        }
    }
}
