//! Documents tab: the project's research paper plus supplementary files.

use leptos::prelude::*;

use crate::state::documents::{DocumentItem, DocumentKind, DocumentsState, SIMULATED_DOWNLOAD_BODY};
use crate::state::upload::DOCUMENT_FILES;
use crate::util::download::download_text;

/// Delay before a picked document shows up in the list.
#[cfg(feature = "hydrate")]
const SIMULATED_UPLOAD_DELAY: std::time::Duration = std::time::Duration::from_millis(1500);

#[component]
pub fn DocumentsPanel() -> impl IntoView {
    let docs = RwSignal::new(DocumentsState::default());

    Effect::new(move || {
        docs.set(DocumentsState::seeded(&crate::util::time::today_label()));
    });

    let on_change = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast as _;

            let Some(input) = ev
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            else {
                return;
            };
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            input.set_value("");
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let size = file.size() as u64;
            let name = file.name();

            let accepted = docs.try_update(|d| d.begin_upload(&name, size).is_ok());
            if accepted != Some(true) {
                return;
            }
            leptos::task::spawn_local(async move {
                gloo_timers::future::sleep(SIMULATED_UPLOAD_DELAY).await;
                docs.update(|d| {
                    d.finish_upload(&name, size, &crate::util::time::today_label());
                });
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = ev;
    };

    view! {
        <div class="documents-panel">
            <div class="documents-panel__toolbar">
                <label class="btn btn--primary documents-panel__upload" class:btn--disabled=move || docs.get().uploading>
                    {move || if docs.get().uploading { "Uploading..." } else { "Upload Document" }}
                    <input
                        type="file"
                        class="documents-panel__file-input"
                        accept=DOCUMENT_FILES.accept_attr()
                        disabled=move || docs.get().uploading
                        on:change=on_change
                    />
                </label>
            </div>
            <Show when=move || docs.get().error.is_some()>
                <p class="documents-panel__error">{move || docs.get().error.unwrap_or_default()}</p>
            </Show>
            <ul class="documents-panel__list">
                <For
                    each=move || docs.get().items
                    key=|doc| doc.id.clone()
                    children=move |doc: DocumentItem| view! { <DocumentRow doc=doc docs=docs/> }
                />
            </ul>
        </div>
    }
}

#[component]
fn DocumentRow(doc: DocumentItem, docs: RwSignal<DocumentsState>) -> impl IntoView {
    let id = doc.id.clone();
    let name = doc.name.clone();
    let deletable = doc.kind == DocumentKind::Supplementary;
    let kind_label = match doc.kind {
        DocumentKind::Research => "Research",
        DocumentKind::Supplementary => "Supplementary",
    };

    view! {
        <li class="document-row">
            <span class="document-row__name">{doc.name}</span>
            <span class="document-row__kind">{kind_label}</span>
            <span class="document-row__date">{doc.upload_date}</span>
            <span class="document-row__size">{doc.size}</span>
            <button
                class="btn btn--secondary"
                on:click=move |_| download_text(&name, SIMULATED_DOWNLOAD_BODY, "text/plain")
            >
                "Download"
            </button>
            <Show when=move || deletable>
                <button
                    class="btn btn--danger"
                    on:click={
                        let id = id.clone();
                        move |_| {
                            docs.update(|d| {
                                d.remove(&id);
                            });
                        }
                    }
                >
                    "Delete"
                </button>
            </Show>
        </li>
    }
}
