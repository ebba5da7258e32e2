//! New-project page: pick data files, upload them, then generate.
//!
//! SYSTEM CONTEXT
//! ==============
//! Files are validated into the `UploadQueue` as they are picked and held
//! in a page-local map keyed by `UploadId` until submit. Submit starts one
//! upload request per file concurrently. Once every item has completed the
//! page issues the single generate request, caches the result in local
//! storage for the project page, and navigates there.

#[cfg(test)]
#[path = "new_project_test.rs"]
mod new_project_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::navbar::Navbar;
use crate::components::upload_list::UploadList;
use crate::state::auth::AuthState;
use crate::state::upload::{DATA_FILES, GenerateBlocked, UploadId, UploadQueue};
use crate::util::auth::install_unauth_redirect;

/// Simulated progress never passes this until the request resolves.
const PROGRESS_CEILING: u8 = 90;
const PROGRESS_STEP: u8 = 10;
#[cfg(feature = "hydrate")]
const PROGRESS_INTERVAL: std::time::Duration = std::time::Duration::from_millis(200);

/// Next simulated progress value for an in-flight upload.
fn progress_tick(current: u8) -> u8 {
    current.saturating_add(PROGRESS_STEP).min(PROGRESS_CEILING)
}

/// One-line summary under the queue, e.g. `"2 of 3 files uploaded"`.
fn queue_summary(queue: &UploadQueue) -> Option<String> {
    if queue.is_empty() {
        return None;
    }
    let total = queue.len();
    let done = queue.completed_file_ids().len();
    let noun = if total == 1 { "file" } else { "files" };
    Some(format!("{done} of {total} {noun} uploaded"))
}

/// Lifecycle of the generate step as shown on the page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
enum GeneratePhase {
    #[default]
    Idle,
    Running,
    Failed(String),
}

#[component]
pub fn NewProjectPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    install_unauth_redirect(auth, navigate.clone());

    let queue = RwSignal::new(UploadQueue::default());
    let phase = RwSignal::new(GeneratePhase::Idle);

    #[cfg(feature = "hydrate")]
    let files = StoredValue::new_local(std::collections::HashMap::<UploadId, web_sys::File>::new());

    #[cfg(feature = "hydrate")]
    let add_files = move |list: web_sys::FileList| {
        for index in 0..list.length() {
            let Some(file) = list.get(index) else {
                continue;
            };
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let size = file.size() as u64;
            let added = queue.try_update(|q| q.add(&DATA_FILES, &file.name(), size).ok());
            if let Some(id) = added.flatten() {
                files.update_value(|map| {
                    map.insert(id, file);
                });
            }
        }
    };

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
            if let Some(list) = input.files() {
                add_files(list);
            }
            input.set_value("");
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = ev;
    };

    let on_drop = move |ev: leptos::ev::DragEvent| {
        ev.prevent_default();
        #[cfg(feature = "hydrate")]
        {
            if let Some(list) = ev.data_transfer().and_then(|dt| dt.files()) {
                add_files(list);
            }
        }
    };

    let on_remove = Callback::new(move |id: UploadId| {
        queue.update(|q| {
            q.remove(id);
        });
        #[cfg(feature = "hydrate")]
        files.update_value(|map| {
            map.remove(&id);
        });
    });

    let on_submit = move |_| {
        let Some(user_id) = auth.get_untracked().user_id().map(str::to_owned) else {
            queue.update(|q| q.error = Some(GenerateBlocked::Unauthenticated.to_string()));
            return;
        };
        if !queue.with_untracked(UploadQueue::can_submit) {
            return;
        }
        let started = queue.try_update(UploadQueue::begin_all).unwrap_or_default();

        #[cfg(feature = "hydrate")]
        {
            log::debug!("starting {} uploads", started.len());
            let jobs: Vec<(UploadId, web_sys::File)> = files.with_value(|map| {
                started
                    .iter()
                    .filter_map(|id| map.get(id).map(|file| (*id, file.clone())))
                    .collect()
            });

            leptos::task::spawn_local(async move {
                while queue.with_untracked(UploadQueue::is_busy) {
                    gloo_timers::future::sleep(PROGRESS_INTERVAL).await;
                    queue.update(|q| {
                        let ids: Vec<(UploadId, u8)> = q.items().iter().map(|i| (i.id, i.status.progress())).collect();
                        for (id, progress) in ids {
                            q.set_progress(id, progress_tick(progress));
                        }
                    });
                }
            });

            leptos::task::spawn_local(async move {
                let uploads = jobs.into_iter().map(|(id, file)| {
                    let user_id = user_id.clone();
                    async move {
                        let result = crate::net::api::upload_file(&file, &user_id, None).await;
                        queue.update(|q| match result {
                            Ok(resp) => {
                                q.complete(id, resp.file_id);
                            }
                            Err(e) => {
                                log::error!("upload {id} failed: {e}");
                                q.fail(id, format!("Upload failed: {e}"));
                            }
                        });
                    }
                });
                futures::future::join_all(uploads).await;
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (user_id, started);
    };

    // Generate exactly once, as soon as every upload has completed.
    Effect::new(move || {
        let ready = queue.with(|q| q.can_generate() && !q.generate_requested());
        if !ready {
            return;
        }
        let user = auth.get_untracked().user;
        let Some(prepared) = queue.try_update(|q| q.prepare_generate(user.as_ref())) else {
            return;
        };
        let request = match prepared {
            Ok(request) => request,
            Err(blocked) => {
                phase.set(GeneratePhase::Failed(blocked.to_string()));
                return;
            }
        };
        phase.set(GeneratePhase::Running);
        let title = crate::state::projects::title_for_upload(
            &queue.with_untracked(|q| q.items().iter().map(|i| i.name.clone()).collect::<Vec<_>>()),
        );

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::generate(&request).await {
                    Ok(result) => {
                        crate::util::storage::store_generation(&result);
                        crate::util::storage::record_recent_project(
                            &request.project_id,
                            Some(&title),
                            &crate::util::time::today_label(),
                        );
                        log::info!("generated paper {} for project {}", result.paper_id, request.project_id);
                        navigate(
                            &format!("/projects/{}", request.project_id),
                            leptos_router::NavigateOptions::default(),
                        );
                    }
                    Err(e) => {
                        log::error!("generation failed: {e}");
                        phase.set(GeneratePhase::Failed(crate::state::upload::GENERATION_FAILED.to_owned()));
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (request, title, &navigate);
    });

    let on_retry = move |_| {
        phase.set(GeneratePhase::Idle);
        queue.update(UploadQueue::reset_generation);
    };

    let banner = move || {
        let q = queue.get();
        q.error.clone().or_else(|| q.aggregate_error())
    };

    view! {
        <div class="new-project-page">
            <Navbar/>
            <main class="new-project-page__content">
                <h1>"New Project"</h1>
                <p class="new-project-page__hint">"Upload your data files (CSV, XLSX, or JSON, up to 10MB each)."</p>
                <label
                    class="drop-zone"
                    on:dragover=move |ev: leptos::ev::DragEvent| ev.prevent_default()
                    on:drop=on_drop
                >
                    <span class="drop-zone__label">"Drop files here or click to browse"</span>
                    <input
                        type="file"
                        class="drop-zone__input"
                        multiple=true
                        accept=DATA_FILES.accept_attr()
                        on:change=on_change
                    />
                </label>
                <Show when=move || banner().is_some()>
                    <p class="new-project-page__error">{move || banner().unwrap_or_default()}</p>
                </Show>
                <UploadList queue=queue on_remove=on_remove/>
                <Show when=move || queue.with(|q| queue_summary(q).is_some())>
                    <p class="new-project-page__summary">{move || queue.with(queue_summary).unwrap_or_default()}</p>
                </Show>
                <div class="new-project-page__actions">
                    <button
                        class="btn btn--primary"
                        on:click=on_submit
                        disabled=move || !queue.with(UploadQueue::can_submit)
                    >
                        {move || if queue.with(UploadQueue::is_busy) { "Uploading..." } else { "Upload Files" }}
                    </button>
                </div>
                {move || match phase.get() {
                    GeneratePhase::Idle => None,
                    GeneratePhase::Running => {
                        Some(view! { <p class="new-project-page__generating">"Generating hypotheses..."</p> }.into_any())
                    }
                    GeneratePhase::Failed(message) => {
                        Some(view! {
                            <div class="new-project-page__generate-error">
                                <p>{message}</p>
                                <button class="btn btn--secondary" on:click=on_retry>
                                    "Try Again"
                                </button>
                            </div>
                        }
                            .into_any())
                    }
                }}
            </main>
        </div>
    }
}
