//! Per-file rows of the upload queue with status and progress.

#[cfg(test)]
#[path = "upload_list_test.rs"]
mod upload_list_test;

use leptos::prelude::*;

use crate::state::upload::{UploadId, UploadItem, UploadQueue, UploadStatus, format_size};

/// A row is re-rendered whenever its item changes state.
pub(crate) fn row_key(item: &UploadItem) -> (UploadId, UploadStatus) {
    (item.id, item.status.clone())
}

#[component]
pub fn UploadList(queue: RwSignal<UploadQueue>, on_remove: Callback<UploadId>) -> impl IntoView {
    view! {
        <ul class="upload-list">
            <For
                each=move || queue.get().items().to_vec()
                key=row_key
                children=move |item: UploadItem| view! { <UploadRow item=item on_remove=on_remove/> }
            />
        </ul>
    }
}

#[component]
fn UploadRow(item: UploadItem, on_remove: Callback<UploadId>) -> impl IntoView {
    let id = item.id;
    let progress = item.status.progress();
    let status_class = format!("upload-row upload-row--{}", item.status.label());
    let detail = match &item.status {
        UploadStatus::Pending => "Ready to upload".to_owned(),
        UploadStatus::Uploading { progress } => format!("Uploading... {progress}%"),
        UploadStatus::Completed { .. } => "Uploaded".to_owned(),
        UploadStatus::Failed { error } => error.clone(),
    };

    view! {
        <li class=status_class>
            <span class="upload-row__name">{item.name}</span>
            <span class="upload-row__size">{format_size(item.size)}</span>
            <span class="upload-row__detail">{detail}</span>
            <span class="upload-row__bar" aria-hidden="true">
                <span class="upload-row__fill" style=format!("width: {progress}%")></span>
            </span>
            <button
                class="upload-row__remove"
                title="Remove file"
                aria-label="Remove file"
                on:click=move |_| on_remove.run(id)
            >
                "✕"
            </button>
        </li>
    }
}
