//! Button that saves in-memory text as a file.

use leptos::prelude::*;

use crate::util::download::download_text;

#[component]
pub fn DownloadButton(
    #[prop(into)] file_name: String,
    #[prop(into)] contents: Signal<String>,
    #[prop(into)] label: String,
    #[prop(default = "text/plain")] mime: &'static str,
) -> impl IntoView {
    let on_click = move |_| download_text(&file_name, &contents.get_untracked(), mime);

    view! {
        <button class="btn btn--secondary download-button" on:click=on_click>
            {label}
        </button>
    }
}
