//! Project chat sidebar backed by the research backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reads the current user from `AuthState` and keeps the transcript in the
//! shared `ChatState`. Opening a project triggers one chat initiation call;
//! each send is a single request/response round trip.

use leptos::prelude::*;

use crate::state::auth::AuthState;
use crate::state::chat::{ChatState, Role};
use crate::util::markdown::render_markdown_html;

/// Hint shown before the first message of a project.
const EMPTY_HINT: &str = "Upload a data file or ask me to help with your research paper.";

#[component]
pub fn ChatPanel(#[prop(into)] project_id: Signal<String>) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let chat = expect_context::<RwSignal<ChatState>>();

    let input = RwSignal::new(String::new());
    let messages_ref = NodeRef::<leptos::html::Div>::new();

    Effect::new(move || {
        let project = project_id.get();
        if project.is_empty() {
            return;
        }
        chat.update(|c| c.switch_project(&project));
    });

    // Chat initiation: once per project, as soon as the user is known.
    Effect::new(move || {
        let Some(user_id) = auth.get().user_id().map(str::to_owned) else {
            return;
        };
        let project = project_id.get();
        if project.is_empty() || chat.with_untracked(|c| c.project_id.as_deref() != Some(project.as_str())) {
            return;
        }
        if !chat.try_update(ChatState::begin_initiation).unwrap_or(false) {
            return;
        }

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let req = crate::net::types::ChatStartRequest { user_id, project_id: project.clone() };
            match crate::net::api::start_chat(&req).await {
                Ok(resp) => chat.update(|c| {
                    if c.project_id.as_deref() == Some(project.as_str()) {
                        c.receive_greeting(resp.reply, crate::util::time::now_ms());
                    }
                }),
                Err(e) => log::warn!("chat initiation failed for project {project}: {e}"),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (user_id, project);
    });

    Effect::new(move || {
        chat.track();

        #[cfg(feature = "hydrate")]
        {
            if let Some(el) = messages_ref.get() {
                el.set_scroll_top(el.scroll_height());
            }
        }
    });

    let do_send = move || {
        let Some(user_id) = auth.get_untracked().user_id().map(str::to_owned) else {
            chat.update(|c| c.error = Some("Please sign in to chat.".to_owned()));
            return;
        };
        let project = project_id.get_untracked();
        let now = crate::util::time::now_ms();
        let text = input.get_untracked();
        let Some(message) = chat.try_update(|c| c.begin_send(&text, now)).flatten() else {
            return;
        };
        input.set(String::new());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let req = crate::net::types::ChatMessageRequest { user_id, project_id: project, message };
            match crate::net::api::send_message(&req).await {
                Ok(resp) => chat.update(|c| c.receive_reply(resp.response, crate::util::time::now_ms())),
                Err(e) => {
                    log::error!("chat send failed: {e}");
                    chat.update(|c| c.fail(&e.to_string(), crate::util::time::now_ms()));
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (user_id, project, message);
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        do_send();
    };

    let can_send = move || !input.get().trim().is_empty() && !chat.get().loading;

    view! {
        <aside class="chat-panel">
            <header class="chat-panel__header">"Research Assistant"</header>
            <Show when=move || chat.get().error.is_some()>
                <p class="chat-panel__error">{move || chat.get().error.unwrap_or_default()}</p>
            </Show>
            <div class="chat-panel__messages" node_ref=messages_ref>
                {move || {
                    let messages = chat.get().messages;
                    if messages.is_empty() {
                        return view! { <div class="chat-panel__empty">{EMPTY_HINT}</div> }.into_any();
                    }
                    messages
                        .into_iter()
                        .map(|msg| {
                            let is_assistant = msg.role == Role::Assistant;
                            view! {
                                <div
                                    class="chat-panel__message"
                                    class:chat-panel__message--assistant=is_assistant
                                    class:chat-panel__message--error=msg.is_error
                                >
                                    {if is_assistant && !msg.is_error {
                                        let rendered = render_markdown_html(&msg.content);
                                        view! { <div class="chat-panel__markdown" inner_html=rendered></div> }
                                            .into_any()
                                    } else {
                                        view! { <span>{msg.content}</span> }.into_any()
                                    }}
                                </div>
                            }
                        })
                        .collect::<Vec<_>>()
                        .into_any()
                }}
                {move || chat.get().loading.then(|| view! { <div class="chat-panel__loading">"Thinking..."</div> })}
            </div>
            <form class="chat-panel__input-row" on:submit=on_submit>
                <input
                    class="chat-panel__input"
                    type="text"
                    placeholder="Ask about your research..."
                    disabled=move || chat.get().loading
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                />
                <button class="btn btn--primary" type="submit" disabled=move || !can_send()>
                    "Send"
                </button>
            </form>
        </aside>
    }
}
