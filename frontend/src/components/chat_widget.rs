use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, RequestScope};
use crate::models::{ChatMessage, ChatRole};
use web_sys::{ScrollBehavior, ScrollIntoViewOptions};

pub const GREETING: &str = "Sup bestie! I'm your financial expert with a meme degree. What's broke today? 💸";
pub const FALLBACK_REPLY: &str = "Bro the server is having a breakdown rn 💀 Try again later.";

/// Floating chatbot panel with a local transcript.
#[component]
pub fn ChatWidget() -> impl IntoView {
    let scope = RequestScope::new();
    let (is_open, set_is_open) = signal(false);
    let (messages, set_messages) = signal(vec![ChatMessage::bot(GREETING)]);
    let (input, set_input) = signal(String::new());
    let (is_loading, set_is_loading) = signal(false);
    let messages_end = NodeRef::<html::Div>::new();

    // Keep the newest message in view while the panel is open.
    Effect::new(move |_| {
        messages.track();
        is_loading.track();
        if !is_open.get() {
            return;
        }
        if let Some(end) = messages_end.get_untracked() {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            end.scroll_into_view_with_scroll_into_view_options(&options);
        }
    });

    let send = move || {
        let text = input.get_untracked().trim().to_string();
        if text.is_empty() || is_loading.get_untracked() {
            return;
        }
        set_input.set(String::new());
        set_messages.update(|msgs| msgs.push(ChatMessage::user(text.clone())));
        set_is_loading.set(true);

        let abort = scope.begin();
        spawn_local(async move {
            let reply = match api::send_chat(&text, abort.as_ref()).await {
                Ok(resp) => resp.reply,
                Err(e) if e.is_aborted() => return,
                Err(e) => {
                    log::error!("Chat request failed: {e}");
                    FALLBACK_REPLY.to_string()
                }
            };
            set_messages.update(|msgs| msgs.push(ChatMessage::bot(reply)));
            set_is_loading.set(false);
        });
    };

    let send_on_enter = send.clone();
    let on_keydown = move |ev: ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            send_on_enter();
        }
    };

    view! {
        <button
            class="chat-fab"
            class:hidden=move || is_open.get()
            on:click=move |_| set_is_open.set(true)
        >
            "🤖"
        </button>

        <div class="chat-panel" class:open=move || is_open.get()>
            <div class="chat-header">
                <div>
                    <h3>"InsuPro AI"</h3>
                    <p>"Financial expert with meme degree"</p>
                </div>
                <button class="chat-close" on:click=move |_| set_is_open.set(false)>"✕"</button>
            </div>

            <div class="chat-messages">
                {move || {
                    messages
                        .get()
                        .into_iter()
                        .map(|msg| view! { <MessageBubble msg=msg /> })
                        .collect_view()
                }}
                <Show when=move || is_loading.get()>
                    <div class="message bot loading">"Cooking a response..."</div>
                </Show>
                <div node_ref=messages_end></div>
            </div>

            <div class="chat-input">
                <input
                    type="text"
                    placeholder="Ask me anything..."
                    prop:value=input
                    on:input=move |ev| set_input.set(event_target_value(&ev))
                    on:keydown=on_keydown
                />
                <button
                    class="send-btn"
                    on:click=move |_| send()
                    disabled=move || is_loading.get() || input.get().trim().is_empty()
                >
                    "Send"
                </button>
            </div>
        </div>
    }
}

/// A single chat message bubble.
#[component]
fn MessageBubble(msg: ChatMessage) -> impl IntoView {
    let css_class = match msg.role {
        ChatRole::User => "message user",
        ChatRole::Bot => "message bot",
    };

    view! { <div class=css_class>{msg.content}</div> }
}
