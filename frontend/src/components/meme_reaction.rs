use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, RequestScope};
use crate::models::ReactionRequest;

#[derive(Clone, Debug, PartialEq)]
enum ReactionState {
    Loading,
    Ready(String),
    Hidden,
}

/// "Chatpata" reaction card for an analysed report. Hides itself on failure.
#[component]
pub fn MemeReaction(summary: String, risks: String, hidden_charges: String, risk_score: i64) -> impl IntoView {
    let scope = RequestScope::new();
    let (state, set_state) = signal(ReactionState::Loading);

    let request = ReactionRequest { summary, risks, hidden_charges, risk_score };
    let abort = scope.begin();
    spawn_local(async move {
        match api::fetch_reaction(&request, abort.as_ref()).await {
            Ok(resp) => set_state.set(ReactionState::Ready(strip_quotes(&resp.reply))),
            Err(e) if e.is_aborted() => {}
            Err(e) => {
                log::error!("Failed to fetch meme reaction: {e}");
                set_state.set(ReactionState::Hidden);
            }
        }
    });

    move || match state.get() {
        ReactionState::Hidden => None,
        ReactionState::Loading => Some(
            view! {
                <div class="meme-card">
                    <h3>"Chatpata AI Reaction 🌶️🔥"</h3>
                    <div class="meme-loading">"Cooking some spicy reactions..."</div>
                </div>
            }
            .into_any(),
        ),
        ReactionState::Ready(text) => Some(
            view! {
                <div class="meme-card">
                    <h3>"Chatpata AI Reaction 🌶️🔥"</h3>
                    <div class="meme-text">{text}</div>
                </div>
            }
            .into_any(),
        ),
    }
}

/// The model likes to wrap its answer in quotes; the card shows it bare.
fn strip_quotes(reply: &str) -> String {
    reply.replace(['\'', '"'], "")
}

#[cfg(test)]
mod tests {
    use super::strip_quotes;

    #[test]
    fn strips_single_and_double_quotes() {
        assert_eq!(strip_quotes("\"Waah bhai waah 👏\""), "Waah bhai waah 👏");
        assert_eq!(strip_quotes("it's a 'deal'"), "its a deal");
    }

    #[test]
    fn keeps_line_breaks() {
        assert_eq!(strip_quotes("\"line one\nline two\""), "line one\nline two");
    }

    #[test]
    fn reaction_text_renders_line_breaks() {
        let css = include_str!("../../style.css");
        let rule = css
            .lines()
            .find(|line| line.starts_with(".meme-text {"))
            .expect("stylesheet styles the reaction text");
        assert!(rule.contains("white-space: pre-line"));
    }
}
