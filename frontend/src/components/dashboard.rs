use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::api::{self, RequestScope};
use crate::models::DocumentSummary;
use crate::risk::{format_short_date, RiskTier};
use crate::session::Session;
use crate::state::{LoadState, ToastState};

const EXCERPT_CHARS: usize = 140;

/// Lists previously analysed documents as cards.
#[component]
pub fn Dashboard() -> impl IntoView {
    let session = expect_context::<Session>();
    let toasts = expect_context::<ToastState>();
    let navigate = use_navigate();
    let scope = RequestScope::new();
    let (documents, set_documents) = signal(LoadState::<Vec<DocumentSummary>>::Loading);

    let abort = scope.begin();
    spawn_local(async move {
        match api::fetch_documents(session.token().as_deref(), abort.as_ref()).await {
            Ok(docs) => set_documents.set(LoadState::Ready(docs)),
            Err(e) if e.is_aborted() => {}
            Err(e) => {
                log::error!("Failed to fetch documents: {e}");
                toasts.error(format!("Failed to load documents: {e}"));
                set_documents.set(LoadState::Failed(e.to_string()));
                if e.is_unauthorized() {
                    navigate("/signup", Default::default());
                }
            }
        }
    });

    view! {
        <section class="dashboard">
            <header class="dashboard-header">
                <div>
                    <h1>"Your Dashboard"</h1>
                    <p>"Review and manage your analyzed financial documents."</p>
                </div>
                <A href="/upload" attr:class="btn-primary">"Analyze New Document"</A>
            </header>
            {move || match documents.get() {
                LoadState::Loading => view! { <div class="spinner"></div> }.into_any(),
                LoadState::Failed(_) => view! {
                    <div class="empty-state">"We couldn't load your documents. Try again in a moment."</div>
                }.into_any(),
                LoadState::Ready(docs) if docs.is_empty() => view! {
                    <div class="empty-state">
                        <h3>"No documents yet"</h3>
                        <p>"Upload your first insurance policy or loan agreement to get started."</p>
                        <A href="/upload" attr:class="link">"Upload Document →"</A>
                    </div>
                }.into_any(),
                LoadState::Ready(docs) => view! {
                    <div class="doc-grid">
                        {docs.into_iter().map(|doc| view! { <DocumentCard doc=doc /> }).collect_view()}
                    </div>
                }.into_any(),
            }}
        </section>
    }
}

#[component]
fn DocumentCard(doc: DocumentSummary) -> impl IntoView {
    let href = format!("/analysis/{}", doc.id);
    let badge = doc.analysis.as_ref().map(|a| {
        let tier = RiskTier::from_score(a.risk_score);
        view! {
            <span class=format!("risk-badge {}", tier.css_class())>
                {format!("Risk {}/100", a.risk_score)}
            </span>
        }
    });
    let summary_excerpt = doc
        .analysis
        .as_ref()
        .map(|a| excerpt(&a.summary, EXCERPT_CHARS))
        .unwrap_or_else(|| "Analysis pending…".to_string());

    view! {
        <article class="doc-card">
            <div class="doc-card-header">
                <h3 class="doc-name" title=doc.file_name.clone()>{doc.file_name.clone()}</h3>
                {badge}
            </div>
            <p class="doc-date">{format_short_date(&doc.created_at)}</p>
            <p class="doc-excerpt">{summary_excerpt}</p>
            <A href=href attr:class="link">"View Analysis →"</A>
        </article>
    }
}

fn excerpt(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}…", cut.trim_end())
}
