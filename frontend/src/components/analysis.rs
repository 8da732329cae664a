use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::api::{self, RequestScope};
use crate::components::meme_reaction::MemeReaction;
use crate::models::{Analysis, DocumentDetails};
use crate::risk::{format_created_at, format_currency, LoanEstimate, RiskTier};
use crate::session::Session;
use crate::state::LoadState;

/// Detail view for one analysed document.
#[component]
pub fn AnalysisPage() -> impl IntoView {
    let params = use_params_map();
    let session = expect_context::<Session>();
    let navigate = use_navigate();
    let scope = RequestScope::new();
    let (document, set_document) = signal(LoadState::<DocumentDetails>::Loading);

    // Re-runs when the route id changes; the previous fetch is cancelled.
    Effect::new(move |_| {
        let id = params.read().get("id").unwrap_or_default();
        set_document.set(LoadState::Loading);
        let abort = scope.begin();
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::fetch_document(&id, session.token().as_deref(), abort.as_ref()).await {
                Ok(doc) => set_document.set(LoadState::Ready(doc)),
                Err(e) if e.is_aborted() => {}
                Err(e) => {
                    log::error!("Failed to fetch document {id}: {e}");
                    set_document.set(LoadState::Failed(e.to_string()));
                    navigate("/dashboard", Default::default());
                }
            }
        });
    });

    move || match document.get() {
        LoadState::Loading => view! { <div class="spinner"></div> }.into_any(),
        LoadState::Failed(_) => view! { <NotFound /> }.into_any(),
        LoadState::Ready(doc) => match doc.analysis {
            Some(analysis) => view! {
                <AnalysisReport
                    file_name=doc.file_name
                    created_at=doc.created_at
                    analysis=analysis
                />
            }
            .into_any(),
            None => view! { <NotFound /> }.into_any(),
        },
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="empty-state">
            <h2>"Analysis Not Found"</h2>
            <p>"We couldn't load the analysis for this document."</p>
            <A href="/dashboard" attr:class="link">"← Back to Dashboard"</A>
        </div>
    }
}

#[component]
fn AnalysisReport(file_name: String, created_at: String, analysis: Analysis) -> impl IntoView {
    let score = analysis.risk_score;
    let tier = RiskTier::from_score(score);
    let estimate = LoanEstimate::from_score(score);
    let gauge_pct = score.clamp(0, 100);
    let principal_pct = format!("{:.1}%", estimate.principal_share());

    view! {
        <div class="analysis">
            <A href="/dashboard" attr:class="link">"← Back to Dashboard"</A>

            <header class="analysis-header">
                <h1 title=file_name.clone()>{file_name.clone()}</h1>
                <p>{format!("Analysis generated on {}", format_created_at(&created_at))}</p>
            </header>

            <div class="metric-grid">
                <div class="metric-card">
                    <h3>"Risk Score"</h3>
                    <div
                        class="gauge"
                        style=format!("--gauge-color: {}; --gauge-pct: {gauge_pct}%", tier.color())
                    >
                        <span class="gauge-value">{score}</span>
                        <span class="gauge-max">"/100"</span>
                    </div>
                    <span class=format!("risk-badge {}", tier.css_class())>
                        {format!("{} Risk", tier.label())}
                    </span>
                </div>
                <div class="metric-card">
                    <h3>"Estimated Principal"</h3>
                    <p class="metric-value">{format_currency(estimate.principal)}</p>
                </div>
                <div class="metric-card">
                    <h3>"Estimated Interest"</h3>
                    <p class="metric-value" style=format!("color: {}", tier.color())>
                        {format_currency(estimate.interest)}
                    </p>
                </div>
                <div class="metric-card">
                    <h3>"Estimated Total"</h3>
                    <p class="metric-value">{format_currency(estimate.total())}</p>
                </div>
            </div>

            <div class="breakdown-card">
                <h3>"Principal vs Interest"</h3>
                <div class="breakdown-bar">
                    <div class="breakdown-principal" style=format!("width: {principal_pct}")></div>
                    <div class="breakdown-interest" style=format!("flex: 1; background: {}", tier.color())></div>
                </div>
                <div class="breakdown-legend">
                    <span>{format!("Principal {}", format_currency(estimate.principal))}</span>
                    <span>{format!("Interest {}", format_currency(estimate.interest))}</span>
                </div>
                <p class="breakdown-note">"Illustrative estimate derived from the risk score."</p>
            </div>

            <MemeReaction
                summary=analysis.summary.clone()
                risks=analysis.risks.clone()
                hidden_charges=analysis.hidden_charges.clone()
                risk_score=score
            />

            <div class="content-grid">
                <ContentCard title="Summary" body=analysis.summary />
                <ContentCard title="Explanation" body=analysis.explanation />
                <ContentCard title="Hidden Charges" body=analysis.hidden_charges />
                <ContentCard title="Risks" body=analysis.risks />
                <ContentCard title="Warnings" body=analysis.warnings />
                <ContentCard title="Recommendations" body=analysis.recommendations />
            </div>
        </div>
    }
}

#[component]
fn ContentCard(title: &'static str, body: String) -> impl IntoView {
    let body = if body.trim().is_empty() { "Nothing flagged.".to_string() } else { body };
    view! {
        <section class="content-card">
            <h3>{title}</h3>
            <p class="content-body">{body}</p>
        </section>
    }
}
