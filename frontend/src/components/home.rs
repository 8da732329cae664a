use leptos::prelude::*;
use leptos_router::components::A;

use crate::session::Session;

/// Landing page.
#[component]
pub fn Home() -> impl IntoView {
    let session = expect_context::<Session>();
    let cta_href = move || {
        if session.is_signed_in() { "/upload".to_string() } else { "/signup".to_string() }
    };

    view! {
        <section class="hero">
            <h1>"Understand your fine print before it understands you."</h1>
            <p class="hero-sub">
                "Upload an insurance policy or loan agreement and get a plain-language summary, "
                "hidden charges, risks and a risk score in seconds."
            </p>
            <div class="hero-actions">
                <A href=cta_href attr:class="btn-primary">"Analyze a document"</A>
                <Show when=move || session.is_signed_in()>
                    <A href="/dashboard" attr:class="btn-secondary">"Go to dashboard"</A>
                </Show>
            </div>
            <ul class="features">
                <li>"Summary and explanation in plain words"</li>
                <li>"Hidden charges and risk warnings"</li>
                <li>"Risk score with a visual breakdown"</li>
            </ul>
        </section>
    }
}
