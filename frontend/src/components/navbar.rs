use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::session::Session;

/// Top bar: brand plus the links that fit the current session.
#[component]
pub fn Navbar() -> impl IntoView {
    let session = expect_context::<Session>();
    let navigate = use_navigate();

    let on_logout = move |_| {
        session.invalidate();
        navigate("/", Default::default());
    };

    view! {
        <nav class="navbar">
            <A href="/" attr:class="brand">
                "FinGuardian " <span class="brand-accent">"AI"</span>
            </A>
            <div class="nav-links">
                <Show
                    when=move || session.is_signed_in()
                    fallback=|| view! {
                        <A href="/signup" attr:class="nav-link">"Sign In"</A>
                        <A href="/signup" attr:class="nav-cta">"Get Started"</A>
                    }
                >
                    {move || session.user().map(|u| view! { <span class="nav-user">{u.name}</span> })}
                    <A href="/dashboard" attr:class="nav-link">"Dashboard"</A>
                    <A href="/upload" attr:class="nav-link">"Analyze"</A>
                    <button class="nav-logout" on:click=on_logout.clone()>"Logout"</button>
                </Show>
            </div>
        </nav>
    }
}
