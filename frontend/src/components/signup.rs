use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::api::{self, RequestScope};
use crate::models::SignupRequest;
use crate::session::Session;
use crate::state::ToastState;

/// Account creation; on success the session is signed in and the dashboard opens.
#[component]
pub fn SignupPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let toasts = expect_context::<ToastState>();
    let navigate = use_navigate();
    let scope = RequestScope::new();

    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (loading, set_loading) = signal(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }
        set_loading.set(true);

        let request = SignupRequest {
            name: name.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        let abort = scope.begin();
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::signup(&request, abort.as_ref()).await {
                Ok(resp) => {
                    session.sign_in(resp);
                    toasts.success("Account created successfully!");
                    navigate("/dashboard", Default::default());
                }
                Err(e) if e.is_aborted() => {}
                Err(e) => {
                    log::error!("Signup failed: {e}");
                    let message = e.server_message().unwrap_or("Failed to create account").to_string();
                    toasts.error(message);
                }
            }
            set_loading.set(false);
        });
    };

    view! {
        <section class="auth">
            <h2>"Create your account"</h2>
            <form class="auth-form" on:submit=on_submit>
                <label for="name">"Full Name"</label>
                <input
                    id="name"
                    type="text"
                    required
                    placeholder="John Doe"
                    prop:value=name
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                />
                <label for="email">"Email address"</label>
                <input
                    id="email"
                    type="email"
                    required
                    placeholder="you@example.com"
                    prop:value=email
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                />
                <label for="password">"Password"</label>
                <input
                    id="password"
                    type="password"
                    required
                    placeholder="••••••••"
                    prop:value=password
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                <button type="submit" class="btn-primary" disabled=move || loading.get()>
                    {move || if loading.get() { "Creating account…" } else { "Sign up" }}
                </button>
            </form>
        </section>
    }
}
