use leptos::prelude::*;

use crate::state::ToastState;

#[component]
pub fn Toasts() -> impl IntoView {
    let toasts = expect_context::<ToastState>();

    view! {
        <div class="toast-stack">
            <For
                each=move || toasts.toasts.get()
                key=|t| t.id
                let:toast
            >
                {
                    let id = toast.id;
                    view! {
                        <div class=toast.kind.css_class() on:click=move |_| toasts.dismiss(id)>
                            {toast.text.clone()}
                        </div>
                    }
                }
            </For>
        </div>
    }
}
