use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use web_sys::File;

use crate::api::{self, RequestScope};
use crate::session::Session;
use crate::state::ToastState;

const ACCEPTED_TYPES: &[&str] = &[
    "application/pdf",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

pub fn is_accepted_type(mime: &str) -> bool {
    ACCEPTED_TYPES.contains(&mime)
}

/// `true`/`false` for the drag events that toggle the dropzone highlight.
pub fn drag_highlight(event_type: &str) -> Option<bool> {
    match event_type {
        "dragenter" | "dragover" => Some(true),
        "dragleave" | "drop" => Some(false),
        _ => None,
    }
}

pub fn format_megabytes(bytes: f64) -> String {
    format!("{:.2} MB", bytes / 1024.0 / 1024.0)
}

/// Upload form: pick or drop a PDF/DOCX, send it for analysis, open the result.
#[component]
pub fn UploadPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let toasts = expect_context::<ToastState>();
    let navigate = use_navigate();
    let scope = RequestScope::new();
    let file_input = NodeRef::<html::Input>::new();
    let (file, set_file) = signal_local(None::<File>);
    let (drag_active, set_drag_active) = signal(false);
    let (loading, set_loading) = signal(false);

    // Picker and drop both land here.
    let choose = move |picked: Option<File>| {
        let Some(picked) = picked else {
            return;
        };
        if is_accepted_type(&picked.type_()) {
            set_file.set(Some(picked));
        } else {
            toasts.error("Please upload a valid PDF or DOCX file.");
            set_file.set(None);
        }
        if let Some(input) = file_input.get_untracked() {
            input.set_value("");
        }
    };

    let on_change = move |_| {
        let picked = file_input
            .get_untracked()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        choose(picked);
    };

    let on_drag = move |ev: ev::DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        if let Some(active) = drag_highlight(&ev.type_()) {
            set_drag_active.set(active);
        }
    };

    let on_drop = move |ev: ev::DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        set_drag_active.set(false);
        if loading.get_untracked() {
            return;
        }
        let dropped = ev
            .data_transfer()
            .and_then(|transfer| transfer.files())
            .and_then(|files| files.get(0));
        choose(dropped);
    };

    let on_upload = move |_: ev::MouseEvent| {
        if loading.get_untracked() {
            return;
        }
        let Some(file) = file.get_untracked() else {
            return;
        };

        set_loading.set(true);
        let toast_id = toasts.loading("Uploading and analyzing with Gemini AI... This might take a few seconds.");
        let abort = scope.begin();
        let navigate = navigate.clone();
        spawn_local(async move {
            let result = api::upload_document(&file, session.token().as_deref(), abort.as_ref()).await;
            toasts.dismiss(toast_id);
            match result {
                Ok(resp) => {
                    toasts.success("Analysis complete!");
                    navigate(&format!("/analysis/{}", resp.document.id), Default::default());
                }
                Err(e) if e.is_aborted() => {}
                Err(e) => {
                    log::error!("Upload failed: {e}");
                    let message = e.server_message().unwrap_or("Failed to process document").to_string();
                    toasts.error(message);
                    if e.is_unauthorized() {
                        navigate("/signup", Default::default());
                    }
                }
            }
            set_loading.set(false);
        });
    };

    view! {
        <section class="upload">
            <h1>"Analyze Document"</h1>
            <p>"Upload your insurance policy, loan agreement, or any financial contract."</p>
            <div class="upload-card">
                <div
                    class="dropzone"
                    class:drag-active=move || drag_active.get()
                    on:dragenter=on_drag
                    on:dragover=on_drag
                    on:dragleave=on_drag
                    on:drop=on_drop
                >
                    <input
                        type="file"
                        class="file-input"
                        accept=".pdf,.docx"
                        node_ref=file_input
                        on:change=on_change
                        disabled=move || loading.get()
                    />
                    {move || match file.get() {
                        None => view! {
                            <div
                                class="dropzone-prompt"
                                on:click=move |_| {
                                    if let Some(input) = file_input.get_untracked() {
                                        input.click();
                                    }
                                }
                            >
                                <h3>"Click to upload or drag and drop"</h3>
                                <p>"PDF or DOCX (Max 10MB)"</p>
                            </div>
                        }
                        .into_any(),
                        Some(picked) => view! {
                            <div class="dropzone-file">
                                <h3>{picked.name()}</h3>
                                <p>{format_megabytes(picked.size())}</p>
                            </div>
                        }
                        .into_any(),
                    }}
                    <div class="dropzone-actions" class:hidden=move || file.with(Option::is_none)>
                        <button
                            class="btn-secondary"
                            on:click=move |_| set_file.set(None)
                            disabled=move || loading.get()
                        >
                            "Cancel"
                        </button>
                        <button class="btn-primary" on:click=on_upload disabled=move || loading.get()>
                            {move || if loading.get() { "Analyzing…" } else { "Analyze Document" }}
                        </button>
                    </div>
                </div>
            </div>
        </section>
    }
}
