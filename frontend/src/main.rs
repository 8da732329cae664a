mod api;
mod components;
mod models;
mod risk;
mod session;
mod state;

use leptos::mount::mount_to_body;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use components::analysis::AnalysisPage;
use components::chat_widget::ChatWidget;
use components::dashboard::Dashboard;
use components::home::Home;
use components::navbar::Navbar;
use components::signup::SignupPage;
use components::toasts::Toasts;
use components::upload::UploadPage;
use session::Session;
use state::ToastState;

/// Root application component.
#[component]
fn App() -> impl IntoView {
    // Cookies are read exactly once, here.
    Session::provide();
    ToastState::provide();

    view! {
        <Router>
            <Navbar />
            <div class="page">
                <Routes fallback=|| view! { <div class="empty-state">"Page not found."</div> }>
                    <Route path=path!("/") view=Home />
                    <Route path=path!("/dashboard") view=Dashboard />
                    <Route path=path!("/upload") view=UploadPage />
                    <Route path=path!("/signup") view=SignupPage />
                    <Route path=path!("/analysis/:id") view=AnalysisPage />
                </Routes>
            </div>
            <ChatWidget />
            <Toasts />
        </Router>
    }
}

fn main() {
    console_log::init_with_level(log::Level::Debug).expect("Failed to init logger");
    mount_to_body(App);
}
