use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

use crate::models::{SignupResponse, User};

const TOKEN_COOKIE: &str = "token";
const USER_COOKIE: &str = "user";
const COOKIE_MAX_AGE_SECS: u32 = 24 * 60 * 60;

/// Signed-in state, read from cookies once at start-up and provided as context.
/// Views read it from here instead of touching cookies themselves.
#[derive(Clone, Copy)]
pub struct Session {
    token: RwSignal<Option<String>>,
    user: RwSignal<Option<User>>,
}

impl Session {
    pub fn provide() -> Self {
        let raw = document_cookies().unwrap_or_default();
        let token = read_cookie(&raw, TOKEN_COOKIE).filter(|t| !t.is_empty());
        let user = read_cookie(&raw, USER_COOKIE)
            .and_then(|v| js_sys::decode_uri_component(&v).ok())
            .and_then(|v| v.as_string())
            .and_then(|json| serde_json::from_str::<User>(&json).ok());

        let session = Self { token: RwSignal::new(token), user: RwSignal::new(user) };
        provide_context(session);
        session
    }

    pub fn token(&self) -> Option<String> {
        self.token.get_untracked()
    }

    /// Tracked; re-renders subscribers on sign-in and logout.
    pub fn is_signed_in(&self) -> bool {
        self.token.with(Option::is_some)
    }

    pub fn user(&self) -> Option<User> {
        self.user.get()
    }

    pub fn sign_in(&self, response: SignupResponse) {
        write_cookie(TOKEN_COOKIE, &response.token, Some(COOKIE_MAX_AGE_SECS));
        if let Some(user) = &response.user {
            if let Ok(json) = serde_json::to_string(user) {
                let encoded: String = js_sys::encode_uri_component(&json).into();
                write_cookie(USER_COOKIE, &encoded, Some(COOKIE_MAX_AGE_SECS));
            }
        }
        self.token.set(Some(response.token));
        self.user.set(response.user);
    }

    /// Logout: clears the cookies and the in-memory state together.
    pub fn invalidate(&self) {
        write_cookie(TOKEN_COOKIE, "", None);
        write_cookie(USER_COOKIE, "", None);
        self.token.set(None);
        self.user.set(None);
    }
}

fn html_document() -> Option<HtmlDocument> {
    web_sys::window()?.document()?.dyn_into::<HtmlDocument>().ok()
}

fn document_cookies() -> Option<String> {
    html_document()?.cookie().ok()
}

fn write_cookie(name: &str, value: &str, max_age: Option<u32>) {
    let Some(doc) = html_document() else {
        return;
    };
    if let Err(e) = doc.set_cookie(&cookie_string(name, value, max_age)) {
        log::error!("Failed to write cookie {name}: {e:?}");
    }
}

/// `None` max-age expires the cookie immediately.
fn cookie_string(name: &str, value: &str, max_age: Option<u32>) -> String {
    let max_age = max_age.unwrap_or(0);
    format!("{name}={value}; path=/; max-age={max_age}; SameSite=Lax")
}

/// Finds `name` in a `document.cookie` string.
fn read_cookie(raw: &str, name: &str) -> Option<String> {
    raw.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}
