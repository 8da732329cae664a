use std::cell::RefCell;
use std::sync::Arc;

use gloo_net::http::{Request, RequestBuilder, Response};
use leptos::prelude::on_cleanup;
use send_wrapper::SendWrapper;
use serde::de::DeserializeOwned;
use thiserror::Error;
use web_sys::{AbortController, AbortSignal, File, FormData};

use crate::models::{
    ChatRequest, ChatResponse, DocumentDetails, DocumentSummary, ErrorBody, ReactionRequest,
    SignupRequest, SignupResponse, UploadResponse,
};

/// Base URL of the completion proxy (this workspace's backend).
const API_BASE: &str = "http://localhost:3000";

/// Base URL of the external document and auth API.
const DOCUMENT_API_BASE: &str = "http://localhost:5000/api";

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    /// 401; carries the server's `error` text when it sent one.
    #[error("{0}")]
    Unauthorized(String),
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("Parse error: {0}")]
    Parse(String),
    /// The owning view went away before the response arrived.
    #[error("Request aborted")]
    Aborted,
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    /// Text the server put in its `{error}` body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized(message) | ApiError::Server { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }

    fn from_status(status: u16, body_error: Option<String>) -> Self {
        match (status, body_error) {
            (401, message) => ApiError::Unauthorized(message.unwrap_or_else(|| "Unauthorized".to_string())),
            (status, Some(message)) => ApiError::Server { status, message },
            (status, None) => ApiError::Server { status, message: format!("Server error: {status}") },
        }
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, ApiError::Aborted)
    }

    fn from_transport(e: gloo_net::Error) -> Self {
        let text = e.to_string();
        if text.contains("AbortError") {
            ApiError::Aborted
        } else {
            ApiError::Network(text)
        }
    }
}

/// Abort handle bound to the reactive owner that created it. Starting a new
/// request cancels the previous one, and cleaning up the owning component
/// cancels whatever is still in flight.
#[derive(Clone)]
pub struct RequestScope(Arc<SendWrapper<RefCell<Option<AbortController>>>>);

impl RequestScope {
    pub fn new() -> Self {
        let scope = Self(Arc::new(SendWrapper::new(RefCell::new(None))));
        let on_drop = scope.clone();
        on_cleanup(move || on_drop.abort());
        scope
    }

    /// Returns the signal for the next request. `None` when the browser has no
    /// `AbortController`; the request then simply cannot be cancelled.
    pub fn begin(&self) -> Option<AbortSignal> {
        self.abort();
        let controller = match AbortController::new() {
            Ok(controller) => controller,
            Err(e) => {
                log::warn!("AbortController unavailable: {e:?}");
                return None;
            }
        };
        let signal = controller.signal();
        *self.0.borrow_mut() = Some(controller);
        Some(signal)
    }

    pub fn abort(&self) {
        if let Some(controller) = self.0.borrow_mut().take() {
            controller.abort();
        }
    }
}

fn with_auth(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
        None => builder,
    }
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    match resp.status() {
        200..=299 => resp.json::<T>().await.map_err(|e| ApiError::Parse(e.to_string())),
        status => {
            let body_error = resp.json::<ErrorBody>().await.ok().map(|body| body.error);
            Err(ApiError::from_status(status, body_error))
        }
    }
}

// ── Completion proxy ─────────────────────────────────────────────────────────

/// Sends one chatbot turn.
pub async fn send_chat(message: &str, signal: Option<&AbortSignal>) -> Result<ChatResponse, ApiError> {
    let body = ChatRequest { message: message.to_string() };
    let resp = Request::post(&format!("{API_BASE}/api/chat"))
        .abort_signal(signal)
        .json(&body)
        .map_err(|e| ApiError::Parse(e.to_string()))?
        .send()
        .await
        .map_err(ApiError::from_transport)?;
    read_json(resp).await
}

/// Asks for a meme reaction to an analysed report.
pub async fn fetch_reaction(
    request: &ReactionRequest,
    signal: Option<&AbortSignal>,
) -> Result<ChatResponse, ApiError> {
    let resp = Request::post(&format!("{API_BASE}/api/meme"))
        .abort_signal(signal)
        .json(request)
        .map_err(|e| ApiError::Parse(e.to_string()))?
        .send()
        .await
        .map_err(ApiError::from_transport)?;
    read_json(resp).await
}

// ── Document API ─────────────────────────────────────────────────────────────

pub async fn fetch_documents(
    token: Option<&str>,
    signal: Option<&AbortSignal>,
) -> Result<Vec<DocumentSummary>, ApiError> {
    let resp = with_auth(Request::get(&format!("{DOCUMENT_API_BASE}/documents")), token)
        .abort_signal(signal)
        .send()
        .await
        .map_err(ApiError::from_transport)?;
    read_json(resp).await
}

pub async fn fetch_document(
    id: &str,
    token: Option<&str>,
    signal: Option<&AbortSignal>,
) -> Result<DocumentDetails, ApiError> {
    let resp = with_auth(Request::get(&format!("{DOCUMENT_API_BASE}/documents/{id}")), token)
        .abort_signal(signal)
        .send()
        .await
        .map_err(ApiError::from_transport)?;
    read_json(resp).await
}

/// Multipart upload; the file goes in the `document` field.
pub async fn upload_document(
    file: &File,
    token: Option<&str>,
    signal: Option<&AbortSignal>,
) -> Result<UploadResponse, ApiError> {
    let form = FormData::new().map_err(|e| ApiError::Network(format!("{e:?}")))?;
    form.append_with_blob("document", file)
        .map_err(|e| ApiError::Network(format!("{e:?}")))?;

    let resp = with_auth(Request::post(&format!("{DOCUMENT_API_BASE}/documents/upload")), token)
        .abort_signal(signal)
        .body(form)
        .map_err(|e| ApiError::Parse(e.to_string()))?
        .send()
        .await
        .map_err(ApiError::from_transport)?;
    read_json(resp).await
}

pub async fn signup(request: &SignupRequest, signal: Option<&AbortSignal>) -> Result<SignupResponse, ApiError> {
    let resp = Request::post(&format!("{DOCUMENT_API_BASE}/auth/signup"))
        .abort_signal(signal)
        .json(request)
        .map_err(|e| ApiError::Parse(e.to_string()))?
        .send()
        .await
        .map_err(ApiError::from_transport)?;
    read_json(resp).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_displays_its_message() {
        let err = ApiError::Server { status: 500, message: "Failed to process document".into() };
        assert_eq!(err.to_string(), "Failed to process document");
    }

    #[test]
    fn classification_helpers() {
        assert!(ApiError::Unauthorized("Invalid token".into()).is_unauthorized());
        assert!(ApiError::Aborted.is_aborted());
        assert!(!ApiError::Network("down".into()).is_aborted());
    }

    #[test]
    fn unauthorized_keeps_server_text() {
        let err = ApiError::from_status(401, Some("Token expired".into()));
        assert!(err.is_unauthorized());
        assert_eq!(err.server_message(), Some("Token expired"));
        assert_eq!(err.to_string(), "Token expired");

        let bare = ApiError::from_status(401, None);
        assert_eq!(bare.server_message(), Some("Unauthorized"));
    }

    #[test]
    fn other_statuses_fall_back_to_status_text() {
        assert_eq!(
            ApiError::from_status(500, None),
            ApiError::Server { status: 500, message: "Server error: 500".into() }
        );
        assert_eq!(ApiError::from_status(413, Some("Too large".into())).server_message(), Some("Too large"));
        assert_eq!(ApiError::Network("down".into()).server_message(), None);
    }
}
