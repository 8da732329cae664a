use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::agent::CompletionBackend;
use crate::errors::AppError;
use crate::models::{format_value, ChatRequest, ChatResponse, ReactionRequest};
use crate::prompts::{PromptRegistry, PromptTemplate};

/// Validates requests, renders prompts and runs one completion per call.
/// Holds only read-only shared state, so clones are cheap and never contend.
#[derive(Clone)]
pub struct AnalysisService {
    prompts: Arc<PromptRegistry>,
    backend: Arc<dyn CompletionBackend>,
}

impl AnalysisService {
    pub fn new(prompts: PromptRegistry, backend: Arc<dyn CompletionBackend>) -> Self {
        Self { prompts: Arc::new(prompts), backend }
    }

    pub fn model(&self) -> &str {
        self.backend.model()
    }

    pub fn prompt_version(&self) -> &str {
        self.prompts.version()
    }

    pub async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, AppError> {
        if request.message.is_empty() {
            return Err(AppError::empty_field("message"));
        }

        let prompt = self
            .prompts
            .render(PromptTemplate::ChatAssistant, &[("message", &request.message)]);
        self.complete(PromptTemplate::ChatAssistant, &prompt).await
    }

    pub async fn react(&self, request: ReactionRequest) -> Result<ChatResponse, AppError> {
        let risk_score = request
            .risk_score
            .as_ref()
            .map(format_value)
            .ok_or_else(|| AppError::missing_field("riskScore"))?;

        let prompt = self.prompts.render(
            PromptTemplate::ReportReaction,
            &[
                ("risk_score", &risk_score),
                ("summary", &request.summary),
                ("risks", &request.risks),
                ("hidden_charges", &request.hidden_charges),
            ],
        );
        self.complete(PromptTemplate::ReportReaction, &prompt).await
    }

    async fn complete(&self, template: PromptTemplate, prompt: &str) -> Result<ChatResponse, AppError> {
        let request_id = Uuid::new_v4();
        info!(%request_id, %template, "Requesting completion");

        match self.backend.complete(prompt).await {
            Ok(reply) => Ok(ChatResponse { reply }),
            Err(e) if e.is_upstream() => {
                error!(%request_id, %template, "Completion failed: {e}");
                Err(e)
            }
            Err(e) => {
                warn!(%request_id, %template, "Completion rejected: {e}");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::stub::{AlwaysFails, FixedReply};
    use serde_json::Value;

    fn service_with(backend: Arc<dyn CompletionBackend>) -> AnalysisService {
        AnalysisService::new(PromptRegistry::builtin(), backend)
    }

    fn reaction(score: Option<Value>) -> ReactionRequest {
        ReactionRequest {
            summary: String::new(),
            risks: String::new(),
            hidden_charges: String::new(),
            risk_score: score,
        }
    }

    #[tokio::test]
    async fn chat_returns_backend_reply_verbatim() {
        let svc = service_with(Arc::new(FixedReply::new("  TEST_REPLY \n")));
        let resp = svc
            .chat(ChatRequest { message: "Is this loan risky?".into() })
            .await
            .expect("should succeed");
        assert_eq!(resp.reply, "  TEST_REPLY \n");
    }

    #[tokio::test]
    async fn chat_rejects_empty_message() {
        let backend = Arc::new(FixedReply::new("unused"));
        let svc = service_with(backend.clone());
        let err = svc.chat(ChatRequest::default()).await.unwrap_err();
        assert!(err.is_validation());
        assert!(backend.last_prompt().is_none());
    }

    #[tokio::test]
    async fn chat_accepts_whitespace_message() {
        let svc = service_with(Arc::new(FixedReply::new("ok")));
        assert!(svc.chat(ChatRequest { message: " ".into() }).await.is_ok());
    }

    #[tokio::test]
    async fn chat_prompt_contains_user_message() {
        let backend = Arc::new(FixedReply::new("ok"));
        let svc = service_with(backend.clone());
        svc.chat(ChatRequest { message: "Explain EMI please".into() }).await.unwrap();
        let prompt = backend.last_prompt().unwrap();
        assert!(prompt.contains("User Message: \"Explain EMI please\""));
    }

    #[tokio::test]
    async fn react_requires_risk_score() {
        let svc = service_with(Arc::new(FixedReply::new("unused")));
        let mut req = reaction(None);
        req.summary = "something".into();
        req.risks = "lots".into();
        let err = svc.react(req).await.unwrap_err();
        assert!(matches!(err, AppError::MissingField { ref field_name } if field_name == "riskScore"));
    }

    #[tokio::test]
    async fn react_accepts_zero_score() {
        let backend = Arc::new(FixedReply::new("Waah bhai waah"));
        let svc = service_with(backend.clone());
        let resp = svc.react(reaction(Some(Value::from(0)))).await.unwrap();
        assert_eq!(resp.reply, "Waah bhai waah");
        assert!(backend.last_prompt().unwrap().contains("- Risk Score: 0/100"));
    }

    #[tokio::test]
    async fn react_embeds_null_score_verbatim() {
        let backend = Arc::new(FixedReply::new("ok"));
        let svc = service_with(backend.clone());
        svc.react(reaction(Some(Value::Null))).await.unwrap();
        assert!(backend.last_prompt().unwrap().contains("- Risk Score: null/100"));
    }

    #[tokio::test]
    async fn react_embeds_report_fields() {
        let backend = Arc::new(FixedReply::new("ok"));
        let svc = service_with(backend.clone());
        let req = ReactionRequest {
            summary: "Home loan".into(),
            risks: "Rate resets yearly".into(),
            hidden_charges: "2% prepayment penalty".into(),
            risk_score: Some(Value::from(85)),
        };
        svc.react(req).await.unwrap();
        let prompt = backend.last_prompt().unwrap();
        assert!(prompt.contains("- Risk Score: 85/100"));
        assert!(prompt.contains("- Summary: Home loan"));
        assert!(prompt.contains("- Risks: Rate resets yearly"));
        assert!(prompt.contains("- Hidden Charges: 2% prepayment penalty"));
    }

    #[tokio::test]
    async fn upstream_failure_propagates_as_upstream_error() {
        let svc = service_with(Arc::new(AlwaysFails));
        let err = svc.chat(ChatRequest { message: "hi".into() }).await.unwrap_err();
        assert!(err.is_upstream());
        let err = svc.react(reaction(Some(Value::from(50)))).await.unwrap_err();
        assert!(err.is_upstream());
    }

    #[test]
    fn reports_model_and_prompt_version() {
        let svc = service_with(Arc::new(FixedReply::new("ok")));
        assert_eq!(svc.model(), "stub-model");
        assert_eq!(svc.prompt_version(), crate::prompts::BUILTIN_VERSION);
    }
}
