use async_trait::async_trait;
use rig::completion::Prompt;
use rig::prelude::CompletionClient;
use rig::providers::gemini;
use tracing::{debug, error};

use crate::config::AppConfig;
use crate::errors::AppError;

/// One prompt in, the generated text out. No retries, no caching.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, AppError>;

    /// Model identifier reported by the health probe.
    fn model(&self) -> &str;
}

/// Completion backend backed by the rig Gemini provider.
/// A fresh agent is built per call; the whole prompt goes out as one user turn
/// with the provider's default generation parameters.
#[derive(Clone)]
pub struct GeminiAgentService {
    client: gemini::Client,
    base_url: String,
    model: String,
}

impl GeminiAgentService {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let client = gemini::Client::builder()
            .api_key(config.gemini_api_key.as_str())
            .base_url(&config.gemini_base_url)
            .build()
            .map_err(|e| AppError::ProviderUnavailable {
                host: format!("{} ({e})", config.gemini_base_url),
            })?;
        Ok(Self {
            client,
            base_url: config.gemini_base_url.clone(),
            model: config.gemini_model.clone(),
        })
    }
}

#[async_trait]
impl CompletionBackend for GeminiAgentService {
    async fn complete(&self, prompt: &str) -> Result<String, AppError> {
        let agent = self.client.agent(&self.model).build();

        debug!("Sending {} byte prompt to {}", prompt.len(), self.model);
        agent.prompt(prompt).await.map_err(|e| {
            error!("Gemini completion failed for model {}: {e}", self.model);
            let msg = e.to_string();
            if msg.contains("Connection refused") || msg.contains("dns error") {
                AppError::ProviderUnavailable { host: self.base_url.clone() }
            } else {
                AppError::UpstreamFailed { message: msg }
            }
        })
    }

    fn model(&self) -> &str {
        &self.model
    }
}
