//! OpenRouter: live model catalog and OpenAI-style chat completions.

use std::time::Duration;

use serde_json::{Value, json};

use super::error::ProviderError;
use super::http::{build_client, endpoint, send_json};
use super::{LlmProvider, MAX_OUTPUT_TOKENS, TEMPERATURE};
use crate::core::app;
use crate::core::config::OpenRouterSettings;
use crate::core::models::{ModelDescriptor, ModelSource, parse_catalog};

const KEY_VAR: &str = "OPENROUTER_API_KEY";

#[derive(Debug, Clone)]
pub struct OpenRouterProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    pinned_model: Option<String>,
}

impl OpenRouterProvider {
    pub fn new(settings: &OpenRouterSettings, timeout: Duration) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: settings.base_url.clone(),
            api_key: settings.api_key.clone(),
            pinned_model: settings.model.clone(),
        })
    }

    /// Fetch the full model catalog (`GET /models`).
    pub async fn list_models(&self) -> Result<Vec<ModelDescriptor>, ProviderError> {
        let request = self
            .client
            .get(endpoint(&self.base_url, "models"))
            .bearer_auth(&self.api_key);
        let body = send_json(request, KEY_VAR).await?;
        let catalog = parse_catalog(&body)
            .ok_or_else(|| ProviderError::Malformed("missing `data` array".to_string()))?;
        log::info!("Fetched {} models from OpenRouter", catalog.len());
        Ok(catalog)
    }
}

/// Pull `choices[0].message.content` out of a chat completion body.
/// An empty string is a valid result; a missing or null field is not.
pub(crate) fn parse_chat_content(body: &Value) -> Result<String, ProviderError> {
    let choice = body
        .get("choices")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .ok_or_else(|| ProviderError::Malformed("no choices".to_string()))?;
    let message = choice
        .get("message")
        .filter(|m| m.is_object())
        .ok_or_else(|| ProviderError::Malformed("choice has no message".to_string()))?;
    message
        .get("content")
        .and_then(|c| c.as_str())
        .map(String::from)
        .ok_or_else(|| ProviderError::Malformed("message has no content".to_string()))
}

impl LlmProvider for OpenRouterProvider {
    fn name(&self) -> &'static str {
        "openrouter"
    }

    async fn models(&self) -> Result<ModelSource, ProviderError> {
        if let Some(model) = &self.pinned_model {
            return Ok(ModelSource::Pinned(model.clone()));
        }
        self.list_models().await.map(ModelSource::Catalog)
    }

    async fn complete(&self, prompt: &str, model: &str) -> Result<String, ProviderError> {
        log::debug!("POST chat/completions model={} prompt_bytes={}", model, prompt.len());
        let request = self
            .client
            .post(endpoint(&self.base_url, "chat/completions"))
            .bearer_auth(&self.api_key)
            .header("X-Title", app::NAME)
            .json(&json!({
                "model": model,
                "messages": [{ "role": "user", "content": prompt }],
                "temperature": TEMPERATURE,
                "max_tokens": MAX_OUTPUT_TOKENS,
            }));
        let body = send_json(request, KEY_VAR).await?;
        parse_chat_content(&body)
    }
}
