//! Hosted LLM providers and the single-turn completion request.

mod error;
mod gemini;
mod http;
mod openrouter;
mod request;

use crate::core::config::{Config, ConfigError, ProviderKind};
use crate::core::models::ModelSource;

pub use error::{CompletionError, ProviderError};
pub use gemini::GeminiProvider;
pub use openrouter::OpenRouterProvider;
pub use request::{request_completion, validate_prompt};

/// Sampling temperature sent with every completion.
pub const TEMPERATURE: f64 = 0.7;
/// Upper bound on generated tokens per completion.
pub const MAX_OUTPUT_TOKENS: u32 = 1500;

/// A hosted LLM vendor: where models come from and how to get a completion.
#[allow(async_fn_in_trait)]
pub trait LlmProvider {
    fn name(&self) -> &'static str;

    /// A live catalog to select from, or the one model this provider is pinned to.
    async fn models(&self) -> Result<ModelSource, ProviderError>;

    /// Send `prompt` as a single user message to `model` and return the reply text.
    async fn complete(&self, prompt: &str, model: &str) -> Result<String, ProviderError>;
}

/// The provider chosen by configuration.
#[derive(Debug, Clone)]
pub enum AnyProvider {
    OpenRouter(OpenRouterProvider),
    Gemini(GeminiProvider),
}

impl AnyProvider {
    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        let missing = |kind: ProviderKind| {
            ProviderError::Unexpected(Box::new(ConfigError::MissingApiKey {
                var: kind.api_key_var(),
            }))
        };
        match config.provider {
            ProviderKind::OpenRouter => {
                let settings = config
                    .openrouter
                    .as_ref()
                    .ok_or_else(|| missing(ProviderKind::OpenRouter))?;
                OpenRouterProvider::new(settings, config.timeout).map(AnyProvider::OpenRouter)
            }
            ProviderKind::Gemini => {
                let settings = config
                    .gemini
                    .as_ref()
                    .ok_or_else(|| missing(ProviderKind::Gemini))?;
                GeminiProvider::new(settings, config.timeout).map(AnyProvider::Gemini)
            }
        }
    }
}

impl LlmProvider for AnyProvider {
    fn name(&self) -> &'static str {
        match self {
            AnyProvider::OpenRouter(p) => p.name(),
            AnyProvider::Gemini(p) => p.name(),
        }
    }

    async fn models(&self) -> Result<ModelSource, ProviderError> {
        match self {
            AnyProvider::OpenRouter(p) => p.models().await,
            AnyProvider::Gemini(p) => p.models().await,
        }
    }

    async fn complete(&self, prompt: &str, model: &str) -> Result<String, ProviderError> {
        match self {
            AnyProvider::OpenRouter(p) => p.complete(prompt, model).await,
            AnyProvider::Gemini(p) => p.complete(prompt, model).await,
        }
    }
}
