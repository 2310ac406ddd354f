//! Organize pipeline: prompt -> model resolution -> completion -> normalized itinerary.

use std::time::{Duration, SystemTime};

use crate::core::llm::{
    CompletionError, LlmProvider, ProviderError, request_completion, validate_prompt,
};
use crate::core::models::{ModelSource, SelectionCache, SelectionError, TimedSlot, select_model};
use crate::core::normalize::normalize;
use crate::core::prompt::PromptRequest;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("could not fetch model catalog: {0}")]
    Catalog(#[source] ProviderError),
    #[error("model selection failed: {0}")]
    Selection(#[from] SelectionError),
    #[error("completion failed: {0}")]
    Completion(#[from] CompletionError),
}

impl PipelineError {
    /// The upstream failure behind this error, if it came from the provider.
    pub fn provider_error(&self) -> Option<&ProviderError> {
        match self {
            PipelineError::Catalog(e) => Some(e),
            PipelineError::Completion(CompletionError::Provider(e)) => Some(e),
            _ => None,
        }
    }
}

/// A finished itinerary. `empty_output` marks a structurally valid but empty completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Itinerary {
    pub model: String,
    pub text: String,
    pub empty_output: bool,
}

/// Runs organize requests against one provider, caching the selected model.
pub struct Organizer<P, C = TimedSlot> {
    provider: P,
    cache: C,
    preferences: Vec<String>,
    cache_ttl: Duration,
}

impl<P: LlmProvider> Organizer<P, TimedSlot> {
    pub fn new(provider: P, preferences: Vec<String>, cache_ttl: Duration) -> Self {
        Self::with_cache(provider, TimedSlot::new(), preferences, cache_ttl)
    }
}

impl<P: LlmProvider, C: SelectionCache> Organizer<P, C> {
    pub fn with_cache(provider: P, cache: C, preferences: Vec<String>, cache_ttl: Duration) -> Self {
        Self {
            provider,
            cache,
            preferences,
            cache_ttl,
        }
    }

    /// The model to use: cached selection, pinned model, or a fresh catalog selection.
    pub async fn resolve_model(&self) -> Result<String, PipelineError> {
        if let Some(model) = self.cache.get() {
            log::debug!("Using cached model {}", model);
            return Ok(model);
        }

        match self.provider.models().await.map_err(PipelineError::Catalog)? {
            ModelSource::Pinned(model) => Ok(model),
            ModelSource::Catalog(catalog) => {
                let model = select_model(&catalog, &self.preferences)?;
                if let Some(expires_at) = SystemTime::now().checked_add(self.cache_ttl) {
                    self.cache.set(model.clone(), expires_at);
                }
                Ok(model)
            }
        }
    }

    /// Build the prompt, resolve a model, request the completion, and normalize it.
    pub async fn organize(&self, request: &PromptRequest) -> Result<Itinerary, PipelineError> {
        let prompt = request.build();
        validate_prompt(&prompt)?;
        let model = self.resolve_model().await?;
        self.complete(&prompt, &model).await
    }

    /// Same as [`organize`](Self::organize) but with an explicit model; skips selection and cache.
    pub async fn organize_with_model(
        &self,
        request: &PromptRequest,
        model: &str,
    ) -> Result<Itinerary, PipelineError> {
        self.complete(&request.build(), model).await
    }

    async fn complete(&self, prompt: &str, model: &str) -> Result<Itinerary, PipelineError> {
        let completion = request_completion(&self.provider, prompt, model).await?;
        let empty_output = completion.is_empty();
        Ok(Itinerary {
            text: normalize(&completion.text),
            model: completion.model,
            empty_output,
        })
    }
}
