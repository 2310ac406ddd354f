//! Single-turn completion request with prompt validation.

use super::LlmProvider;
use super::error::CompletionError;

/// Text returned by a completion. May be empty: that is degenerate but not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub model: String,
    pub text: String,
}

impl Completion {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Reject prompts that are empty after trimming.
pub fn validate_prompt(prompt: &str) -> Result<&str, CompletionError> {
    if prompt.trim().is_empty() {
        return Err(CompletionError::EmptyPrompt);
    }
    Ok(prompt)
}

/// Send one prompt to `model`. No network call is made for a blank prompt; no retries.
pub async fn request_completion<P: LlmProvider>(
    provider: &P,
    prompt: &str,
    model: &str,
) -> Result<Completion, CompletionError> {
    let prompt = validate_prompt(prompt)?;
    log::info!("Requesting completion from {} ({})", provider.name(), model);
    let text = provider.complete(prompt, model).await?;
    if text.is_empty() {
        log::warn!("{} returned empty content for {}", provider.name(), model);
    }
    Ok(Completion {
        model: model.to_string(),
        text,
    })
}
