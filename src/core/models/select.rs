//! Pick one chat-capable text model out of a provider catalog.

use std::collections::BTreeSet;
use std::fmt;

use super::info::ModelDescriptor;

/// Smallest context window considered usable for an itinerary prompt.
pub const MIN_CONTEXT_LENGTH: i64 = 500;

/// Lowercase id fragments that mark a chat or instruction-tuned family.
pub const CHAT_KEYWORDS: &[&str] = &[
    "chat", "instruct", "gpt", "claude", "gemini", "llama", "mistral", "mixtral", "qwen",
    "deepseek", "command",
];

/// Built-in preference order, used unless `ITINERARY_MODEL_PREFERENCES` is set.
pub const DEFAULT_PREFERENCES: &[&str] = &[
    "openai/gpt-3.5-turbo",
    "openai/gpt-4o-mini",
    "anthropic/claude-3-haiku",
    "google/gemini-flash-1.5",
    "meta-llama/llama-3.1-8b-instruct",
    "mistralai/mistral-7b-instruct",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("empty catalog")]
    EmptyCatalog,
    #[error("no suitable model")]
    NoSuitableModel,
}

/// Why a catalog entry was not considered suitable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    MissingId,
    NoTextOutput,
    ContextTooShort,
    NoChatKeyword,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Rejection::MissingId => "missing id",
            Rejection::NoTextOutput => "no text output",
            Rejection::ContextTooShort => "context length missing or below 500",
            Rejection::NoChatKeyword => "not a chat/instruct family",
        };
        f.write_str(reason)
    }
}

fn produces_text(modality: &str) -> bool {
    modality.starts_with("text") || modality.contains("->text")
}

/// Check one descriptor against the suitability filter. The first failing check wins.
pub fn classify(model: &ModelDescriptor) -> Result<(), Rejection> {
    if model.id.is_empty() {
        return Err(Rejection::MissingId);
    }
    match model.modality.as_deref() {
        Some(m) if produces_text(m) => {}
        _ => return Err(Rejection::NoTextOutput),
    }
    match model.context_length {
        Some(n) if n >= MIN_CONTEXT_LENGTH => {}
        _ => return Err(Rejection::ContextTooShort),
    }
    let id = model.id.to_lowercase();
    if !CHAT_KEYWORDS.iter().any(|k| id.contains(k)) {
        return Err(Rejection::NoChatKeyword);
    }
    Ok(())
}

/// Select a model: first preference present among suitable models, else the
/// lexicographically smallest suitable id.
pub fn select_model(
    catalog: &[ModelDescriptor],
    preferences: &[String],
) -> Result<String, SelectionError> {
    if catalog.is_empty() {
        return Err(SelectionError::EmptyCatalog);
    }

    // BTreeSet keeps suitable ids sorted and deduplicated.
    let mut suitable = BTreeSet::new();
    for model in catalog {
        match classify(model) {
            Ok(()) => {
                log::debug!("Model accepted: {}", model.id);
                suitable.insert(model.id.as_str());
            }
            Err(reason) => log::debug!("Model rejected: {} ({})", model.id, reason),
        }
    }

    if suitable.is_empty() {
        return Err(SelectionError::NoSuitableModel);
    }
    log::info!(
        "{} of {} catalog models are suitable",
        suitable.len(),
        catalog.len()
    );

    if let Some(preferred) = preferences.iter().find(|p| suitable.contains(p.as_str())) {
        log::info!("Selected preferred model {}", preferred);
        return Ok(preferred.clone());
    }

    let fallback = suitable
        .first()
        .map(|id| id.to_string())
        .ok_or(SelectionError::NoSuitableModel)?;
    log::info!("No preferred model available; falling back to {}", fallback);
    Ok(fallback)
}
