//! Provider and completion error types.

/// Failures talking to a hosted LLM API.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("unauthorized, credential invalid/expired. Check {var} in .env")]
    Unauthorized { var: &'static str, body: String },
    #[error("upstream HTTP failure ({status}): {body}")]
    Http { status: u16, body: String },
    /// The API answered 2xx but with an error envelope.
    #[error("API error: {0}")]
    Api(String),
    #[error("transport failure: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("unexpected failure: {0}")]
    Unexpected(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl ProviderError {
    /// The upstream response body, for statuses that carry one.
    pub fn body(&self) -> Option<&str> {
        match self {
            ProviderError::Unauthorized { body, .. } | ProviderError::Http { body, .. } => {
                Some(body.as_str())
            }
            _ => None,
        }
    }
}

/// Errors from a single completion request.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("empty prompt")]
    EmptyPrompt,
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Map a non-success status into `ProviderError`, keeping the body for diagnostics.
pub fn classify_status(status: u16, body: String, key_var: &'static str) -> ProviderError {
    if status == 401 {
        return ProviderError::Unauthorized { var: key_var, body };
    }
    ProviderError::Http { status, body }
}

/// Extract `error.message` from an error envelope, as OpenRouter and Gemini both send.
pub fn api_error_message(body: &serde_json::Value) -> Option<String> {
    let err = body.get("error")?;
    let msg = err
        .get("message")
        .and_then(|v| v.as_str())
        .unwrap_or("Unknown error");
    Some(msg.to_string())
}

/// Map a reqwest error: body decode problems are shape errors, everything else is transport.
pub fn map_reqwest_error(e: reqwest::Error) -> ProviderError {
    if e.is_decode() {
        return ProviderError::Malformed(e.to_string());
    }
    if e.is_builder() {
        return ProviderError::Unexpected(Box::new(e));
    }
    ProviderError::Transport(e)
}
