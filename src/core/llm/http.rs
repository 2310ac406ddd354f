//! Shared HTTP plumbing for provider clients.

use std::time::Duration;

use serde_json::Value;

use super::error::{ProviderError, api_error_message, classify_status, map_reqwest_error};
use crate::core::app;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Build a client with an explicit request timeout.
pub(super) fn build_client(timeout: Duration) -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(CONNECT_TIMEOUT)
        .user_agent(format!("{}/{}", app::NAME, app::VERSION))
        .build()
        .map_err(|e| ProviderError::Unexpected(Box::new(e)))
}

/// Join an API base and a path without doubling slashes.
pub(super) fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Send a request and decode its JSON body, classifying status and error envelopes.
pub(super) async fn send_json(
    request: reqwest::RequestBuilder,
    key_var: &'static str,
) -> Result<Value, ProviderError> {
    let resp = request.send().await.map_err(map_reqwest_error)?;
    let status = resp.status();
    let body = resp.text().await.map_err(map_reqwest_error)?;
    if !status.is_success() {
        log::warn!("Upstream returned HTTP {}", status.as_u16());
        return Err(classify_status(status.as_u16(), body, key_var));
    }
    let value: Value = serde_json::from_str(&body)
        .map_err(|e| ProviderError::Malformed(format!("invalid JSON body: {}", e)))?;
    if let Some(msg) = api_error_message(&value) {
        return Err(ProviderError::Api(msg));
    }
    Ok(value)
}
