//! Google Gemini: a single pinned model via `generateContent`.

use std::time::Duration;

use serde_json::{Value, json};

use super::error::ProviderError;
use super::http::{build_client, endpoint, send_json};
use super::{LlmProvider, MAX_OUTPUT_TOKENS, TEMPERATURE};
use crate::core::config::GeminiSettings;
use crate::core::models::ModelSource;

const KEY_VAR: &str = "GOOGLE_API_KEY";

#[derive(Debug, Clone)]
pub struct GeminiProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiProvider {
    pub fn new(settings: &GeminiSettings, timeout: Duration) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: settings.base_url.clone(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
        })
    }
}

/// Concatenate `candidates[0].content.parts[*].text`.
pub(crate) fn parse_generate_content(body: &Value) -> Result<String, ProviderError> {
    let Some(candidate) = body
        .get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
    else {
        let reason = body
            .get("promptFeedback")
            .and_then(|f| f.get("blockReason"))
            .and_then(|r| r.as_str());
        return Err(ProviderError::Malformed(match reason {
            Some(r) => format!("no candidates (prompt blocked: {})", r),
            None => "no candidates".to_string(),
        }));
    };

    let Some(parts) = candidate
        .get("content")
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
    else {
        let finish = candidate
            .get("finishReason")
            .and_then(|r| r.as_str())
            .unwrap_or("unknown");
        return Err(ProviderError::Malformed(format!(
            "candidate has no content (finishReason: {})",
            finish
        )));
    };

    let texts: Vec<&str> = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
        .collect();
    if texts.is_empty() {
        return Err(ProviderError::Malformed("content has no text parts".to_string()));
    }
    Ok(texts.concat())
}

impl LlmProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn models(&self) -> Result<ModelSource, ProviderError> {
        Ok(ModelSource::Pinned(self.model.clone()))
    }

    async fn complete(&self, prompt: &str, model: &str) -> Result<String, ProviderError> {
        log::debug!("POST {}:generateContent prompt_bytes={}", model, prompt.len());
        let path = format!("models/{}:generateContent", model);
        let request = self
            .client
            .post(endpoint(&self.base_url, &path))
            .header("x-goog-api-key", &self.api_key)
            .json(&json!({
                "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
                "generationConfig": {
                    "temperature": TEMPERATURE,
                    "maxOutputTokens": MAX_OUTPUT_TOKENS,
                },
            }));
        let body = send_json(request, KEY_VAR).await?;
        parse_generate_content(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn provider(base_url: &str) -> GeminiProvider {
        let settings = GeminiSettings {
            api_key: "g-test".to_string(),
            base_url: base_url.to_string(),
            model: "gemini-2.0-flash".to_string(),
        };
        GeminiProvider::new(&settings, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn joins_all_text_parts() {
        let body = json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{"text": "🗓️Day 1 : A"}, {"text": "\n→ B"}] },
                "finishReason": "STOP"
            }]
        });
        assert_eq!(parse_generate_content(&body).unwrap(), "🗓️Day 1 : A\n→ B");
    }

    #[test]
    fn blocked_prompt_reports_reason() {
        let body = json!({"promptFeedback": {"blockReason": "SAFETY"}});
        let err = parse_generate_content(&body).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn candidate_without_content_is_malformed() {
        let body = json!({"candidates": [{"finishReason": "MAX_TOKENS"}]});
        let err = parse_generate_content(&body).unwrap_err();
        assert!(matches!(err, ProviderError::Malformed(ref m) if m.contains("MAX_TOKENS")));
    }

    #[test]
    fn empty_text_part_is_accepted() {
        let body = json!({"candidates": [{"content": {"parts": [{"text": ""}]}}]});
        assert_eq!(parse_generate_content(&body).unwrap(), "");
    }

    #[tokio::test]
    async fn models_is_pinned_without_network() {
        let source = provider("http://127.0.0.1:9").models().await.unwrap();
        assert_eq!(source, ModelSource::Pinned("gemini-2.0-flash".to_string()));
    }

    #[tokio::test]
    async fn complete_posts_generate_content() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-2.0-flash:generateContent")
            .match_header("x-goog-api-key", "g-test")
            .match_body(Matcher::PartialJson(json!({
                "contents": [{"role": "user", "parts": [{"text": "plan"}]}],
                "generationConfig": {"temperature": 0.7, "maxOutputTokens": 1500}
            })))
            .with_status(200)
            .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"🗓️Day 1 : Go"}]}}]}"#)
            .create_async()
            .await;

        let text = provider(&server.url())
            .complete("plan", "gemini-2.0-flash")
            .await
            .unwrap();
        assert_eq!(text, "🗓️Day 1 : Go");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn complete_401_names_google_key() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", Matcher::Any)
            .with_status(401)
            .with_body("{}")
            .create_async()
            .await;

        let err = provider(&server.url())
            .complete("plan", "gemini-2.0-flash")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ProviderError::Unauthorized {
                var: "GOOGLE_API_KEY",
                ..
            }
        ));
    }
}
