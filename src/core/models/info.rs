//! Catalog entry type and its wire parsing (no dependencies on cache or API).

use serde::Serialize;
use serde_json::Value;

/// One entry of a provider's model catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ModelDescriptor {
    pub id: String,
    /// Free-form input->output media description, e.g. `text->text` or `text+image->text`.
    pub modality: Option<String>,
    /// Only set when the catalog carries a JSON integer.
    pub context_length: Option<i64>,
}

impl ModelDescriptor {
    /// Build a descriptor from one element of the listing's `data` array.
    /// Missing or mistyped fields become empty/absent; the selector decides what is usable.
    pub fn from_value(value: &Value) -> Self {
        let id = value
            .get("id")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string();
        let modality = value
            .get("architecture")
            .and_then(|a| a.get("modality"))
            .and_then(|m| m.as_str())
            .map(String::from);
        let context_length = value.get("context_length").and_then(|c| c.as_i64());
        Self {
            id,
            modality,
            context_length,
        }
    }
}

/// Parse a `GET /models` body into a catalog. Returns `None` if `data` is not an array.
pub fn parse_catalog(body: &Value) -> Option<Vec<ModelDescriptor>> {
    let data = body.get("data")?.as_array()?;
    Some(data.iter().map(ModelDescriptor::from_value).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_openrouter_shape() {
        let body = json!({
            "data": [
                {
                    "id": "openai/gpt-4o-mini",
                    "name": "GPT-4o mini",
                    "architecture": { "modality": "text+image->text" },
                    "context_length": 128000
                },
                { "id": "broken/entry" }
            ]
        });
        let catalog = parse_catalog(&body).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].id, "openai/gpt-4o-mini");
        assert_eq!(catalog[0].modality.as_deref(), Some("text+image->text"));
        assert_eq!(catalog[0].context_length, Some(128000));
        assert_eq!(catalog[1].modality, None);
        assert_eq!(catalog[1].context_length, None);
    }

    #[test]
    fn float_or_string_context_length_is_absent() {
        let float = ModelDescriptor::from_value(&json!({"id": "a", "context_length": 4096.5}));
        let text = ModelDescriptor::from_value(&json!({"id": "a", "context_length": "4096"}));
        assert_eq!(float.context_length, None);
        assert_eq!(text.context_length, None);
    }

    #[test]
    fn missing_data_array_is_none() {
        assert!(parse_catalog(&json!({"models": []})).is_none());
        assert!(parse_catalog(&json!({"data": {}})).is_none());
    }
}
