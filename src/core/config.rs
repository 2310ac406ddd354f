//! Configuration from environment (and `.env` via dotenv in `main`).

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::core::models::DEFAULT_PREFERENCES;
use crate::core::paths;

pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MODEL_CACHE_SECS: u64 = 3600;

/// Which hosted LLM vendor handles completions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ProviderKind {
    #[default]
    #[value(name = "openrouter")]
    OpenRouter,
    Gemini,
}

impl ProviderKind {
    /// Environment variable holding this provider's secret.
    pub fn api_key_var(self) -> &'static str {
        match self {
            ProviderKind::OpenRouter => "OPENROUTER_API_KEY",
            ProviderKind::Gemini => "GOOGLE_API_KEY",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::OpenRouter => write!(f, "openrouter"),
            ProviderKind::Gemini => write!(f, "gemini"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openrouter" => Ok(ProviderKind::OpenRouter),
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OpenRouterSettings {
    pub api_key: String,
    pub base_url: String,
    /// Pinned model; bypasses catalog selection when set.
    pub model: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub provider: ProviderKind,
    pub openrouter: Option<OpenRouterSettings>,
    pub gemini: Option<GeminiSettings>,
    pub preferences: Vec<String>,
    pub model_cache_ttl: Duration,
    /// Where the selection cache file lives; `None` keeps it in memory for this run.
    pub cache_dir: Option<PathBuf>,
    pub timeout: Duration,
}

impl Config {
    /// Identifies what a cached selection was made for: the catalog endpoint and preferences.
    pub fn cache_scope(&self) -> String {
        let base_url = match self.provider {
            ProviderKind::OpenRouter => self.openrouter.as_ref().map(|s| s.base_url.as_str()),
            ProviderKind::Gemini => self.gemini.as_ref().map(|s| s.base_url.as_str()),
        };
        format!(
            "{} {} {}",
            self.provider,
            base_url.unwrap_or(""),
            self.preferences.join(",")
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not set")]
    MissingApiKey { var: &'static str },
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

/// Load configuration from the process environment.
/// `provider_override` (from `--provider`) wins over `ITINERARY_PROVIDER`.
pub fn load(provider_override: Option<ProviderKind>) -> Result<Config, ConfigError> {
    load_from(provider_override, |key| env::var(key).ok())
}

/// Load configuration through an arbitrary lookup. Empty values count as unset.
pub fn load_from<F>(provider_override: Option<ProviderKind>, lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    let provider = match provider_override {
        Some(p) => p,
        None => match get("ITINERARY_PROVIDER") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                var: "ITINERARY_PROVIDER",
                value: raw,
            })?,
            None => ProviderKind::default(),
        },
    };

    let openrouter = get("OPENROUTER_API_KEY").map(|api_key| OpenRouterSettings {
        api_key,
        base_url: get("OPENROUTER_BASE_URL")
            .unwrap_or_else(|| DEFAULT_OPENROUTER_BASE_URL.to_string()),
        model: get("OPENROUTER_MODEL"),
    });
    let gemini = get("GOOGLE_API_KEY").map(|api_key| GeminiSettings {
        api_key,
        base_url: get("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
        model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
    });

    let active_key_missing = match provider {
        ProviderKind::OpenRouter => openrouter.is_none(),
        ProviderKind::Gemini => gemini.is_none(),
    };
    if active_key_missing {
        return Err(ConfigError::MissingApiKey {
            var: provider.api_key_var(),
        });
    }

    let preferences = match get("ITINERARY_MODEL_PREFERENCES") {
        Some(list) => list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        None => DEFAULT_PREFERENCES.iter().map(|s| s.to_string()).collect(),
    };

    let model_cache_ttl = secs_var(
        "ITINERARY_MODEL_CACHE_SECS",
        get("ITINERARY_MODEL_CACHE_SECS"),
        DEFAULT_MODEL_CACHE_SECS,
    )?;
    let timeout = secs_var(
        "ITINERARY_TIMEOUT_SECS",
        get("ITINERARY_TIMEOUT_SECS"),
        DEFAULT_TIMEOUT_SECS,
    )?;
    let cache_dir = get("ITINERARY_CACHE_DIR")
        .map(PathBuf::from)
        .or_else(paths::cache_dir);

    Ok(Config {
        provider,
        openrouter,
        gemini,
        preferences,
        model_cache_ttl,
        cache_dir,
        timeout,
    })
}

fn secs_var(var: &'static str, raw: Option<String>, default: u64) -> Result<Duration, ConfigError> {
    let Some(raw) = raw else {
        return Ok(Duration::from_secs(default));
    };
    match raw.parse::<u64>() {
        Ok(n) if n > 0 => Ok(Duration::from_secs(n)),
        _ => Err(ConfigError::InvalidValue { var, value: raw }),
    }
}
