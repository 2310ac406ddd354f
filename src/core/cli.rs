//! CLI-only commands: config info, model catalog, duration presets.
//!
//! These run without organizing anything and produce plain text output.

use std::env;

use crate::core::config::{self, Config, ProviderKind};
use crate::core::duration::{DEFAULT_DURATION, PRESETS};
use crate::core::llm::OpenRouterProvider;
use crate::core::models::{self, ModelDescriptor};

/// Run the `config` command: active provider, endpoints, model source, and key status.
pub fn run_config(provider_override: Option<ProviderKind>) {
    let key_status = |var: &str| {
        if env::var(var).ok().filter(|v| !v.trim().is_empty()).is_some() {
            "set ✓"
        } else {
            "not set"
        }
    };

    println!("OpenRouter key:  {}", key_status("OPENROUTER_API_KEY"));
    println!("Google key:      {}", key_status("GOOGLE_API_KEY"));

    let config = match config::load(provider_override) {
        Ok(c) => c,
        Err(e) => {
            println!("Config:          {}", e);
            return;
        }
    };

    println!("Provider:        {}", config.provider);
    match config.provider {
        ProviderKind::OpenRouter => {
            if let Some(or) = &config.openrouter {
                println!("Endpoint:        {}", or.base_url);
                match &or.model {
                    Some(m) => println!("Model:           {} (from OPENROUTER_MODEL)", m),
                    None => println!("Model:           selected from catalog"),
                }
            }
            println!("Preferences:     {}", config.preferences.join(", "));
            match &config.cache_dir {
                Some(dir) => println!(
                    "Selection cache: {}s in {}",
                    config.model_cache_ttl.as_secs(),
                    dir.display()
                ),
                None => println!(
                    "Selection cache: {}s (in memory, no cache dir)",
                    config.model_cache_ttl.as_secs()
                ),
            }
        }
        ProviderKind::Gemini => {
            if let Some(g) = &config.gemini {
                println!("Endpoint:        {}", g.base_url);
                println!("Model:           {} (pinned)", g.model);
            }
        }
    }
    println!("Timeout:         {}s", config.timeout.as_secs());
}

/// Run the `durations` command: list preset trip durations.
pub fn run_durations() {
    for preset in PRESETS {
        if *preset == DEFAULT_DURATION {
            println!("{}  (default)", preset);
        } else {
            println!("{}", preset);
        }
    }
    println!("Any other label (e.g. '10N 11D', '5 days') is passed through as a custom duration.");
}

/// Format context length as human-readable (e.g. "128k", "1.0M").
fn format_context(n: Option<i64>) -> String {
    match n {
        None => "-".to_string(),
        Some(n) if n >= 1_000_000 => format!("{:.1}M", n as f64 / 1_000_000.0),
        Some(n) if n >= 1_000 => format!("{}k", n / 1_000),
        Some(n) => n.to_string(),
    }
}

/// Case-insensitive match on id or modality. An empty query matches everything.
fn filter_catalog<'a>(catalog: &'a [ModelDescriptor], query: &str) -> Vec<&'a ModelDescriptor> {
    let q = query.to_lowercase();
    catalog
        .iter()
        .filter(|m| {
            q.is_empty()
                || m.id.to_lowercase().contains(&q)
                || m
                    .modality
                    .as_deref()
                    .is_some_and(|s| s.to_lowercase().contains(&q))
        })
        .collect()
}

/// Run the `models` command: show the catalog, each entry's suitability, and the selection.
pub async fn run_models(config: &Config, query: Option<&str>, all: bool, json: bool) {
    let settings = match (config.provider, &config.openrouter, &config.gemini) {
        (ProviderKind::OpenRouter, Some(or), _) => or,
        (ProviderKind::Gemini, _, Some(g)) => {
            println!("gemini serves a single pinned model: {}", g.model);
            return;
        }
        (kind, _, _) => {
            eprintln!("Error: {} is not set", kind.api_key_var());
            std::process::exit(1);
        }
    };

    let provider = match OpenRouterProvider::new(settings, config.timeout) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let mut catalog = match provider.list_models().await {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    catalog.sort_by(|a, b| a.id.cmp(&b.id));

    let selected = models::select_model(&catalog, &config.preferences);
    let listed: Vec<_> = filter_catalog(&catalog, query.unwrap_or(""))
        .into_iter()
        .filter(|m| all || models::classify(m).is_ok())
        .collect();

    if json {
        match serde_json::to_string_pretty(&listed) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    if listed.is_empty() {
        println!("No models found.");
    } else {
        let id_w = listed.iter().map(|m| m.id.len()).max().unwrap_or(20).max(20);
        let mod_w = listed
            .iter()
            .map(|m| m.modality.as_deref().map_or(1, str::len))
            .max()
            .unwrap_or(10)
            .max(10);

        println!("  {:<id_w$}  {:<mod_w$}  {:>7}  Status", "ID", "Modality", "Context");
        println!("  {}  {}  -------  ------", "-".repeat(id_w), "-".repeat(mod_w));
        for m in &listed {
            let marker = if selected.as_deref() == Ok(m.id.as_str()) {
                "*"
            } else {
                " "
            };
            let status = match models::classify(m) {
                Ok(()) => "suitable".to_string(),
                Err(reason) => reason.to_string(),
            };
            println!(
                "{} {:<id_w$}  {:<mod_w$}  {:>7}  {}",
                marker,
                m.id,
                m.modality.as_deref().unwrap_or("-"),
                format_context(m.context_length),
                status
            );
        }
        println!("\n{} of {} model(s) listed", listed.len(), catalog.len());
    }

    if let Some(pinned) = &settings.model {
        println!("Pinned by OPENROUTER_MODEL: {}", pinned);
    }
    match selected {
        Ok(id) => println!("Selected: {}", id),
        Err(e) => println!("Selection: {}", e),
    }
}
