//! Application run modes: logger init and the organize action.

use std::io::Read;

use crate::cli::Args;
use crate::core::app::FALLBACK_MESSAGE;
use crate::core::config;
use crate::core::duration::TripDuration;
use crate::core::llm::{AnyProvider, LlmProvider, ProviderError};
use crate::core::models::{FileSlot, SelectionCache};
use crate::core::pipeline::{Itinerary, Organizer, PipelineError};
use crate::core::prompt::{PromptRequest, SAMPLE_COMPONENTS};

/// Initialize env_logger on stderr so stdout only carries the itinerary.
pub fn init_logger(args: &Args) {
    let log_level = args.log_level();
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .target(env_logger::Target::Stderr)
        .try_init();
}

/// Read raw components from `--sample`, a file, or stdin (`-`).
fn read_components(args: &Args) -> Result<String, Box<dyn std::error::Error>> {
    if args.sample {
        return Ok(SAMPLE_COMPONENTS.to_string());
    }
    match args.input.as_deref() {
        Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("could not read {}: {}", path, e).into()),
        None => Err("no itinerary input: pass --input <FILE>, --input - or --sample".into()),
    }
}

/// Run the organize action: build the prompt, call the pipeline, print the itinerary.
pub async fn run_organize(args: &Args) {
    let raw = read_components(args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(2);
    });
    if raw.trim().is_empty() {
        eprintln!("Please enter some raw itinerary details to get started!");
        std::process::exit(1);
    }

    let duration = TripDuration::parse(&args.duration).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    let request = PromptRequest::new(raw, duration.label());

    if args.show_prompt {
        println!("{}", request.build());
        return;
    }

    // Missing secrets are fatal; print Display rather than Debug.
    let config = config::load(args.provider).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let result = match AnyProvider::from_config(&config) {
        Ok(provider) => {
            eprintln!("Crafting your {} itinerary...", duration);
            let preferences = config.preferences.clone();
            let ttl = config.model_cache_ttl;
            let model = args.model.as_deref();
            match &config.cache_dir {
                Some(dir) => {
                    let cache = FileSlot::new(dir, config.cache_scope());
                    log::debug!("Model selection cache at {}", cache.path().display());
                    let organizer = Organizer::with_cache(provider, cache, preferences, ttl);
                    organize(&organizer, &request, model).await
                }
                None => {
                    log::debug!("No cache directory; model selection is cached for this run only");
                    organize(&Organizer::new(provider, preferences, ttl), &request, model).await
                }
            }
        }
        Err(e) => Err(PipelineError::Completion(e.into())),
    };

    if !render(result) {
        std::process::exit(1);
    }
}

async fn organize<P: LlmProvider, C: SelectionCache>(
    organizer: &Organizer<P, C>,
    request: &PromptRequest,
    model: Option<&str>,
) -> Result<Itinerary, PipelineError> {
    match model {
        Some(model) => organizer.organize_with_model(request, model).await,
        None => organizer.organize(request).await,
    }
}

/// Print an itinerary or the failure message. Returns false on failure.
fn render(result: Result<Itinerary, PipelineError>) -> bool {
    match result {
        Ok(itinerary) => {
            log::info!("Itinerary generated by {}", itinerary.model);
            if itinerary.empty_output {
                eprintln!(
                    "Warning: {} returned an empty itinerary.",
                    itinerary.model
                );
            }
            println!("{}", itinerary.text);
            true
        }
        Err(e) => {
            log::debug!("Organize failed: {:?}", e);
            if let Some(body) = e.provider_error().and_then(ProviderError::body) {
                log::info!("Upstream response body: {}", body);
            }
            eprintln!("Error: {}", e);
            println!("{}", FALLBACK_MESSAGE);
            false
        }
    }
}
