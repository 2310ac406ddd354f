//! Application identity from Cargo.toml.
//!
//! Single source of truth for the app name and version used in logs, request headers and help text.

/// Application name (from Cargo.toml `package.name`).
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Application version (from Cargo.toml `package.version`).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shown in place of an itinerary whenever the pipeline fails.
pub const FALLBACK_MESSAGE: &str = "Could not generate itinerary. Please try again.";
