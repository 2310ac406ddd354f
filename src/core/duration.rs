//! Trip duration labels: a fixed preset list plus free-text custom values.

use std::fmt;

/// Preset durations, shortest first.
pub const PRESETS: &[&str] = &["2N 3D", "3N 4D", "4N 5D", "5N 6D", "6N 7D", "7N 8D"];

pub const DEFAULT_DURATION: &str = "3N 4D";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TripDuration {
    Preset(&'static str),
    Custom(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DurationError {
    #[error("duration must not be empty (e.g. '3N 4D', '10N 11D', '5 days')")]
    Empty,
}

impl TripDuration {
    /// Match a preset case-insensitively (ignoring spacing, so `3n4d` is `3N 4D`);
    /// anything else non-blank is a custom label kept verbatim (trimmed).
    pub fn parse(input: &str) -> Result<Self, DurationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DurationError::Empty);
        }
        let key = compact(trimmed);
        if let Some(preset) = PRESETS.iter().find(|p| compact(p) == key) {
            return Ok(TripDuration::Preset(*preset));
        }
        Ok(TripDuration::Custom(trimmed.to_string()))
    }

    pub fn label(&self) -> &str {
        match self {
            TripDuration::Preset(p) => p,
            TripDuration::Custom(s) => s,
        }
    }
}

impl Default for TripDuration {
    fn default() -> Self {
        TripDuration::Preset(DEFAULT_DURATION)
    }
}

impl fmt::Display for TripDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn compact(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}
