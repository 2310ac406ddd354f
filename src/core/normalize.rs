//! Trim a completion down to the itinerary itself.

use std::sync::OnceLock;

use regex::Regex;

static DAY_ONE: OnceLock<Regex> = OnceLock::new();

fn day_one() -> &'static Regex {
    DAY_ONE.get_or_init(|| Regex::new(r"(?s)🗓️Day 1 :.*").expect("day-one pattern is valid"))
}

/// Return the text from the first `🗓️Day 1 :` header onwards, dropping any preamble.
/// Text without the header is returned unchanged.
pub fn normalize(raw: &str) -> String {
    match day_one().find(raw) {
        Some(m) => m.as_str().to_string(),
        None => {
            log::debug!("No day-one header in completion; passing it through unchanged");
            raw.to_string()
        }
    }
}
