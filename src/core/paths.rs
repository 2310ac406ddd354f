//! Platform directory helpers.

use std::path::PathBuf;

use crate::core::app;

/// Cache directory (~/.cache/itinerary-organizer/ on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", app::NAME).map(|d| d.cache_dir().to_path_buf())
}
