//! Model catalog parsing, selection, and selection caching.

mod cache;
mod info;
mod select;

pub use cache::{FileSlot, SelectionCache, TimedSlot};
pub use info::{ModelDescriptor, parse_catalog};
pub use select::{DEFAULT_PREFERENCES, SelectionError, classify, select_model};

/// Where a provider's model comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    /// The provider serves exactly this model; no selection needed.
    Pinned(String),
    /// A live catalog to select from.
    Catalog(Vec<ModelDescriptor>),
}
