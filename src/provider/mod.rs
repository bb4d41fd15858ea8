//! Provider abstraction for snapshot data sources.
//!
//! The render loop only talks to a [`SnapshotProvider`]: it asks for the
//! next enriched snapshot when it is time to sample, and redraws the
//! cached one otherwise (for example while paused).

mod live;

pub use live::LiveProvider;

use crate::collector::CollectorTiming;
use crate::history::EnrichedSnapshot;

/// Error types that can occur during snapshot operations.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// No metric domain could be read in the last cycle.
    Collection(String),
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderError::Collection(msg) => write!(f, "Collection error: {}", msg),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Source of enriched snapshots for the dashboard.
pub trait SnapshotProvider {
    /// Returns the current snapshot, if one has been taken yet.
    fn current(&self) -> Option<&EnrichedSnapshot>;

    /// Samples once, folds the result into the history and returns it.
    fn advance(&mut self) -> Option<&EnrichedSnapshot>;

    /// Returns the last error that occurred, if any.
    fn last_error(&self) -> Option<&ProviderError>;

    /// Returns timing information from the last snapshot collection.
    fn collector_timing(&self) -> Option<&CollectorTiming> {
        None
    }
}
