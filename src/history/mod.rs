//! History & delta engine.
//!
//! Owns all "previous sample" state: bounded time series per stream,
//! counter rates, running peaks and per-process CPU histories.

mod buffer;
mod engine;

pub use buffer::{HISTORY_CAPACITY, HistoryBuffer, PROCESS_HISTORY_CAPACITY};
pub use engine::{DiskRates, EnrichedSnapshot, HistoryEngine, NetworkRates};
