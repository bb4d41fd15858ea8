//! Metrics provider adapter.
//!
//! Wraps the platform metric APIs behind [`MetricsSource`] and degrades
//! every failed query to a missing field.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                      Collector                       │
//! │        one Snapshot per tick, failures -> None       │
//! └──────────────────────────┬───────────────────────────┘
//!                            │
//!                   ┌────────▼────────┐
//!                   │  MetricsSource  │ (trait)
//!                   └────────┬────────┘
//!              ┌─────────────┴──────────────┐
//!       ┌──────▼───────┐             ┌──────▼──────┐
//!       │ SystemSource │             │ MockSource  │
//!       │  (sysinfo)   │             │  (Testing)  │
//!       └──────┬───────┘             └─────────────┘
//!              │ /proc/diskstats, /proc/meminfo,
//!              │ /sys/class/power_supply
//!       ┌──────▼──────┐
//!       │ FileSystem  │ (trait) -> RealFs | MockFs
//!       └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use sysview::collector::{Collector, MockSource};
//!
//! let mut collector = Collector::new(MockSource::typical());
//! let snapshot = collector.collect_snapshot();
//! assert!(snapshot.cpu.is_some());
//! ```

#[allow(clippy::module_inception)]
mod collector;
pub mod mock;
pub mod procfs;
mod sysinfo_source;
mod traits;

pub use collector::{Collector, CollectorTiming};
pub use mock::{MockFs, MockSource};
pub use sysinfo_source::SystemSource;
pub use traits::{CollectError, FileSystem, MetricsSource, RealFs};
