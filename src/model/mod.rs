//! Typed samples produced by the collector.
//!
//! Every field the platform may not report is an `Option`; `None` means
//! "unknown" and is rendered distinctly from a real zero.

mod process;
mod snapshot;
mod system;

pub use process::{ProcessSample, ProcessStatus};
pub use snapshot::Snapshot;
pub use system::{
    BatterySample, CpuSample, DiskKind, DiskSample, MemorySample, NetworkSample, SystemInfo,
};
