//! Abstractions over the metric sources.
//!
//! `MetricsSource` is the one-shot query interface the collector samples
//! every tick. `FileSystem` lets the Linux `/proc` and `/sys` readers work
//! against the real filesystem or an in-memory mock.

use std::io;
use std::path::{Path, PathBuf};

use crate::model::{
    BatterySample, CpuSample, DiskSample, MemorySample, NetworkSample, ProcessSample, SystemInfo,
};

/// Error returned by a single metric query.
#[derive(Debug)]
pub enum CollectError {
    /// The platform does not expose this metric.
    Unsupported(&'static str),
    /// I/O error reading a kernel interface.
    Io(io::Error),
    /// Malformed data from a kernel interface.
    Parse(String),
}

impl std::fmt::Display for CollectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectError::Unsupported(what) => write!(f, "{} not supported on this platform", what),
            CollectError::Io(e) => write!(f, "I/O error: {}", e),
            CollectError::Parse(msg) => write!(f, "parse error: {}", msg),
        }
    }
}

impl std::error::Error for CollectError {}

impl From<io::Error> for CollectError {
    fn from(e: io::Error) -> Self {
        CollectError::Io(e)
    }
}

/// One-shot metric queries.
///
/// Every call is synchronous and may fail independently; the collector
/// degrades a failed call to "unknown" instead of failing the sample.
pub trait MetricsSource {
    /// Aggregate and per-core CPU load.
    fn cpu_snapshot(&mut self) -> Result<CpuSample, CollectError>;

    /// RAM and swap usage.
    fn memory_snapshot(&mut self) -> Result<MemorySample, CollectError>;

    /// Mounted volumes with usage and I/O counters.
    fn disk_snapshot(&mut self) -> Result<Vec<DiskSample>, CollectError>;

    /// Cumulative network counters. Rates are derived by the history engine.
    fn network_snapshot(&mut self) -> Result<NetworkSample, CollectError>;

    /// Process enumeration. Processes that vanish mid-enumeration are skipped.
    fn process_snapshot(&mut self) -> Result<Vec<ProcessSample>, CollectError>;

    /// Host identity and boot time.
    fn system_info(&mut self) -> Result<SystemInfo, CollectError>;

    /// Battery state, `Ok(None)` on hosts without a battery.
    fn battery_snapshot(&mut self) -> Result<Option<BatterySample>, CollectError>;
}

/// Abstraction for filesystem operations.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Checks if a path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Lists entries in a directory.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;
}

/// Real filesystem implementation that delegates to `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl RealFs {
    /// Creates a new `RealFs` instance.
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let entries = std::fs::read_dir(path)?;
        let mut paths = Vec::new();
        for entry in entries {
            paths.push(entry?.path());
        }
        Ok(paths)
    }
}
