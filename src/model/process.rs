//! Per-process samples.

/// Scheduler state of a process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ProcessStatus {
    Running,
    Sleeping,
    Stopped,
    Zombie,
    DiskSleep,
    TracingStop,
    #[default]
    Unknown,
}

impl ProcessStatus {
    /// Lowercase display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessStatus::Running => "running",
            ProcessStatus::Sleeping => "sleeping",
            ProcessStatus::Stopped => "stopped",
            ProcessStatus::Zombie => "zombie",
            ProcessStatus::DiskSleep => "disk-sleep",
            ProcessStatus::TracingStop => "tracing-stop",
            ProcessStatus::Unknown => "unknown",
        }
    }
}

/// One process as seen by a single enumeration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessSample {
    pub pid: u32,
    pub name: String,
    pub status: ProcessStatus,
    pub cpu_pct: f64,
    pub mem_pct: f64,
    /// Resident memory in bytes.
    pub mem_bytes: Option<u64>,
    pub thread_count: Option<u32>,
    pub cmdline: Option<String>,
}
