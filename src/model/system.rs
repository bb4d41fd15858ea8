//! System-wide metric samples.

/// CPU load at one instant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CpuSample {
    /// Aggregate usage, 0..=100.
    pub total_pct: f64,
    /// Per-core usage, 0..=100 each.
    pub per_core_pct: Vec<f64>,
    /// Current frequency in MHz.
    pub freq_current: Option<f64>,
    pub freq_min: Option<f64>,
    pub freq_max: Option<f64>,
    /// Package temperature in Celsius.
    pub temp_c: Option<f64>,
}

/// Memory and swap usage in bytes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySample {
    pub total: u64,
    pub available: u64,
    pub used: u64,
    pub free: u64,
    pub pct: f64,
    /// Page cache, when the platform reports it.
    pub cached: Option<u64>,
    /// Kernel buffers, when the platform reports it.
    pub buffers: Option<u64>,
    pub swap_total: u64,
    pub swap_used: u64,
    pub swap_free: u64,
    pub swap_pct: f64,
}

/// Volume type, used for coloring the disks table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DiskKind {
    #[default]
    Fixed,
    Removable,
    Network,
    Optical,
    RamDisk,
    Unknown,
}

impl DiskKind {
    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            DiskKind::Fixed => "Fixed",
            DiskKind::Removable => "Removable",
            DiskKind::Network => "Network",
            DiskKind::Optical => "CDROM",
            DiskKind::RamDisk => "RAM disk",
            DiskKind::Unknown => "Unknown",
        }
    }

    /// Classifies a volume from its filesystem type and removable flag.
    pub fn classify(fstype: &str, removable: bool) -> Self {
        let fstype = fstype.to_ascii_lowercase();
        match fstype.as_str() {
            "nfs" | "nfs4" | "cifs" | "smbfs" | "smb3" | "sshfs" | "fuse.sshfs" | "9p" => {
                DiskKind::Network
            }
            "iso9660" | "udf" => DiskKind::Optical,
            "tmpfs" | "ramfs" | "devtmpfs" => DiskKind::RamDisk,
            _ if removable => DiskKind::Removable,
            "" => DiskKind::Unknown,
            _ => DiskKind::Fixed,
        }
    }
}

/// One mounted volume.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiskSample {
    pub device: String,
    pub mountpoint: String,
    pub fstype: String,
    pub label: String,
    pub kind: DiskKind,
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub pct: f64,
    /// Cumulative I/O counters of the backing block device.
    pub read_bytes: Option<u64>,
    pub write_bytes: Option<u64>,
    pub read_count: Option<u64>,
    pub write_count: Option<u64>,
}

/// Cumulative network counters summed over all interfaces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetworkSample {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub packets_sent: u64,
    pub packets_recv: u64,
}

/// Host identity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SystemInfo {
    pub hostname: String,
    pub platform: String,
    pub platform_release: Option<String>,
    pub arch: String,
    /// Boot time, seconds since epoch.
    pub boot_time: u64,
}

impl SystemInfo {
    /// Seconds since boot relative to `now` (seconds since epoch).
    pub fn uptime_at(&self, now: u64) -> u64 {
        now.saturating_sub(self.boot_time)
    }
}

/// Battery charge state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BatterySample {
    pub pct: f64,
    pub plugged: bool,
    /// Estimated seconds until empty; `None` when charging or unknown.
    pub seconds_left: Option<u64>,
}
