//! One sampling cycle across every metric domain.

use super::{
    BatterySample, CpuSample, DiskSample, MemorySample, NetworkSample, ProcessSample, SystemInfo,
};

/// Raw samples of one cycle. A domain that could not be read is `None`.
///
/// `battery` is `None` both when the read failed and when the host has
/// no battery; the two render identically.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Seconds since epoch at collection time.
    pub timestamp: i64,
    pub cpu: Option<CpuSample>,
    pub memory: Option<MemorySample>,
    pub disks: Option<Vec<DiskSample>>,
    pub network: Option<NetworkSample>,
    pub processes: Option<Vec<ProcessSample>>,
    pub system: Option<SystemInfo>,
    pub battery: Option<BatterySample>,
}
