//! Scripted metric source.

use std::collections::VecDeque;

use crate::collector::traits::{CollectError, MetricsSource};
use crate::model::{
    BatterySample, CpuSample, DiskSample, MemorySample, NetworkSample, ProcessSample,
    ProcessStatus, SystemInfo,
};

/// Metric source that replays scripted samples.
///
/// Sequenced domains (network, processes, disks) pop one entry per call and
/// keep returning the last entry once the script runs out. A domain set to
/// `None` fails with [`CollectError::Unsupported`].
#[derive(Debug, Clone, Default)]
pub struct MockSource {
    pub cpu: Option<CpuSample>,
    pub memory: Option<MemorySample>,
    pub disks: Option<VecDeque<Vec<DiskSample>>>,
    pub network: Option<VecDeque<NetworkSample>>,
    pub processes: Option<VecDeque<Vec<ProcessSample>>>,
    pub system: Option<SystemInfo>,
    pub battery: Option<BatterySample>,
}

impl MockSource {
    /// A source where every domain fails.
    pub fn failing() -> Self {
        Self::default()
    }

    /// A four-core host with a handful of processes and steady counters.
    pub fn typical() -> Self {
        let processes = vec![
            process(1, "systemd", ProcessStatus::Sleeping, 0.0, 0.1),
            process(412, "sshd", ProcessStatus::Sleeping, 0.0, 0.2),
            process(1337, "postgres", ProcessStatus::Running, 35.0, 12.5),
            process(2001, "bash", ProcessStatus::Sleeping, 0.5, 0.1),
        ];
        Self {
            cpu: Some(CpuSample {
                total_pct: 25.0,
                per_core_pct: vec![10.0, 20.0, 30.0, 40.0],
                freq_current: Some(2400.0),
                freq_min: Some(800.0),
                freq_max: Some(3600.0),
                temp_c: Some(52.0),
            }),
            memory: Some(MemorySample {
                total: 16 * 1024 * 1024 * 1024,
                available: 12 * 1024 * 1024 * 1024,
                used: 4 * 1024 * 1024 * 1024,
                free: 8 * 1024 * 1024 * 1024,
                pct: 25.0,
                cached: Some(2 * 1024 * 1024 * 1024),
                buffers: Some(512 * 1024 * 1024),
                swap_total: 4 * 1024 * 1024 * 1024,
                swap_used: 0,
                swap_free: 4 * 1024 * 1024 * 1024,
                swap_pct: 0.0,
            }),
            disks: Some(VecDeque::from(vec![vec![DiskSample {
                device: "/dev/sda1".to_string(),
                mountpoint: "/".to_string(),
                fstype: "ext4".to_string(),
                label: "sda1".to_string(),
                total: 500_000_000_000,
                used: 200_000_000_000,
                free: 300_000_000_000,
                pct: 40.0,
                read_bytes: Some(0),
                write_bytes: Some(0),
                read_count: Some(0),
                write_count: Some(0),
                ..DiskSample::default()
            }]])),
            network: Some(VecDeque::from(vec![NetworkSample::default()])),
            processes: Some(VecDeque::from(vec![processes])),
            system: Some(SystemInfo {
                hostname: "testhost".to_string(),
                platform: "Linux".to_string(),
                platform_release: Some("6.1.0".to_string()),
                arch: "x86_64".to_string(),
                boot_time: 1_700_000_000,
            }),
            battery: None,
        }
    }

    /// Replaces the network script with cumulative `(sent, recv)` byte pairs.
    pub fn with_network_script(mut self, counters: &[(u64, u64)]) -> Self {
        self.network = Some(
            counters
                .iter()
                .map(|&(sent, recv)| NetworkSample {
                    bytes_sent: sent,
                    bytes_recv: recv,
                    ..NetworkSample::default()
                })
                .collect(),
        );
        self
    }

    /// Replaces the process script with successive enumerations.
    pub fn with_process_script(mut self, script: Vec<Vec<ProcessSample>>) -> Self {
        self.processes = Some(script.into());
        self
    }
}

/// Builds a process sample with the fields the views care about.
pub fn process(pid: u32, name: &str, status: ProcessStatus, cpu: f64, mem: f64) -> ProcessSample {
    ProcessSample {
        pid,
        name: name.to_string(),
        status,
        cpu_pct: cpu,
        mem_pct: mem,
        mem_bytes: Some((mem * 1_000_000.0) as u64),
        thread_count: Some(1),
        cmdline: Some(format!("/usr/bin/{}", name)),
    }
}

fn next_in<T: Clone>(script: &mut Option<VecDeque<T>>, what: &'static str) -> Result<T, CollectError> {
    let queue = script.as_mut().ok_or(CollectError::Unsupported(what))?;
    let item = if queue.len() > 1 {
        queue.pop_front()
    } else {
        queue.front().cloned()
    };
    item.ok_or(CollectError::Unsupported(what))
}

impl MetricsSource for MockSource {
    fn cpu_snapshot(&mut self) -> Result<CpuSample, CollectError> {
        self.cpu.clone().ok_or(CollectError::Unsupported("cpu"))
    }

    fn memory_snapshot(&mut self) -> Result<MemorySample, CollectError> {
        self.memory.clone().ok_or(CollectError::Unsupported("memory"))
    }

    fn disk_snapshot(&mut self) -> Result<Vec<DiskSample>, CollectError> {
        next_in(&mut self.disks, "disks")
    }

    fn network_snapshot(&mut self) -> Result<NetworkSample, CollectError> {
        next_in(&mut self.network, "network")
    }

    fn process_snapshot(&mut self) -> Result<Vec<ProcessSample>, CollectError> {
        next_in(&mut self.processes, "processes")
    }

    fn system_info(&mut self) -> Result<SystemInfo, CollectError> {
        self.system.clone().ok_or(CollectError::Unsupported("system info"))
    }

    fn battery_snapshot(&mut self) -> Result<Option<BatterySample>, CollectError> {
        Ok(self.battery)
    }
}
