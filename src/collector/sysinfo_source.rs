//! Live metric source backed by `sysinfo` with Linux `/proc` and `/sys`
//! supplements.

use std::path::{Path, PathBuf};

use sysinfo::{Components, Disks, Networks, ProcessesToUpdate, System};
use tracing::debug;

use super::procfs::{read_battery, read_diskstats, read_mem_extras};
use super::traits::{CollectError, FileSystem, MetricsSource, RealFs};
use crate::model::{
    BatterySample, CpuSample, DiskKind, DiskSample, MemorySample, NetworkSample, ProcessSample,
    ProcessStatus, SystemInfo,
};

/// Sensor labels that identify the CPU package, checked in order.
const CPU_SENSOR_HINTS: &[&str] = &["package", "tctl", "tdie", "coretemp", "k10temp", "cpu"];

/// Samples the local host.
///
/// Holds the `sysinfo` handles across ticks so CPU and network deltas are
/// computed against the previous refresh.
pub struct SystemSource<F: FileSystem = RealFs> {
    fs: F,
    proc_path: PathBuf,
    sys_path: PathBuf,
    system: System,
    disks: Disks,
    networks: Networks,
    components: Components,
}

impl SystemSource<RealFs> {
    /// Creates a source over the real filesystem.
    pub fn new() -> Result<Self, CollectError> {
        Self::with_fs(RealFs::new(), "/proc", "/sys")
    }
}

impl<F: FileSystem> SystemSource<F> {
    /// Creates a source with custom kernel interface roots.
    ///
    /// Fails when no CPU is visible, since every panel depends on it.
    pub fn with_fs(
        fs: F,
        proc_path: impl AsRef<Path>,
        sys_path: impl AsRef<Path>,
    ) -> Result<Self, CollectError> {
        let mut system = System::new_all();
        system.refresh_cpu_usage();
        if system.cpus().is_empty() {
            return Err(CollectError::Unsupported("cpu enumeration"));
        }
        Ok(Self {
            fs,
            proc_path: proc_path.as_ref().to_path_buf(),
            sys_path: sys_path.as_ref().to_path_buf(),
            system,
            disks: Disks::new_with_refreshed_list(),
            networks: Networks::new_with_refreshed_list(),
            components: Components::new_with_refreshed_list(),
        })
    }

    fn cpu_temperature(&mut self) -> Option<f64> {
        for component in self.components.list_mut() {
            component.refresh();
        }
        let components = self.components.list();
        CPU_SENSOR_HINTS.iter().find_map(|hint| {
            components
                .iter()
                .filter(|c| c.label().to_ascii_lowercase().contains(hint))
                .find_map(|c| c.temperature())
                .map(f64::from)
        })
    }

    /// Reads `cpuinfo_{min,max}_freq` of cpu0, converted from kHz to MHz.
    fn cpu_freq_bounds(&self) -> (Option<f64>, Option<f64>) {
        let base = self.sys_path.join("devices/system/cpu/cpu0/cpufreq");
        let read = |name: &str| -> Option<f64> {
            self.fs
                .read_to_string(&base.join(name))
                .ok()
                .and_then(|s| s.trim().parse::<f64>().ok())
                .map(|khz| khz / 1000.0)
        };
        (read("cpuinfo_min_freq"), read("cpuinfo_max_freq"))
    }
}

fn map_status(status: sysinfo::ProcessStatus) -> ProcessStatus {
    use sysinfo::ProcessStatus as S;
    match status {
        S::Run => ProcessStatus::Running,
        S::Sleep | S::Idle | S::Wakekill | S::Waking | S::Parked => ProcessStatus::Sleeping,
        S::Stop => ProcessStatus::Stopped,
        S::Zombie | S::Dead => ProcessStatus::Zombie,
        S::UninterruptibleDiskSleep | S::LockBlocked => ProcessStatus::DiskSleep,
        S::Tracing => ProcessStatus::TracingStop,
        _ => ProcessStatus::Unknown,
    }
}

fn percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

impl<F: FileSystem> MetricsSource for SystemSource<F> {
    fn cpu_snapshot(&mut self) -> Result<CpuSample, CollectError> {
        self.system.refresh_cpu_all();
        let cpus = self.system.cpus();
        if cpus.is_empty() {
            return Err(CollectError::Unsupported("cpu enumeration"));
        }
        let per_core_pct: Vec<f64> = cpus.iter().map(|c| f64::from(c.cpu_usage())).collect();
        let freq_current = cpus
            .iter()
            .map(|c| c.frequency())
            .max()
            .filter(|&mhz| mhz > 0)
            .map(|mhz| mhz as f64);
        let total_pct = f64::from(self.system.global_cpu_usage());
        let (freq_min, freq_max) = self.cpu_freq_bounds();
        let temp_c = self.cpu_temperature();

        Ok(CpuSample {
            total_pct,
            per_core_pct,
            freq_current,
            freq_min,
            freq_max,
            temp_c,
        })
    }

    fn memory_snapshot(&mut self) -> Result<MemorySample, CollectError> {
        self.system.refresh_memory();
        let total = self.system.total_memory();
        if total == 0 {
            return Err(CollectError::Unsupported("memory"));
        }
        let available = self.system.available_memory();
        let used = self.system.used_memory();
        let swap_total = self.system.total_swap();
        let swap_used = self.system.used_swap();

        let extras = match read_mem_extras(&self.fs, &self.proc_path) {
            Ok(extras) => extras,
            Err(e) => {
                debug!(error = %e, "meminfo extras unavailable");
                Default::default()
            }
        };

        Ok(MemorySample {
            total,
            available,
            used,
            free: self.system.free_memory(),
            pct: percent(total.saturating_sub(available), total),
            cached: extras.cached,
            buffers: extras.buffers,
            swap_total,
            swap_used,
            swap_free: self.system.free_swap(),
            swap_pct: percent(swap_used, swap_total),
        })
    }

    fn disk_snapshot(&mut self) -> Result<Vec<DiskSample>, CollectError> {
        self.disks.refresh(true);
        let io = match read_diskstats(&self.fs, &self.proc_path) {
            Ok(io) => io,
            Err(e) => {
                debug!(error = %e, "diskstats unavailable");
                Default::default()
            }
        };

        let samples = self
            .disks
            .list()
            .iter()
            .map(|disk| {
                let device = disk.name().to_string_lossy().to_string();
                let fstype = disk.file_system().to_string_lossy().to_string();
                let label = device.trim_start_matches("/dev/").to_string();
                let total = disk.total_space();
                let free = disk.available_space();
                let used = total.saturating_sub(free);
                let counters = io.get(&label);
                DiskSample {
                    kind: DiskKind::classify(&fstype, disk.is_removable()),
                    mountpoint: disk.mount_point().to_string_lossy().to_string(),
                    total,
                    used,
                    free,
                    pct: percent(used, total),
                    read_bytes: counters.map(|c| c.read_bytes),
                    write_bytes: counters.map(|c| c.write_bytes),
                    read_count: counters.map(|c| c.read_count),
                    write_count: counters.map(|c| c.write_count),
                    device,
                    fstype,
                    label,
                }
            })
            .collect();
        Ok(samples)
    }

    fn network_snapshot(&mut self) -> Result<NetworkSample, CollectError> {
        self.networks.refresh(true);
        let mut sample = NetworkSample::default();
        for (_, data) in self.networks.list() {
            sample.bytes_sent += data.total_transmitted();
            sample.bytes_recv += data.total_received();
            sample.packets_sent += data.total_packets_transmitted();
            sample.packets_recv += data.total_packets_received();
        }
        Ok(sample)
    }

    fn process_snapshot(&mut self) -> Result<Vec<ProcessSample>, CollectError> {
        self.system.refresh_processes(ProcessesToUpdate::All, true);
        let total_memory = self.system.total_memory();
        let samples = self
            .system
            .processes()
            .values()
            .filter(|p| p.thread_kind().is_none())
            .map(|p| {
                let cmd: Vec<String> = p
                    .cmd()
                    .iter()
                    .map(|arg| arg.to_string_lossy().to_string())
                    .collect();
                ProcessSample {
                    pid: p.pid().as_u32(),
                    name: p.name().to_string_lossy().to_string(),
                    status: map_status(p.status()),
                    cpu_pct: f64::from(p.cpu_usage()),
                    mem_pct: percent(p.memory(), total_memory),
                    mem_bytes: Some(p.memory()),
                    thread_count: p.tasks().map(|t| t.len().max(1) as u32),
                    cmdline: (!cmd.is_empty()).then(|| cmd.join(" ")),
                }
            })
            .collect();
        Ok(samples)
    }

    fn system_info(&mut self) -> Result<SystemInfo, CollectError> {
        Ok(SystemInfo {
            hostname: System::host_name().unwrap_or_else(|| "unknown".to_string()),
            platform: System::name().unwrap_or_else(|| std::env::consts::OS.to_string()),
            platform_release: System::kernel_version(),
            arch: std::env::consts::ARCH.to_string(),
            boot_time: System::boot_time(),
        })
    }

    fn battery_snapshot(&mut self) -> Result<Option<BatterySample>, CollectError> {
        read_battery(&self.fs, &self.sys_path)
    }
}
