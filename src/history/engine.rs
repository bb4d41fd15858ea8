use std::collections::{HashMap, HashSet};
use std::time::Instant;

use tracing::debug;

use super::buffer::{HISTORY_CAPACITY, HistoryBuffer, PROCESS_HISTORY_CAPACITY};
use crate::model::{NetworkSample, Snapshot};
use crate::rates::{PeakTracker, RateState};

/// Network counters with derived rates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NetworkRates {
    pub counters: NetworkSample,
    /// Bytes per second; `None` on the first observation.
    pub send_rate: Option<f64>,
    pub recv_rate: Option<f64>,
    pub peak_send: f64,
    pub peak_recv: f64,
}

/// Per-device disk throughput in bytes per second.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DiskRates {
    pub read: Option<f64>,
    pub write: Option<f64>,
}

/// A raw snapshot plus everything derived from previous samples.
#[derive(Debug, Clone, Default)]
pub struct EnrichedSnapshot {
    pub snapshot: Snapshot,
    /// Oldest-first aggregate CPU percentages.
    pub cpu_history: Vec<f64>,
    /// Oldest-first memory percentages.
    pub memory_history: Vec<f64>,
    pub network: Option<NetworkRates>,
    /// Oldest-first `(send, recv)` rates.
    pub network_history: Vec<(f64, f64)>,
    /// Keyed by device label.
    pub disk_rates: HashMap<String, DiskRates>,
    /// Oldest-first CPU percentages keyed by pid.
    pub process_history: HashMap<u32, Vec<f64>>,
}

#[derive(Debug, Default)]
struct DiskRateState {
    read: RateState,
    write: RateState,
}

/// Single owner of all cross-sample state.
#[derive(Debug)]
pub struct HistoryEngine {
    cpu: HistoryBuffer<f64>,
    memory: HistoryBuffer<f64>,
    network: HistoryBuffer<(f64, f64)>,
    send: RateState,
    recv: RateState,
    peak_send: PeakTracker,
    peak_recv: PeakTracker,
    disks: HashMap<String, DiskRateState>,
    processes: HashMap<u32, HistoryBuffer<f64>>,
}

impl Default for HistoryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryEngine {
    pub fn new() -> Self {
        Self {
            cpu: HistoryBuffer::new(HISTORY_CAPACITY),
            memory: HistoryBuffer::new(HISTORY_CAPACITY),
            network: HistoryBuffer::new(HISTORY_CAPACITY),
            send: RateState::new(),
            recv: RateState::new(),
            peak_send: PeakTracker::new(),
            peak_recv: PeakTracker::new(),
            disks: HashMap::new(),
            processes: HashMap::new(),
        }
    }

    /// Folds one snapshot into the history and returns the enriched view.
    ///
    /// `now` is the monotonic instant the snapshot was collected at.
    pub fn ingest(&mut self, snapshot: Snapshot, now: Instant) -> EnrichedSnapshot {
        if let Some(cpu) = &snapshot.cpu {
            self.cpu.push(cpu.total_pct);
        }
        if let Some(memory) = &snapshot.memory {
            self.memory.push(memory.pct);
        }

        let network = snapshot.network.map(|counters| self.ingest_network(counters, now));
        let disk_rates = self.ingest_disks(&snapshot, now);

        match &snapshot.processes {
            Some(processes) => {
                let live: HashSet<u32> = processes.iter().map(|p| p.pid).collect();
                let before = self.processes.len();
                self.processes.retain(|pid, _| live.contains(pid));
                let removed = before - self.processes.len();
                if removed > 0 {
                    debug!(removed, "dropped histories of exited processes");
                }
                for process in processes {
                    self.processes
                        .entry(process.pid)
                        .or_insert_with(|| HistoryBuffer::new(PROCESS_HISTORY_CAPACITY))
                        .push(process.cpu_pct);
                }
            }
            None => debug!("process enumeration unavailable, histories kept"),
        }

        EnrichedSnapshot {
            cpu_history: self.cpu.to_vec(),
            memory_history: self.memory.to_vec(),
            network,
            network_history: self.network.to_vec(),
            disk_rates,
            process_history: self
                .processes
                .iter()
                .map(|(&pid, buf)| (pid, buf.to_vec()))
                .collect(),
            snapshot,
        }
    }

    fn ingest_network(&mut self, counters: NetworkSample, now: Instant) -> NetworkRates {
        let send_rate = self.send.update(counters.bytes_sent, now);
        let recv_rate = self.recv.update(counters.bytes_recv, now);
        if let (Some(send), Some(recv)) = (send_rate, recv_rate) {
            self.peak_send.observe(send);
            self.peak_recv.observe(recv);
            self.network.push((send, recv));
        }
        NetworkRates {
            counters,
            send_rate,
            recv_rate,
            peak_send: self.peak_send.peak(),
            peak_recv: self.peak_recv.peak(),
        }
    }

    fn ingest_disks(&mut self, snapshot: &Snapshot, now: Instant) -> HashMap<String, DiskRates> {
        let Some(disks) = &snapshot.disks else {
            return HashMap::new();
        };
        self.disks
            .retain(|label, _| disks.iter().any(|d| &d.label == label));

        let mut rates = HashMap::new();
        for disk in disks {
            // Mounts sharing a device report the same counters once.
            if rates.contains_key(&disk.label) {
                continue;
            }
            let (Some(read_bytes), Some(write_bytes)) = (disk.read_bytes, disk.write_bytes) else {
                rates.insert(disk.label.clone(), DiskRates::default());
                continue;
            };
            let state = self.disks.entry(disk.label.clone()).or_default();
            rates.insert(
                disk.label.clone(),
                DiskRates {
                    read: state.read.update(read_bytes, now),
                    write: state.write.update(write_bytes, now),
                },
            );
        }
        rates
    }

    /// Number of per-process histories currently tracked.
    pub fn tracked_processes(&self) -> usize {
        self.processes.len()
    }
}
