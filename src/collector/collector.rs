//! Combines the per-domain queries of a [`MetricsSource`] into one snapshot.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use tracing::debug;

use super::traits::{CollectError, MetricsSource};
use crate::model::Snapshot;

/// Time spent on each domain during the last collection.
#[derive(Debug, Clone, Default)]
pub struct CollectorTiming {
    pub total: Duration,
    pub cpu: Duration,
    pub memory: Duration,
    pub disks: Duration,
    pub network: Duration,
    pub processes: Duration,
    pub system: Duration,
    pub battery: Duration,
}

/// Samples every domain of a metrics source once per call.
///
/// A failed query never fails the snapshot; the domain is left `None`.
pub struct Collector<S: MetricsSource> {
    source: S,
    last_timing: Option<CollectorTiming>,
}

/// Runs one query, records its duration and degrades failure to `None`.
fn timed<T>(
    domain: &'static str,
    slot: &mut Duration,
    query: impl FnOnce() -> Result<T, CollectError>,
) -> Option<T> {
    let start = Instant::now();
    let result = query();
    *slot = start.elapsed();
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(domain, error = %e, "metric unavailable");
            None
        }
    }
}

impl<S: MetricsSource> Collector<S> {
    /// Creates a collector over the given source.
    pub fn new(source: S) -> Self {
        Self {
            source,
            last_timing: None,
        }
    }

    /// Timing information from the last `collect_snapshot` call.
    pub fn last_timing(&self) -> Option<&CollectorTiming> {
        self.last_timing.as_ref()
    }

    /// Queries every domain once.
    pub fn collect_snapshot(&mut self) -> Snapshot {
        let total_start = Instant::now();
        let mut timing = CollectorTiming::default();
        let source = &mut self.source;

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);

        let cpu = timed("cpu", &mut timing.cpu, || source.cpu_snapshot());
        let memory = timed("memory", &mut timing.memory, || source.memory_snapshot());
        let disks = timed("disks", &mut timing.disks, || source.disk_snapshot());
        let network = timed("network", &mut timing.network, || source.network_snapshot());
        let processes = timed("processes", &mut timing.processes, || {
            source.process_snapshot()
        });
        let system = timed("system", &mut timing.system, || source.system_info());
        let battery = timed("battery", &mut timing.battery, || source.battery_snapshot()).flatten();

        timing.total = total_start.elapsed();
        self.last_timing = Some(timing);

        Snapshot {
            timestamp,
            cpu,
            memory,
            disks,
            network,
            processes,
            system,
            battery,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockSource;

    #[test]
    fn test_collect_typical() {
        let mut collector = Collector::new(MockSource::typical());
        let snapshot = collector.collect_snapshot();
        assert!(snapshot.timestamp > 0);
        assert_eq!(snapshot.cpu.unwrap().per_core_pct.len(), 4);
        assert_eq!(snapshot.processes.unwrap().len(), 4);
        assert_eq!(snapshot.system.unwrap().hostname, "testhost");
        assert!(snapshot.battery.is_none());
        assert!(collector.last_timing().is_some());
    }

    #[test]
    fn test_failures_degrade_to_none() {
        let mut source = MockSource::typical();
        source.memory = None;
        source.processes = None;
        let mut collector = Collector::new(source);
        let snapshot = collector.collect_snapshot();
        assert!(snapshot.cpu.is_some());
        assert!(snapshot.memory.is_none());
        assert!(snapshot.processes.is_none());
        assert!(snapshot.network.is_some());
    }

    #[test]
    fn test_all_failing() {
        let mut collector = Collector::new(MockSource::failing());
        let snapshot = collector.collect_snapshot();
        assert!(snapshot.cpu.is_none());
        assert!(snapshot.disks.is_none());
        assert!(snapshot.system.is_none());
    }
}
