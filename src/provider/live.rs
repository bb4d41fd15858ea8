//! Live data provider sampling the local host.

use std::time::Instant;

use tracing::{debug, warn};

use crate::collector::{Collector, CollectorTiming, MetricsSource};
use crate::history::{EnrichedSnapshot, HistoryEngine};
use crate::model::Snapshot;

use super::{ProviderError, SnapshotProvider};

/// Collects from a [`MetricsSource`] and keeps the history engine fed.
pub struct LiveProvider<S: MetricsSource> {
    collector: Collector<S>,
    engine: HistoryEngine,
    current: Option<EnrichedSnapshot>,
    last_error: Option<ProviderError>,
}

fn is_empty(snapshot: &Snapshot) -> bool {
    snapshot.cpu.is_none()
        && snapshot.memory.is_none()
        && snapshot.disks.is_none()
        && snapshot.network.is_none()
        && snapshot.processes.is_none()
        && snapshot.system.is_none()
}

impl<S: MetricsSource> LiveProvider<S> {
    pub fn new(source: S) -> Self {
        Self {
            collector: Collector::new(source),
            engine: HistoryEngine::new(),
            current: None,
            last_error: None,
        }
    }

    /// Samples once with an explicit monotonic timestamp.
    pub fn advance_at(&mut self, now: Instant) -> &EnrichedSnapshot {
        let snapshot = self.collector.collect_snapshot();
        if is_empty(&snapshot) {
            if self.last_error.is_none() {
                warn!("no metric domain could be read");
            }
            self.last_error = Some(ProviderError::Collection(
                "no metric domain available".to_string(),
            ));
        } else {
            self.last_error = None;
        }
        if let Some(timing) = self.collector.last_timing() {
            debug!(total_ms = timing.total.as_millis() as u64, "snapshot collected");
        }
        self.current.insert(self.engine.ingest(snapshot, now))
    }
}

impl<S: MetricsSource> SnapshotProvider for LiveProvider<S> {
    fn current(&self) -> Option<&EnrichedSnapshot> {
        self.current.as_ref()
    }

    fn advance(&mut self) -> Option<&EnrichedSnapshot> {
        Some(self.advance_at(Instant::now()))
    }

    fn last_error(&self) -> Option<&ProviderError> {
        self.last_error.as_ref()
    }

    fn collector_timing(&self) -> Option<&CollectorTiming> {
        self.collector.last_timing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::MockSource;
    use std::time::Duration;

    #[test]
    fn test_first_advance() {
        let mut provider = LiveProvider::new(MockSource::typical());
        assert!(provider.current().is_none());
        let enriched = provider.advance().unwrap();
        assert_eq!(enriched.cpu_history, vec![25.0]);
        assert_eq!(enriched.network.unwrap().send_rate, None);
        assert!(provider.last_error().is_none());
        assert!(provider.collector_timing().is_some());
        assert!(provider.current().is_some());
    }

    #[test]
    fn test_rates_after_second_sample() {
        let source = MockSource::typical().with_network_script(&[(0, 0), (2000, 4000)]);
        let mut provider = LiveProvider::new(source);
        let t0 = Instant::now();
        provider.advance_at(t0);
        let enriched = provider.advance_at(t0 + Duration::from_secs(2));
        let net = enriched.network.unwrap();
        assert_eq!(net.send_rate, Some(1000.0));
        assert_eq!(net.recv_rate, Some(2000.0));
        assert_eq!(enriched.cpu_history.len(), 2);
    }

    #[test]
    fn test_failing_source_reports_error() {
        let mut provider = LiveProvider::new(MockSource::failing());
        let enriched = provider.advance().unwrap();
        assert!(enriched.snapshot.cpu.is_none());
        assert!(enriched.cpu_history.is_empty());
        assert!(matches!(
            provider.last_error(),
            Some(ProviderError::Collection(_))
        ));
    }
}
