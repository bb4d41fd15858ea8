//! Rate computation from cumulative counters.
//!
//! Shared by the network and disk streams of the history engine.

use std::time::Instant;

// ---------------------------------------------------------------------------
// Delta helpers
// ---------------------------------------------------------------------------

/// Compute u64 delta, returning `None` on counter regression (reset or wrap).
pub fn du64(curr: u64, prev: u64) -> Option<u64> {
    curr.checked_sub(prev)
}

// ---------------------------------------------------------------------------
// Rate state
// ---------------------------------------------------------------------------

/// Previous observation of one cumulative counter.
#[derive(Debug, Clone, Copy, Default)]
pub struct RateState {
    prev: Option<(u64, Instant)>,
}

impl RateState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `counter` observed at `at` and returns the per-second rate
    /// since the previous observation.
    ///
    /// The first observation has no rate. Non-positive elapsed time and
    /// counter regression both yield `0.0`.
    pub fn update(&mut self, counter: u64, at: Instant) -> Option<f64> {
        let rate = self.prev.map(|(prev_counter, prev_at)| {
            let elapsed = at.saturating_duration_since(prev_at).as_secs_f64();
            match du64(counter, prev_counter) {
                Some(delta) if elapsed > 0.0 => delta as f64 / elapsed,
                _ => 0.0,
            }
        });
        self.prev = Some((counter, at));
        rate
    }
}

/// Running maximum of a rate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PeakTracker {
    peak: f64,
}

impl PeakTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds `value` into the peak and returns the new peak.
    pub fn observe(&mut self, value: f64) -> f64 {
        if value > self.peak {
            self.peak = value;
        }
        self.peak
    }

    pub fn peak(&self) -> f64 {
        self.peak
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_du64() {
        assert_eq!(du64(10, 4), Some(6));
        assert_eq!(du64(4, 10), None);
    }

    #[test]
    fn test_rates_from_counters() {
        let t0 = Instant::now();
        let mut state = RateState::new();
        let rates: Vec<Option<f64>> = [(0, 0), (100, 1), (250, 2)]
            .iter()
            .map(|&(c, s)| state.update(c, t0 + Duration::from_secs(s)))
            .collect();
        assert_eq!(rates, vec![None, Some(100.0), Some(150.0)]);
    }

    #[test]
    fn test_zero_elapsed_is_zero_rate() {
        let t0 = Instant::now();
        let mut state = RateState::new();
        state.update(100, t0);
        assert_eq!(state.update(500, t0), Some(0.0));
    }

    #[test]
    fn test_counter_regression_is_zero_rate() {
        let t0 = Instant::now();
        let mut state = RateState::new();
        state.update(1000, t0);
        assert_eq!(state.update(10, t0 + Duration::from_secs(1)), Some(0.0));
        // previous is replaced by the regressed value
        assert_eq!(state.update(110, t0 + Duration::from_secs(2)), Some(100.0));
    }

    #[test]
    fn test_peaks_monotonic() {
        let mut peak = PeakTracker::new();
        let peaks: Vec<f64> = [10.0, 50.0, 30.0, 80.0, 20.0]
            .iter()
            .map(|&r| peak.observe(r))
            .collect();
        assert_eq!(peaks, vec![10.0, 50.0, 50.0, 80.0, 80.0]);
        assert_eq!(peak.peak(), 80.0);
    }
}
