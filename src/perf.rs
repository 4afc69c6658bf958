//! Pipeline timing.
//!
//! Ingestion, shaping and summarising run synchronously on the caller's
//! thread. Each of those functions holds a [`ScopedTimer`] that warns when
//! the step runs past [`SLOW_OPERATION_MS`]. The controller additionally
//! keeps a [`PipelineStats`] table so the durations can be inspected.
//!
//! With the `profiling` feature every finished timer is logged at trace
//! level, not only the slow ones.

use std::collections::HashMap;
use std::time::Instant;
use tracing::warn;

use crate::constants::SLOW_OPERATION_MS;

/// Running totals for one named step
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OperationStats {
    count: u64,
    total_ms: f64,
    max_ms: f64,
    last_ms: f64,
}

impl OperationStats {
    pub fn record(&mut self, ms: f64) {
        self.count += 1;
        self.total_ms += ms;
        self.max_ms = self.max_ms.max(ms);
        self.last_ms = ms;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total_ms / self.count as f64
        }
    }

    pub fn max_ms(&self) -> f64 {
        self.max_ms
    }

    pub fn last_ms(&self) -> f64 {
        self.last_ms
    }
}

/// Durations of the controller's pipeline steps, keyed by step name
#[derive(Debug, Default)]
pub struct PipelineStats {
    steps: HashMap<&'static str, OperationStats>,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: &'static str, elapsed_ms: f64) {
        self.steps.entry(name).or_default().record(elapsed_ms);
    }

    pub fn get(&self, name: &str) -> Option<&OperationStats> {
        self.steps.get(name)
    }

    /// Run `f` and record how long it took under `name`.
    ///
    /// Slow-step warnings come from the step's own [`ScopedTimer`], so
    /// nothing is logged here.
    pub fn time<T>(&mut self, name: &'static str, f: impl FnOnce() -> T) -> T {
        let (result, elapsed_ms) = measure(f);
        self.record(name, elapsed_ms);
        result
    }

    pub fn reset(&mut self) {
        self.steps.clear();
    }
}

/// Warns on drop when the enclosing step took longer than its threshold
pub struct ScopedTimer {
    name: &'static str,
    started: Instant,
    threshold_ms: f64,
}

impl ScopedTimer {
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        Self {
            name,
            started: Instant::now(),
            threshold_ms,
        }
    }

    /// Timer using [`SLOW_OPERATION_MS`]
    pub fn with_default_threshold(name: &'static str) -> Self {
        Self::new(name, SLOW_OPERATION_MS)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();

        #[cfg(feature = "profiling")]
        tracing::trace!(step = self.name, elapsed_ms, "Step finished");

        if elapsed_ms > self.threshold_ms {
            warn!(
                step = self.name,
                elapsed_ms = format!("{:.2}", elapsed_ms),
                threshold_ms = self.threshold_ms,
                "Slow pipeline step"
            );
        }
    }
}

/// Run `f`, returning its result and the elapsed milliseconds
pub fn measure<T>(f: impl FnOnce() -> T) -> (T, f64) {
    let started = Instant::now();
    let result = f();
    (result, started.elapsed().as_secs_f64() * 1000.0)
}
