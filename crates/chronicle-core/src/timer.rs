use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

use tracing::{info, warn};

/// Labelled stopwatches reported through `tracing`.
///
/// Each label runs at most one stopwatch. Starting a running label restarts
/// it; logging or ending an unknown label warns and returns `None`.
#[derive(Debug, Default)]
pub struct TimerRegistry {
    started: HashMap<String, Instant>,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the stopwatch for `label`.
    pub fn start(&mut self, label: &str) {
        if self
            .started
            .insert(label.to_string(), Instant::now())
            .is_some()
        {
            warn!(label, "timer already running; restarted");
        }
    }

    /// Report the elapsed time for `label` together with `info`, leaving the
    /// stopwatch running.
    pub fn log(&self, label: &str, info: impl fmt::Display) -> Option<Duration> {
        let Some(started) = self.started.get(label) else {
            warn!(label, "timer does not exist");
            return None;
        };
        let elapsed = started.elapsed();
        info!(label, elapsed_ms = elapsed.as_secs_f64() * 1000.0, %info, "timer");
        Some(elapsed)
    }

    /// Report the elapsed time for `label` and stop its stopwatch.
    pub fn end(&mut self, label: &str) -> Option<Duration> {
        let Some(started) = self.started.remove(label) else {
            warn!(label, "timer does not exist");
            return None;
        };
        let elapsed = started.elapsed();
        info!(label, elapsed_ms = elapsed.as_secs_f64() * 1000.0, "timer ended");
        Some(elapsed)
    }

    pub fn is_running(&self, label: &str) -> bool {
        self.started.contains_key(label)
    }

    /// Number of running stopwatches.
    pub fn len(&self) -> usize {
        self.started.len()
    }

    pub fn is_empty(&self) -> bool {
        self.started.is_empty()
    }
}
