// src/core/slowlog.rs

//! Flags statements whose dispatch exceeded a configured latency threshold.

use std::time::Instant;
use tracing::warn;

/// Records dispatch durations and emits a log entry for statements that meet
/// or exceed the configured threshold.
///
/// The entry goes to the dedicated `slow_query` target, decoupled from the
/// per-statement audit channel, so operators can route slow-query output to
/// its own sink.
#[derive(Debug, Clone, Copy)]
pub struct SlowQueryRecorder {
    /// Threshold in milliseconds. Zero or negative disables recording
    /// entirely; the elapsed time is never even computed.
    threshold_ms: i64,
}

impl SlowQueryRecorder {
    pub fn new(threshold_ms: i64) -> Self {
        Self { threshold_ms }
    }

    /// Measures elapsed wall-clock time since `start` and emits one slow-query
    /// entry if it meets the threshold. Called after every dispatch,
    /// regardless of outcome.
    pub fn record(&self, query: &str, start: Instant) {
        if self.threshold_ms <= 0 {
            return;
        }
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        if let Some(entry) = format_entry(query, elapsed_ms, self.threshold_ms) {
            warn!(target: "slow_query", "{entry}");
        }
    }
}

/// The pure core of the recorder: decides whether `elapsed_ms` warrants an
/// entry and formats it. Separated from `record` so tests need no clock.
pub fn format_entry(query: &str, elapsed_ms: f64, threshold_ms: i64) -> Option<String> {
    if threshold_ms <= 0 || elapsed_ms < threshold_ms as f64 {
        return None;
    }
    Some(format!("{query} [use: {elapsed_ms:.2}]"))
}
