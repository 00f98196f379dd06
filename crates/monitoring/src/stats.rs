//! Append-only call log with incrementally maintained statistics

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;

use business_voice_core::constants::limits;
use business_voice_core::snippet;

/// One completed or failed generation attempt
///
/// Records are append-only: never mutated after creation and never
/// deleted within the process lifetime.
#[derive(Debug, Clone, Serialize)]
pub struct CallRecord {
    pub timestamp: DateTime<Utc>,
    /// Request text truncated to 100 characters
    pub text_snippet: String,
    pub quality: f64,
    pub success: bool,
}

/// Aggregate statistics over all recorded calls
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RunningStats {
    pub total_calls: u64,
    pub avg_quality: f64,
    pub success_rate: f64,
}

/// Read-only view for reporting surfaces: running stats plus the most
/// recent calls
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    pub total_calls: u64,
    pub avg_quality: f64,
    pub success_rate: f64,
    pub recent_calls: Vec<CallRecord>,
}

#[derive(Default)]
struct Inner {
    history: Vec<CallRecord>,
    stats: RunningStats,
}

/// Thread-safe call statistics aggregator
///
/// All reads and updates go through one mutex, so concurrent `record`
/// calls from multiple request handlers cannot lose updates.
#[derive(Default)]
pub struct CallStats {
    inner: Mutex<Inner>,
}

impl CallStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log a generation attempt for monitoring and optimization.
    ///
    /// Updates the average quality with an online-mean step and recomputes
    /// the success rate over the full history; the full scan is the
    /// canonical definition of `success_rate`, not an approximation.
    pub fn record(&self, text: &str, quality: f64, success: bool) {
        let mut inner = self.inner.lock();

        inner.history.push(CallRecord {
            timestamp: Utc::now(),
            text_snippet: snippet(text, limits::SNIPPET_MAX_CHARS),
            quality,
            success,
        });

        inner.stats.total_calls += 1;
        let n = inner.stats.total_calls as f64;
        inner.stats.avg_quality = (inner.stats.avg_quality * (n - 1.0) + quality) / n;

        let success_count = inner.history.iter().filter(|c| c.success).count();
        inner.stats.success_rate = success_count as f64 / inner.history.len() as f64;

        tracing::debug!(
            total_calls = inner.stats.total_calls,
            avg_quality = inner.stats.avg_quality,
            success,
            "Recorded generation attempt"
        );
    }

    /// Current running statistics
    pub fn running(&self) -> RunningStats {
        self.inner.lock().stats
    }

    /// Running statistics plus the last 10 call records
    pub fn snapshot(&self) -> StatsSnapshot {
        let inner = self.inner.lock();
        let recent_start = inner
            .history
            .len()
            .saturating_sub(limits::RECENT_CALLS_WINDOW);
        StatsSnapshot {
            total_calls: inner.stats.total_calls,
            avg_quality: inner.stats.avg_quality,
            success_rate: inner.stats.success_rate,
            recent_calls: inner.history[recent_start..].to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        let stats = CallStats::new();
        let running = stats.running();
        assert_eq!(running.total_calls, 0);
        assert_eq!(running.avg_quality, 0.0);
        assert_eq!(running.success_rate, 0.0);
    }

    #[test]
    fn test_online_mean_matches_arithmetic_mean() {
        let stats = CallStats::new();
        let qualities = [0.98, 0.75, 0.88, 0.80, 0.93];
        for q in qualities {
            stats.record("test call", q, true);
        }

        let expected: f64 = qualities.iter().sum::<f64>() / qualities.len() as f64;
        let running = stats.running();
        assert_eq!(running.total_calls, 5);
        assert!((running.avg_quality - expected).abs() < 1e-9);
        assert!((running.success_rate - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_success_rate_counts_failures() {
        let stats = CallStats::new();
        stats.record("ok", 0.9, true);
        stats.record("ok", 0.9, true);
        stats.record("failed", 0.0, false);
        stats.record("ok", 0.9, true);

        let running = stats.running();
        assert!((running.success_rate - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_snippet_truncated_in_record() {
        let stats = CallStats::new();
        let long_text = "x".repeat(200);
        stats.record(&long_text, 0.8, true);

        let snap = stats.snapshot();
        assert_eq!(snap.recent_calls.len(), 1);
        let snippet = &snap.recent_calls[0].text_snippet;
        assert_eq!(snippet.chars().count(), 103);
        assert!(snippet.ends_with("..."));
    }

    #[test]
    fn test_snapshot_retains_last_ten() {
        let stats = CallStats::new();
        for i in 0..25 {
            stats.record(&format!("call {}", i), 0.8, true);
        }

        let snap = stats.snapshot();
        assert_eq!(snap.total_calls, 25);
        assert_eq!(snap.recent_calls.len(), 10);
        assert_eq!(snap.recent_calls[0].text_snippet, "call 15");
        assert_eq!(snap.recent_calls[9].text_snippet, "call 24");
    }

    #[test]
    fn test_concurrent_record_no_lost_updates() {
        let stats = std::sync::Arc::new(CallStats::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let stats = stats.clone();
            handles.push(std::thread::spawn(move || {
                for _ in 0..100 {
                    stats.record("concurrent", 0.8, true);
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }

        let running = stats.running();
        assert_eq!(running.total_calls, 800);
        assert!((running.avg_quality - 0.8).abs() < 1e-9);
        assert!((running.success_rate - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_snapshot_serializes() {
        let stats = CallStats::new();
        stats.record("hello", 0.75, true);
        let json = serde_json::to_value(stats.snapshot()).unwrap();
        assert_eq!(json["total_calls"], 1);
        assert_eq!(json["recent_calls"][0]["text_snippet"], "hello");
    }
}
