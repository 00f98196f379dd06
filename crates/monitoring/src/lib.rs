//! Call history and running quality statistics
//!
//! A passive, best-effort monitoring sink for voice generation outcomes.
//! [`CallStats`] is the one piece of shared mutable state in the system:
//! every completed or failed generation appends a [`CallRecord`] and
//! updates [`RunningStats`] under a single lock. Recording never fails
//! and never blocks the caller's generation result.

mod stats;

pub use stats::{CallRecord, CallStats, RunningStats, StatsSnapshot};
