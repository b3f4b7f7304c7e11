//! Query metrics
//!
//! Counters only, monotonic, reset on process start.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for the query path
///
/// Relaxed ordering is enough: counters are independent and only read
/// through `snapshot`.
#[derive(Debug, Default)]
pub struct QueryMetrics {
    /// Queries that returned rows
    queries_executed: AtomicU64,
    /// Queries rejected for malformed input, bad fields or a missing dataset
    queries_rejected: AtomicU64,
    /// Queries that matched more rows than allowed
    results_too_large: AtomicU64,
    /// Rows returned across all executed queries
    rows_returned: AtomicU64,
}

impl QueryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_executed(&self, rows: usize) {
        self.queries_executed.fetch_add(1, Ordering::Relaxed);
        self.rows_returned.fetch_add(rows as u64, Ordering::Relaxed);
    }

    pub fn increment_rejected(&self) {
        self.queries_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_too_large(&self) {
        self.results_too_large.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            queries_executed: self.queries_executed.load(Ordering::Relaxed),
            queries_rejected: self.queries_rejected.load(Ordering::Relaxed),
            results_too_large: self.results_too_large.load(Ordering::Relaxed),
            rows_returned: self.rows_returned.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time copy of all counters
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct MetricsSnapshot {
    pub queries_executed: u64,
    pub queries_rejected: u64,
    pub results_too_large: u64,
    pub rows_returned: u64,
}
