use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use log::debug;
use serde::Serialize;

/// Process-lifetime counters. Monotonically non-decreasing; increments are
/// atomic per field so concurrent callers never lose an update.
#[derive(Debug, Default)]
pub struct Metrics {
    transactions_received: AtomicU64,
    blocks_mined: AtomicU64,
    requests_count: AtomicU64,
}

/// Point-in-time view of the counters.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MetricsSnapshot {
    pub transactions_received: u64,
    pub blocks_mined: u64,
    pub requests_count: u64,
}

impl Metrics {
    pub fn record_transaction(&self) {
        self.transactions_received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_block(&self) {
        self.blocks_mined.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_request(&self) {
        self.requests_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            transactions_received: self.transactions_received.load(Ordering::Relaxed),
            blocks_mined: self.blocks_mined.load(Ordering::Relaxed),
            requests_count: self.requests_count.load(Ordering::Relaxed),
        }
    }
}

/// Append-only log of timestamped, human-readable events. Grows without
/// bound for the lifetime of the process; entry order across unrelated
/// operations is best-effort.
#[derive(Debug, Default)]
pub struct EventLog {
    entries: Mutex<Vec<String>>,
}

impl EventLog {
    /// Append an entry stamped with the current time.
    pub fn record(&self, message: impl Into<String>) {
        let message = message.into();
        debug!("event: {message}");
        let entry = format!("[{}] {message}", Utc::now().format("%Y-%m-%d %H:%M:%S"));
        self.entries.lock().expect("mutex poisoned").push(entry);
    }

    /// Entries with the most recent first, for display.
    pub fn newest_first(&self) -> Vec<String> {
        let entries = self.entries.lock().expect("mutex poisoned");
        entries.iter().rev().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::{EventLog, Metrics};

    #[test]
    fn counters_increment_independently() {
        let metrics = Metrics::default();
        metrics.record_transaction();
        metrics.record_transaction();
        metrics.record_block();

        let snap = metrics.snapshot();
        assert_eq!(snap.transactions_received, 2);
        assert_eq!(snap.blocks_mined, 1);
        assert_eq!(snap.requests_count, 0);
    }

    #[test]
    fn counters_survive_concurrent_increments() {
        const THREADS: usize = 8;
        const PER_THREAD: usize = 100;

        let metrics = Metrics::default();
        std::thread::scope(|scope| {
            for _ in 0..THREADS {
                scope.spawn(|| {
                    for _ in 0..PER_THREAD {
                        metrics.record_request();
                    }
                });
            }
        });
        assert_eq!(metrics.snapshot().requests_count, (THREADS * PER_THREAD) as u64);
    }

    #[test]
    fn event_log_reads_newest_first() {
        let events = EventLog::default();
        events.record("first");
        events.record("second");

        let entries = events.newest_first();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].ends_with("second"));
        assert!(entries[1].ends_with("first"));
    }
}
