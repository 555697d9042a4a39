// SPDX-License-Identifier: Apache-2.0 OR MIT
// Counters maintained by the log writer thread

use metrics::{counter, gauge};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Live counters, shared between the worker and the logger handle
#[derive(Debug, Default)]
pub struct WorkerStats {
    records_written: AtomicU64,
    write_errors: AtomicU64,
    pressure_warnings: AtomicU64,
}

/// Point-in-time copy of [`WorkerStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WorkerStatsSnapshot {
    /// Submitted records accepted by every sink. Pressure warnings are
    /// counted separately.
    pub records_written: u64,
    pub write_errors: u64,
    pub pressure_warnings: u64,
}

impl WorkerStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_written(&self) {
        self.records_written.fetch_add(1, Ordering::Relaxed);
        counter!("log_records_written_total").increment(1);
    }

    pub(crate) fn write_error(&self) {
        self.write_errors.fetch_add(1, Ordering::Relaxed);
        counter!("log_write_errors_total").increment(1);
    }

    pub(crate) fn pressure_warning(&self, queue_depth: usize) {
        self.pressure_warnings.fetch_add(1, Ordering::Relaxed);
        counter!("log_pressure_warnings_total").increment(1);
        gauge!("log_queue_depth").set(queue_depth as f64);
    }

    pub fn snapshot(&self) -> WorkerStatsSnapshot {
        WorkerStatsSnapshot {
            records_written: self.records_written.load(Ordering::Relaxed),
            write_errors: self.write_errors.load(Ordering::Relaxed),
            pressure_warnings: self.pressure_warnings.load(Ordering::Relaxed),
        }
    }
}
