// SPDX-License-Identifier: Apache-2.0 OR MIT
// Log writer thread - drains the record channel into the sinks

use super::{DebugInfo, Level, LogRecord, LogSink, WorkerStats};
use crate::chan::Channel;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

pub(crate) const PRESSURE_MESSAGE: &str = "log queue is under high pressure";

/// Single consumer of a logger's channel. Owns the sinks for its lifetime.
pub(crate) struct LogWorker {
    channel: Arc<Channel<LogRecord>>,
    sinks: Vec<Box<dyn LogSink>>,
    queue_warn_threshold: usize,
    debug: bool,
    stats: Arc<WorkerStats>,
    reported_failure: bool,
}

/// Closes the channel when the writer loop ends, however it ends, so that
/// producers stop queueing and shutdown never waits on a dead writer
struct CloseOnExit(Arc<Channel<LogRecord>>);

impl Drop for CloseOnExit {
    fn drop(&mut self) {
        if thread::panicking() {
            eprintln!("log writer exited abnormally; further records are discarded");
        }
        self.0.close();
    }
}

/// Run a sink call, turning a panic into an I/O error
fn contain<R>(call: impl FnOnce() -> io::Result<R>) -> io::Result<R> {
    panic::catch_unwind(AssertUnwindSafe(call))
        .unwrap_or_else(|_| Err(io::Error::new(io::ErrorKind::Other, "log sink panicked")))
}

impl LogWorker {
    pub(crate) fn new(
        channel: Arc<Channel<LogRecord>>,
        sinks: Vec<Box<dyn LogSink>>,
        queue_warn_threshold: usize,
        debug: bool,
        stats: Arc<WorkerStats>,
    ) -> Self {
        Self {
            channel,
            sinks,
            queue_warn_threshold,
            debug,
            stats,
            reported_failure: false,
        }
    }

    /// Run until the channel is closed. Sinks are finished, then dropped (and
    /// files closed) when this returns.
    pub(crate) fn run(mut self) {
        let _close = CloseOnExit(Arc::clone(&self.channel));

        while let Some(record) = self.channel.recv() {
            let depth = self.channel.len();
            if depth > self.queue_warn_threshold {
                let debug_info = if self.debug {
                    Some(DebugInfo::capture())
                } else {
                    None
                };
                self.stats.pressure_warning(depth);
                // Counted under pressure_warnings only
                self.write(&LogRecord::new(Level::Warn, PRESSURE_MESSAGE, debug_info));
            }

            if self.write(&record) {
                self.stats.record_written();
            }

            if self.channel.is_empty() {
                self.flush();
            }
        }
        self.finish();
    }

    /// Write to every sink, retrying a failed sink once. A record that still
    /// fails is dropped for that sink and counted. Returns whether every sink
    /// accepted it.
    fn write(&mut self, record: &LogRecord) -> bool {
        let rendered = record.render();
        let mut failed = false;

        for sink in &mut self.sinks {
            let result = contain(|| sink.write_record(record.level, &rendered))
                .or_else(|_| contain(|| sink.write_record(record.level, &rendered)));
            if let Err(err) = result {
                failed = true;
                if !self.reported_failure {
                    self.reported_failure = true;
                    eprintln!("log writer: dropping records after write failure: {}", err);
                }
            }
        }

        if failed {
            self.stats.write_error();
        }
        !failed
    }

    fn flush(&mut self) {
        for sink in &mut self.sinks {
            // Flush failures surface again on the next write
            let _ = contain(|| sink.flush());
        }
    }

    fn finish(&mut self) {
        for sink in &mut self.sinks {
            if let Err(err) = contain(|| sink.finish()) {
                eprintln!("log writer: final flush failed: {}", err);
            }
        }
    }
}
