// SPDX-License-Identifier: Apache-2.0 OR MIT
// Logger owner and cloneable log handles

use super::worker::LogWorker;
use super::{
    ConsoleSink, DebugInfo, FileSink, Level, LogRecord, LogSink, WorkerStats, WorkerStatsSnapshot,
};
use crate::chan::Channel;
use crate::config::{ConfigError, LoggerConfig};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use thiserror::Error;

/// Errors raised while constructing a logger. Nothing after construction fails.
#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("failed to create log directory '{}': {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to open log file '{}': {source}", path.display())]
    OpenFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to start log writer thread: {0}")]
    SpawnWorker(std::io::Error),

    #[error("invalid logger configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("global logger is already initialized")]
    AlreadyInitialized,
}

/// Lifecycle of a [`Logger`]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggerState {
    /// Worker alive, channel open
    Running = 1,
    /// Backlog written, channel closed, worker finishing its sinks
    Draining = 2,
    /// Worker exited, sinks closed
    Stopped = 3,
}

impl LoggerState {
    const fn from_u8(value: u8) -> Self {
        match value {
            1 => LoggerState::Running,
            2 => LoggerState::Draining,
            _ => LoggerState::Stopped,
        }
    }
}

/// Cheap, cloneable handle for submitting records.
///
/// Submitting never blocks. Once the owning [`Logger`] has shut down, every
/// call is a silent no-op.
#[derive(Debug, Clone)]
pub struct LogHandle {
    channel: Arc<Channel<LogRecord>>,
    min_level: Level,
    debug: bool,
}

impl LogHandle {
    /// Submit a record if `level` passes the configured threshold
    #[track_caller]
    #[inline]
    pub fn log(&self, level: Level, message: &str) {
        if !self.min_level.permits(level) {
            return;
        }

        let debug_info = if self.debug {
            Some(DebugInfo::capture())
        } else {
            None
        };
        self.channel.push(LogRecord::new(level, message, debug_info));
    }

    /// Log with error severity. Never filtered.
    #[track_caller]
    #[inline]
    pub fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }

    #[track_caller]
    #[inline]
    pub fn warn(&self, message: &str) {
        self.log(Level::Warn, message);
    }

    #[track_caller]
    #[inline]
    pub fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    pub fn min_level(&self) -> Level {
        self.min_level
    }

    /// Records waiting for the writer thread (advisory)
    pub fn queue_len(&self) -> usize {
        self.channel.len()
    }
}

/// Asynchronous logger.
///
/// Owns the record channel and the single writer thread that drains it into
/// a log file and, optionally, the standard streams. Log calls only enqueue.
///
/// Dropping the logger shuts it down.
#[derive(Debug)]
pub struct Logger {
    handle: LogHandle,
    stats: Arc<WorkerStats>,
    worker: Mutex<Option<JoinHandle<()>>>,
    state: AtomicU8,
}

impl Logger {
    /// Open (or create) the log file at `path` and start the writer thread.
    ///
    /// Missing parent directories are created. Fails if the directory or file
    /// cannot be created or opened.
    pub fn new(
        level: Level,
        path: impl AsRef<Path>,
        mirror_to_console: bool,
        debug: bool,
        queue_warn_threshold: usize,
    ) -> Result<Self, LoggerError> {
        let mut sinks: Vec<Box<dyn LogSink>> = vec![Box::new(FileSink::open(path.as_ref())?)];
        if mirror_to_console {
            sinks.push(Box::new(ConsoleSink::new()));
        }
        Self::with_sinks(level, debug, queue_warn_threshold, sinks)
    }

    /// Validate `config` and build a logger from it
    pub fn from_config(config: &LoggerConfig) -> Result<Self, LoggerError> {
        config.validate()?;
        Self::new(
            config.level,
            &config.path,
            config.mirror_to_console,
            config.debug,
            config.queue_warn_threshold,
        )
    }

    /// Start a logger writing to caller-provided sinks
    pub fn with_sinks(
        level: Level,
        debug: bool,
        queue_warn_threshold: usize,
        sinks: Vec<Box<dyn LogSink>>,
    ) -> Result<Self, LoggerError> {
        let channel = Arc::new(Channel::new());
        let stats = Arc::new(WorkerStats::new());

        let worker = LogWorker::new(
            Arc::clone(&channel),
            sinks,
            queue_warn_threshold,
            debug,
            Arc::clone(&stats),
        );
        let join = thread::Builder::new()
            .name("log-writer".to_string())
            .spawn(move || worker.run())
            .map_err(LoggerError::SpawnWorker)?;

        Ok(Self {
            handle: LogHandle {
                channel,
                min_level: level,
                debug,
            },
            stats,
            worker: Mutex::new(Some(join)),
            state: AtomicU8::new(LoggerState::Running as u8),
        })
    }

    /// Handle for submitting records from other threads
    pub fn handle(&self) -> LogHandle {
        self.handle.clone()
    }

    #[track_caller]
    #[inline]
    pub fn log(&self, level: Level, message: &str) {
        self.handle.log(level, message);
    }

    #[track_caller]
    #[inline]
    pub fn error(&self, message: &str) {
        self.handle.error(message);
    }

    #[track_caller]
    #[inline]
    pub fn warn(&self, message: &str) {
        self.handle.warn(message);
    }

    #[track_caller]
    #[inline]
    pub fn info(&self, message: &str) {
        self.handle.info(message);
    }

    pub fn min_level(&self) -> Level {
        self.handle.min_level
    }

    pub fn state(&self) -> LoggerState {
        LoggerState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn stats(&self) -> WorkerStatsSnapshot {
        self.stats.snapshot()
    }

    /// Wait for the writer to write the backlog, stop accepting records, and
    /// close the sinks.
    ///
    /// Records submitted by other threads while this runs may be dropped.
    /// Idempotent. Concurrent callers return once the logger has stopped.
    pub fn shutdown(&self) {
        let mut worker = self.worker.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(join) = worker.take() else {
            return;
        };

        // The writer closes the channel itself if it dies, which ends this wait
        self.handle.channel.wait_idle();
        self.state
            .store(LoggerState::Draining as u8, Ordering::Release);
        self.handle.channel.close();
        if join.join().is_err() {
            eprintln!("log writer thread panicked; pending records were lost");
        }
        self.state
            .store(LoggerState::Stopped as u8, Ordering::Release);
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct CountingSink {
        count: Arc<Mutex<usize>>,
    }

    impl LogSink for CountingSink {
        fn write_record(&mut self, _level: Level, _rendered: &str) -> io::Result<()> {
            *self.count.lock().unwrap() += 1;
            Ok(())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct PanickingSink;

    impl LogSink for PanickingSink {
        fn write_record(&mut self, _level: Level, rendered: &str) -> io::Result<()> {
            if rendered.contains("boom") {
                panic!("sink failure");
            }
            Ok(())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn counting_logger(level: Level) -> (Logger, Arc<Mutex<usize>>) {
        let count = Arc::new(Mutex::new(0));
        let sink = CountingSink {
            count: Arc::clone(&count),
        };
        let logger = Logger::with_sinks(level, false, 1000, vec![Box::new(sink)]).unwrap();
        (logger, count)
    }

    #[test]
    fn test_logger_lifecycle() {
        let (logger, _count) = counting_logger(Level::Info);
        assert_eq!(logger.state(), LoggerState::Running);
        logger.shutdown();
        assert_eq!(logger.state(), LoggerState::Stopped);
        logger.shutdown();
        assert_eq!(logger.state(), LoggerState::Stopped);
    }

    #[test]
    fn test_level_gating() {
        let (logger, count) = counting_logger(Level::Error);
        logger.info("dropped");
        logger.warn("dropped");
        logger.error("kept");
        logger.shutdown();
        assert_eq!(*count.lock().unwrap(), 1);
    }

    #[test]
    fn test_handle_logs_through_owner() {
        let (logger, count) = counting_logger(Level::Info);
        let handle = logger.handle();
        let worker = std::thread::spawn(move || {
            for _ in 0..10 {
                handle.info("from another thread");
            }
        });
        worker.join().unwrap();
        logger.shutdown();
        assert_eq!(*count.lock().unwrap(), 10);
        assert_eq!(logger.stats().records_written, 10);
    }

    #[test]
    fn test_log_after_shutdown_is_noop() {
        let (logger, count) = counting_logger(Level::Info);
        let handle = logger.handle();
        logger.shutdown();

        handle.error("too late");
        logger.error("too late");
        assert_eq!(handle.queue_len(), 0);
        assert_eq!(*count.lock().unwrap(), 0);
    }

    #[test]
    fn test_drop_shuts_down() {
        let (logger, count) = counting_logger(Level::Info);
        logger.info("before drop");
        drop(logger);
        assert_eq!(*count.lock().unwrap(), 1);
    }

    #[test]
    fn test_from_config_rejects_invalid() {
        let config = LoggerConfig {
            queue_warn_threshold: 0,
            ..LoggerConfig::new("/tmp/unused.log")
        };
        let err = Logger::from_config(&config).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfig(_)));
    }

    #[test]
    fn test_shutdown_writes_backlog() {
        let (logger, count) = counting_logger(Level::Info);
        for _ in 0..500 {
            logger.info("queued");
        }
        logger.shutdown();
        assert_eq!(*count.lock().unwrap(), 500);
        assert_eq!(logger.stats().records_written, 500);
        assert_eq!(logger.handle().queue_len(), 0);
    }

    #[test]
    fn test_panicking_sink_keeps_logger_running() {
        let logger =
            Logger::with_sinks(Level::Info, false, 1000, vec![Box::new(PanickingSink)]).unwrap();
        logger.error("boom");
        for _ in 0..500 {
            logger.info("still delivered");
        }
        logger.shutdown();

        assert_eq!(logger.state(), LoggerState::Stopped);
        let stats = logger.stats();
        assert_eq!(stats.write_errors, 1);
        assert_eq!(stats.records_written, 500);
    }
}
