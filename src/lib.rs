// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Closable blocking channel and an asynchronous file logger built on it.
//!
//! [`Channel`] is an unbounded FIFO queue: producers never block, consumers
//! block until an item arrives or the channel closes, and closing waits for
//! every blocked consumer to wake up and leave.
//!
//! [`Logger`] owns one `Channel<LogRecord>` and a writer thread. Log calls
//! enqueue a record and return immediately; the writer formats records and
//! appends them to the log file.
//!
//! ```no_run
//! use chanlog::{log_info, Level, Logger};
//!
//! let logger = Logger::new(Level::Info, "/tmp/app/app.log", true, false, 1000)?;
//! log_info!(logger, "started with {} workers", 4);
//! logger.shutdown();
//! # Ok::<(), chanlog::LoggerError>(())
//! ```

pub mod chan;
pub mod config;
#[macro_use]
pub mod logging;

pub use chan::{Channel, RecvTimeoutError};
pub use config::{ConfigError, LoggerConfig};
pub use logging::{Level, LogHandle, LogRecord, Logger, LoggerError, LoggerState};
