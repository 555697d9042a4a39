// Asynchronous logging pipeline
//
// Call sites push records onto a closable channel; one writer thread per
// logger drains it into the log file and, optionally, the standard streams.

mod debug_info;
pub mod global;
mod level;
mod logger;
#[macro_use]
mod macros;
mod record;
mod sink;
mod stats;
mod worker;

// Public exports
pub use debug_info::DebugInfo;
pub use level::Level;
pub use logger::{LogHandle, Logger, LoggerError, LoggerState};
pub use record::LogRecord;
pub use sink::{ConsoleSink, FileSink, LogSink};
pub use stats::{WorkerStats, WorkerStatsSnapshot};
