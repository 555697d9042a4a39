// SPDX-License-Identifier: Apache-2.0 OR MIT
// Log record passed from call sites to the writer thread

use super::{DebugInfo, Level};
use chrono::{DateTime, Local};
use std::fmt::Write;

/// Timestamp layout of the header line
const TIMESTAMP_FORMAT: &str = "%H:%M:%S - %d.%m.%Y";

/// A single log message. Built at the call site, consumed once by the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: Level,
    pub message: String,
    pub debug_info: Option<DebugInfo>,
    pub timestamp: DateTime<Local>,
}

impl LogRecord {
    pub fn new(level: Level, message: impl Into<String>, debug_info: Option<DebugInfo>) -> Self {
        Self {
            level,
            message: message.into(),
            debug_info,
            timestamp: Local::now(),
        }
    }

    /// Render the record as one block of text.
    ///
    /// ```text
    ///
    /// [ 14:03:59 - 16.10.2026 ]
    /// [ WARNING ]:
    /// disk almost full
    /// [ RUNTIME INFORMATION ]:
    /// |-[ LOG CALLER STACK ]: Line (42) File (src/main.rs)
    /// ```
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(64 + self.message.len());
        // Writing into a String cannot fail
        let _ = write!(
            out,
            "\n[ {} ]\n[ {} ]:\n{}\n",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.level.as_str(),
            self.message
        );
        if let Some(info) = &self.debug_info {
            let _ = write!(out, "{}", info);
        }
        out.push('\n');
        out
    }
}
