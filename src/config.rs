// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Logger configuration and parsing.
//!
//! JSON5 file format, for example:
//!
//! ```json5
//! {
//!     // error | warn | info
//!     level: "warn",
//!     path: "/var/log/app/app.log",
//!     mirror_to_console: true,
//!     debug: false,
//!     queue_warn_threshold: 500,
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::logging::Level;

/// Default queue depth above which the writer emits a pressure warning
pub const DEFAULT_QUEUE_WARN_THRESHOLD: usize = 1000;

/// Values a [`Logger`](crate::Logger) is constructed from. Captured by value;
/// later edits do not affect a running logger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Minimum level written. Errors are always written.
    #[serde(default)]
    pub level: Level,

    /// Log file, appended to. Parent directories are created.
    pub path: PathBuf,

    /// Also write INFO to stdout and WARN/ERROR to stderr
    #[serde(default)]
    pub mirror_to_console: bool,

    /// Attach the caller's file and line to every record
    #[serde(default)]
    pub debug: bool,

    /// Queue depth above which a pressure warning is written
    #[serde(default = "default_queue_warn_threshold")]
    pub queue_warn_threshold: usize,
}

fn default_queue_warn_threshold() -> usize {
    DEFAULT_QUEUE_WARN_THRESHOLD
}

impl LoggerConfig {
    /// Configuration with defaults for everything but the path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            level: Level::default(),
            path: path.into(),
            mirror_to_console: false,
            debug: false,
            queue_warn_threshold: DEFAULT_QUEUE_WARN_THRESHOLD,
        }
    }

    /// Load configuration from a JSON5 file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(path.to_path_buf(), e.to_string()))?;
        Self::parse(&content)
    }

    /// Parse configuration from a JSON5 string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        json5::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Serialize to a JSON5-readable string (pretty JSON)
    pub fn to_json5(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPath);
        }
        if self.queue_warn_threshold == 0 {
            return Err(ConfigError::InvalidThreshold(self.queue_warn_threshold));
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    IoError(PathBuf, String),
    ParseError(String),
    EmptyPath,
    InvalidThreshold(usize),
    UnknownLevel(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(path, msg) => {
                write!(
                    f,
                    "failed to read config file '{}': {}",
                    path.display(),
                    msg
                )
            }
            ConfigError::ParseError(msg) => write!(f, "failed to parse config: {}", msg),
            ConfigError::EmptyPath => write!(f, "log file path cannot be empty"),
            ConfigError::InvalidThreshold(value) => {
                write!(f, "queue_warn_threshold must be positive, got {}", value)
            }
            ConfigError::UnknownLevel(level) => {
                write!(
                    f,
                    "unknown log level '{}' (expected error, warn or info)",
                    level
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
