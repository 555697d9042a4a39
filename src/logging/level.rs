// SPDX-License-Identifier: Apache-2.0 OR MIT
// Log levels, ordered by severity (lower is more severe)

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::config::ConfigError;

/// Log level of a record, and the threshold a logger filters with
#[repr(u8)]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Failures; never filtered
    Error = 1,
    /// Degraded conditions
    #[serde(alias = "warning")]
    Warn = 2,
    /// Normal operation
    #[default]
    #[serde(alias = "information")]
    Info = 3,
}

impl Level {
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Tag written between brackets in the log output
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Warn => "WARNING",
            Level::Info => "INFORMATION",
        }
    }

    /// Whether a record at `level` passes a logger configured with `self`.
    ///
    /// `Error` always passes.
    #[inline]
    pub const fn permits(self, level: Level) -> bool {
        level.as_u8() <= self.as_u8()
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Level {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(Level::Error),
            "warn" | "warning" => Ok(Level::Warn),
            "info" | "information" => Ok(Level::Info),
            _ => Err(ConfigError::UnknownLevel(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Error < Level::Warn);
        assert!(Level::Warn < Level::Info);
    }

    #[test]
    fn test_permits() {
        assert!(Level::Error.permits(Level::Error));
        assert!(!Level::Error.permits(Level::Warn));
        assert!(!Level::Error.permits(Level::Info));

        assert!(Level::Warn.permits(Level::Error));
        assert!(Level::Warn.permits(Level::Warn));
        assert!(!Level::Warn.permits(Level::Info));

        assert!(Level::Info.permits(Level::Info));
    }

    #[test]
    fn test_level_display() {
        assert_eq!(Level::Error.to_string(), "ERROR");
        assert_eq!(Level::Warn.to_string(), "WARNING");
        assert_eq!(Level::Info.to_string(), "INFORMATION");
    }

    #[test]
    fn test_level_parse() {
        assert_eq!("ERROR".parse::<Level>().unwrap(), Level::Error);
        assert_eq!("warning".parse::<Level>().unwrap(), Level::Warn);
        assert_eq!("Info".parse::<Level>().unwrap(), Level::Info);
        assert!(matches!(
            "debug".parse::<Level>(),
            Err(ConfigError::UnknownLevel(_))
        ));
    }

    #[test]
    fn test_level_serde() {
        let level: Level = serde_json::from_str("\"warning\"").unwrap();
        assert_eq!(level, Level::Warn);
        assert_eq!(serde_json::to_string(&Level::Error).unwrap(), "\"error\"");
    }
}
