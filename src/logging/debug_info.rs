// SPDX-License-Identifier: Apache-2.0 OR MIT
// Caller location attached to records when debug mode is on

use std::fmt;
use std::panic::Location;

/// Source location of the call that produced a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebugInfo {
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
}

impl DebugInfo {
    /// Capture the location of the nearest caller not marked `#[track_caller]`
    #[track_caller]
    #[inline]
    pub fn capture() -> Self {
        Self::from_location(Location::caller())
    }

    pub fn from_location(location: &'static Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
            column: location.column(),
        }
    }
}

/// Renders the runtime information block, terminated by a newline
impl fmt::Display for DebugInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[ RUNTIME INFORMATION ]:")?;
        writeln!(
            f,
            "|-[ LOG CALLER STACK ]: Line ({}) File ({})",
            self.line, self.file
        )
    }
}
