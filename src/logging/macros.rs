// SPDX-License-Identifier: Apache-2.0 OR MIT
// Logging macros with format arguments
//
// The logger methods are `#[track_caller]`, so debug info records the line
// of the macro invocation.

/// Log a message with error severity
///
/// # Examples
/// ```ignore
/// log_error!(logger, "failed to open {}", path.display());
/// ```
#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.error(&::std::format!($($arg)+))
    };
}

/// Log a message with warning severity
///
/// # Examples
/// ```ignore
/// log_warn!(logger, "retrying in {}s", delay);
/// ```
#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warn(&::std::format!($($arg)+))
    };
}

/// Log a message with info severity
///
/// # Examples
/// ```ignore
/// log_info!(logger, "listening on {}", addr);
/// ```
#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.info(&::std::format!($($arg)+))
    };
}
