// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Process-wide logger.
//!
//! Prefer owning a [`Logger`] and passing handles around. This exists for
//! programs that need one shared instance: initialize it once with [`init`];
//! a second call fails with [`LoggerError::AlreadyInitialized`]. A global
//! logger is never dropped, so call [`shutdown`] before the process exits to
//! flush the backlog.

use super::{Logger, LoggerError};
use crate::config::LoggerConfig;
use std::sync::{Mutex, OnceLock, PoisonError};

static GLOBAL: OnceLock<Logger> = OnceLock::new();
static INIT: Mutex<()> = Mutex::new(());

/// Build the global logger from `config`
pub fn init(config: &LoggerConfig) -> Result<&'static Logger, LoggerError> {
    let _guard = INIT.lock().unwrap_or_else(PoisonError::into_inner);
    if GLOBAL.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }

    let logger = Logger::from_config(config)?;
    GLOBAL
        .set(logger)
        .map_err(|_| LoggerError::AlreadyInitialized)?;
    GLOBAL.get().ok_or(LoggerError::AlreadyInitialized)
}

/// The global logger, if [`init`] has succeeded
pub fn get() -> Option<&'static Logger> {
    GLOBAL.get()
}

/// Shut the global logger down. No-op if it was never initialized.
pub fn shutdown() {
    if let Some(logger) = GLOBAL.get() {
        logger.shutdown();
    }
}
