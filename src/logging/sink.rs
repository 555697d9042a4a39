// SPDX-License-Identifier: Apache-2.0 OR MIT
// Output sinks for rendered log records

use super::Level;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::LoggerError;

/// Destination for rendered records.
///
/// Sinks are owned by the worker thread, so implementations need no locking.
pub trait LogSink: Send {
    /// Write one rendered record in a single write call
    fn write_record(&mut self, level: Level, rendered: &str) -> io::Result<()>;

    /// Flush any buffered output. Called whenever the queue runs empty.
    fn flush(&mut self) -> io::Result<()>;

    /// Make everything written so far durable. Called once, when the writer
    /// exits.
    fn finish(&mut self) -> io::Result<()> {
        self.flush()
    }
}

/// Append-only log file
#[derive(Debug)]
pub struct FileSink {
    file: File,
    path: PathBuf,
}

impl FileSink {
    /// Open `path` for appending, creating the file and its parent
    /// directories if they are missing
    pub fn open(path: &Path) -> Result<Self, LoggerError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| LoggerError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| LoggerError::OpenFile {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSink for FileSink {
    fn write_record(&mut self, _level: Level, rendered: &str) -> io::Result<()> {
        self.file.write_all(rendered.as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }

    fn finish(&mut self) -> io::Result<()> {
        self.file.flush()?;
        self.file.sync_data()
    }
}

/// Mirrors records to the standard streams: INFO to stdout, WARN and ERROR
/// to stderr
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for ConsoleSink {
    fn write_record(&mut self, level: Level, rendered: &str) -> io::Result<()> {
        match level {
            Level::Info => io::stdout().lock().write_all(rendered.as_bytes()),
            Level::Warn | Level::Error => io::stderr().lock().write_all(rendered.as_bytes()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()?;
        io::stderr().flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_sink_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/app.log");

        let mut sink = FileSink::open(&path).unwrap();
        sink.write_record(Level::Info, "first\n").unwrap();
        sink.flush().unwrap();

        assert_eq!(sink.path(), path.as_path());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\n");
    }

    #[test]
    fn test_file_sink_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        std::fs::write(&path, "existing\n").unwrap();

        let mut sink = FileSink::open(&path).unwrap();
        sink.write_record(Level::Warn, "appended\n").unwrap();
        sink.flush().unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "existing\nappended\n"
        );
    }

    #[test]
    fn test_file_sink_finish() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");

        let mut sink = FileSink::open(&path).unwrap();
        sink.write_record(Level::Error, "last\n").unwrap();
        sink.finish().unwrap();
        drop(sink);

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "last\n");
    }

    #[test]
    fn test_file_sink_open_failure() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as a log file
        let err = FileSink::open(dir.path()).unwrap_err();
        assert!(matches!(err, LoggerError::OpenFile { .. }));
    }

    #[test]
    fn test_file_sink_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let err = FileSink::open(&blocker.join("app.log")).unwrap_err();
        assert!(matches!(err, LoggerError::CreateDir { .. }));
    }
}
