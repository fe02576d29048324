//! Append-only operation log
//!
//! Every successful operation leaves one line `[YYYY-MM-DD HH:MM:SS] message`
//! in a shared log file. Independent processes may append concurrently, so
//! each entry is written with a single `write` call while an exclusive
//! advisory lock is held; [`OpLog::dump`] reads under a shared lock and thus
//! never observes a torn entry.
//!
//! The log never truncates or rewrites: it is opened append-only and only
//! grows.

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::format::{bounded, single_line, timestamp};

/// Default log file name, resolved against the working directory.
pub const DEFAULT_LOG_FILE: &str = "log.txt";

/// Upper bound on one log line, newline included.
pub const MAX_ENTRY_LEN: usize = 512;

/// Mode for a freshly created log file (rw-r--r--).
const LOG_FILE_MODE: u32 = 0o644;

/// Handle to the shared operation log.
#[derive(Debug, Clone)]
pub struct OpLog {
    path: PathBuf,
}

/// What [`OpLog::dump`] found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDump {
    /// The log file does not exist.
    Missing,
    /// The log file exists but holds no bytes.
    Empty,
    /// Full log content read under a shared lock.
    Contents(String),
}

impl LogDump {
    /// User-facing rendering: header plus content, newline-terminated.
    pub fn render(&self) -> String {
        match self {
            LogDump::Missing => "No logs available.\n".to_string(),
            LogDump::Empty => "Log file is empty.\n".to_string(),
            LogDump::Contents(content) => {
                let mut out = String::with_capacity(content.len() + 17);
                out.push_str("Operation Logs:\n");
                out.push_str(content);
                if !content.ends_with('\n') {
                    out.push('\n');
                }
                out
            }
        }
    }
}

impl OpLog {
    /// Create a handle for the log at `path`. Nothing is touched on disk.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn label(&self) -> String {
        self.path.display().to_string()
    }

    fn open_for_append(&self) -> std::io::Result<File> {
        let mut options = OpenOptions::new();
        options.append(true).create(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(LOG_FILE_MODE);
        }
        options.open(&self.path)
    }

    /// Make sure the log file exists without truncating it. Idempotent.
    pub fn initialize(&self) -> Result<()> {
        let file = self
            .open_for_append()
            .map_err(|e| Error::io("initialize log file", self.label(), e))?;
        drop(file);
        Ok(())
    }

    /// Format one entry: timestamp, space, single-line message, newline.
    ///
    /// The result never exceeds [`MAX_ENTRY_LEN`] bytes.
    pub fn format_entry(message: &str) -> String {
        let line = format!("{} {}", timestamp(), single_line(message));
        let mut entry = bounded(&line, MAX_ENTRY_LEN - 1).into_owned();
        entry.push('\n');
        entry
    }

    /// Append one timestamped entry under an exclusive lock.
    ///
    /// Blocks until the lock is available. The timestamp is taken after the
    /// lock is acquired so entries from racing processes stay chronological
    /// in file order.
    pub fn append(&self, message: &str) -> Result<()> {
        let mut file = self
            .open_for_append()
            .map_err(|e| Error::io("open log file", self.label(), e))?;

        file.lock()
            .map_err(|e| Error::io("lock log file", self.label(), e))?;

        let entry = Self::format_entry(message);
        let written = file
            .write_all(entry.as_bytes())
            .map_err(|e| Error::io("write to log file", self.label(), e));

        // Unlock on every path, including a failed write.
        let unlocked = file
            .unlock()
            .map_err(|e| Error::io("unlock log file", self.label(), e));
        written?;
        unlocked?;

        file.sync_data()
            .map_err(|e| Error::io("sync log file", self.label(), e))
    }

    /// Read the whole log under a shared lock.
    pub fn dump(&self) -> Result<LogDump> {
        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(LogDump::Missing),
            Err(e) => return Err(Error::io("open log file", self.label(), e)),
        };

        file.lock_shared()
            .map_err(|e| Error::io("lock log file", self.label(), e))?;

        let mut buf = Vec::new();
        let read = file
            .read_to_end(&mut buf)
            .map_err(|e| Error::io("read log file", self.label(), e));
        let unlocked = file
            .unlock()
            .map_err(|e| Error::io("unlock log file", self.label(), e));
        read?;
        unlocked?;

        if buf.is_empty() {
            return Ok(LogDump::Empty);
        }
        Ok(LogDump::Contents(String::from_utf8_lossy(&buf).into_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::format::{TIMESTAMP_LEN, parse_timestamp};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::thread;

    fn log_in(dir: &tempfile::TempDir) -> OpLog {
        OpLog::new(dir.path().join(DEFAULT_LOG_FILE))
    }

    #[test]
    fn test_initialize_creates_and_never_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let log = log_in(&dir);
        log.initialize().unwrap();
        assert!(log.path().exists());

        log.append("first").unwrap();
        log.initialize().unwrap();
        let content = std::fs::read_to_string(log.path()).unwrap();
        assert!(content.ends_with(" first\n"));
    }

    #[test]
    fn test_entry_format() {
        let entry = OpLog::format_entry("File \"a.txt\" created successfully.");
        assert!(entry.ends_with(" File \"a.txt\" created successfully.\n"));
        assert!(parse_timestamp(&entry[..TIMESTAMP_LEN]).is_some());
        assert_eq!(&entry[TIMESTAMP_LEN..TIMESTAMP_LEN + 1], " ");
    }

    #[test]
    fn test_entry_is_bounded_and_single_line() {
        let entry = OpLog::format_entry(&"x".repeat(2000));
        assert_eq!(entry.len(), MAX_ENTRY_LEN);
        assert!(entry.ends_with('\n'));

        let entry = OpLog::format_entry("line one\nline two");
        assert_eq!(entry.matches('\n').count(), 1);
    }

    #[test]
    fn test_dump_states() {
        let dir = tempfile::tempdir().unwrap();
        let log = log_in(&dir);
        assert_eq!(log.dump().unwrap(), LogDump::Missing);
        assert_eq!(log.dump().unwrap().render(), "No logs available.\n");

        log.initialize().unwrap();
        assert_eq!(log.dump().unwrap(), LogDump::Empty);
        assert_eq!(log.dump().unwrap().render(), "Log file is empty.\n");

        log.append("hello").unwrap();
        let rendered = log.dump().unwrap().render();
        assert!(rendered.starts_with("Operation Logs:\n["));
        assert!(rendered.ends_with(" hello\n"));
    }

    #[test]
    fn test_render_adds_missing_newline() {
        let dump = LogDump::Contents("[2024-01-01 00:00:00] tail".into());
        assert_eq!(
            dump.render(),
            "Operation Logs:\n[2024-01-01 00:00:00] tail\n"
        );
    }

    #[test]
    fn test_concurrent_appenders_never_interleave() {
        let dir = tempfile::tempdir().unwrap();
        let log = Arc::new(log_in(&dir));
        log.initialize().unwrap();

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let log = Arc::clone(&log);
                thread::spawn(move || {
                    for i in 0..50 {
                        log.append(&format!("writer {} entry {}", t, i)).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let content = std::fs::read_to_string(log.path()).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 200);
        for line in lines {
            assert!(parse_timestamp(&line[..TIMESTAMP_LEN]).is_some(), "{line}");
            assert!(line[TIMESTAMP_LEN..].starts_with(" writer "), "{line}");
        }
    }

    #[test]
    fn test_append_reports_unwritable_location() {
        let dir = tempfile::tempdir().unwrap();
        let log = OpLog::new(dir.path().join("missing").join("log.txt"));
        let err = log.append("x").unwrap_err();
        assert!(err.to_string().starts_with("Could not open log file"));
        assert!(log.initialize().is_err());
    }
}
