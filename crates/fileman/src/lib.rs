//! Fileman - command-line file manager with a lock-serialized operation log
//!
//! Creates, reads, appends to and deletes files and directories, recording
//! every successful operation as one timestamped line in an append-only log
//! that concurrent processes share safely.
//!
//! # Example
//!
//! ```rust,no_run
//! use fileman::FileManager;
//!
//! #[tokio::main]
//! async fn main() -> fileman::Result<()> {
//!     let manager = FileManager::builder().cwd("/tmp/workspace").build();
//!     manager.initialize_log()?;
//!
//!     let result = manager.exec_line("createFile \"notes.txt\"").await;
//!     assert_eq!(result.stdout, "File \"notes.txt\" created successfully.\n");
//!
//!     let result = manager.exec_args(["appendToFile", "notes.txt", "hello"]).await;
//!     assert!(result.is_success());
//!     Ok(())
//! }
//! ```

mod dispatcher;
mod error;
mod format;
mod fs;
mod ops;
mod oplog;
mod parser;

pub use async_trait::async_trait;
pub use dispatcher::{Dispatcher, ExecResult, Status};
pub use error::{Arity, Entity, Error, Result};
pub use format::{TIMESTAMP_FORMAT, TIMESTAMP_LEN, bounded, format_timestamp, parse_timestamp, timestamp};
pub use fs::{DIR_MODE, DirEntry, FILE_MODE, FileSystem, FileType, RealFs};
pub use ops::{Context as OperationContext, HELP_TEXT, Operation, report};
pub use oplog::{DEFAULT_LOG_FILE, LogDump, MAX_ENTRY_LEN, OpLog};
pub use parser::{ArgVec, Lexer, MAX_ARGS};

use std::path::PathBuf;
use std::sync::Arc;

/// Main entry point for Fileman.
///
/// Owns the filesystem handle, the operation log and the command registry.
/// Every call is independent: no filesystem state is cached between commands.
pub struct FileManager {
    fs: Arc<dyn FileSystem>,
    log: OpLog,
    cwd: Option<PathBuf>,
    dispatcher: Dispatcher,
}

impl Default for FileManager {
    fn default() -> Self {
        Self::new()
    }
}

impl FileManager {
    /// Create a file manager on the host filesystem, logging to `log.txt`
    /// in the process working directory.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new FileManagerBuilder for customized configuration.
    pub fn builder() -> FileManagerBuilder {
        FileManagerBuilder::default()
    }

    /// The operation log this manager appends to.
    pub fn log(&self) -> &OpLog {
        &self.log
    }

    /// Make sure the log file exists.
    ///
    /// On failure callers should report the error and carry on: operations
    /// still run, and each log append reports its own failure.
    pub fn initialize_log(&self) -> Result<()> {
        self.log.initialize()
    }

    /// Tokenize one line of input and execute it.
    pub async fn exec_line(&self, line: &str) -> ExecResult {
        let args = Lexer::tokenize(line);
        self.exec(&args).await
    }

    /// Execute an argv-style command. More than [`MAX_ARGS`] entries is a usage error.
    pub async fn exec_args<I, S>(&self, args: I) -> ExecResult
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match ArgVec::from_args(args) {
            Ok(args) => self.exec(&args).await,
            Err(e) => ExecResult::err(report(&e)),
        }
    }

    /// Execute a parsed argument vector.
    pub async fn exec(&self, args: &ArgVec) -> ExecResult {
        self.dispatcher
            .dispatch(args, self.cwd.as_deref(), Arc::clone(&self.fs), &self.log)
            .await
    }
}

/// Builder for customized FileManager configuration.
#[derive(Default)]
pub struct FileManagerBuilder {
    fs: Option<Arc<dyn FileSystem>>,
    cwd: Option<PathBuf>,
    log_file: Option<PathBuf>,
    custom_ops: Vec<(&'static str, Box<dyn Operation>)>,
}

impl FileManagerBuilder {
    /// Set a custom filesystem.
    pub fn fs(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = Some(fs);
        self
    }

    /// Set the directory relative paths resolve against.
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Set the operation log location. Relative paths resolve against the cwd.
    pub fn log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// Register a custom operation under `name`.
    pub fn operation(mut self, name: &'static str, op: Box<dyn Operation>) -> Self {
        self.custom_ops.push((name, op));
        self
    }

    /// Build the FileManager instance.
    pub fn build(self) -> FileManager {
        let fs = self.fs.unwrap_or_else(|| Arc::new(RealFs::new()));
        let log_file = self
            .log_file
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));
        let log_path = match &self.cwd {
            Some(cwd) => cwd.join(log_file),
            None => log_file,
        };

        let mut dispatcher = Dispatcher::new();
        for (name, op) in self.custom_ops {
            dispatcher.register(name, op);
        }

        FileManager {
            fs,
            log: OpLog::new(log_path),
            cwd: self.cwd,
            dispatcher,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_log_resolves_against_cwd() {
        let manager = FileManager::builder().cwd("/srv/data").build();
        assert_eq!(manager.log().path(), std::path::Path::new("/srv/data/log.txt"));

        let manager = FileManager::builder()
            .cwd("/srv/data")
            .log_file("/var/log/fileman.log")
            .build();
        assert_eq!(
            manager.log().path(),
            std::path::Path::new("/var/log/fileman.log")
        );

        let manager = FileManager::new();
        assert_eq!(manager.log().path(), std::path::Path::new("log.txt"));
    }

    #[tokio::test]
    async fn test_exec_args_rejects_too_many() {
        let dir = tempfile::tempdir().unwrap();
        let manager = FileManager::builder().cwd(dir.path()).build();
        let result = manager
            .exec_args(["appendToFile", "a.txt", "b", "c", "d"])
            .await;
        assert_eq!(result.stderr, "Error: Too many arguments\n");
        assert_eq!(result.exit_code(), 1);
    }

    #[tokio::test]
    async fn test_exec_args_keeps_spaces() {
        let dir = tempfile::tempdir().unwrap();
        let manager = FileManager::builder().cwd(dir.path()).build();
        manager.exec_args(["createFile", "a b.txt"]).await;
        let result = manager
            .exec_args(["appendToFile", "a b.txt", "two words"])
            .await;
        assert!(result.is_success());
        let content = std::fs::read_to_string(dir.path().join("a b.txt")).unwrap();
        assert!(content.ends_with("\ntwo words"));
    }
}
