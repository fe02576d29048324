//! File manager operations
//!
//! Each filesystem operation follows the same sequence:
//! 1. precondition: existence check on the target; a violation is reported
//!    with no side effect and no log entry
//! 2. effect: the mutation or read, performed through [`FileSystem`]
//! 3. log: on success only, one entry in the operation log; a logging
//!    failure is reported but never undoes the effect
//! 4. report: a confirmation naming the target on stdout
//!
//! Implement [`Operation`] and register it with the
//! [`Dispatcher`](crate::Dispatcher) to add a command.

mod dirops;
mod fileops;
mod flow;
mod logs;

pub use dirops::{CreateDir, DeleteDir, ListDir, ListFilesByExtension};
pub use fileops::{AppendToFile, CreateFile, DeleteFile, ReadFile};
pub use flow::{Exit, HELP_TEXT, Help};
pub use logs::ShowLogs;

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::dispatcher::ExecResult;
use crate::error::{Arity, Error, Result};
use crate::fs::{FileSystem, isolated};
use crate::oplog::OpLog;

/// Execution context for one operation.
pub struct Context<'a> {
    /// Operands (not including the command name).
    ///
    /// For `appendToFile a.txt hello`, this contains `["a.txt", "hello"]`.
    pub args: &'a [String],

    /// Directory relative operands resolve against; `None` means the process cwd.
    pub cwd: Option<&'a Path>,

    /// Filesystem capabilities.
    pub fs: Arc<dyn FileSystem>,

    /// Shared operation log.
    pub log: &'a OpLog,
}

impl Context<'_> {
    /// Resolve a user-supplied path against the context's cwd.
    pub fn resolve(&self, arg: &str) -> PathBuf {
        match self.cwd {
            Some(cwd) => cwd.join(arg),
            None => PathBuf::from(arg),
        }
    }

    /// Operand `index`, or an arity error naming `command`.
    pub fn operand(&self, command: &'static str, expected: usize, index: usize) -> Result<&str> {
        self.args
            .get(index)
            .map(String::as_str)
            .ok_or(Error::Arity {
                command,
                expected: Arity(expected),
            })
    }

    /// Append `message` to the operation log after a successful effect.
    ///
    /// Failures land on `result.stderr`; the result keeps its status.
    pub async fn record(&self, message: String, result: &mut ExecResult) {
        let log = self.log.clone();
        if let Err(e) = isolated(self.log.path(), move || log.append(&message)).await {
            #[cfg(feature = "logging")]
            tracing::warn!(target: "fileman::oplog", error = %e, "operation log entry dropped");
            result.stderr.push_str(&report(&e));
        }
    }
}

/// Trait for implementing operations.
#[async_trait]
pub trait Operation: Send + Sync {
    /// Canonical command name.
    fn name(&self) -> &'static str;

    /// Exact operand count, or `None` if extra operands are ignored.
    fn arity(&self) -> Option<usize>;

    /// Execute the operation.
    ///
    /// * `Ok(ExecResult)` - reported outcome, success or failure
    /// * `Err(Error)` - fault the dispatcher reports on the operation's behalf
    async fn execute(&self, ctx: Context<'_>) -> Result<ExecResult>;
}

/// Render an error the way it appears on the error stream.
pub fn report(err: &Error) -> String {
    format!("Error: {}\n", err)
}

/// Failed result carrying `err`.
pub(crate) fn fail(err: Error) -> ExecResult {
    ExecResult::err(report(&err))
}

/// Re-label a backend error with the path as the user typed it.
pub(crate) fn named(err: Error, user_path: &str) -> Error {
    match err {
        Error::AlreadyExists { kind, .. } => Error::already_exists(kind, user_path),
        Error::NotFound { kind, .. } => Error::not_found(kind, user_path),
        Error::NotEmpty(_) => Error::NotEmpty(user_path.to_string()),
        Error::Abnormal(_) => Error::Abnormal(user_path.to_string()),
        Error::Io { action, source, .. } => Error::io(action, user_path, source),
        other => other,
    }
}
