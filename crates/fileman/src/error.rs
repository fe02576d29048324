//! Error types for Fileman
//!
//! Every variant renders as a sentence that names the target path, so the
//! dispatcher can report it verbatim on the error stream. Variants follow the
//! failure categories the tool distinguishes:
//! - precondition violations (`AlreadyExists`, `NotFound`, `NotEmpty`)
//! - I/O failures at a named step (`Io`)
//! - usage errors (`UnknownCommand`, `Arity`, `TooManyArguments`)
//! - abnormal termination of an isolated effect (`Abnormal`)

use std::fmt;
use thiserror::Error;

/// Result type alias using Fileman's Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Kind of filesystem entity an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    File,
    Directory,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::File => f.write_str("File"),
            Entity::Directory => f.write_str("Directory"),
        }
    }
}

/// Fileman error types.
#[derive(Error, Debug)]
pub enum Error {
    /// Target must not exist but does.
    #[error("{kind} \"{path}\" already exists.")]
    AlreadyExists { kind: Entity, path: String },

    /// Target must exist but does not.
    #[error("{kind} \"{path}\" not found.")]
    NotFound { kind: Entity, path: String },

    /// Directory still holds entries.
    #[error("Directory \"{0}\" is not empty.")]
    NotEmpty(String),

    /// A filesystem step failed; `action` names the step ("create file", "lock log file").
    #[error("Could not {action} \"{path}\": {source}")]
    Io {
        action: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// First token is not a known command.
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),

    /// Command received the wrong number of arguments.
    #[error("{command} requires {expected}")]
    Arity {
        command: &'static str,
        expected: Arity,
    },

    /// More arguments than the argument vector can hold.
    #[error("Too many arguments")]
    TooManyArguments,

    /// An isolated filesystem effect panicked or was cancelled before reporting.
    #[error("Operation on \"{0}\" terminated abnormally")]
    Abnormal(String),

    /// Internal error for unexpected failures.
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Build an [`Error::Io`] for a failed step on `path`.
    pub fn io(action: &'static str, path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    pub fn not_found(kind: Entity, path: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            path: path.into(),
        }
    }

    pub fn already_exists(kind: Entity, path: impl Into<String>) -> Self {
        Self::AlreadyExists {
            kind,
            path: path.into(),
        }
    }

    /// True for usage errors, which are reported before any operation runs.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Error::UnknownCommand(_) | Error::Arity { .. } | Error::TooManyArguments
        )
    }
}

/// Exact argument count a command takes after its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity(pub usize);

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => f.write_str("no arguments"),
            1 => f.write_str("one argument"),
            2 => f.write_str("two arguments"),
            n => write!(f, "{} arguments", n),
        }
    }
}
