//! Command-line parsing
//!
//! Turns one line of input (or an argv list) into a bounded [`ArgVec`]:
//! the command name followed by its operands.

mod lexer;

pub use lexer::Lexer;

use crate::error::{Error, Result};

/// Maximum number of tokens in one command, name included.
pub const MAX_ARGS: usize = 4;

/// Owned argument vector holding at most [`MAX_ARGS`] entries.
///
/// Entries past the parsed count do not exist; there is no padding with
/// empty strings. Each parse allocates a fresh vector that is dropped once
/// the command completes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgVec {
    args: Vec<String>,
    truncated: bool,
}

impl ArgVec {
    pub(crate) fn complete(args: Vec<String>) -> Self {
        debug_assert!(args.len() <= MAX_ARGS);
        Self {
            args,
            truncated: false,
        }
    }

    pub(crate) fn cut(args: Vec<String>) -> Self {
        debug_assert!(args.len() == MAX_ARGS);
        Self {
            args,
            truncated: true,
        }
    }

    /// Build from an argv-style list, rejecting more than [`MAX_ARGS`] entries.
    pub fn from_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out = Vec::with_capacity(MAX_ARGS);
        for arg in args {
            if out.len() == MAX_ARGS {
                return Err(Error::TooManyArguments);
            }
            out.push(arg.into());
        }
        Ok(Self::complete(out))
    }

    /// Number of arguments, name included.
    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// True if the source line held more tokens than fit.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// The command name (token 0).
    pub fn command(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }

    /// Operands after the command name.
    pub fn operands(&self) -> &[String] {
        self.args.get(1..).unwrap_or(&[])
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.args
    }

    pub fn into_vec(self) -> Vec<String> {
        self.args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_args_bound() {
        let args = ArgVec::from_args(["createFile", "a.txt"]).unwrap();
        assert_eq!(args.command(), Some("createFile"));
        assert_eq!(args.operands(), &["a.txt"]);
        assert_eq!(args.get(2), None);

        let err = ArgVec::from_args(["a", "b", "c", "d", "e"]).unwrap_err();
        assert!(matches!(err, Error::TooManyArguments));
    }

    #[test]
    fn test_empty_vector() {
        let args = ArgVec::default();
        assert!(args.is_empty());
        assert_eq!(args.command(), None);
        assert!(args.operands().is_empty());
    }
}
