//! Command dispatch
//!
//! Maps token 0 of an [`ArgVec`] onto a registered [`Operation`], checks the
//! operand count, runs the operation and folds every error into an
//! [`ExecResult`]. Nothing here can fail the process: usage errors are
//! reported before any operation runs, and each command is independent of
//! the ones before it.

mod state;

pub use state::{ExecResult, Status};

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::error::{Arity, Error};
use crate::fs::FileSystem;
use crate::ops::{self, Context, Operation, fail};
use crate::oplog::OpLog;
use crate::parser::ArgVec;

/// Registry of operations keyed by command name.
pub struct Dispatcher {
    ops: HashMap<&'static str, Box<dyn Operation>>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    /// Create a dispatcher with the full command set registered.
    pub fn new() -> Self {
        let mut ops: HashMap<&'static str, Box<dyn Operation>> = HashMap::new();

        ops.insert("createDir", Box::new(ops::CreateDir));
        ops.insert("createFile", Box::new(ops::CreateFile));
        ops.insert("listDir", Box::new(ops::ListDir));
        ops.insert("listFilesByExtension", Box::new(ops::ListFilesByExtension));
        ops.insert("readFile", Box::new(ops::ReadFile));
        ops.insert("appendToFile", Box::new(ops::AppendToFile));
        ops.insert("deleteFile", Box::new(ops::DeleteFile));
        ops.insert("deleteDir", Box::new(ops::DeleteDir));
        ops.insert("showLogs", Box::new(ops::ShowLogs));
        ops.insert("exit", Box::new(ops::Exit));
        ops.insert("quit", Box::new(ops::Exit));
        ops.insert("help", Box::new(ops::Help));

        Self { ops }
    }

    /// Register an operation under `name`, replacing any existing one.
    pub fn register(&mut self, name: &'static str, op: Box<dyn Operation>) {
        self.ops.insert(name, op);
    }

    /// Known command names, sorted.
    pub fn commands(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.ops.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Route `args` to its operation.
    ///
    /// An empty vector is a no-op success.
    pub async fn dispatch(
        &self,
        args: &ArgVec,
        cwd: Option<&Path>,
        fs: Arc<dyn FileSystem>,
        log: &OpLog,
    ) -> ExecResult {
        let Some(name) = args.command() else {
            return ExecResult::default();
        };

        let Some(op) = self.ops.get(name) else {
            #[cfg(feature = "logging")]
            tracing::debug!(target: "fileman::dispatch", command = name, "unknown command");
            return fail(Error::UnknownCommand(name.to_string()));
        };

        let operands = args.operands();
        if let Some(expected) = op.arity()
            && operands.len() != expected
        {
            return fail(Error::Arity {
                command: op.name(),
                expected: Arity(expected),
            });
        }

        #[cfg(feature = "logging")]
        tracing::debug!(
            target: "fileman::dispatch",
            command = name,
            operands = operands.len(),
            truncated = args.is_truncated(),
            "dispatch"
        );

        let ctx = Context {
            args: operands,
            cwd,
            fs,
            log,
        };
        match op.execute(ctx).await {
            Ok(result) => result,
            Err(e) => fail(e),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fs::RealFs;
    use crate::parser::Lexer;
    use pretty_assertions::assert_eq;

    struct Env {
        dir: tempfile::TempDir,
        log: OpLog,
        fs: Arc<dyn FileSystem>,
        dispatcher: Dispatcher,
    }

    impl Env {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let log = OpLog::new(dir.path().join("log.txt"));
            Self {
                dir,
                log,
                fs: Arc::new(RealFs::new()),
                dispatcher: Dispatcher::new(),
            }
        }

        async fn run(&self, line: &str) -> ExecResult {
            let args = Lexer::tokenize(line);
            self.dispatcher
                .dispatch(&args, Some(self.dir.path()), Arc::clone(&self.fs), &self.log)
                .await
        }
    }

    #[tokio::test]
    async fn test_unknown_command() {
        let env = Env::new();
        let result = env.run("fooBar x").await;
        assert_eq!(result.status, Status::Failure);
        assert_eq!(result.stderr, "Error: Unknown command 'fooBar'\n");
        assert!(!env.log.path().exists());
    }

    #[tokio::test]
    async fn test_arity_is_exact() {
        let env = Env::new();
        let result = env.run("createDir").await;
        assert_eq!(result.stderr, "Error: createDir requires one argument\n");

        let result = env.run("createDir a b").await;
        assert_eq!(result.stderr, "Error: createDir requires one argument\n");
        assert!(!env.dir.path().join("a").exists());

        let result = env.run("appendToFile a.txt").await;
        assert_eq!(result.stderr, "Error: appendToFile requires two arguments\n");

        let result = env.run("showLogs extra").await;
        assert_eq!(result.stderr, "Error: showLogs requires no arguments\n");
    }

    #[tokio::test]
    async fn test_truncated_line_fails_arity() {
        let env = Env::new();
        let result = env.run("appendToFile a.txt hello world again").await;
        assert_eq!(result.stderr, "Error: appendToFile requires two arguments\n");
    }

    #[tokio::test]
    async fn test_empty_line_is_noop() {
        let env = Env::new();
        let result = env.run("   ").await;
        assert!(result.is_success());
        assert!(result.stdout.is_empty() && result.stderr.is_empty());
    }

    #[tokio::test]
    async fn test_exit_and_quit_terminate() {
        let env = Env::new();
        assert!(env.run("exit").await.is_terminate());
        assert!(env.run("quit now please").await.is_terminate());
    }

    #[tokio::test]
    async fn test_help_ignores_operands() {
        let env = Env::new();
        let result = env.run("help me").await;
        assert!(result.is_success());
        assert_eq!(result.stdout, ops::HELP_TEXT);
    }

    #[tokio::test]
    async fn test_quoted_name_reaches_operation() {
        let env = Env::new();
        let result = env.run("createFile \"my file.txt\"").await;
        assert_eq!(result.stdout, "File \"my file.txt\" created successfully.\n");
        assert!(env.dir.path().join("my file.txt").is_file());
    }

    #[test]
    fn test_command_set_is_closed() {
        assert_eq!(
            Dispatcher::new().commands(),
            vec![
                "appendToFile",
                "createDir",
                "createFile",
                "deleteDir",
                "deleteFile",
                "exit",
                "help",
                "listDir",
                "listFilesByExtension",
                "quit",
                "readFile",
                "showLogs",
            ]
        );
    }
}
