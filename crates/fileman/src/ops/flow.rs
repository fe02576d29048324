//! Session control - exit, quit, help

use async_trait::async_trait;

use super::{Context, Operation};
use crate::dispatcher::ExecResult;
use crate::error::Result;

/// Static usage text printed by `help` and by the CLI when run without arguments.
pub const HELP_TEXT: &str = "\
Usage: fileman <command> [arguments]

Commands:

  createDir \"folderName\" - Create a new directory

  createFile \"fileName\" - Create a new file

  listDir \"folderName\" - List all files in a directory

  listFilesByExtension \"folderName\" \".txt\" - List files with specific extension

  readFile \"fileName\" - Read a file's content

  appendToFile \"fileName\" \"new content\" - Append content to a file

  deleteFile \"fileName\" - Delete a file

  deleteDir \"folderName\" - Delete an empty directory

  showLogs - Display operation logs

  help - Show this help

  exit | quit - End a session started with `fileman -`

";

/// The exit/quit operation - ask the caller to stop processing commands.
pub struct Exit;

#[async_trait]
impl Operation for Exit {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn arity(&self) -> Option<usize> {
        None
    }

    async fn execute(&self, _ctx: Context<'_>) -> Result<ExecResult> {
        Ok(ExecResult::terminate())
    }
}

/// The help operation - print usage. Always succeeds.
pub struct Help;

#[async_trait]
impl Operation for Help {
    fn name(&self) -> &'static str {
        "help"
    }

    fn arity(&self) -> Option<usize> {
        None
    }

    async fn execute(&self, _ctx: Context<'_>) -> Result<ExecResult> {
        Ok(ExecResult::ok(HELP_TEXT))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ops::testing::{Fixture, args};

    #[test]
    fn test_help_lists_every_command() {
        for name in [
            "createDir",
            "createFile",
            "listDir",
            "listFilesByExtension",
            "readFile",
            "appendToFile",
            "deleteFile",
            "deleteDir",
            "showLogs",
            "help",
            "exit",
            "quit",
        ] {
            assert!(HELP_TEXT.contains(name), "help text is missing {name}");
        }
    }

    #[tokio::test]
    async fn test_exit_terminates_without_output() {
        let fx = Fixture::new();
        let a = args(&["now"]);
        let result = Exit.execute(fx.ctx(&a)).await.unwrap();
        assert!(result.is_terminate());
        assert!(result.stdout.is_empty() && result.stderr.is_empty());
        assert!(fx.log_lines().is_empty());
    }
}
