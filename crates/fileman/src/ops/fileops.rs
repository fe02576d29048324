//! File operations - createFile, readFile, appendToFile, deleteFile

use async_trait::async_trait;

use super::{Context, Operation, fail, named};
use crate::dispatcher::ExecResult;
use crate::error::{Entity, Error, Result};
use crate::format::timestamp;

/// The createFile operation - create a file seeded with the current timestamp.
///
/// Usage: createFile FILE
pub struct CreateFile;

#[async_trait]
impl Operation for CreateFile {
    fn name(&self) -> &'static str {
        "createFile"
    }

    fn arity(&self) -> Option<usize> {
        Some(1)
    }

    async fn execute(&self, ctx: Context<'_>) -> Result<ExecResult> {
        let name = ctx.operand(self.name(), 1, 0)?;
        let path = ctx.resolve(name);

        if ctx.fs.is_file(&path).await {
            return Ok(fail(Error::already_exists(Entity::File, name)));
        }

        // Exclusive create: a file that appears after the check still fails here.
        let seed = timestamp();
        if let Err(e) = ctx.fs.create_file(&path, seed.as_bytes()).await {
            return Ok(fail(named(e, name)));
        }

        let mut result = ExecResult::ok(format!("File \"{}\" created successfully.\n", name));
        ctx.record(format!("File \"{}\" created successfully.", name), &mut result)
            .await;
        Ok(result)
    }
}

/// The readFile operation - print a file's content.
///
/// Usage: readFile FILE
///
/// Output is text: bytes that are not valid UTF-8 print as U+FFFD.
pub struct ReadFile;

#[async_trait]
impl Operation for ReadFile {
    fn name(&self) -> &'static str {
        "readFile"
    }

    fn arity(&self) -> Option<usize> {
        Some(1)
    }

    async fn execute(&self, ctx: Context<'_>) -> Result<ExecResult> {
        let name = ctx.operand(self.name(), 1, 0)?;
        let path = ctx.resolve(name);

        if !ctx.fs.is_file(&path).await {
            return Ok(fail(Error::not_found(Entity::File, name)));
        }

        let content = match ctx.fs.read_file(&path).await {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => return Ok(fail(named(e, name))),
        };

        let mut stdout = format!("Contents of \"{}\":\n", name);
        stdout.push_str(&content);
        if !content.is_empty() && !content.ends_with('\n') {
            stdout.push('\n');
        }

        let mut result = ExecResult::ok(stdout);
        ctx.record(format!("File \"{}\" read successfully.", name), &mut result)
            .await;
        Ok(result)
    }
}

/// The appendToFile operation - append text to an existing file.
///
/// Usage: appendToFile FILE TEXT
///
/// A non-empty file that does not end in a newline gets one before TEXT.
/// Concurrent appenders are serialized with a blocking exclusive lock.
pub struct AppendToFile;

#[async_trait]
impl Operation for AppendToFile {
    fn name(&self) -> &'static str {
        "appendToFile"
    }

    fn arity(&self) -> Option<usize> {
        Some(2)
    }

    async fn execute(&self, ctx: Context<'_>) -> Result<ExecResult> {
        let name = ctx.operand(self.name(), 2, 0)?;
        let text = ctx.operand(self.name(), 2, 1)?;
        let path = ctx.resolve(name);

        if !ctx.fs.is_file(&path).await {
            return Ok(fail(Error::not_found(Entity::File, name)));
        }

        if let Err(e) = ctx.fs.append_entry(&path, text.as_bytes()).await {
            return Ok(fail(named(e, name)));
        }

        let mut result = ExecResult::ok(format!(
            "Content appended to file \"{}\" successfully.\n",
            name
        ));
        ctx.record(format!("Content appended to file \"{}\".", name), &mut result)
            .await;
        Ok(result)
    }
}

/// The deleteFile operation - remove a regular file.
///
/// Usage: deleteFile FILE
pub struct DeleteFile;

#[async_trait]
impl Operation for DeleteFile {
    fn name(&self) -> &'static str {
        "deleteFile"
    }

    fn arity(&self) -> Option<usize> {
        Some(1)
    }

    async fn execute(&self, ctx: Context<'_>) -> Result<ExecResult> {
        let name = ctx.operand(self.name(), 1, 0)?;
        let path = ctx.resolve(name);

        if !ctx.fs.is_file(&path).await {
            return Ok(fail(Error::not_found(Entity::File, name)));
        }

        if let Err(e) = ctx.fs.remove_file(&path).await {
            return Ok(fail(named(e, name)));
        }

        let mut result = ExecResult::ok(format!("File \"{}\" deleted successfully.\n", name));
        ctx.record(format!("File \"{}\" deleted successfully.", name), &mut result)
            .await;
        Ok(result)
    }
}
