//! Directory operations - createDir, listDir, listFilesByExtension, deleteDir

use async_trait::async_trait;
use std::fmt::Write;

use super::{Context, Operation, fail, named};
use crate::dispatcher::ExecResult;
use crate::error::{Entity, Error, Result};

/// The createDir operation - create one directory.
///
/// Usage: createDir DIRECTORY
pub struct CreateDir;

#[async_trait]
impl Operation for CreateDir {
    fn name(&self) -> &'static str {
        "createDir"
    }

    fn arity(&self) -> Option<usize> {
        Some(1)
    }

    async fn execute(&self, ctx: Context<'_>) -> Result<ExecResult> {
        let name = ctx.operand(self.name(), 1, 0)?;
        let path = ctx.resolve(name);

        if ctx.fs.is_dir(&path).await {
            return Ok(fail(Error::already_exists(Entity::Directory, name)));
        }

        if let Err(e) = ctx.fs.create_dir(&path).await {
            return Ok(fail(named(e, name)));
        }

        let mut result =
            ExecResult::ok(format!("Directory \"{}\" created successfully.\n", name));
        ctx.record(
            format!("Directory \"{}\" created successfully.", name),
            &mut result,
        )
        .await;
        Ok(result)
    }
}

/// The listDir operation - list a directory's entries.
///
/// Usage: listDir DIRECTORY
///
/// Subdirectories are tagged `[DIR]`. Order is whatever the filesystem
/// enumerates.
pub struct ListDir;

#[async_trait]
impl Operation for ListDir {
    fn name(&self) -> &'static str {
        "listDir"
    }

    fn arity(&self) -> Option<usize> {
        Some(1)
    }

    async fn execute(&self, ctx: Context<'_>) -> Result<ExecResult> {
        let name = ctx.operand(self.name(), 1, 0)?;
        let path = ctx.resolve(name);

        if !ctx.fs.is_dir(&path).await {
            return Ok(fail(Error::not_found(Entity::Directory, name)));
        }

        let entries = match ctx.fs.read_dir(&path).await {
            Ok(entries) => entries,
            Err(e) => return Ok(fail(named(e, name))),
        };

        let mut stdout = format!("Contents of directory \"{}\":\n", name);
        for entry in &entries {
            if entry.file_type.is_dir() {
                let _ = writeln!(stdout, "  [DIR] {}", entry.name);
            } else {
                let _ = writeln!(stdout, "  {}", entry.name);
            }
        }
        if entries.is_empty() {
            stdout.push_str("  (empty directory)\n");
        }

        let mut result = ExecResult::ok(stdout);
        ctx.record(
            format!("Listed contents of directory \"{}\".", name),
            &mut result,
        )
        .await;
        Ok(result)
    }
}

/// The listFilesByExtension operation - list regular files ending in a suffix.
///
/// Usage: listFilesByExtension DIRECTORY SUFFIX
///
/// SUFFIX is matched literally and case-sensitively, so the caller supplies
/// the dot (`.txt`). A name equal to the suffix does not match.
pub struct ListFilesByExtension;

/// True if `name` is strictly longer than `suffix` and ends with it.
fn has_suffix(name: &str, suffix: &str) -> bool {
    name.len() > suffix.len() && name.ends_with(suffix)
}

#[async_trait]
impl Operation for ListFilesByExtension {
    fn name(&self) -> &'static str {
        "listFilesByExtension"
    }

    fn arity(&self) -> Option<usize> {
        Some(2)
    }

    async fn execute(&self, ctx: Context<'_>) -> Result<ExecResult> {
        let name = ctx.operand(self.name(), 2, 0)?;
        let suffix = ctx.operand(self.name(), 2, 1)?;
        let path = ctx.resolve(name);

        if !ctx.fs.is_dir(&path).await {
            return Ok(fail(Error::not_found(Entity::Directory, name)));
        }

        let entries = match ctx.fs.read_dir(&path).await {
            Ok(entries) => entries,
            Err(e) => return Ok(fail(named(e, name))),
        };

        let matches: Vec<_> = entries
            .iter()
            .filter(|e| e.file_type.is_file() && has_suffix(&e.name, suffix))
            .collect();

        let mut stdout = format!(
            "Files with extension \"{}\" in directory \"{}\":\n",
            suffix, name
        );
        for entry in &matches {
            let _ = writeln!(stdout, "  {}", entry.name);
        }
        if matches.is_empty() {
            let _ = writeln!(
                stdout,
                "No files with extension \"{}\" found in \"{}\".",
                suffix, name
            );
        }

        let mut result = ExecResult::ok(stdout);
        ctx.record(
            format!(
                "Listed files with extension \"{}\" in directory \"{}\".",
                suffix, name
            ),
            &mut result,
        )
        .await;
        Ok(result)
    }
}

/// The deleteDir operation - remove an empty directory.
///
/// Usage: deleteDir DIRECTORY
///
/// Never recursive: a directory with any entry is refused.
pub struct DeleteDir;

#[async_trait]
impl Operation for DeleteDir {
    fn name(&self) -> &'static str {
        "deleteDir"
    }

    fn arity(&self) -> Option<usize> {
        Some(1)
    }

    async fn execute(&self, ctx: Context<'_>) -> Result<ExecResult> {
        let name = ctx.operand(self.name(), 1, 0)?;
        let path = ctx.resolve(name);

        if !ctx.fs.is_dir(&path).await {
            return Ok(fail(Error::not_found(Entity::Directory, name)));
        }

        if let Err(e) = ctx.fs.remove_empty_dir(&path).await {
            return Ok(fail(named(e, name)));
        }

        let mut result =
            ExecResult::ok(format!("Directory \"{}\" deleted successfully.\n", name));
        ctx.record(
            format!("Directory \"{}\" deleted successfully.", name),
            &mut result,
        )
        .await;
        Ok(result)
    }
}
