//! The showLogs operation

use async_trait::async_trait;

use super::{Context, Operation, fail};
use crate::dispatcher::ExecResult;
use crate::error::Result;
use crate::fs::isolated;

/// The showLogs operation - print the whole operation log.
///
/// Usage: showLogs
///
/// Reads under a shared lock. Does not add an entry of its own.
pub struct ShowLogs;

#[async_trait]
impl Operation for ShowLogs {
    fn name(&self) -> &'static str {
        "showLogs"
    }

    fn arity(&self) -> Option<usize> {
        Some(0)
    }

    async fn execute(&self, ctx: Context<'_>) -> Result<ExecResult> {
        let log = ctx.log.clone();
        match isolated(ctx.log.path(), move || log.dump()).await {
            Ok(dump) => Ok(ExecResult::ok(dump.render())),
            Err(e) => Ok(fail(e)),
        }
    }
}
