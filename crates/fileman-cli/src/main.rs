//! Fileman CLI - run one file-management command per invocation
//!
//! Usage:
//!   fileman createFile "notes.txt"           # Run a single command
//!   fileman appendToFile notes.txt "hello"   # Operands are taken verbatim
//!   fileman -                                # Read commands from stdin, one per line
//!   fileman                                  # Print usage
//!
//! The operation log defaults to `log.txt` in the working directory; set
//! `FILEMAN_LOG` to use another file. Diagnostics are off unless `RUST_LOG`
//! enables them; they go to stderr.
//!
//! A leading `--` is taken as the end-of-options marker and dropped.

use anyhow::{Context, Result};
use clap::Parser;
use fileman::{ExecResult, FileManager, HELP_TEXT};
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::flag;
use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the operation log path.
const LOG_ENV: &str = "FILEMAN_LOG";

/// Fileman - file manager with a shared operation log
#[derive(Parser, Debug)]
#[command(name = "fileman")]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Args {
    /// Command name followed by its operands, or `-` to read commands from stdin
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

/// Interrupt handling around command execution.
///
/// While no command runs, SIGINT and SIGTERM end the process at once. While a
/// command runs, the signal is only recorded so the command can finish and
/// release its locks; the process exits right after.
struct Interrupts {
    idle: Arc<AtomicBool>,
    pending: Arc<AtomicUsize>,
}

impl Interrupts {
    fn install() -> Result<Self> {
        let idle = Arc::new(AtomicBool::new(true));
        let pending = Arc::new(AtomicUsize::new(0));
        for signal in [SIGINT, SIGTERM] {
            flag::register_conditional_shutdown(signal, 128 + signal, Arc::clone(&idle))
                .context("Failed to install signal handler")?;
            flag::register_usize(signal, Arc::clone(&pending), signal as usize)
                .context("Failed to install signal handler")?;
        }
        Ok(Self { idle, pending })
    }

    fn begin(&self) {
        self.idle.store(false, Ordering::SeqCst);
    }

    /// Mark the command finished. Returns the signal received meanwhile, if any.
    fn end(&self) -> Option<i32> {
        self.idle.store(true, Ordering::SeqCst);
        match self.pending.load(Ordering::SeqCst) {
            0 => None,
            signal => Some(signal as i32),
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn emit(result: &ExecResult) {
    print!("{}", result.stdout);
    if !result.stderr.is_empty() {
        eprint!("{}", result.stderr);
    }
    let _ = io::stdout().flush();
    let _ = io::stderr().flush();
}

fn finish(code: i32) -> ! {
    let _ = io::stdout().flush();
    std::process::exit(code)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    if args.args.is_empty() {
        print!("{}", HELP_TEXT);
        finish(0);
    }

    let interrupts = Interrupts::install()?;

    let mut builder = FileManager::builder();
    if let Some(path) = std::env::var_os(LOG_ENV) {
        builder = builder.log_file(path);
    }
    let manager = builder.build();

    if let Err(e) = manager.initialize_log() {
        eprint!("{}", fileman::report(&e));
    }

    if args.args.len() == 1 && args.args[0] == "-" {
        let code = run_session(&manager, &interrupts).await?;
        finish(code);
    }

    interrupts.begin();
    let result = manager.exec_args(args.args).await;
    emit(&result);
    if let Some(signal) = interrupts.end() {
        tracing::debug!(signal, "interrupted during command");
        finish(128 + signal);
    }
    finish(result.exit_code())
}

/// Run commands read from stdin until EOF or `exit`/`quit`.
///
/// Exits 1 if any command failed, 0 otherwise.
async fn run_session(manager: &FileManager, interrupts: &Interrupts) -> Result<i32> {
    let stdin = io::stdin();
    let mut failed = false;

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read command from stdin")?;

        interrupts.begin();
        let result = manager.exec_line(&line).await;
        emit(&result);
        if let Some(signal) = interrupts.end() {
            tracing::debug!(signal, "interrupted during command");
            return Ok(128 + signal);
        }

        if result.is_terminate() {
            break;
        }
        failed |= !result.is_success();
    }

    Ok(if failed { 1 } else { 0 })
}
