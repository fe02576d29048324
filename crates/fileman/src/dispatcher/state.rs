//! Operation result types

/// Outcome of one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    /// The command did what it was asked.
    #[default]
    Success,
    /// Reported failure; a session may continue with the next command.
    Failure,
    /// `exit`/`quit`: stop processing commands. Not an error.
    Terminate,
}

/// Result of executing one command.
#[derive(Debug, Clone, Default)]
pub struct ExecResult {
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
    /// Outcome
    pub status: Status,
}

impl ExecResult {
    /// Create a successful result with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            status: Status::Success,
        }
    }

    /// Create a failed result with the given stderr.
    pub fn err(stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            status: Status::Failure,
        }
    }

    /// Create a result asking the caller to stop.
    pub fn terminate() -> Self {
        Self {
            status: Status::Terminate,
            ..Self::default()
        }
    }

    /// Check if the result indicates success.
    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    pub fn is_terminate(&self) -> bool {
        self.status == Status::Terminate
    }

    /// Process exit status: 0 unless the command failed.
    pub fn exit_code(&self) -> i32 {
        match self.status {
            Status::Success | Status::Terminate => 0,
            Status::Failure => 1,
        }
    }
}
