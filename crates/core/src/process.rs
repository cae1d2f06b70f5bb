//! Child-process execution for installer steps.
//!
//! Steps are other setup binaries. They log straight to the parent's
//! terminal, so stdio is inherited rather than captured; only the exit
//! status and wall-clock duration come back.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::process::Command;

/// Environment and limits applied to a step's child process.
#[derive(Debug, Clone)]
pub struct StepInput {
    /// Additional environment variables set for the child process.
    pub env_vars: Vec<(String, String)>,
    /// Working directory for the child process (uses current dir if `None`).
    pub working_directory: Option<PathBuf>,
    /// Maximum wall-clock time before the process is killed.
    pub timeout: Duration,
}

impl Default for StepInput {
    fn default() -> Self {
        Self {
            env_vars: Vec::new(),
            working_directory: None,
            timeout: Duration::from_secs(300),
        }
    }
}

/// Result of a child process that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutput {
    /// Process exit code (`-1` if killed by signal).
    pub exit_code: i32,
    pub duration_ms: u64,
}

impl StepOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("Program not found: {0}")]
    NotFound(String),

    #[error("Step timed out after {elapsed_ms}ms")]
    Timeout { elapsed_ms: u64 },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Spawn `cmd`, wait for it under `input.timeout`, and report its exit code.
///
/// The child is killed when the timeout fires.
pub async fn run_command(cmd: &mut Command, input: StepInput) -> Result<StepOutput, StepError> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(true);

    for (key, value) in &input.env_vars {
        cmd.env(key, value);
    }

    if let Some(dir) = &input.working_directory {
        cmd.current_dir(dir);
    }

    let program = cmd.as_std().get_program().to_string_lossy().into_owned();
    let start = Instant::now();

    let mut child = cmd.spawn().map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => StepError::NotFound(program),
        _ => StepError::IoError(e),
    })?;

    match tokio::time::timeout(input.timeout, child.wait()).await {
        Ok(Ok(status)) => Ok(StepOutput {
            exit_code: status.code().unwrap_or(-1),
            duration_ms: start.elapsed().as_millis() as u64,
        }),
        Ok(Err(e)) => Err(StepError::IoError(e)),
        // `child` drops here and `kill_on_drop` terminates it.
        Err(_elapsed) => Err(StepError::Timeout {
            elapsed_ms: start.elapsed().as_millis() as u64,
        }),
    }
}
