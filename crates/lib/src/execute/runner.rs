//! Process runner.
//!
//! Spawns external programs from an argument vector (never a shell string),
//! with inherited stdio, and reports only how they exited.

use std::future::Future;

use tokio::process::Command;
use tracing::{debug, warn};

use super::Invocation;
use super::cancel::Cancellation;
use super::types::{ExecuteError, RunOutcome};

/// Runs one external process to completion.
pub trait ProcessRunner {
  /// Run `invocation`, killing it if `cancel` fires first.
  fn run(&self, invocation: &Invocation, cancel: &Cancellation)
  -> impl Future<Output = Result<RunOutcome, ExecuteError>>;
}

/// Runs real processes on the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
  async fn run(&self, invocation: &Invocation, cancel: &Cancellation) -> Result<RunOutcome, ExecuteError> {
    let mut command = Command::new(&invocation.program);
    command
      .args(&invocation.args)
      .current_dir(&invocation.cwd)
      .kill_on_drop(true);

    debug!(program = %invocation.program, working_dir = ?invocation.cwd, "spawning process");

    let mut child = command.spawn().map_err(|source| ExecuteError::Spawn {
      program: invocation.program.clone(),
      source,
    })?;

    tokio::select! {
      status = child.wait() => {
        let status = status.map_err(|source| ExecuteError::Wait {
          program: invocation.program.clone(),
          source,
        })?;
        debug!(program = %invocation.program, code = ?status.code(), "process exited");
        Ok(RunOutcome::Exited { code: status.code() })
      }
      _ = cancel.cancelled() => {
        warn!(program = %invocation.program, "cancelled, killing process");
        if let Err(e) = child.kill().await {
          warn!(program = %invocation.program, error = %e, "failed to kill process");
        }
        Ok(RunOutcome::Cancelled)
      }
    }
  }
}
