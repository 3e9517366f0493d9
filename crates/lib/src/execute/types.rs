//! Types for artifact execution.
//!
//! This module defines the error types, process outcomes, and per-artifact
//! results produced by the build executor.

use std::fmt;

use thiserror::Error;

use crate::artifact::ArtifactKind;
use crate::compiler::CompilerId;
use crate::platform::Platform;

use super::Invocation;

/// Errors raised while talking to an external process.
///
/// These never escape a build: the executor folds them into
/// [`BuildOutcome::SpawnFailed`] or [`BuildOutcome::WaitFailed`].
#[derive(Debug, Error)]
pub enum ExecuteError {
  /// The program could not be started (missing, not executable, ...).
  #[error("failed to start {program}: {source}")]
  Spawn {
    program: String,
    #[source]
    source: std::io::Error,
  },

  /// The program started but its exit status could not be collected.
  #[error("failed to wait for {program}: {source}")]
  Wait {
    program: String,
    #[source]
    source: std::io::Error,
  },
}

/// How an external process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
  /// The process exited on its own. `code` is `None` when it was killed by
  /// a signal.
  Exited { code: Option<i32> },
  /// The session was cancelled and the process was killed.
  Cancelled,
}

impl RunOutcome {
  pub fn exited(code: i32) -> Self {
    Self::Exited { code: Some(code) }
  }
}

/// Outcome of one artifact in a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
  Succeeded,
  /// The compiler ran and exited non-zero (or was killed by a signal).
  CompilationFailed { exit_code: Option<i32> },
  /// The compiler could not be run at all.
  SpawnFailed { message: String },
  /// The compiler started but its exit status was lost.
  WaitFailed { message: String },
  /// The platform cannot produce this kind of artifact; nothing was spawned.
  UnsupportedPlatform { platform: Platform },
  /// The compiler was running when the session was cancelled.
  Interrupted,
  /// Never attempted because the session was cancelled earlier.
  Skipped,
}

impl BuildOutcome {
  pub fn is_success(&self) -> bool {
    matches!(self, Self::Succeeded)
  }

  /// Short status word used in reports.
  pub fn label(&self) -> &'static str {
    match self {
      Self::Succeeded => "success",
      Self::CompilationFailed { .. } | Self::SpawnFailed { .. } | Self::WaitFailed { .. } => "failed",
      Self::UnsupportedPlatform { .. } => "unsupported",
      Self::Interrupted => "interrupted",
      Self::Skipped => "skipped",
    }
  }

  /// The raw exit code of the compiler, when it exited with one.
  pub fn exit_code(&self) -> Option<i32> {
    match self {
      Self::Succeeded => Some(0),
      Self::CompilationFailed { exit_code } => *exit_code,
      _ => None,
    }
  }

  /// Parenthesised detail appended to the report line, if any.
  pub fn detail(&self) -> Option<String> {
    match self {
      Self::CompilationFailed { exit_code: Some(code) } => Some(format!("exit code {}", code)),
      Self::CompilationFailed { exit_code: None } => Some("terminated by signal".to_string()),
      Self::SpawnFailed { message } => Some(format!("could not start: {}", message)),
      Self::WaitFailed { message } => Some(format!("exit status unknown: {}", message)),
      Self::UnsupportedPlatform { platform } => Some(format!("unsupported platform: {}", platform)),
      Self::Succeeded | Self::Interrupted | Self::Skipped => None,
    }
  }
}

/// Result of attempting one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildResult {
  pub artifact: &'static str,
  pub kind: ArtifactKind,
  /// Copied from [`ArtifactSpec::is_required`](crate::artifact::ArtifactSpec::is_required):
  /// a failure here fails the session.
  pub required: bool,
  /// The compiler that was (or would have been) invoked.
  pub compiler: CompilerId,
  /// Output file, relative to the project directory. `None` when the
  /// platform could not name it.
  pub output: Option<String>,
  /// The exact invocation, when one was constructed.
  pub command: Option<Invocation>,
  pub outcome: BuildOutcome,
}

impl BuildResult {
  pub fn succeeded(&self) -> bool {
    self.outcome.is_success()
  }
}

impl fmt::Display for BuildResult {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {} via {}", self.outcome.label(), self.artifact, self.compiler)?;
    if let Some(detail) = self.outcome.detail() {
      write!(f, " ({})", detail)?;
    }
    Ok(())
  }
}
