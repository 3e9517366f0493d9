//! Types for a build session.

use std::path::PathBuf;

use thiserror::Error;

use crate::compiler::{CompilerError, CompilerId};
use crate::consts::{EXIT_INTERRUPTED, EXIT_OK, EXIT_PRIMARY_FAILED, EXIT_UNSUPPORTED_COMPILER};
use crate::execute::{BuildResult, Invocation};
use crate::platform::Platform;

/// Fatal errors: the session stops before any process is spawned.
#[derive(Debug, Error)]
pub enum SessionError {
  #[error(transparent)]
  UnsupportedCompiler(#[from] CompilerError),
}

impl SessionError {
  pub fn exit_code(&self) -> i32 {
    match self {
      Self::UnsupportedCompiler(_) => EXIT_UNSUPPORTED_COMPILER,
    }
  }
}

/// Inputs to one build session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
  /// Compiler name as given by the user; validated by the session.
  pub compiler: String,
  /// Overrides host detection when set.
  pub platform: Option<Platform>,
  /// Working directory of every compiler; sources and outputs are relative to it.
  pub project_dir: PathBuf,
  /// Run the primary executable after a successful build.
  pub smoke_test: bool,
  /// Arguments passed to the smoke-tested executable.
  pub smoke_args: Vec<String>,
  /// Also build the Go module.
  pub include_go: bool,
}

impl SessionOptions {
  pub fn new(compiler: impl Into<String>) -> Self {
    Self {
      compiler: compiler.into(),
      platform: None,
      project_dir: PathBuf::from("."),
      smoke_test: false,
      smoke_args: Vec::new(),
      include_go: false,
    }
  }
}

/// How the smoke test ended. The exit code is surfaced, not judged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmokeOutcome {
  Exited { code: Option<i32> },
  SpawnFailed { message: String },
  WaitFailed { message: String },
  Interrupted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmokeTest {
  pub command: Invocation,
  pub outcome: SmokeOutcome,
}

/// Everything that happened in one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSession {
  pub compiler: CompilerId,
  pub platform: Platform,
  /// One result per registry entry, in registry order.
  pub results: Vec<BuildResult>,
  pub smoke_test: Option<SmokeTest>,
  pub cancelled: bool,
}

impl BuildSession {
  /// The primary executable's result: the first required entry.
  pub fn primary(&self) -> Option<&BuildResult> {
    self.results.iter().find(|r| r.required)
  }

  /// Whether every required artifact built.
  pub fn primary_succeeded(&self) -> bool {
    self.primary().is_some() && self.results.iter().filter(|r| r.required).all(BuildResult::succeeded)
  }

  /// Optional artifacts that did not build.
  pub fn auxiliary_failures(&self) -> impl Iterator<Item = &BuildResult> {
    self.results.iter().filter(|r| !r.required && !r.succeeded())
  }

  /// Process exit code for this session.
  ///
  /// Only required artifacts decide it; auxiliary failures and the smoke
  /// test's exit status never do.
  pub fn exit_code(&self) -> i32 {
    if self.cancelled {
      EXIT_INTERRUPTED
    } else if self.primary_succeeded() {
      EXIT_OK
    } else {
      EXIT_PRIMARY_FAILED
    }
  }
}
