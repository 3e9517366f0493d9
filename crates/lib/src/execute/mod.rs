//! Build execution.
//!
//! Turns an [`ArtifactSpec`] into one concrete compiler invocation and runs
//! it. A build never returns an error: every way it can go wrong becomes a
//! [`BuildOutcome`] on the returned [`BuildResult`], so one failed library
//! cannot abort the rest of the session.

pub mod cancel;
pub mod runner;
pub mod types;

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::artifact::{ArtifactSpec, Toolchain};
use crate::compiler::CompilerId;
use crate::platform::{OutputRules, Platform, PlatformError};

pub use cancel::{CancelHandle, Cancellation, cancellation};
pub use runner::{ProcessRunner, SystemRunner};
pub use types::{BuildOutcome, BuildResult, ExecuteError, RunOutcome};

/// Math library link flag, passed to every C compiler invocation.
pub const MATH_LINK_FLAG: &str = "-lm";

/// A program and its argument vector, run in a working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  pub program: String,
  pub args: Vec<String>,
  pub cwd: PathBuf,
}

impl Invocation {
  /// The file named by the `-o` argument, if any.
  pub fn output(&self) -> Option<&str> {
    self
      .args
      .iter()
      .position(|arg| arg == "-o")
      .and_then(|i| self.args.get(i + 1))
      .map(String::as_str)
  }

  /// Program followed by its arguments.
  pub fn argv(&self) -> Vec<&str> {
    std::iter::once(self.program.as_str())
      .chain(self.args.iter().map(String::as_str))
      .collect()
  }
}

impl fmt::Display for Invocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.argv().join(" "))
  }
}

/// The compiler that builds `spec` in a session using `native`.
pub fn toolchain_compiler(spec: &ArtifactSpec, native: CompilerId) -> CompilerId {
  match spec.toolchain {
    Toolchain::C => native,
    Toolchain::Go => CompilerId::Go,
  }
}

/// Construct the invocation that builds `spec`.
///
/// C artifacts compile as
/// `compiler <sources...> -o <output> [-fPIC] [-shared] -lm`; the Go module
/// as `go build -o <output> -buildmode=c-shared <sources...>`.
///
/// # Errors
///
/// [`PlatformError::UnsupportedPlatform`] when the platform cannot name or
/// link this kind of artifact.
pub fn plan_invocation(
  native: CompilerId,
  spec: &ArtifactSpec,
  platform: Platform,
  project_dir: &Path,
) -> Result<Invocation, PlatformError> {
  let rules = platform.output_rules(spec.kind)?;
  let output = rules.file_name(spec.base_output_name);
  let compiler = toolchain_compiler(spec, native);

  let args = match spec.toolchain {
    Toolchain::C => c_args(spec, &output, &rules),
    Toolchain::Go => go_args(spec, &output),
  };

  Ok(Invocation {
    program: compiler.program().to_string(),
    args,
    cwd: project_dir.to_path_buf(),
  })
}

fn c_args(spec: &ArtifactSpec, output: &str, rules: &OutputRules) -> Vec<String> {
  let mut args: Vec<String> = spec.sources.iter().map(|s| s.to_string()).collect();
  args.push("-o".to_string());
  args.push(output.to_string());
  args.extend(rules.c_flags().map(String::from));
  args.push(MATH_LINK_FLAG.to_string());
  args
}

fn go_args(spec: &ArtifactSpec, output: &str) -> Vec<String> {
  let mut args = vec![
    "build".to_string(),
    "-o".to_string(),
    output.to_string(),
    "-buildmode=c-shared".to_string(),
  ];
  args.extend(spec.sources.iter().map(|s| s.to_string()));
  args
}

/// Build one artifact and report how it went.
///
/// Spawns at most one process. Compiler output goes straight to the
/// terminal; only the exit status is observed.
pub async fn build_artifact<R: ProcessRunner>(
  runner: &R,
  native: CompilerId,
  spec: &'static ArtifactSpec,
  platform: Platform,
  project_dir: &Path,
  cancel: &Cancellation,
) -> BuildResult {
  let compiler = toolchain_compiler(spec, native);
  let mut result = BuildResult {
    artifact: spec.name,
    kind: spec.kind,
    required: spec.is_required(),
    compiler,
    output: None,
    command: None,
    outcome: BuildOutcome::Skipped,
  };

  let invocation = match plan_invocation(native, spec, platform, project_dir) {
    Ok(invocation) => invocation,
    Err(e) => {
      warn!(artifact = spec.name, error = %e, "not building on this platform");
      result.outcome = BuildOutcome::UnsupportedPlatform { platform };
      return result;
    }
  };

  result.output = invocation.output().map(String::from);

  info!(artifact = spec.name, compiler = %compiler, command = %invocation, "compiling");

  result.outcome = match runner.run(&invocation, cancel).await {
    Ok(RunOutcome::Exited { code: Some(0) }) => {
      info!(artifact = spec.name, "compilation succeeded");
      BuildOutcome::Succeeded
    }
    Ok(RunOutcome::Exited { code }) => {
      error!(artifact = spec.name, compiler = %compiler, code = ?code, "compilation failed");
      BuildOutcome::CompilationFailed { exit_code: code }
    }
    Ok(RunOutcome::Cancelled) => {
      warn!(artifact = spec.name, "compilation interrupted");
      BuildOutcome::Interrupted
    }
    Err(e @ ExecuteError::Spawn { .. }) => {
      error!(artifact = spec.name, compiler = %compiler, error = %e, "compiler could not be run, check the environment");
      BuildOutcome::SpawnFailed { message: e.to_string() }
    }
    Err(e @ ExecuteError::Wait { .. }) => {
      error!(artifact = spec.name, compiler = %compiler, error = %e, "lost track of the compiler process");
      BuildOutcome::WaitFailed { message: e.to_string() }
    }
  };
  result.command = Some(invocation);
  result
}
