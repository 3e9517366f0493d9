//! Build session orchestration.
//!
//! A session moves through these phases:
//! 1. Validate the compiler (an unsupported one rejects the whole session)
//! 2. Resolve the platform once
//! 3. Build every registry entry in order, recording each outcome
//! 4. Optionally smoke-test the primary executable
//!
//! Builds run one at a time. A failing artifact never stops the next one
//! from being attempted; cancellation marks everything not yet attempted as
//! skipped and the session still finishes with a full report.

pub mod types;

use std::path::Path;

use tracing::{debug, info, warn};

use crate::artifact::{self, ArtifactSpec};
use crate::compiler::CompilerId;
use crate::execute::{
  BuildOutcome, BuildResult, Cancellation, ExecuteError, Invocation, ProcessRunner, RunOutcome, build_artifact,
  toolchain_compiler,
};
use crate::platform::Platform;
use crate::platform::os::host_os;

pub use types::{BuildSession, SessionError, SessionOptions, SmokeOutcome, SmokeTest};

/// Run a full build session.
///
/// `on_result` is called with each [`BuildResult`] as soon as it is recorded,
/// so callers can report progress between compiler runs.
///
/// # Errors
///
/// [`SessionError::UnsupportedCompiler`] if `options.compiler` is not an
/// allow-listed compiler. Nothing is spawned in that case.
pub async fn run_session<R: ProcessRunner>(
  options: &SessionOptions,
  runner: &R,
  cancel: &Cancellation,
  mut on_result: impl FnMut(&BuildResult),
) -> Result<BuildSession, SessionError> {
  let compiler = CompilerId::parse_native(&options.compiler)?;
  let platform = resolve_platform(options.platform);
  let specs = artifact::registry(options.include_go);

  info!(
    compiler = %compiler,
    platform = %platform,
    artifacts = specs.len(),
    "starting build session"
  );

  let mut session = BuildSession {
    compiler,
    platform,
    results: Vec::with_capacity(specs.len()),
    smoke_test: None,
    cancelled: false,
  };

  for spec in specs {
    let result = if session.cancelled || cancel.is_cancelled() {
      session.cancelled = true;
      skipped(spec, compiler)
    } else {
      build_artifact(runner, compiler, spec, platform, &options.project_dir, cancel).await
    };

    if result.outcome == BuildOutcome::Interrupted {
      session.cancelled = true;
    }
    on_result(&result);
    session.results.push(result);
  }

  // A cancel that lands while the last build is finishing is only visible here.
  if cancel.is_cancelled() {
    session.cancelled = true;
  }

  if options.smoke_test {
    session.smoke_test = smoke_test(&session, options, runner, cancel).await;
    if session.smoke_test.as_ref().is_some_and(|s| s.outcome == SmokeOutcome::Interrupted) {
      session.cancelled = true;
    }
  }

  info!(
    primary_succeeded = session.primary_succeeded(),
    auxiliary_failures = session.auxiliary_failures().count(),
    cancelled = session.cancelled,
    "build session finished"
  );

  Ok(session)
}

fn resolve_platform(requested: Option<Platform>) -> Platform {
  match requested {
    Some(platform) => {
      info!(platform = %platform, host_os = host_os(), "platform overridden");
      platform
    }
    None => {
      let platform = Platform::detect();
      debug!(platform = %platform, host_os = host_os(), "platform detected");
      platform
    }
  }
}

fn skipped(spec: &'static ArtifactSpec, native: CompilerId) -> BuildResult {
  warn!(artifact = spec.name, "skipped, session cancelled");
  BuildResult {
    artifact: spec.name,
    kind: spec.kind,
    required: spec.is_required(),
    compiler: toolchain_compiler(spec, native),
    output: None,
    command: None,
    outcome: BuildOutcome::Skipped,
  }
}

/// Run the primary executable once, if it built and the session is intact.
async fn smoke_test<R: ProcessRunner>(
  session: &BuildSession,
  options: &SessionOptions,
  runner: &R,
  cancel: &Cancellation,
) -> Option<SmokeTest> {
  if session.cancelled || cancel.is_cancelled() {
    debug!("session cancelled, skipping smoke test");
    return None;
  }
  let primary = session.primary().filter(|r| r.succeeded())?;
  let output = primary.output.as_deref()?;

  let command = Invocation {
    program: executable_path(&options.project_dir, output),
    args: options.smoke_args.clone(),
    cwd: options.project_dir.clone(),
  };

  info!(command = %command, "running smoke test");

  let outcome = match runner.run(&command, cancel).await {
    Ok(RunOutcome::Exited { code }) => {
      info!(code = ?code, "smoke test finished");
      SmokeOutcome::Exited { code }
    }
    Ok(RunOutcome::Cancelled) => {
      warn!("smoke test interrupted");
      SmokeOutcome::Interrupted
    }
    Err(e @ ExecuteError::Spawn { .. }) => {
      warn!(error = %e, "smoke test could not be started");
      SmokeOutcome::SpawnFailed { message: e.to_string() }
    }
    Err(e @ ExecuteError::Wait { .. }) => {
      warn!(error = %e, "smoke test exit status lost");
      SmokeOutcome::WaitFailed { message: e.to_string() }
    }
  };

  Some(SmokeTest { command, outcome })
}

fn executable_path(project_dir: &Path, output: &str) -> String {
  project_dir.join(output).to_string_lossy().into_owned()
}
