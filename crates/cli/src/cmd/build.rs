//! Implementation of the build session command.
//!
//! Validates the compiler, runs every artifact build in registry order, prints
//! one line per artifact as it finishes, then optionally runs the executable.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde_json::json;
use tracing::{debug, info};

use xenly_build_lib::consts::EXIT_UNSUPPORTED_COMPILER;
use xenly_build_lib::execute::{SystemRunner, cancellation};
use xenly_build_lib::{BuildSession, CompilerId, Platform, SessionOptions, SmokeTest, run_session};

use crate::output::{
  OutputFormat, print_build_result, print_error, print_json, print_smoke_test, print_success, print_warning,
  smoke_status,
};

/// Resolved command-line settings for one build.
#[derive(Debug)]
pub struct BuildArgs {
  pub compiler: String,
  pub no_run: bool,
  pub platform: Option<Platform>,
  pub project_dir: Option<PathBuf>,
  pub with_go: bool,
  pub smoke_args: Vec<String>,
  pub format: OutputFormat,
}

/// Execute the build command and return the process exit code.
pub fn cmd_build(args: BuildArgs) -> Result<i32> {
  // Reject a bad compiler before touching anything else.
  if let Err(e) = CompilerId::parse_native(&args.compiler) {
    print_error(&e.to_string());
    eprintln!("{}", crate::usage());
    return Ok(EXIT_UNSUPPORTED_COMPILER);
  }

  let project_dir = match args.project_dir {
    Some(dir) => dir,
    None => std::env::current_dir().context("Failed to read current directory")?,
  };
  let project_dir = dunce::canonicalize(&project_dir)
    .with_context(|| format!("Project directory not found: {}", project_dir.display()))?;
  debug!(project_dir = %project_dir.display(), "resolved project directory");

  let options = SessionOptions {
    compiler: args.compiler,
    platform: args.platform,
    project_dir,
    smoke_test: !args.no_run,
    smoke_args: args.smoke_args,
    include_go: args.with_go,
  };
  let json = args.format.is_json();

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let (handle, cancel) = cancellation();

  let result = rt.block_on(async {
    tokio::spawn(async move {
      if tokio::signal::ctrl_c().await.is_ok() {
        info!("interrupt received, stopping build");
        handle.cancel();
      }
    });

    run_session(&options, &SystemRunner, &cancel, |result| {
      if !json {
        print_build_result(result);
      }
    })
    .await
  });

  let session = match result {
    Ok(session) => session,
    Err(e) => {
      print_error(&e.to_string());
      eprintln!("{}", crate::usage());
      return Ok(e.exit_code());
    }
  };

  if json {
    print_json(&session_report(&session))?;
  } else {
    print_summary(&session);
  }

  Ok(session.exit_code())
}

fn print_summary(session: &BuildSession) {
  if let Some(smoke) = &session.smoke_test {
    print_smoke_test(smoke);
  }

  if session.cancelled {
    print_warning("Build interrupted");
  } else if !session.primary_succeeded() {
    print_error("Primary executable failed to build");
  } else {
    let skipped = session.auxiliary_failures().count();
    if skipped > 0 {
      print_warning(&format!("{} optional artifact(s) not built", skipped));
    }
    print_success(&format!("Build finished with {} on {}", session.compiler, session.platform));
  }
}

fn session_report(session: &BuildSession) -> serde_json::Value {
  let results: Vec<_> = session
    .results
    .iter()
    .map(|r| {
      json!({
        "artifact": r.artifact,
        "kind": r.kind,
        "required": r.required,
        "compiler": r.compiler,
        "output": r.output,
        "command": r.command.as_ref().map(|c| c.argv()),
        "status": r.outcome.label(),
        "exit_code": r.outcome.exit_code(),
        "detail": r.outcome.detail(),
        "succeeded": r.succeeded(),
      })
    })
    .collect();

  json!({
    "compiler": session.compiler,
    "platform": session.platform,
    "cancelled": session.cancelled,
    "exit_code": session.exit_code(),
    "results": results,
    "smoke_test": session.smoke_test.as_ref().map(smoke_report),
  })
}

fn smoke_report(smoke: &SmokeTest) -> serde_json::Value {
  let (status, exit_code) = smoke_status(&smoke.outcome);
  json!({
    "command": smoke.command.argv(),
    "status": status,
    "exit_code": exit_code,
  })
}
