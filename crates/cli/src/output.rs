//! CLI output formatting utilities.
//!
//! Report lines go to stdout, one per artifact, in the form
//! `<status>: <artifact> via <compiler>`. Status words are colored only when
//! the stream supports it. Errors and warnings go to stderr.

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

use xenly_build_lib::session::SmokeOutcome;
use xenly_build_lib::{BuildOutcome, BuildResult, SmokeTest};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const WARNING: &str = "⚠";
}

/// Format the report line for one artifact, coloring the status word.
pub fn build_result_line(result: &BuildResult) -> String {
  let label = result.outcome.label();
  let label = match result.outcome {
    BuildOutcome::Succeeded => label.if_supports_color(Stream::Stdout, |s| s.green()).to_string(),
    BuildOutcome::UnsupportedPlatform { .. } | BuildOutcome::Skipped => {
      label.if_supports_color(Stream::Stdout, |s| s.yellow()).to_string()
    }
    _ => label.if_supports_color(Stream::Stdout, |s| s.red()).to_string(),
  };

  match result.outcome.detail() {
    Some(detail) => format!("{}: {} via {} ({})", label, result.artifact, result.compiler, detail),
    None => format!("{}: {} via {}", label, result.artifact, result.compiler),
  }
}

pub fn print_build_result(result: &BuildResult) {
  println!("{}", build_result_line(result));
}

/// Status word and exit code of a smoke test.
pub fn smoke_status(outcome: &SmokeOutcome) -> (&'static str, Option<i32>) {
  match outcome {
    SmokeOutcome::Exited { code } => ("exited", *code),
    SmokeOutcome::SpawnFailed { .. } => ("failed to start", None),
    SmokeOutcome::WaitFailed { .. } => ("unknown", None),
    SmokeOutcome::Interrupted => ("interrupted", None),
  }
}

pub fn smoke_test_line(smoke: &SmokeTest) -> String {
  let program = &smoke.command.program;
  match &smoke.outcome {
    SmokeOutcome::Exited { code: Some(code) } => format!("smoke test: {} exited with {}", program, code),
    SmokeOutcome::Exited { code: None } => format!("smoke test: {} terminated by signal", program),
    SmokeOutcome::SpawnFailed { message } => format!("smoke test: {} could not start: {}", program, message),
    SmokeOutcome::WaitFailed { message } => format!("smoke test: {} exit status unknown: {}", program, message),
    SmokeOutcome::Interrupted => format!("smoke test: {} interrupted", program),
  }
}

pub fn print_smoke_test(smoke: &SmokeTest) {
  println!("{}", smoke_test_line(smoke));
}

pub fn print_success(message: &str) {
  eprintln!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stderr, |s| s.green()),
    message
  );
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

pub fn print_warning(message: &str) {
  eprintln!(
    "{} {}",
    symbols::WARNING.if_supports_color(Stream::Stderr, |s| s.yellow()),
    message.if_supports_color(Stream::Stderr, |s| s.yellow())
  );
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}
