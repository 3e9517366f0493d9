use std::path::PathBuf;
use std::process::ExitCode;

use clap::builder::FalseyValueParser;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use xenly_build_lib::Platform;
use xenly_build_lib::compiler::native_names;
use xenly_build_lib::consts::{
  APP_NAME, ENV_NO_RUN, ENV_PLATFORM, ENV_PROJECT_DIR, EXIT_UNSUPPORTED_COMPILER, EXIT_USAGE,
};

mod cmd;
mod output;

use output::{OutputFormat, print_error};

/// xenly-build - build the Xenly interpreter and its native libraries
#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Compiler to build with: gcc or clang
  #[arg(value_name = "COMPILER")]
  compiler: Option<String>,

  /// Do not run the built executable afterwards
  #[arg(long, env = ENV_NO_RUN, value_parser = FalseyValueParser::new())]
  no_run: bool,

  /// Use this platform's naming and flags instead of the host's (linux, windows, other)
  #[arg(long, env = ENV_PLATFORM, value_name = "PLATFORM")]
  platform: Option<Platform>,

  /// Project directory containing src/ (default: current directory)
  #[arg(short = 'C', long, env = ENV_PROJECT_DIR, value_name = "DIR")]
  project_dir: Option<PathBuf>,

  /// Also build the Go module (src/goxenly.go) with the Go toolchain
  #[arg(long)]
  with_go: bool,

  /// Argument for the executable when it is run after the build (repeatable)
  #[arg(long = "smoke-arg", value_name = "ARG", allow_hyphen_values = true)]
  smoke_args: Vec<String>,

  /// Report format
  #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
  format: OutputFormat,

  /// Enable verbose logging
  #[arg(short, long)]
  verbose: bool,
}

fn main() -> ExitCode {
  let cli = match Cli::try_parse() {
    Ok(cli) => cli,
    Err(e) => {
      let _ = e.print();
      // Help and version are not errors.
      return if e.use_stderr() {
        exit_code(EXIT_USAGE)
      } else {
        ExitCode::SUCCESS
      };
    }
  };

  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let Some(compiler) = cli.compiler else {
    print_error(&format!("missing compiler: expected one of {}", native_names()));
    eprintln!("{}", usage());
    return exit_code(EXIT_UNSUPPORTED_COMPILER);
  };

  let args = cmd::BuildArgs {
    compiler,
    no_run: cli.no_run,
    platform: cli.platform,
    project_dir: cli.project_dir,
    with_go: cli.with_go,
    smoke_args: cli.smoke_args,
    format: cli.format,
  };

  match cmd::cmd_build(args) {
    Ok(code) => exit_code(code),
    Err(e) => {
      print_error(&format!("{:#}", e));
      ExitCode::FAILURE
    }
  }
}

/// Usage line, for errors raised after argument parsing.
pub(crate) fn usage() -> String {
  Cli::command().render_usage().to_string()
}

fn exit_code(code: i32) -> ExitCode {
  u8::try_from(code).map(ExitCode::from).unwrap_or(ExitCode::FAILURE)
}
