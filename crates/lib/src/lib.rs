//! xenly-build-lib: build orchestration for the Xenly toolchain
//!
//! This crate drives one build session of the Xenly interpreter and its
//! optional native libraries:
//! - `CompilerId`: the validated compiler a session builds with
//! - `Platform`: host conventions for output names and shared-object flags
//! - `ArtifactSpec`: the static, ordered table of things to compile
//! - `BuildResult`: the per-artifact outcome of one compiler invocation
//! - `BuildSession`: every outcome of a run, plus the optional smoke test

pub mod artifact;
pub mod compiler;
pub mod consts;
pub mod execute;
pub mod platform;
pub mod session;


pub use artifact::{ArtifactKind, ArtifactSpec, Toolchain};
pub use compiler::{CompilerError, CompilerId};
pub use execute::{BuildOutcome, BuildResult, Invocation};
pub use platform::{Platform, PlatformError};
pub use session::{BuildSession, SessionError, SessionOptions, SmokeTest, run_session};
