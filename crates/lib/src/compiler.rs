//! Compiler selection.
//!
//! A session builds every C artifact with one native compiler chosen by the
//! user. The choice is validated once, up front, against a fixed allow-list.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Compilers the orchestrator knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompilerId {
  Gcc,
  Clang,
  /// The Go toolchain, used only for the optional Go module.
  Go,
}

/// Compilers accepted for the C toolchain, in the order they are advertised.
pub const NATIVE_COMPILERS: [CompilerId; 2] = [CompilerId::Gcc, CompilerId::Clang];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompilerError {
  #[error("unsupported compiler '{given}': expected one of {expected}", expected = native_names())]
  Unsupported { given: String },
}

/// The accepted native compiler names, comma separated.
pub fn native_names() -> String {
  NATIVE_COMPILERS.map(|id| id.program()).join(", ")
}

impl CompilerId {
  /// Validate a user-supplied native compiler name against [`NATIVE_COMPILERS`].
  ///
  /// Matching is exact and case-sensitive. `go` is rejected here: the Go
  /// toolchain is picked by the artifact that needs it, never by the user.
  pub fn parse_native(name: &str) -> Result<Self, CompilerError> {
    NATIVE_COMPILERS
      .into_iter()
      .find(|id| id.program() == name)
      .ok_or_else(|| CompilerError::Unsupported { given: name.to_string() })
  }

  /// The program name spawned for this compiler.
  pub const fn program(&self) -> &'static str {
    match self {
      Self::Gcc => "gcc",
      Self::Clang => "clang",
      Self::Go => "go",
    }
  }
}

impl FromStr for CompilerId {
  type Err = CompilerError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::parse_native(s)
  }
}

impl fmt::Display for CompilerId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.program())
  }
}
