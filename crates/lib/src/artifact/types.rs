//! Artifact declarations.

use std::fmt;

use serde::Serialize;

/// What an artifact compiles into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
  Executable,
  SharedLibrary,
}

impl ArtifactKind {
  pub const fn as_str(&self) -> &'static str {
    match self {
      Self::Executable => "executable",
      Self::SharedLibrary => "shared_library",
    }
  }
}

impl fmt::Display for ArtifactKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Which toolchain compiles an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toolchain {
  /// The session's native C compiler (gcc or clang).
  C,
  /// The Go toolchain, producing a C-callable shared library.
  Go,
}

/// Static declaration of one build target.
///
/// Specs are defined at compile time and never mutated. Source paths and the
/// base output name are relative to the project directory; the platform
/// supplies the extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSpec {
  pub name: &'static str,
  pub kind: ArtifactKind,
  pub toolchain: Toolchain,
  pub sources: &'static [&'static str],
  pub base_output_name: &'static str,
}

impl ArtifactSpec {
  /// Whether a failure of this artifact fails the session.
  ///
  /// Only the executable is required; shared libraries are best-effort.
  pub fn is_required(&self) -> bool {
    self.kind == ArtifactKind::Executable
  }
}
