//! Platform resolution.
//!
//! Output naming and shared-object flags are the only platform-sensitive part
//! of a build. Everything that branches on the host lives here; callers ask
//! for [`OutputRules`] and never inspect the platform themselves.

pub mod os;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::artifact::ArtifactKind;

/// Host platform as far as the build is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
  Windows,
  Linux,
  /// Any other host. Executables still build; shared libraries do not.
  Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
  #[error("shared libraries are not supported on platform '{platform}'")]
  UnsupportedPlatform { platform: Platform },

  #[error("unknown platform '{0}': expected one of linux, windows, other")]
  UnknownName(String),
}

/// How an artifact of a given kind is named and linked on a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputRules {
  /// File extension including the leading dot, or empty.
  pub extension: &'static str,
  /// Position-independent-code flag, when the platform needs one.
  pub pic_flag: Option<&'static str>,
  /// Flag asking the C compiler for a shared object.
  pub shared_flag: Option<&'static str>,
}

impl OutputRules {
  /// Final file name for an artifact with the given base name.
  pub fn file_name(&self, base: &str) -> String {
    format!("{}{}", base, self.extension)
  }

  /// Extra C compiler flags, in the order they are passed.
  pub fn c_flags(&self) -> impl Iterator<Item = &'static str> {
    self.pic_flag.into_iter().chain(self.shared_flag)
  }
}

impl Platform {
  pub const fn as_str(&self) -> &'static str {
    match self {
      Self::Windows => "windows",
      Self::Linux => "linux",
      Self::Other => "other",
    }
  }

  /// Resolve naming and flags for an artifact kind.
  ///
  /// Executables resolve on every platform. Shared libraries fail with
  /// [`PlatformError::UnsupportedPlatform`] on `Other`.
  pub fn output_rules(&self, kind: ArtifactKind) -> Result<OutputRules, PlatformError> {
    match kind {
      ArtifactKind::Executable => Ok(self.executable_rules()),
      ArtifactKind::SharedLibrary => self.shared_library_rules(),
    }
  }

  fn executable_rules(&self) -> OutputRules {
    let extension = match self {
      Self::Windows => ".exe",
      Self::Linux | Self::Other => "",
    };
    OutputRules {
      extension,
      pic_flag: None,
      shared_flag: None,
    }
  }

  fn shared_library_rules(&self) -> Result<OutputRules, PlatformError> {
    match self {
      Self::Windows => Ok(OutputRules {
        extension: ".dll",
        pic_flag: None,
        shared_flag: Some("-shared"),
      }),
      Self::Linux => Ok(OutputRules {
        extension: ".so",
        pic_flag: Some("-fPIC"),
        shared_flag: Some("-shared"),
      }),
      Self::Other => Err(PlatformError::UnsupportedPlatform { platform: *self }),
    }
  }
}

impl FromStr for Platform {
  type Err = PlatformError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "windows" => Ok(Self::Windows),
      "linux" => Ok(Self::Linux),
      "other" => Ok(Self::Other),
      _ => Err(PlatformError::UnknownName(s.to_string())),
    }
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
