use super::Platform;

/// Returns the operating system identifier of the running host
/// (e.g. "linux", "windows", "freebsd").
pub fn host_os() -> &'static str {
  std::env::consts::OS
}

impl Platform {
  /// Map an operating system identifier onto the platforms the build knows.
  ///
  /// Anything that is neither Windows nor Linux is `Other`; macOS and the
  /// BSDs land there too.
  pub fn from_os(os: &str) -> Self {
    match os {
      "windows" => Self::Windows,
      "linux" => Self::Linux,
      _ => Self::Other,
    }
  }

  /// Detect the platform of the running host.
  pub fn detect() -> Self {
    Self::from_os(host_os())
  }
}
