//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Stand-in for gcc/clang/go.
///
/// Logs its argv to `$FAKE_CC_LOG`, then writes the `-o` output as a tiny
/// executable script. Exits 1 instead when the output equals `$FAKE_CC_FAIL`.
const FAKE_COMPILER: &str = r#"#!/bin/sh
echo "$(basename "$0") $*" >> "$FAKE_CC_LOG"
out=""
while [ $# -gt 0 ]; do
  if [ "$1" = "-o" ]; then
    shift
    out="$1"
  fi
  shift
done
if [ -n "$FAKE_CC_FAIL" ] && [ "$out" = "$FAKE_CC_FAIL" ]; then
  echo "fake compiler: forced failure for $out" >&2
  exit 1
fi
printf '#!/bin/sh\necho smoke-ran "$@"\nexit 0\n' > "$out"
chmod +x "$out"
"#;

/// Isolated test environment.
///
/// Each test gets its own temporary directory holding a `bin/` with fake
/// compilers and a `project/` to build in.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    let temp = TempDir::new().unwrap();
    let env = Self { temp };
    std::fs::create_dir_all(env.project_path().join("src")).unwrap();
    std::fs::create_dir_all(env.bin_path()).unwrap();
    for name in ["gcc", "clang", "go"] {
      env.install_fake(name);
    }
    env
  }

  #[cfg(unix)]
  fn install_fake(&self, name: &str) {
    use std::os::unix::fs::PermissionsExt;

    let path = self.bin_path().join(name);
    std::fs::write(&path, FAKE_COMPILER).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
  }

  #[cfg(not(unix))]
  fn install_fake(&self, _name: &str) {}

  pub fn bin_path(&self) -> PathBuf {
    self.temp.path().join("bin")
  }

  pub fn project_path(&self) -> PathBuf {
    self.temp.path().join("project")
  }

  pub fn log_path(&self) -> PathBuf {
    self.temp.path().join("calls.log")
  }

  /// Lines logged by the fake compilers, in call order.
  pub fn calls(&self) -> Vec<String> {
    std::fs::read_to_string(self.log_path())
      .map(|log| log.lines().map(String::from).collect())
      .unwrap_or_default()
  }

  pub fn output_exists(&self, name: &str) -> bool {
    self.project_path().join(name).exists()
  }

  /// Get a pre-configured Command for the xenly-build binary.
  ///
  /// Runs inside the project directory with the fake compilers first on
  /// `PATH`, and clears the config environment variables so the host
  /// cannot leak into a test.
  pub fn build_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("xenly-build");
    cmd.current_dir(self.project_path());
    cmd.env("PATH", prepend_path(&self.bin_path()));
    cmd.env("FAKE_CC_LOG", self.log_path());
    cmd.env_remove("FAKE_CC_FAIL");
    cmd.env_remove("XENLY_BUILD_PLATFORM");
    cmd.env_remove("XENLY_BUILD_NO_RUN");
    cmd.env_remove("XENLY_PROJECT_DIR");
    cmd.env_remove("RUST_LOG");
    cmd
  }
}

fn prepend_path(dir: &Path) -> std::ffi::OsString {
  let mut paths = vec![dir.to_path_buf()];
  if let Some(existing) = std::env::var_os("PATH") {
    paths.extend(std::env::split_paths(&existing));
  }
  std::env::join_paths(paths).unwrap()
}
