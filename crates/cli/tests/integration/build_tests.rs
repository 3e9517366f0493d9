//! Build session integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn gcc_on_linux_builds_all_artifacts() {
  let env = TestEnv::new();

  env
    .build_cmd()
    .arg("gcc")
    .arg("--platform")
    .arg("linux")
    .assert()
    .code(0)
    .stdout(predicate::str::contains("success: xenly via gcc"))
    .stdout(predicate::str::contains("success: math via gcc"))
    .stdout(predicate::str::contains("success: binary_math via gcc"))
    .stdout(predicate::str::contains("smoke test:"))
    .stdout(predicate::str::contains("exited with 0"));

  assert!(env.output_exists("xenly"));
  assert!(env.output_exists("math.so"));
  assert!(env.output_exists("binary_math.so"));
}

#[test]
fn compiler_invocations_use_argument_vectors() {
  let env = TestEnv::new();

  env
    .build_cmd()
    .args(["clang", "--platform", "linux", "--no-run"])
    .assert()
    .success();

  assert_eq!(
    env.calls(),
    vec![
      "clang src/xenly.c src/print_info.c src/color.c src/project.c src/error.c -o xenly -lm",
      "clang src/libm/xenly_math.c -o math.so -fPIC -shared -lm",
      "clang src/libm/binary_math/xenly_binary_math.c -o binary_math.so -fPIC -shared -lm",
    ]
  );
}

#[test]
fn primary_failure_exits_2_and_still_builds_libraries() {
  let env = TestEnv::new();

  env
    .build_cmd()
    .args(["gcc", "--platform", "linux"])
    .env("FAKE_CC_FAIL", "xenly")
    .assert()
    .code(2)
    .stdout(predicate::str::contains("failed: xenly via gcc (exit code 1)"))
    .stdout(predicate::str::contains("success: math via gcc"))
    .stdout(predicate::str::contains("success: binary_math via gcc"))
    .stdout(predicate::str::contains("smoke test").not());

  assert!(!env.output_exists("xenly"));
  assert_eq!(env.calls().len(), 3);
}

#[test]
fn library_failure_does_not_change_exit_code() {
  let env = TestEnv::new();

  env
    .build_cmd()
    .args(["gcc", "--platform", "linux", "--no-run"])
    .env("FAKE_CC_FAIL", "math.so")
    .assert()
    .code(0)
    .stdout(predicate::str::contains("failed: math via gcc (exit code 1)"))
    .stdout(predicate::str::contains("success: binary_math via gcc"))
    .stderr(predicate::str::contains("1 optional artifact(s) not built"));
}

#[test]
fn other_platform_skips_shared_libraries() {
  let env = TestEnv::new();

  env
    .build_cmd()
    .args(["clang", "--platform", "other", "--no-run"])
    .assert()
    .code(0)
    .stdout(predicate::str::contains("success: xenly via clang"))
    .stdout(predicate::str::contains("unsupported: math via clang"))
    .stdout(predicate::str::contains("unsupported: binary_math via clang"));

  assert!(env.output_exists("xenly"));
  assert!(!env.output_exists("math.so"));
  assert_eq!(env.calls().len(), 1);
}

#[test]
fn platform_override_from_environment() {
  let env = TestEnv::new();

  env
    .build_cmd()
    .args(["gcc", "--no-run"])
    .env("XENLY_BUILD_PLATFORM", "other")
    .assert()
    .success()
    .stdout(predicate::str::contains("unsupported: math via gcc"));
}

#[test]
fn no_run_from_environment() {
  let env = TestEnv::new();

  env
    .build_cmd()
    .args(["gcc", "--platform", "linux"])
    .env("XENLY_BUILD_NO_RUN", "true")
    .assert()
    .success()
    .stdout(predicate::str::contains("smoke test").not());
}

#[test]
fn no_run_from_environment_accepts_numeric_flag() {
  let env = TestEnv::new();

  env
    .build_cmd()
    .args(["gcc", "--platform", "linux"])
    .env("XENLY_BUILD_NO_RUN", "1")
    .assert()
    .success()
    .stdout(predicate::str::contains("smoke test").not());
}

#[test]
fn no_run_env_set_to_false_keeps_smoke_test() {
  let env = TestEnv::new();

  env
    .build_cmd()
    .args(["gcc", "--platform", "linux"])
    .env("XENLY_BUILD_NO_RUN", "0")
    .assert()
    .success()
    .stdout(predicate::str::contains("smoke test:"));
}

#[test]
fn windows_conventions_name_outputs() {
  let env = TestEnv::new();

  env
    .build_cmd()
    .args(["gcc", "--platform", "windows", "--no-run"])
    .assert()
    .success();

  assert!(env.output_exists("xenly.exe"));
  assert!(env.output_exists("math.dll"));
  assert!(env.output_exists("binary_math.dll"));
  assert!(env.calls().iter().all(|call| !call.contains("-fPIC")));
}

#[test]
fn smoke_test_passes_arguments() {
  let env = TestEnv::new();

  env
    .build_cmd()
    .args(["gcc", "--platform", "linux", "--smoke-arg", "--version"])
    .assert()
    .success()
    .stdout(predicate::str::contains("smoke-ran --version"));
}

#[test]
fn project_dir_flag_builds_elsewhere() {
  let env = TestEnv::new();

  env
    .build_cmd()
    .current_dir(env.temp.path())
    .args(["gcc", "--platform", "linux", "--no-run", "-C"])
    .arg(env.project_path())
    .assert()
    .success();

  assert!(env.output_exists("xenly"));
  assert!(!env.temp.path().join("xenly").exists());
}

#[test]
fn go_module_is_opt_in() {
  let env = TestEnv::new();

  env
    .build_cmd()
    .args(["gcc", "--platform", "linux", "--no-run", "--with-go"])
    .assert()
    .success()
    .stdout(predicate::str::contains("success: goxenly via go"));

  assert!(env.output_exists("src/goxenly.so"));
  assert_eq!(
    env.calls().last().map(String::as_str),
    Some("go build -o src/goxenly.so -buildmode=c-shared src/goxenly.go")
  );
}

#[test]
fn missing_compiler_binary_is_reported_per_artifact() {
  let env = TestEnv::new();
  std::fs::remove_file(env.bin_path().join("clang")).unwrap();

  env
    .build_cmd()
    .args(["clang", "--platform", "linux", "--no-run"])
    .env("PATH", env.bin_path())
    .assert()
    .code(2)
    .stdout(predicate::str::contains("failed: xenly via clang (could not start:"))
    .stdout(predicate::str::contains("failed: math via clang (could not start:"));
}

#[test]
fn json_report() {
  let env = TestEnv::new();

  let output = env
    .build_cmd()
    .args(["gcc", "--platform", "linux", "--no-run", "--format", "json"])
    .env("FAKE_CC_FAIL", "binary_math.so")
    .output()
    .unwrap();

  assert!(output.status.success());
  let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(report["compiler"], "gcc");
  assert_eq!(report["platform"], "linux");
  assert_eq!(report["exit_code"], 0);
  assert_eq!(report["smoke_test"], serde_json::Value::Null);

  let results = report["results"].as_array().unwrap();
  assert_eq!(results.len(), 3);
  assert_eq!(results[0]["artifact"], "xenly");
  assert_eq!(results[0]["kind"], "executable");
  assert_eq!(results[0]["succeeded"], true);
  assert_eq!(results[2]["status"], "failed");
  assert_eq!(results[2]["exit_code"], 1);
  assert_eq!(results[2]["command"][0], "gcc");
}

#[test]
fn repeated_runs_report_the_same_outcomes() {
  let env = TestEnv::new();
  let run = || {
    env
      .build_cmd()
      .args(["gcc", "--platform", "linux", "--no-run"])
      .env("FAKE_CC_FAIL", "math.so")
      .output()
      .unwrap()
  };

  let first = run();
  let second = run();

  assert_eq!(first.status.code(), second.status.code());
  assert_eq!(first.stdout, second.stdout);
}
