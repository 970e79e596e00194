//! CLI tests for octobuild.
//!
//! Real runs use shell-script stand-ins for `cmake` and `make` (selected via
//! `OCTOBUILD_CMAKE` / `OCTOBUILD_MAKE`) that record their arguments and
//! working directory and exit with a status taken from the environment.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// A scratch project: `CMakeLists.txt`, `build/`, and a log dir for the fake tools.
struct TestProject {
  temp: TempDir,
}

impl TestProject {
  fn new() -> Self {
    let temp = TempDir::new().unwrap();
    let project = Self { temp };
    fs::create_dir_all(project.root()).unwrap();
    fs::write(project.root().join("CMakeLists.txt"), "project(octopus)\n").unwrap();
    fs::create_dir(project.root().join("build")).unwrap();
    fs::create_dir(project.log_dir()).unwrap();
    project
  }

  fn root(&self) -> PathBuf {
    self.temp.path().join("project")
  }

  fn canonical_root(&self) -> PathBuf {
    fs::canonicalize(self.root()).unwrap()
  }

  fn log_dir(&self) -> PathBuf {
    self.temp.path().join("logs")
  }

  fn write(&self, relative_path: &str, content: &str) {
    let path = self.root().join(relative_path);
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
  }

  fn log(&self, name: &str) -> Option<Vec<String>> {
    fs::read_to_string(self.log_dir().join(name))
      .ok()
      .map(|s| s.lines().map(str::to_string).collect())
  }

  /// Command for the octobuild binary pointed at this project.
  fn cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("octobuild");
    cmd.arg("--source-dir").arg(self.root());
    cmd.env("RUST_LOG", "warn");
    cmd
  }

  /// Command wired to the fake toolchain.
  #[cfg(unix)]
  fn cmd_with_fake_tools(&self) -> Command {
    let cmake = self.fake_tool("cmake", "configure");
    let make = self.fake_tool("make", "build");
    let mut cmd = self.cmd();
    cmd.env("OCTOBUILD_CMAKE", cmake);
    cmd.env("OCTOBUILD_MAKE", make);
    cmd.env("FAKE_TOOL_LOG", self.log_dir());
    cmd
  }

  #[cfg(unix)]
  fn fake_tool(&self, name: &str, stage: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = self.temp.path().join(format!("fake-{}", name));
    let script = format!(
      "#!/bin/sh\npwd -P > \"$FAKE_TOOL_LOG/{stage}.cwd\"\nprintf '%s\\n' \"$@\" > \"$FAKE_TOOL_LOG/{stage}.args\"\nexit \"${{FAKE_{upper}_STATUS:-0}}\"\n",
      stage = stage,
      upper = stage.to_uppercase(),
    );
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
  }
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_works() {
  cargo_bin_cmd!("octobuild")
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("Usage"))
    .stdout(predicate::str::contains("--keep-cache"));
}

#[test]
fn version_flag_works() {
  cargo_bin_cmd!("octobuild")
    .arg("--version")
    .assert()
    .success()
    .stdout(predicate::str::contains("octobuild"));
}

#[test]
fn unknown_flag_is_rejected() {
  cargo_bin_cmd!("octobuild").arg("--frobnicate").assert().failure();
}

// =============================================================================
// Preconditions
// =============================================================================

#[test]
fn missing_descriptor_fails_with_status_one() {
  let project = TestProject::new();
  fs::remove_file(project.root().join("CMakeLists.txt")).unwrap();

  project
    .cmd()
    .assert()
    .code(1)
    .stderr(predicate::str::contains("CMakeLists.txt is missing"));
}

#[test]
fn missing_build_dir_fails_with_status_one() {
  let project = TestProject::new();
  fs::remove_dir(project.root().join("build")).unwrap();

  project
    .cmd()
    .assert()
    .code(1)
    .stderr(predicate::str::contains("build directory is missing"));
}

// =============================================================================
// Dry run
// =============================================================================

#[test]
fn dry_run_json_shows_invocations() {
  let project = TestProject::new();
  project.write("build/CMakeCache.txt", "stale");

  project
    .cmd()
    .args(["--dry-run", "--output", "json", "--debug", "-j", "3"])
    .assert()
    .success()
    .stdout(predicate::str::contains("-DCMAKE_BUILD_TYPE=Debug"))
    .stdout(predicate::str::contains("\"invalidate_cache\": true"));

  assert!(project.root().join("build/CMakeCache.txt").exists());
  assert!(!project.root().join("bin").exists());
}

#[test]
fn dry_run_text_names_programs() {
  let project = TestProject::new();

  project
    .cmd()
    .env("OCTOBUILD_CMAKE", "my-cmake")
    .args(["--dry-run", "--static"])
    .assert()
    .success()
    .stdout(predicate::str::contains("my-cmake -DCMAKE_BUILD_TYPE=Release -DBUILD_SHARED_LIBS=OFF"));
}

#[test]
#[cfg(any(target_os = "linux", target_os = "macos"))]
fn negative_thread_count_falls_back_to_host() {
  let project = TestProject::new();
  let host_units = std::thread::available_parallelism().unwrap().get();

  for threads in ["--threads=-1", "-j-1"] {
    project
      .cmd()
      .args(["--dry-run", threads])
      .assert()
      .success()
      .stdout(predicate::str::contains(format!("install -j{}", host_units)));
  }
}

#[test]
fn single_dash_cxx_sets_cxx_compiler() {
  let project = TestProject::new();

  project
    .cmd()
    .args(["--dry-run", "-cxx=/usr/bin/g++"])
    .assert()
    .success()
    .stdout(predicate::str::contains("-DCMAKE_CXX_COMPILER=/usr/bin/g++"))
    .stdout(predicate::str::contains("-DCMAKE_C_COMPILER=").not());
}

#[test]
fn dry_run_after_interrupted_clean_reports_recovery() {
  let project = TestProject::new();
  project.write("build/cmake/state.txt", "keep me");
  fs::rename(project.root().join("build"), project.root().join(".build-clean")).unwrap();

  project
    .cmd()
    .args(["--dry-run", "--output", "json"])
    .assert()
    .success()
    .stdout(predicate::str::contains("\"recovery\": \"restored-build-dir\""));

  assert!(!project.root().join("build").exists());
  assert!(project.root().join(".build-clean/cmake/state.txt").exists());
}

// =============================================================================
// Real runs against the fake toolchain
// =============================================================================

#[test]
#[cfg(any(target_os = "linux", target_os = "macos"))]
fn default_run_configures_then_installs() {
  let project = TestProject::new();
  project.write("build/CMakeCache.txt", "stale");

  project.cmd_with_fake_tools().args(["-j", "5"]).assert().success();

  let root = project.canonical_root();
  assert_eq!(
    project.log("configure.args").unwrap(),
    vec!["-DCMAKE_BUILD_TYPE=Release".to_string(), root.display().to_string()]
  );
  assert_eq!(project.log("build.args").unwrap(), vec!["install", "-j5"]);
  assert_eq!(
    project.log("configure.cwd").unwrap(),
    vec![root.join("build").display().to_string()]
  );
  assert!(!project.root().join("build/CMakeCache.txt").exists());
  assert!(project.root().join("bin").is_dir());
}

#[test]
#[cfg(any(target_os = "linux", target_os = "macos"))]
fn configure_failure_status_is_propagated_without_build() {
  let project = TestProject::new();

  project
    .cmd_with_fake_tools()
    .env("FAKE_CONFIGURE_STATUS", "4")
    .assert()
    .code(4);

  assert!(project.log("configure.args").is_some());
  assert!(project.log("build.args").is_none());
}

#[test]
#[cfg(any(target_os = "linux", target_os = "macos"))]
fn build_failure_status_is_propagated() {
  let project = TestProject::new();

  project
    .cmd_with_fake_tools()
    .env("FAKE_BUILD_STATUS", "2")
    .assert()
    .code(2);

  assert!(project.log("build.args").is_some());
}

#[test]
#[cfg(any(target_os = "linux", target_os = "macos"))]
fn keep_cache_leaves_cache_file() {
  let project = TestProject::new();
  project.write("build/CMakeCache.txt", "CMAKE_BUILD_TYPE:STRING=Release");

  project.cmd_with_fake_tools().arg("--keep-cache").assert().success();

  assert!(project.root().join("build/CMakeCache.txt").exists());
}

#[test]
#[cfg(any(target_os = "linux", target_os = "macos"))]
fn clean_keeps_toolchain_cache_subdir() {
  let project = TestProject::new();
  project.write("build/cmake/modules/FindHTSlib.cmake", "# module");
  project.write("build/Makefile", "all:");

  project.cmd_with_fake_tools().arg("--clean").assert().success();

  assert_eq!(
    fs::read_to_string(project.root().join("build/cmake/modules/FindHTSlib.cmake")).unwrap(),
    "# module"
  );
  assert!(!project.root().join("build/Makefile").exists());
  assert!(!project.root().join(".build-clean").exists());
}

#[test]
#[cfg(any(target_os = "linux", target_os = "macos"))]
fn json_output_reports_outcome() {
  let project = TestProject::new();

  project
    .cmd_with_fake_tools()
    .args(["--output", "json"])
    .assert()
    .success()
    .stdout(predicate::str::contains("\"configure_status\": 0"))
    .stdout(predicate::str::contains("\"step\": \"ran\""));
}

#[test]
fn missing_configure_program_fails() {
  let project = TestProject::new();

  project
    .cmd()
    .env("OCTOBUILD_CMAKE", "/nonexistent/octobuild-cmake")
    .assert()
    .code(1)
    .stderr(predicate::str::contains("failed to run configure tool"));
}
