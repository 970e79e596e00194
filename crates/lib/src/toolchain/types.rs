//! Types shared by toolchain invocations.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use serde::Serialize;
use thiserror::Error;

use crate::consts::{CMAKE_ENV, DEFAULT_CMAKE, DEFAULT_MAKE, MAKE_ENV};

/// The two toolchain stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
  /// CMake-style configure step
  Configure,
  /// Make-style build/install step
  Build,
}

impl fmt::Display for Tool {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Tool::Configure => write!(f, "configure"),
      Tool::Build => write!(f, "build"),
    }
  }
}

/// One blocking toolchain call: which stage, its arguments, and where it runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
  pub tool: Tool,
  pub args: Vec<String>,
  pub workdir: PathBuf,
}

/// Errors raised before a toolchain process produced an exit status.
#[derive(Debug, Error)]
pub enum ToolchainError {
  #[error("failed to run {tool} tool `{program}`: {source}")]
  Spawn {
    tool: Tool,
    program: String,
    source: io::Error,
  },
}

/// Runs toolchain invocations.
///
/// Implementations block until the child finishes and return its exit status
/// (zero for success).
pub trait Invoker {
  fn invoke(&mut self, invocation: &Invocation) -> Result<i32, ToolchainError>;
}

/// Program names used for each stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolPrograms {
  pub configure: String,
  pub build: String,
}

impl Default for ToolPrograms {
  fn default() -> Self {
    Self {
      configure: DEFAULT_CMAKE.to_string(),
      build: DEFAULT_MAKE.to_string(),
    }
  }
}

impl ToolPrograms {
  /// Read overrides from `OCTOBUILD_CMAKE` / `OCTOBUILD_MAKE`, falling back to `cmake` / `make`.
  pub fn from_env() -> Self {
    let defaults = Self::default();
    Self {
      configure: env_or(CMAKE_ENV, defaults.configure),
      build: env_or(MAKE_ENV, defaults.build),
    }
  }

  pub fn program(&self, tool: Tool) -> &str {
    match tool {
      Tool::Configure => &self.configure,
      Tool::Build => &self.build,
    }
  }
}

fn env_or(var: &str, default: String) -> String {
  std::env::var(var).ok().filter(|v| !v.is_empty()).unwrap_or(default)
}

/// Map a child's exit status onto a process exit code.
///
/// A child killed by a signal on Unix reports `128 + signal`, as shells do.
pub fn exit_code(status: ExitStatus) -> i32 {
  if let Some(code) = status.code() {
    return code;
  }

  #[cfg(unix)]
  {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = status.signal() {
      return 128 + signal;
    }
  }

  crate::consts::FAILURE_STATUS
}
