//! Real toolchain invocations as child processes.

use std::process::Command;

use tracing::{debug, info};

use super::types::{Invocation, Invoker, ToolPrograms, ToolchainError, exit_code};

/// Spawns the configured programs and waits for them.
///
/// Children inherit stdio, so toolchain output reaches the user unchanged,
/// and the environment, so `CC`/`PATH` and friends still apply.
#[derive(Debug, Clone)]
pub struct ProcessInvoker {
  programs: ToolPrograms,
}

impl ProcessInvoker {
  pub fn new(programs: ToolPrograms) -> Self {
    Self { programs }
  }
}

impl Invoker for ProcessInvoker {
  fn invoke(&mut self, invocation: &Invocation) -> Result<i32, ToolchainError> {
    let program = self.programs.program(invocation.tool);
    info!(tool = %invocation.tool, program = %program, args = ?invocation.args, "running");
    debug!(workdir = %invocation.workdir.display(), "spawning process");

    let status = Command::new(program)
      .args(&invocation.args)
      .current_dir(&invocation.workdir)
      .status()
      .map_err(|source| ToolchainError::Spawn {
        tool: invocation.tool,
        program: program.to_string(),
        source,
      })?;

    let code = exit_code(status);
    debug!(tool = %invocation.tool, code, "process finished");
    Ok(code)
  }
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
  use super::*;
  use crate::toolchain::Tool;
  use tempfile::TempDir;

  fn sh_invoker() -> ProcessInvoker {
    ProcessInvoker::new(ToolPrograms {
      configure: "/bin/sh".to_string(),
      build: "/bin/sh".to_string(),
    })
  }

  fn script(tool: Tool, script: &str, temp: &TempDir) -> Invocation {
    Invocation {
      tool,
      args: vec!["-c".to_string(), script.to_string()],
      workdir: temp.path().to_path_buf(),
    }
  }

  #[test]
  fn success_returns_zero() {
    let temp = TempDir::new().unwrap();
    let status = sh_invoker().invoke(&script(Tool::Configure, "exit 0", &temp)).unwrap();
    assert_eq!(status, 0);
  }

  #[test]
  fn failure_status_is_returned_verbatim() {
    let temp = TempDir::new().unwrap();
    let status = sh_invoker().invoke(&script(Tool::Build, "exit 3", &temp)).unwrap();
    assert_eq!(status, 3);
  }

  #[test]
  fn runs_in_requested_workdir() {
    let temp = TempDir::new().unwrap();
    sh_invoker()
      .invoke(&script(Tool::Configure, "/usr/bin/touch cwd_marker", &temp))
      .unwrap();
    assert!(temp.path().join("cwd_marker").exists());
  }

  #[test]
  fn missing_program_is_a_spawn_error() {
    let temp = TempDir::new().unwrap();
    let mut invoker = ProcessInvoker::new(ToolPrograms {
      configure: "/nonexistent/octobuild-cmake".to_string(),
      build: "make".to_string(),
    });

    let err = invoker.invoke(&script(Tool::Configure, "exit 0", &temp)).unwrap_err();

    assert!(matches!(err, ToolchainError::Spawn { tool: Tool::Configure, .. }));
    assert!(err.to_string().contains("/nonexistent/octobuild-cmake"));
  }
}
