use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::consts::FAILURE_STATUS;
use crate::layout::{LayoutError, Recovery};
use crate::toolchain::{Invocation, ToolchainError};

/// Errors that abort a run before the toolchain could report a status.
#[derive(Debug, Error)]
pub enum DirectorError {
  #[error(transparent)]
  Layout(#[from] LayoutError),

  #[error(transparent)]
  Toolchain(#[from] ToolchainError),
}

impl DirectorError {
  /// Status the process exits with when a run aborts
  pub fn exit_status(&self) -> i32 {
    FAILURE_STATUS
  }
}

/// Everything a run would do, computed without modifying the filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
  /// Leftovers of an interrupted clean that the run would put back first
  pub recovery: Recovery,
  pub clean: bool,
  /// Whether an existing cache file would be deleted before configure
  pub invalidate_cache: bool,
  pub configure: Invocation,
  /// `None` when the host has no native make toolchain
  pub build: Option<Invocation>,
}

/// What happened to the build/install step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "kebab-case")]
pub enum BuildStep {
  /// Configure failed, so build was never started
  NotAttempted,
  /// Host cannot run make; the generated build files are left in `build_dir`
  Skipped { build_dir: PathBuf },
  Ran { status: i32 },
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
  pub recovery: Recovery,
  pub created_bin_dir: bool,
  pub cleaned: bool,
  pub cache_invalidated: bool,
  pub configure_status: i32,
  pub build: BuildStep,
}

impl Outcome {
  /// Status of the last invocation that ran, or zero if build was skipped.
  pub fn exit_status(&self) -> i32 {
    match self.build {
      BuildStep::Ran { status } => status,
      BuildStep::NotAttempted | BuildStep::Skipped { .. } => self.configure_status,
    }
  }

  pub fn is_success(&self) -> bool {
    self.exit_status() == 0
  }
}
