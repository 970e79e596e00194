//! Test utilities for octobuild-lib.
//!
//! Scratch project trees, directory snapshots, and an [`Invoker`] that records
//! calls instead of spawning a toolchain.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use walkdir::WalkDir;

use crate::consts::{BUILD_DIR, PROJECT_DESCRIPTOR};
use crate::layout::ProjectLayout;
use crate::toolchain::{Invocation, Invoker, Tool, ToolchainError};

/// A temporary project root with a descriptor and an empty build directory.
pub struct ProjectFixture {
  pub temp: TempDir,
  root: PathBuf,
}

impl ProjectFixture {
  pub fn new() -> Self {
    let temp = TempDir::new().unwrap();
    let root = dunce::canonicalize(temp.path()).unwrap();
    fs::write(root.join(PROJECT_DESCRIPTOR), "cmake_minimum_required(VERSION 3.9)\n").unwrap();
    fs::create_dir(root.join(BUILD_DIR)).unwrap();
    Self { temp, root }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn layout(&self) -> ProjectLayout {
    ProjectLayout::new(&self.root)
  }

  /// Write a file relative to the project root, creating parents.
  pub fn write(&self, relative_path: &str, content: &str) {
    let path = self.root.join(relative_path);
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
  }
}

/// Every entry under `dir`, keyed by relative path. Directories map to `None`.
pub fn snapshot_tree(dir: &Path) -> BTreeMap<PathBuf, Option<Vec<u8>>> {
  WalkDir::new(dir)
    .min_depth(1)
    .into_iter()
    .map(|entry| {
      let entry = entry.unwrap();
      let relative = entry.path().strip_prefix(dir).unwrap().to_path_buf();
      let content = if entry.file_type().is_file() {
        Some(fs::read(entry.path()).unwrap())
      } else {
        None
      };
      (relative, content)
    })
    .collect()
}

/// Records every invocation and answers with a canned status per tool (zero by default).
#[derive(Debug, Default)]
pub struct RecordingInvoker {
  pub calls: Vec<Invocation>,
  statuses: HashMap<Tool, i32>,
}

impl RecordingInvoker {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_status(mut self, tool: Tool, status: i32) -> Self {
    self.statuses.insert(tool, status);
    self
  }

  pub fn calls_for(&self, tool: Tool) -> Vec<&Invocation> {
    self.calls.iter().filter(|c| c.tool == tool).collect()
  }
}

impl Invoker for RecordingInvoker {
  fn invoke(&mut self, invocation: &Invocation) -> Result<i32, ToolchainError> {
    self.calls.push(invocation.clone());
    Ok(self.statuses.get(&invocation.tool).copied().unwrap_or(0))
  }
}
