//! The on-disk project tree octobuild manages.
//!
//! A project root holds the `CMakeLists.txt` descriptor, a `build/` directory
//! (with the toolchain's `cmake/` cache subdirectory and the `CMakeCache.txt`
//! cache file inside it) and a `bin/` output directory.
//!
//! Clean works by renaming `build/` aside to `.build-clean/`, creating a fresh
//! `build/`, moving `cmake/` back in and only then deleting the staged tree.
//! The cache subdirectory is outside the build tree for the span of two
//! renames, and [`ProjectLayout::recover_interrupted_clean`] puts it back if
//! the process dies in between.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::consts::{BIN_DIR, BUILD_DIR, CACHE_FILE, CACHE_SUBDIR, CLEAN_STAGING_DIR, PROJECT_DESCRIPTOR};

/// Errors that can occur while preparing the build tree.
#[derive(Debug, Error)]
pub enum LayoutError {
  #[error("source directory corrupted: root CMakeLists.txt is missing at {}. Please re-download source code.", path.display())]
  MissingDescriptor { path: PathBuf },

  #[error("source directory corrupted: build directory is missing at {}. Please re-download source code.", path.display())]
  MissingBuildDir { path: PathBuf },

  #[error("failed to create directory {}: {source}", path.display())]
  CreateDir { path: PathBuf, source: io::Error },

  #[error("failed to move {} to {}: {source}", from.display(), to.display())]
  Move { from: PathBuf, to: PathBuf, source: io::Error },

  #[error("failed to remove {}: {source}", path.display())]
  Remove { path: PathBuf, source: io::Error },
}

/// What recovery found left over from an interrupted clean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Recovery {
  /// No staged tree, nothing to do
  Nothing,
  /// The whole build directory was staged and has been renamed back
  RestoredBuildDir,
  /// The cache subdirectory had not been moved back yet and now is
  RestoredCacheSubdir,
  /// The staged tree held nothing worth keeping and was removed
  DiscardedStaging,
}

/// Paths of a project tree rooted at `root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
  root: PathBuf,
}

impl ProjectLayout {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn descriptor(&self) -> PathBuf {
    self.root.join(PROJECT_DESCRIPTOR)
  }

  pub fn build_dir(&self) -> PathBuf {
    self.root.join(BUILD_DIR)
  }

  pub fn bin_dir(&self) -> PathBuf {
    self.root.join(BIN_DIR)
  }

  pub fn cache_subdir(&self) -> PathBuf {
    self.build_dir().join(CACHE_SUBDIR)
  }

  pub fn cache_file(&self) -> PathBuf {
    self.build_dir().join(CACHE_FILE)
  }

  pub fn staging_dir(&self) -> PathBuf {
    self.root.join(CLEAN_STAGING_DIR)
  }

  /// Check the structural prerequisites: the project descriptor and the build directory.
  pub fn preflight(&self) -> Result<(), LayoutError> {
    let descriptor = self.descriptor();
    if !descriptor.is_file() {
      return Err(LayoutError::MissingDescriptor { path: descriptor });
    }

    let build_dir = self.build_dir();
    if !build_dir.is_dir() {
      return Err(LayoutError::MissingBuildDir { path: build_dir });
    }

    Ok(())
  }

  /// Check the prerequisites as they will stand once `recovery` has been applied.
  ///
  /// A staged build directory counts as present, since recovery renames it back.
  pub fn preflight_after(&self, recovery: Recovery) -> Result<(), LayoutError> {
    if recovery != Recovery::RestoredBuildDir {
      return self.preflight();
    }

    let descriptor = self.descriptor();
    if !descriptor.is_file() {
      return Err(LayoutError::MissingDescriptor { path: descriptor });
    }
    if !self.staging_dir().is_dir() {
      return Err(LayoutError::MissingBuildDir { path: self.build_dir() });
    }
    Ok(())
  }

  /// What [`recover_interrupted_clean`](Self::recover_interrupted_clean) would do, without doing it.
  pub fn pending_recovery(&self) -> Recovery {
    let staging = self.staging_dir();
    if !staging.exists() {
      Recovery::Nothing
    } else if !self.build_dir().exists() {
      Recovery::RestoredBuildDir
    } else if staging.join(CACHE_SUBDIR).is_dir() && !self.cache_subdir().exists() {
      Recovery::RestoredCacheSubdir
    } else {
      Recovery::DiscardedStaging
    }
  }

  /// Create the binary output directory if it is missing.
  ///
  /// Returns `true` when the directory had to be created.
  pub fn ensure_bin_dir(&self) -> Result<bool, LayoutError> {
    let bin_dir = self.bin_dir();
    if bin_dir.is_dir() {
      return Ok(false);
    }

    info!(path = %bin_dir.display(), "no bin directory found, making one");
    create_dir_all(&bin_dir)?;
    Ok(true)
  }

  /// Put back whatever an interrupted [`clean`](Self::clean) left in the staging directory.
  ///
  /// Runs before preflight, since an interruption right after the first rename
  /// leaves no build directory at all.
  pub fn recover_interrupted_clean(&self) -> Result<Recovery, LayoutError> {
    let staging = self.staging_dir();
    if !staging.exists() {
      return Ok(Recovery::Nothing);
    }

    let build_dir = self.build_dir();
    if !build_dir.exists() {
      warn!(path = %staging.display(), "restoring build directory from interrupted clean");
      rename(&staging, &build_dir)?;
      return Ok(Recovery::RestoredBuildDir);
    }

    let staged_cache = staging.join(CACHE_SUBDIR);
    let cache_subdir = self.cache_subdir();
    let recovery = if staged_cache.is_dir() && !cache_subdir.exists() {
      warn!(path = %staged_cache.display(), "restoring cache subdirectory from interrupted clean");
      rename(&staged_cache, &cache_subdir)?;
      Recovery::RestoredCacheSubdir
    } else {
      debug!(path = %staging.display(), "discarding leftover clean staging directory");
      Recovery::DiscardedStaging
    };

    remove_dir_all(&staging)?;
    Ok(recovery)
  }

  /// Reset the build directory, keeping only the cache subdirectory.
  ///
  /// A build directory without a cache subdirectory is simply emptied.
  pub fn clean(&self) -> Result<(), LayoutError> {
    let build_dir = self.build_dir();
    let staging = self.staging_dir();

    info!(path = %build_dir.display(), "cleaning build directory");

    if staging.exists() {
      remove_dir_all(&staging)?;
    }

    rename(&build_dir, &staging)?;
    create_dir_all(&build_dir)?;

    let staged_cache = staging.join(CACHE_SUBDIR);
    if staged_cache.is_dir() {
      rename(&staged_cache, &self.cache_subdir())?;
    } else {
      debug!(path = %staged_cache.display(), "no cache subdirectory to preserve");
    }

    remove_dir_all(&staging)
  }

  /// Delete the configure cache file so the toolchain re-detects compilers and paths.
  ///
  /// Returns `true` when a cache file was removed.
  pub fn invalidate_cache(&self) -> Result<bool, LayoutError> {
    let cache_file = self.cache_file();
    if !cache_file.is_file() {
      return Ok(false);
    }

    debug!(path = %cache_file.display(), "removing configure cache");
    fs::remove_file(&cache_file).map_err(|source| LayoutError::Remove {
      path: cache_file,
      source,
    })?;
    Ok(true)
  }
}

fn create_dir_all(path: &Path) -> Result<(), LayoutError> {
  fs::create_dir_all(path).map_err(|source| LayoutError::CreateDir {
    path: path.to_path_buf(),
    source,
  })
}

fn rename(from: &Path, to: &Path) -> Result<(), LayoutError> {
  debug!(from = %from.display(), to = %to.display(), "moving");
  fs::rename(from, to).map_err(|source| LayoutError::Move {
    from: from.to_path_buf(),
    to: to.to_path_buf(),
    source,
  })
}

fn remove_dir_all(path: &Path) -> Result<(), LayoutError> {
  fs::remove_dir_all(path).map_err(|source| LayoutError::Remove {
    path: path.to_path_buf(),
    source,
  })
}
