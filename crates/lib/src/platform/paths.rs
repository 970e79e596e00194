use std::io;
use std::path::{Path, PathBuf};

use crate::consts::SOURCE_DIR_ENV;

/// Returns the project root octobuild operates on.
///
/// Precedence: `explicit` (the `--source-dir` flag), then `OCTOBUILD_SOURCE_DIR`,
/// then the current working directory. The result is canonicalized when the
/// directory exists; a missing directory is returned as given so preflight can
/// report it.
pub fn source_dir(explicit: Option<&Path>) -> io::Result<PathBuf> {
  let dir = match explicit {
    Some(path) => path.to_path_buf(),
    None => match std::env::var_os(SOURCE_DIR_ENV) {
      Some(value) if !value.is_empty() => PathBuf::from(value),
      _ => std::env::current_dir()?,
    },
  };
  Ok(dunce::canonicalize(&dir).unwrap_or(dir))
}
