use std::fmt;
use std::num::NonZeroUsize;

use serde::Serialize;

/// Options exactly as the user supplied them.
///
/// Every field is independently optional. Nothing here has been checked or
/// defaulted yet; see [`super::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOptions {
  pub clean: bool,
  pub install_to_root: bool,
  pub c_compiler: Option<String>,
  pub cxx_compiler: Option<String>,
  pub keep_cache: bool,
  pub debug: bool,
  pub sanitize: bool,
  pub static_libs: bool,
  /// Signed, so out-of-range requests reach resolution and fall back
  pub threads: Option<i64>,
  pub boost_root: Option<String>,
  pub verbose: bool,
}

/// CMake build type. Exactly one is selected per invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildType {
  Debug,
  /// Optimized with debug info, used for sanitizer builds
  ReleaseWithSanitize,
  #[default]
  Release,
}

impl BuildType {
  /// Value passed to `CMAKE_BUILD_TYPE`
  pub fn cmake_name(&self) -> &'static str {
    match self {
      Self::Debug => "Debug",
      Self::ReleaseWithSanitize => "RelWithDebInfo",
      Self::Release => "Release",
    }
  }
}

impl fmt::Display for BuildType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.cmake_name())
  }
}

/// Validated configuration for one invocation. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfig {
  pub clean_requested: bool,
  pub install_to_system_root: bool,
  pub c_compiler_path: Option<String>,
  pub cxx_compiler_path: Option<String>,
  pub preserve_cache: bool,
  pub build_type: BuildType,
  pub use_static_libs: bool,
  pub parallelism: NonZeroUsize,
  pub boost_root_path: Option<String>,
  pub verbose_makefile: bool,
}
