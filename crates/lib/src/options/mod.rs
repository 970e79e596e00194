//! Option resolution.
//!
//! Turns the raw invocation options into a [`ResolvedConfig`]. Resolution is a
//! pure function of its inputs: the host's processing-unit count is passed in
//! rather than detected here.

mod types;

use std::num::NonZeroUsize;

pub use types::{BuildType, RawOptions, ResolvedConfig};

/// Resolve raw options against the host's processing-unit count.
///
/// - `parallelism`: a requested thread count above one is used verbatim;
///   unset, negative, zero and one all fall back to `host_units`.
/// - `build_type`: debug wins over sanitize; neither means release.
/// - Empty strings for compiler paths or the Boost root count as unset.
///
/// Paths are not checked here. A bad compiler path is the configure tool's
/// failure to report.
pub fn resolve(raw: &RawOptions, host_units: NonZeroUsize) -> ResolvedConfig {
  ResolvedConfig {
    clean_requested: raw.clean,
    install_to_system_root: raw.install_to_root,
    c_compiler_path: non_empty(&raw.c_compiler),
    cxx_compiler_path: non_empty(&raw.cxx_compiler),
    preserve_cache: raw.keep_cache,
    build_type: build_type(raw.debug, raw.sanitize),
    use_static_libs: raw.static_libs,
    parallelism: parallelism(raw.threads, host_units),
    boost_root_path: non_empty(&raw.boost_root),
    verbose_makefile: raw.verbose,
  }
}

fn build_type(debug: bool, sanitize: bool) -> BuildType {
  if debug {
    BuildType::Debug
  } else if sanitize {
    BuildType::ReleaseWithSanitize
  } else {
    BuildType::Release
  }
}

fn parallelism(requested: Option<i64>, host_units: NonZeroUsize) -> NonZeroUsize {
  requested
    .filter(|&n| n > 1)
    .and_then(|n| usize::try_from(n).ok())
    .and_then(NonZeroUsize::new)
    .unwrap_or(host_units)
}

fn non_empty(value: &Option<String>) -> Option<String> {
  value.as_ref().filter(|s| !s.is_empty()).cloned()
}
