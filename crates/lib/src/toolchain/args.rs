//! Translation of a [`ResolvedConfig`] into toolchain argument lists.

use std::path::Path;

use crate::consts::INSTALL_TARGET;
use crate::options::ResolvedConfig;

/// Arguments for the configure tool.
///
/// Order is fixed: install root, C compiler, C++ compiler, build type, static
/// libs, Boost root, verbose makefile, then the source directory last.
pub fn configure_args(config: &ResolvedConfig, source_dir: &Path) -> Vec<String> {
  let source = source_dir.to_string_lossy().into_owned();
  let mut args = Vec::new();

  if config.install_to_system_root {
    args.push("-DINSTALL_ROOT=ON".to_string());
    args.push(source.clone());
  }
  if let Some(cc) = &config.c_compiler_path {
    args.push(format!("-DCMAKE_C_COMPILER={cc}"));
  }
  if let Some(cxx) = &config.cxx_compiler_path {
    args.push(format!("-DCMAKE_CXX_COMPILER={cxx}"));
  }
  args.push(format!("-DCMAKE_BUILD_TYPE={}", config.build_type.cmake_name()));
  if config.use_static_libs {
    args.push("-DBUILD_SHARED_LIBS=OFF".to_string());
  }
  if let Some(boost) = &config.boost_root_path {
    args.push(format!("-DBOOST_ROOT={boost}"));
  }
  if config.verbose_makefile {
    args.push("-DCMAKE_VERBOSE_MAKEFILE:BOOL=ON".to_string());
  }

  args.push(source);
  args
}

/// Arguments for the build tool: the install target and a `-jN` job count.
pub fn build_args(config: &ResolvedConfig) -> Vec<String> {
  vec![INSTALL_TARGET.to_string(), format!("-j{}", config.parallelism)]
}
