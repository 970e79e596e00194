/// Project descriptor expected at the source root
pub const PROJECT_DESCRIPTOR: &str = "CMakeLists.txt";

pub const BUILD_DIR: &str = "build";
pub const BIN_DIR: &str = "bin";

/// Toolchain-internal state kept across a clean (downloaded modules etc.)
pub const CACHE_SUBDIR: &str = "cmake";

/// Settings persisted by the last configure run
pub const CACHE_FILE: &str = "CMakeCache.txt";

/// Where the old build directory lives while a clean is in progress
pub const CLEAN_STAGING_DIR: &str = ".build-clean";

pub const INSTALL_TARGET: &str = "install";

pub const SOURCE_DIR_ENV: &str = "OCTOBUILD_SOURCE_DIR";
pub const CMAKE_ENV: &str = "OCTOBUILD_CMAKE";
pub const MAKE_ENV: &str = "OCTOBUILD_MAKE";

pub const DEFAULT_CMAKE: &str = "cmake";
pub const DEFAULT_MAKE: &str = "make";

/// Exit status for failures that never reached the toolchain
pub const FAILURE_STATUS: i32 = 1;
