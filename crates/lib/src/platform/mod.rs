pub mod os;
pub mod paths;

use std::fmt;
use std::num::NonZeroUsize;

use os::Os;

/// Facts about the machine running the build.
///
/// Detected once at startup and handed to the resolver and director, so
/// neither has to consult ambient process state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Host {
  /// `None` when the OS is not one octobuild recognizes
  pub os: Option<Os>,
  pub processing_units: NonZeroUsize,
}

impl Host {
  pub fn new(os: Option<Os>, processing_units: NonZeroUsize) -> Self {
    Self { os, processing_units }
  }

  /// Detect the current host at runtime
  pub fn detect() -> Self {
    Self {
      os: Os::current(),
      processing_units: available_processing_units(),
    }
  }

  /// Whether the build/install step can run on this host
  pub fn supports_native_make(&self) -> bool {
    self.os.is_some_and(|os| os.has_native_make())
  }
}

impl fmt::Display for Host {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.os {
      Some(os) => write!(f, "{} ({} units)", os, self.processing_units),
      None => write!(f, "unknown ({} units)", self.processing_units),
    }
  }
}

/// Number of processing units available to this process, at least one
pub fn available_processing_units() -> NonZeroUsize {
  std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN)
}
