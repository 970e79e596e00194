//! The configure → build pipeline.
//!
//! [`run`] walks a fixed sequence: recover an interrupted clean, preflight,
//! ensure `bin/`, clean if requested, invalidate the configure cache unless it
//! is being kept, configure, and (only if configure succeeded) build/install.
//! Nothing is retried and nothing runs concurrently.
//!
//! [`plan`] computes the same invocations without side effects, and
//! [`dry_run`] checks the prerequisites the way a real run would see them
//! after recovery.

mod types;

use tracing::{debug, info};

use crate::layout::ProjectLayout;
use crate::options::ResolvedConfig;
use crate::platform::Host;
use crate::toolchain::{Invocation, Invoker, Tool, build_args, configure_args};

pub use types::{BuildStep, DirectorError, Outcome, Plan};

/// Compute the invocations a run of `config` would make.
pub fn plan(config: &ResolvedConfig, layout: &ProjectLayout, host: &Host) -> Plan {
  let build_dir = layout.build_dir();

  let configure = Invocation {
    tool: Tool::Configure,
    args: configure_args(config, layout.root()),
    workdir: build_dir.clone(),
  };

  let build = host.supports_native_make().then(|| Invocation {
    tool: Tool::Build,
    args: build_args(config),
    workdir: build_dir,
  });

  Plan {
    recovery: layout.pending_recovery(),
    clean: config.clean_requested,
    invalidate_cache: !config.preserve_cache,
    configure,
    build,
  }
}

/// Plan a run after checking its prerequisites, without changing anything.
///
/// A build directory staged by an interrupted clean satisfies preflight here,
/// because a real run restores it first.
pub fn dry_run(config: &ResolvedConfig, layout: &ProjectLayout, host: &Host) -> Result<Plan, DirectorError> {
  let plan = plan(config, layout, host);
  layout.preflight_after(plan.recovery)?;
  Ok(plan)
}

/// Run the full pipeline.
///
/// A non-zero configure status is returned as the outcome without starting
/// the build. Filesystem and spawn failures abort the run as errors.
pub fn run<I>(
  config: &ResolvedConfig,
  layout: &ProjectLayout,
  host: &Host,
  invoker: &mut I,
) -> Result<Outcome, DirectorError>
where
  I: Invoker + ?Sized,
{
  let recovery = layout.recover_interrupted_clean()?;
  layout.preflight()?;
  let created_bin_dir = layout.ensure_bin_dir()?;

  if config.clean_requested {
    layout.clean()?;
  }

  let cache_invalidated = if config.preserve_cache {
    false
  } else {
    layout.invalidate_cache()?
  };

  let plan = plan(config, layout, host);

  let configure_status = invoker.invoke(&plan.configure)?;
  let build = if configure_status != 0 {
    debug!(status = configure_status, "configure failed, not building");
    BuildStep::NotAttempted
  } else if let Some(build) = &plan.build {
    BuildStep::Ran {
      status: invoker.invoke(build)?,
    }
  } else {
    let build_dir = layout.build_dir();
    info!(
      host = %host,
      "make files not supported on this host, build files have been written to {}",
      build_dir.display()
    );
    BuildStep::Skipped { build_dir }
  };

  Ok(Outcome {
    recovery,
    created_bin_dir,
    cleaned: config.clean_requested,
    cache_invalidated,
    configure_status,
    build,
  })
}
