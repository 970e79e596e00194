//! Implementation of the `octobuild` command.
//!
//! Resolves options against the detected host, then either prints the plan
//! (`--dry-run`) or runs configure and build/install, returning the status the
//! process should exit with.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::debug;

use octobuild_lib::director::{self, BuildStep, Outcome, Plan};
use octobuild_lib::layout::{ProjectLayout, Recovery};
use octobuild_lib::options::{RawOptions, resolve};
use octobuild_lib::platform::{Host, paths};
use octobuild_lib::toolchain::{ProcessInvoker, ToolPrograms};

use crate::output::{
  OutputFormat, format_command, format_duration, print_info, print_json, print_step, print_success, print_warning,
};

/// Execute the build command.
///
/// Toolchain failures are not errors here: their status is returned as-is.
/// `Err` is reserved for missing prerequisites and filesystem or spawn
/// failures.
pub fn cmd_build(raw: &RawOptions, source_dir: Option<&Path>, dry_run: bool, output: OutputFormat) -> Result<i32> {
  let start = Instant::now();

  let host = Host::detect();
  let config = resolve(raw, host.processing_units);
  let root = paths::source_dir(source_dir).context("Failed to determine source directory")?;
  let layout = ProjectLayout::new(root);
  let programs = ToolPrograms::from_env();

  debug!(host = %host, root = %layout.root().display(), ?config, "resolved configuration");

  if dry_run {
    let plan = director::dry_run(&config, &layout, &host)?;
    if output.is_json() {
      print_json(&plan)?;
    } else {
      print_plan(&plan, &programs);
    }
    return Ok(0);
  }

  let mut invoker = ProcessInvoker::new(programs);
  let outcome = director::run(&config, &layout, &host, &mut invoker)?;

  if output.is_json() {
    print_json(&outcome)?;
  } else {
    print_outcome(&outcome, start.elapsed());
  }

  Ok(outcome.exit_status())
}

fn print_plan(plan: &Plan, programs: &ToolPrograms) {
  print_info("Dry run - nothing will be changed");
  match plan.recovery {
    Recovery::Nothing => {}
    Recovery::RestoredBuildDir => print_step("recover", "restore build directory from interrupted clean"),
    Recovery::RestoredCacheSubdir => print_step("recover", "move cmake/ back from interrupted clean"),
    Recovery::DiscardedStaging => print_step("recover", "remove leftover clean staging directory"),
  }
  if plan.clean {
    print_step("clean", "reset build directory, keeping cmake/");
  }
  if plan.invalidate_cache {
    print_step("cache", "remove CMakeCache.txt if present");
  }
  print_step(
    "configure",
    &format_command(programs.program(plan.configure.tool), &plan.configure.args),
  );
  match &plan.build {
    Some(build) => print_step("build", &format_command(programs.program(build.tool), &build.args)),
    None => print_step("build", "skipped, make files are not supported on this host"),
  }
  print_step("workdir", &plan.configure.workdir.display().to_string());
}

fn print_outcome(outcome: &Outcome, elapsed: Duration) {
  match outcome.recovery {
    Recovery::Nothing | Recovery::DiscardedStaging => {}
    Recovery::RestoredBuildDir | Recovery::RestoredCacheSubdir => {
      print_warning("Recovered build directory left over from an interrupted clean")
    }
  }

  if let BuildStep::Skipped { build_dir } = &outcome.build {
    print_info(&format!(
      "Make files not supported on this host. Build files have been written to {}",
      build_dir.display()
    ));
    return;
  }

  if outcome.is_success() {
    print_success(&format!("Installed in {}", format_duration(elapsed)));
  }
}
