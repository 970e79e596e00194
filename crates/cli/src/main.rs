mod cmd;
mod output;

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use octobuild_lib::consts::FAILURE_STATUS;
use octobuild_lib::director::DirectorError;
use octobuild_lib::options::RawOptions;

use output::{OutputFormat, print_error};

/// octobuild - configure, build and install a CMake project
#[derive(Parser)]
#[command(name = "octobuild")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Do a clean install (reset the build directory, keeping the toolchain cache)
  #[arg(long)]
  clean: bool,

  /// Install into the system-wide location
  #[arg(long, alias = "root")]
  install_to_root: bool,

  /// C compiler path to use
  #[arg(short = 'c', long, alias = "c_compiler", value_name = "PATH")]
  c_compiler: Option<String>,

  /// C++ compiler path to use
  #[arg(long, visible_alias = "cxx", alias = "cxx_compiler", value_name = "PATH")]
  cxx_compiler: Option<String>,

  /// Do not refresh the CMake cache
  #[arg(long, alias = "keep_cache")]
  keep_cache: bool,

  /// Build in debug mode
  #[arg(long)]
  debug: bool,

  /// Build in release mode with sanitize flags (ignored with --debug)
  #[arg(long)]
  sanitize: bool,

  /// Build using static libraries
  #[arg(long = "static")]
  static_libs: bool,

  /// Number of parallel build jobs (values below 2 use every available core)
  #[arg(short = 'j', long, value_name = "N", allow_negative_numbers = true)]
  threads: Option<i64>,

  /// Boost library root
  #[arg(long, alias = "boost", value_name = "PATH")]
  boost_root: Option<String>,

  /// Output verbose make information
  #[arg(long)]
  verbose: bool,

  /// Project root (defaults to $OCTOBUILD_SOURCE_DIR, then the current directory)
  #[arg(long, value_name = "DIR")]
  source_dir: Option<PathBuf>,

  /// Show the configure/build invocations without running anything
  #[arg(long)]
  dry_run: bool,

  /// Output format
  #[arg(short, long, value_enum, default_value_t)]
  output: OutputFormat,
}

impl Cli {
  fn raw_options(&self) -> RawOptions {
    RawOptions {
      clean: self.clean,
      install_to_root: self.install_to_root,
      c_compiler: self.c_compiler.clone(),
      cxx_compiler: self.cxx_compiler.clone(),
      keep_cache: self.keep_cache,
      debug: self.debug,
      sanitize: self.sanitize,
      static_libs: self.static_libs,
      threads: self.threads,
      boost_root: self.boost_root.clone(),
      verbose: self.verbose,
    }
  }
}

/// Rewrite the single-dash `-cxx` spelling to `--cxx`.
///
/// Left alone, clap reads `-cxx` as `-c` with the value `xx`.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
  I: IntoIterator<Item = OsString>,
{
  args
    .into_iter()
    .map(|arg| {
      let rewritten = arg.to_str().and_then(|s| match s {
        "-cxx" => Some(OsString::from("--cxx")),
        _ => s.strip_prefix("-cxx=").map(|path| OsString::from(format!("--cxx={path}"))),
      });
      rewritten.unwrap_or(arg)
    })
    .collect()
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let cli = Cli::parse_from(normalize_args(std::env::args_os()));

  let status = match cmd::cmd_build(&cli.raw_options(), cli.source_dir.as_deref(), cli.dry_run, cli.output) {
    Ok(status) => status,
    Err(err) => {
      print_error(&format!("{:#}", err));
      err
        .downcast_ref::<DirectorError>()
        .map_or(FAILURE_STATUS, DirectorError::exit_status)
    }
  };

  std::process::exit(status);
}
