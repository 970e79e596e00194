//! Toolchain invocation.
//!
//! The director talks to the configure and build tools only through the
//! [`Invoker`] trait. [`ProcessInvoker`] is the real implementation; tests use a
//! recording stub.

mod args;
mod process;
mod types;

pub use args::{build_args, configure_args};
pub use process::ProcessInvoker;
pub use types::{Invocation, Invoker, Tool, ToolPrograms, ToolchainError, exit_code};
