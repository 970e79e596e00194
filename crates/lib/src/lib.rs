//! octobuild-lib: option resolution and build orchestration for octobuild
//!
//! This crate provides the pieces the `octobuild` binary wires together:
//! - `options`: raw invocation options resolved into an immutable `ResolvedConfig`
//! - `layout`: the project tree (`CMakeLists.txt`, `build/`, `bin/`) and its clean/reset lifecycle
//! - `toolchain`: configure/build invocations behind the `Invoker` trait
//! - `director`: the configure → build pipeline and exit-status propagation

pub mod consts;
pub mod director;
pub mod layout;
pub mod options;
pub mod platform;
pub mod toolchain;
pub mod util;
