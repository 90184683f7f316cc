//! The `Shell` execution context and the filesystem shims built on it.
//!
//! # Example
//!
//! ```no_run
//! use nix_shell_utils::{RunOptions, Shell};
//!
//! let mut sh = Shell::new()?;
//! sh.mkdir("build/out")?;
//! sh.cp("README.md", "build/out")?;
//! {
//!     let docs = sh.pushd("build")?;
//!     docs.run("ls -l")?;
//! }
//! let version = sh.run_with("git describe --tags", RunOptions::quiet())?;
//! println!("{}", version.stdout_trimmed());
//! # Ok::<(), nix_shell_utils::Error>(())
//! ```

mod context;
mod fs;

pub use context::{DirGuard, Shell};
