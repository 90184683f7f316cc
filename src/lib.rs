//! # nix-shell-utils
//!
//! Wrappers for the shell commands scripts use most often.
//!
//! Build and release scripts tend to grow small shell snippets heavy with
//! `cp`, `rm` and `mkdir`. This crate gives those tasks a typed home: each
//! operation runs one external command (or is a pure path computation) and
//! reports a structured [`CommandResult`] or an [`Error`].
//!
//! ## Features
//!
//! - **Shell context**: [`Shell`] owns its working directory; `cd` returns the
//!   previous one and `pushd` restores it automatically
//! - **Two execution modes**: raw shell lines via [`Shell::run`], argument
//!   vectors for every filesystem shim
//! - **Captured or streamed output**: see [`RunOptions`]
//! - **Path helpers**: `~`/`$VAR` expansion, joining, globbing
//!
//! ## Quick Start
//!
//! ```no_run
//! use nix_shell_utils::{pjoin, RunOptions, Shell};
//!
//! fn main() -> nix_shell_utils::Result<()> {
//!     nix_shell_utils::logging::try_init().ok();
//!
//!     let mut sh = Shell::new()?;
//!     sh.mkdir(pjoin(["dist", "docs"]))?;
//!     sh.rm("*~")?;
//!
//!     sh.within("docs", |docs| {
//!         docs.run("make html")?;
//!         Ok(())
//!     })?;
//!
//!     let status = sh.run_with("git status --short", RunOptions::quiet())?;
//!     for line in status.stdout_lines() {
//!         println!("{line}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod execution;
pub mod logging;
pub mod paths;
pub mod shell;

// Re-export commonly used types
pub use error::{Error, Result};
pub use execution::{Command, CommandResult, RunOptions, ShellConfig};
pub use paths::{basename, expand, expand_all, pjoin, pjoin_dir, root_files, stem};
pub use shell::{DirGuard, Shell};
