//! Command execution engine.
//!
//! This module provides synchronous command execution:
//! - Raw shell lines (`sh -c`) and argument vectors
//! - Captured or streamed output
//! - Blocking (fail on nonzero exit) or non-blocking runs
//!
//! # Example
//!
//! ```no_run
//! use nix_shell_utils::execution::{run_line, RunOptions};
//!
//! let result = run_line("git describe --tags", RunOptions::quiet()).unwrap();
//! println!("version: {}", result.stdout_trimmed());
//! ```

mod command;
mod executor;
mod result;

pub use command::{Command, Invocation, ShellConfig};
pub use executor::{run_line, CommandExecutor, RunOptions};
pub use result::CommandResult;
