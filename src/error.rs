//! Error types for nix-shell-utils.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for shell utility operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A blocking command exited with a nonzero code.
    #[error("command failed with exit code {code}: {command}")]
    CommandFailed {
        /// The command line that was executed.
        command: String,
        /// Exit code reported by the process.
        code: i32,
        /// Captured standard error (empty unless output was captured).
        stderr: String,
    },

    /// The target of a directory change does not exist.
    #[error("path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    /// The target of a directory change is not a directory.
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// The process could not be started at all.
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid glob pattern.
    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Exit code carried by a failed command, if any.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::CommandFailed { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Convenience Result type for shell utility operations.
pub type Result<T> = std::result::Result<T, Error>;
