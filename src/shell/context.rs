//! Execution context: the working directory every operation runs in.

use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Error;
use crate::execution::{Command, CommandExecutor, CommandResult, RunOptions, ShellConfig};
use crate::paths::{self, expand};
use crate::Result;

/// Runs commands rooted at its own working directory.
///
/// The directory is a property of the `Shell`, not of the process: [`cd`]
/// never calls `chdir(2)`, so two shells never see each other's moves.
///
/// [`cd`]: Shell::cd
#[derive(Debug, Clone)]
pub struct Shell {
    cwd: PathBuf,
    executor: CommandExecutor,
}

impl Shell {
    /// Create a shell rooted at the process working directory.
    pub fn new() -> Result<Self> {
        Ok(Self::at(std::env::current_dir()?))
    }

    /// Create a shell rooted at `dir`. The directory is not checked.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self {
            cwd: dir.into(),
            executor: CommandExecutor::default(),
        }
    }

    /// Use `shell` for raw command lines.
    pub fn with_shell(mut self, shell: ShellConfig) -> Self {
        self.executor = CommandExecutor::new(shell);
        self
    }

    /// The current working directory.
    pub fn pwd(&self) -> &Path {
        &self.cwd
    }

    /// Expand `path` and resolve it against the working directory.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        match path.to_str() {
            Some(text) => self.cwd.join(expand(text)),
            None => self.cwd.join(path),
        }
    }

    /// Change the working directory, returning the previous one.
    ///
    /// `~` and environment variables in `path` are expanded; an empty path
    /// means the home directory.
    pub fn cd(&mut self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let target = if path.as_ref().as_os_str().is_empty() {
            dirs::home_dir().ok_or_else(|| Error::PathNotFound(PathBuf::from("~")))?
        } else {
            self.resolve(path)
        };

        if !target.exists() {
            return Err(Error::PathNotFound(target));
        }
        let target = target.canonicalize()?;
        if !target.is_dir() {
            return Err(Error::NotADirectory(target));
        }

        debug!(from = %self.cwd.display(), to = %target.display(), "changing directory");
        Ok(std::mem::replace(&mut self.cwd, target))
    }

    /// Change directory for the lifetime of the returned guard.
    ///
    /// The previous directory is restored when the guard drops, including
    /// on early returns and panics.
    pub fn pushd(&mut self, path: impl AsRef<Path>) -> Result<DirGuard<'_>> {
        let previous = self.cd(path)?;
        Ok(DirGuard {
            shell: self,
            previous,
        })
    }

    /// Run `f` inside `path`, then restore the working directory.
    pub fn within<T, F>(&mut self, path: impl AsRef<Path>, f: F) -> Result<T>
    where
        F: FnOnce(&mut Shell) -> Result<T>,
    {
        let mut guard = self.pushd(path)?;
        f(&mut *guard)
    }

    /// Run a raw shell line, blocking and streaming output.
    pub fn run(&self, line: &str) -> Result<CommandResult> {
        self.run_with(line, RunOptions::default())
    }

    /// Run a raw shell line with explicit options.
    pub fn run_with(&self, line: &str, options: RunOptions) -> Result<CommandResult> {
        self.exec(Command::shell(line), options)
    }

    /// Run a prepared [`Command`] in the working directory.
    pub fn exec(&self, command: Command, options: RunOptions) -> Result<CommandResult> {
        self.executor.run(command, &self.cwd, options)
    }

    /// Base names of the entries matching `pattern`, relative to the working
    /// directory. Order follows the `glob` crate (sorted per directory) and
    /// is not part of the contract.
    pub fn bglob(&self, pattern: &str) -> Result<Vec<String>> {
        paths::bglob_in(&self.cwd, pattern)
    }

    /// Absolute paths of the entries matching `pattern`. Same order caveat as
    /// [`bglob`](Shell::bglob).
    pub fn aglob(&self, pattern: &str) -> Result<Vec<String>> {
        paths::aglob_in(&self.cwd, pattern)
    }
}

/// Restores a [`Shell`]'s working directory on drop. Derefs to the shell.
#[derive(Debug)]
pub struct DirGuard<'a> {
    shell: &'a mut Shell,
    previous: PathBuf,
}

impl DirGuard<'_> {
    /// The directory that will be restored.
    pub fn previous(&self) -> &Path {
        &self.previous
    }
}

impl Deref for DirGuard<'_> {
    type Target = Shell;

    fn deref(&self) -> &Shell {
        self.shell
    }
}

impl DerefMut for DirGuard<'_> {
    fn deref_mut(&mut self) -> &mut Shell {
        self.shell
    }
}

impl Drop for DirGuard<'_> {
    fn drop(&mut self) {
        debug!(to = %self.previous.display(), "restoring directory");
        self.shell.cwd = std::mem::take(&mut self.previous);
    }
}
