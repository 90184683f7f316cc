//! Command execution engine.

use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Instant;

use tracing::{debug, warn};

use super::command::{Command, ShellConfig};
use super::result::CommandResult;
use crate::error::Error;
use crate::Result;

/// Flags controlling a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Fail with [`Error::CommandFailed`] on a nonzero exit code.
    pub blocking: bool,
    /// Capture stdout/stderr instead of streaming them to the terminal.
    pub quiet: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            blocking: true,
            quiet: false,
        }
    }
}

impl RunOptions {
    /// Blocking, with output captured.
    pub fn quiet() -> Self {
        Self {
            quiet: true,
            ..Self::default()
        }
    }

    /// Set whether a nonzero exit code is an error.
    pub fn blocking(mut self, blocking: bool) -> Self {
        self.blocking = blocking;
        self
    }

    /// Set whether output is captured.
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

/// Runs [`Command`]s to completion, one at a time.
#[derive(Debug, Clone, Default)]
pub struct CommandExecutor {
    shell: ShellConfig,
}

impl CommandExecutor {
    /// Create an executor that runs shell lines through `shell`.
    pub fn new(shell: ShellConfig) -> Self {
        Self { shell }
    }

    /// The shell used for raw lines.
    pub fn shell(&self) -> &ShellConfig {
        &self.shell
    }

    /// Execute a command and wait for it to exit.
    ///
    /// A nonzero exit code is reported on the result, never as an error.
    pub fn execute(&self, command: &Command, cwd: &Path) -> Result<CommandResult> {
        let line = command.display_line();
        debug!(command = %line, cwd = %cwd.display(), capture = command.capture_output, "running command");

        let mut process = command.to_process(&self.shell, cwd);
        let start = Instant::now();
        let spawn_err = |source: std::io::Error| Error::Spawn {
            command: line.clone(),
            source,
        };

        let result = if command.capture_output {
            let output = process.output().map_err(spawn_err)?;
            CommandResult::captured(
                line.clone(),
                String::from_utf8_lossy(&output.stdout).into_owned(),
                String::from_utf8_lossy(&output.stderr).into_owned(),
                exit_code(output.status),
                start.elapsed(),
            )
        } else {
            let status = process
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .status()
                .map_err(spawn_err)?;
            CommandResult::streamed(line.clone(), exit_code(status), start.elapsed())
        };

        if !result.success() {
            debug!(command = %line, code = result.exit_code, "command exited with nonzero code");
        }
        Ok(result)
    }

    /// Execute a command, failing on a nonzero exit code.
    pub fn execute_checked(&self, command: &Command, cwd: &Path) -> Result<CommandResult> {
        let result = self.execute(command, cwd)?;
        if result.success() {
            return Ok(result);
        }

        warn!(command = %result.command, code = result.exit_code, "command failed");
        Err(Error::CommandFailed {
            command: result.command,
            code: result.exit_code,
            stderr: result.stderr.unwrap_or_default(),
        })
    }

    /// Execute a command with explicit [`RunOptions`]. `options.quiet`
    /// overrides the command's own capture flag.
    pub fn run(&self, command: Command, cwd: &Path, options: RunOptions) -> Result<CommandResult> {
        let command = command.capture_output(options.quiet);
        if options.blocking {
            self.execute_checked(&command, cwd)
        } else {
            self.execute(&command, cwd)
        }
    }
}

/// Exit code of a finished process, mapping signals to `128 + signal` the
/// way POSIX shells report them.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    -1
}

/// Run a raw shell line in the process working directory.
pub fn run_line(line: &str, options: RunOptions) -> Result<CommandResult> {
    let cwd = std::env::current_dir()?;
    CommandExecutor::default().run(Command::shell(line), &cwd, options)
}
