//! Command building and representation.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// How a command reaches the operating system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// A raw line interpreted by the shell: pipes, globs and expansions apply.
    Shell(String),
    /// A program with an argument vector. Nothing is interpreted.
    Exec { program: String, args: Vec<String> },
}

/// The shell used for [`Invocation::Shell`] lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Shell program, looked up on `PATH` when not absolute.
    pub program: String,
    /// Flag that makes the shell read the command from its next argument.
    pub flag: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            program: "sh".to_string(),
            flag: "-c".to_string(),
        }
    }
}

/// A command to be executed.
#[derive(Debug, Clone)]
pub struct Command {
    /// What to run.
    pub invocation: Invocation,
    /// Extra environment variables to set.
    pub env: HashMap<String, String>,
    /// Whether to capture output instead of streaming it to the terminal.
    pub capture_output: bool,
}

impl Command {
    /// Create a command from a raw shell line.
    pub fn shell(line: impl Into<String>) -> Self {
        Self::from_invocation(Invocation::Shell(line.into()))
    }

    /// Create a command from a program and its arguments.
    pub fn exec<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_invocation(Invocation::Exec {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        })
    }

    fn from_invocation(invocation: Invocation) -> Self {
        Self {
            invocation,
            env: HashMap::new(),
            capture_output: false,
        }
    }

    /// Add an environment variable.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Add multiple environment variables.
    pub fn envs<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in vars {
            self.env.insert(k.into(), v.into());
        }
        self
    }

    /// Set whether to capture output.
    pub fn capture_output(mut self, capture: bool) -> Self {
        self.capture_output = capture;
        self
    }

    /// Render the command as a single shell line.
    ///
    /// Shell lines are returned verbatim. Argument vectors are quoted so the
    /// rendered line would run the same program with the same arguments.
    pub fn display_line(&self) -> String {
        match &self.invocation {
            Invocation::Shell(line) => line.clone(),
            Invocation::Exec { program, args } => {
                let words = std::iter::once(program.as_str()).chain(args.iter().map(String::as_str));
                shlex::try_join(words.clone()).unwrap_or_else(|_| words.collect::<Vec<_>>().join(" "))
            }
        }
    }

    /// Build the process for this command, rooted at `cwd`.
    pub(crate) fn to_process(&self, shell: &ShellConfig, cwd: &Path) -> std::process::Command {
        let mut process = match &self.invocation {
            Invocation::Shell(line) => {
                let mut p = std::process::Command::new(&shell.program);
                p.arg(&shell.flag).arg(line);
                p
            }
            Invocation::Exec { program, args } => {
                let mut p = std::process::Command::new(program);
                p.args(args);
                p
            }
        };
        process.current_dir(cwd).envs(&self.env);
        process
    }
}
