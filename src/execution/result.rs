//! Execution result types.

use std::time::Duration;

use serde::Serialize;

/// Outcome of one executed command.
///
/// Text fields are only populated when output was captured; streamed output
/// went straight to the terminal and is not retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandResult {
    /// The command line that was executed.
    pub command: String,
    /// Captured standard output.
    pub stdout: Option<String>,
    /// Captured standard error.
    pub stderr: Option<String>,
    /// Exit code; `128 + signal` for a process killed by a signal.
    pub exit_code: i32,
    /// Execution duration.
    pub duration: Duration,
}

impl CommandResult {
    /// Create a result for a command whose output was streamed.
    pub fn streamed(command: impl Into<String>, exit_code: i32, duration: Duration) -> Self {
        Self {
            command: command.into(),
            stdout: None,
            stderr: None,
            exit_code,
            duration,
        }
    }

    /// Create a result carrying captured output.
    pub fn captured(
        command: impl Into<String>,
        stdout: String,
        stderr: String,
        exit_code: i32,
        duration: Duration,
    ) -> Self {
        Self {
            command: command.into(),
            stdout: Some(stdout),
            stderr: Some(stderr),
            exit_code,
            duration,
        }
    }

    /// Check if command succeeded (exit code 0).
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Captured stdout, trimmed. Empty when output was not captured.
    pub fn stdout_trimmed(&self) -> &str {
        self.stdout.as_deref().unwrap_or_default().trim()
    }

    /// Captured stdout lines.
    pub fn stdout_lines(&self) -> impl Iterator<Item = &str> {
        self.stdout.as_deref().unwrap_or_default().lines()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streamed_has_no_text() {
        let result = CommandResult::streamed("make test", 0, Duration::from_millis(100));

        assert_eq!(result.command, "make test");
        assert!(result.stdout.is_none());
        assert!(result.stderr.is_none());
        assert!(result.success());
        assert_eq!(result.stdout_trimmed(), "");
        assert_eq!(result.stdout_lines().count(), 0);
    }

    #[test]
    fn test_captured_failure() {
        let result = CommandResult::captured(
            "grep x",
            String::new(),
            "no match\n".into(),
            1,
            Duration::ZERO,
        );
        assert!(!result.success());
        assert_eq!(result.stderr.as_deref(), Some("no match\n"));
    }

    #[test]
    fn test_stdout_trimmed() {
        let result = CommandResult::captured(
            "echo",
            "  version = \"1.2.3\"  \n".into(),
            String::new(),
            0,
            Duration::ZERO,
        );
        assert_eq!(result.stdout_trimmed(), "version = \"1.2.3\"");
    }

    #[test]
    fn test_stdout_lines() {
        let result = CommandResult::captured(
            "ls",
            "line1\nline2\nline3".into(),
            String::new(),
            0,
            Duration::ZERO,
        );
        let lines: Vec<_> = result.stdout_lines().collect();
        assert_eq!(lines, vec!["line1", "line2", "line3"]);
    }

    #[test]
    fn test_serializes_to_json() {
        let result = CommandResult::streamed("true", 0, Duration::ZERO);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["command"], "true");
        assert_eq!(json["exit_code"], 0);
        assert!(json["stdout"].is_null());
    }
}
