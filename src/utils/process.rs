//! Process execution utilities
//!
//! Runs the external release tools (compiler, version-control client,
//! registry client) with proper error handling and logging. Every
//! invocation runs in an explicit working directory and is waited to
//! completion before the caller proceeds.

use crate::error::{ReleaseError, Result};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, info, instrument};

/// Utility for running external tools
#[derive(Debug)]
pub struct ProcessRunner {
    debug: bool,
}

/// Captured output of a tool invocation
#[derive(Debug)]
pub struct ProcessOutput {
    /// Exit status code
    pub exit_code: Option<i32>,
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
}

impl ProcessRunner {
    /// Create a new process runner
    #[must_use]
    pub const fn new(debug: bool) -> Self {
        Self { debug }
    }

    /// Run a tool in the given directory, inheriting stdout/stderr so the
    /// tool's own output reaches the operator unmodified
    #[instrument(skip(self, dir))]
    pub fn run(&self, dir: &Path, command: &str, args: &[&str]) -> Result<()> {
        let cmd_str = render_command(command, args);

        if self.debug {
            debug!("Running command in {}: {}", dir.display(), cmd_str);
        } else {
            info!("+ {}", cmd_str);
        }

        let status = Command::new(command)
            .args(args)
            .current_dir(dir)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| {
                ReleaseError::process(
                    cmd_str.clone(),
                    None,
                    String::new(),
                    format!("Failed to execute command: {e}"),
                )
            })?;

        if !status.success() {
            let exit_code = status.code();
            return Err(ReleaseError::process(
                cmd_str,
                exit_code,
                String::new(),
                format!("Command failed with exit code: {exit_code:?}"),
            ));
        }

        debug!("Command completed successfully");
        Ok(())
    }

    /// Run a tool in the given directory and capture its output
    #[instrument(skip(self, dir))]
    pub fn run_captured(&self, dir: &Path, command: &str, args: &[&str]) -> Result<ProcessOutput> {
        let cmd_str = render_command(command, args);
        debug!(
            "Running command with output capture in {}: {}",
            dir.display(),
            cmd_str
        );

        let output = Command::new(command)
            .args(args)
            .current_dir(dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                ReleaseError::process(
                    cmd_str.clone(),
                    None,
                    String::new(),
                    format!("Failed to execute command: {e}"),
                )
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let exit_code = output.status.code();

        debug!(
            "Command finished: success={}, exit_code={:?}, stdout_len={}, stderr_len={}",
            output.status.success(),
            exit_code,
            stdout.len(),
            stderr.len()
        );

        if !output.status.success() {
            debug!("Command stderr: {}", stderr);
            return Err(ReleaseError::process(cmd_str, exit_code, stdout, stderr));
        }

        Ok(ProcessOutput {
            exit_code,
            stdout,
            stderr,
        })
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(false)
    }
}

fn render_command(command: &str, args: &[&str]) -> String {
    if args.is_empty() {
        command.to_string()
    } else {
        format!("{} {}", command, args.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn cwd() -> PathBuf {
        std::env::current_dir().unwrap()
    }

    #[test]
    fn test_run_simple_command() {
        let runner = ProcessRunner::new(false);
        let result = runner.run(&cwd(), "true", &[]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_run_captured_output() {
        let runner = ProcessRunner::new(false);
        let output = runner
            .run_captured(&cwd(), "echo", &["hello", "world"])
            .unwrap();

        assert_eq!(output.exit_code, Some(0));
        assert_eq!(output.stdout.trim(), "hello world");
        assert!(output.stderr.is_empty());
    }

    #[test]
    fn test_run_respects_working_directory() {
        let temp_dir = TempDir::new().unwrap();
        let runner = ProcessRunner::new(false);

        let output = runner.run_captured(temp_dir.path(), "pwd", &[]).unwrap();
        let reported = std::fs::canonicalize(output.stdout.trim()).unwrap();
        let expected = std::fs::canonicalize(temp_dir.path()).unwrap();
        assert_eq!(reported, expected);
    }

    #[test]
    fn test_run_failing_command() {
        let runner = ProcessRunner::new(false);
        let result = runner.run(&cwd(), "false", &[]);

        match result {
            Err(ReleaseError::Process {
                command, exit_code, ..
            }) => {
                assert_eq!(command, "false");
                assert_eq!(exit_code, Some(1));
            }
            other => panic!("Expected process error, got {other:?}"),
        }
    }

    #[test]
    fn test_run_missing_command() {
        let runner = ProcessRunner::new(false);
        let result = runner.run(&cwd(), "releaser-test-no-such-tool", &[]);

        match result {
            Err(ReleaseError::Process { exit_code, .. }) => assert_eq!(exit_code, None),
            other => panic!("Expected process error, got {other:?}"),
        }
    }

    #[test]
    fn test_render_command() {
        assert_eq!(render_command("git", &["push", "--all"]), "git push --all");
        assert_eq!(render_command("tsc", &[]), "tsc");
    }
}
