//! Bounded execution of external commands.

use std::process::Stdio;
use std::time::Duration;

use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, Command};
use tokio::time::timeout;
use tracing::debug;

/// Errors that can occur while running an external command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("`{command}` did not finish within {timeout_secs} seconds")]
    TimedOut { command: String, timeout_secs: u64 },

    #[error("failed to write stdin of `{command}`: {source}")]
    Stdin {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Runs external commands with a uniform time cap.
///
/// Children are spawned with `kill_on_drop`, so a command that overruns the
/// cap is killed rather than left behind.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    timeout: Duration,
}

impl CommandRunner {
    /// Creates a runner that caps every command at `timeout_secs` seconds.
    #[must_use]
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Runs a command and returns its trimmed stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be spawned, exits non-zero,
    /// or exceeds the time cap.
    pub async fn run(&self, program: &str, args: &[&str]) -> Result<String, CommandError> {
        let command = display_command(program, args);
        debug!("Running: {}", command);

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| CommandError::Spawn {
                command: command.clone(),
                source,
            })?;

        self.finish(command, child, None).await
    }

    /// Runs a command, writing `input` (plus a trailing newline) to its
    /// stdin, and returns its trimmed stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be spawned, stdin cannot be
    /// written, the command exits non-zero, or it exceeds the time cap.
    pub async fn run_with_stdin(
        &self,
        program: &str,
        args: &[&str],
        input: &str,
    ) -> Result<String, CommandError> {
        let command = display_command(program, args);
        debug!("Running (with piped stdin): {}", command);

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| CommandError::Spawn {
                command: command.clone(),
                source,
            })?;

        self.finish(command, child, Some(input)).await
    }

    /// Feeds stdin if requested, then waits for the command under the cap.
    async fn finish(
        &self,
        command: String,
        mut child: Child,
        input: Option<&str>,
    ) -> Result<String, CommandError> {
        let bounded = async {
            if let (Some(input), Some(mut stdin)) = (input, child.stdin.take()) {
                stdin
                    .write_all(input.as_bytes())
                    .await
                    .map_err(|source| CommandError::Stdin {
                        command: command.clone(),
                        source,
                    })?;
                stdin
                    .write_all(b"\n")
                    .await
                    .map_err(|source| CommandError::Stdin {
                        command: command.clone(),
                        source,
                    })?;
                // Dropping stdin closes the pipe so the child sees EOF.
            }

            child
                .wait_with_output()
                .await
                .map_err(|source| CommandError::Spawn {
                    command: command.clone(),
                    source,
                })
        };

        let output = match timeout(self.timeout, bounded).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(CommandError::TimedOut {
                    command,
                    timeout_secs: self.timeout.as_secs(),
                });
            }
        };

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_owned())
        } else {
            Err(CommandError::Failed {
                command,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            })
        }
    }
}

/// Renders a program and its arguments for error messages and logs.
fn display_command(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_owned()
    } else {
        format!("{program} {}", args.join(" "))
    }
}
