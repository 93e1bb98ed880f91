use std::fs::File;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use common::prelude::ErrorKind;

/// Fully buffered output of a successful tool invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Error executing '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Error executing '{command}': {status}{}", stderr_suffix(.stderr))]
    Exited {
        command: String,
        status: String,
        stderr: String,
    },
    #[error("Error executing '{command}': timed out after {}s", .after.as_secs())]
    Timeout { command: String, after: Duration },
    #[error("'{command}' produced unexpected output: '{output}'{}", stderr_suffix(.stderr))]
    UnexpectedOutput {
        command: String,
        output: String,
        stderr: String,
    },
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.trim().is_empty() {
        String::new()
    } else {
        format!(" | IPFS Stderr: {}", stderr.trim())
    }
}

impl ToolError {
    /// Every tool failure, including a tool that cannot be spawned,
    /// is an upstream error.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Upstream
    }

    /// Output from a successful run that does not fit the expected grammar.
    pub fn unexpected(args: &[String], output: &ToolOutput) -> Self {
        ToolError::UnexpectedOutput {
            command: display_command(args),
            output: output.stdout.trim().to_string(),
            stderr: output.stderr.clone(),
        }
    }
}

/// Human-readable command line, as it appears in error messages.
pub fn display_command(args: &[String]) -> String {
    let mut line = String::from("ipfs");
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

/// The daemon's own command-line tool. Every invocation blocks until the
/// child exits; a non-zero exit is an error carrying the child's stderr.
#[async_trait::async_trait]
pub trait IpfsTool: Send + Sync {
    /// Run with stdout and stderr buffered in memory, optionally feeding
    /// `stdin` to the child.
    async fn run(&self, args: &[String], stdin: Option<&[u8]>) -> Result<ToolOutput, ToolError>;

    /// Run with stdout connected straight to `sink`.
    async fn run_to_file(&self, args: &[String], sink: File) -> Result<(), ToolError>;
}

/// Spawns the real `ipfs` binary.
#[derive(Debug, Clone)]
pub struct IpfsCommand {
    program: PathBuf,
    /// forwarded as `--api=<multiaddr>` when set
    api: Option<String>,
    timeout: Option<Duration>,
}

impl IpfsCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            api: None,
            timeout: None,
        }
    }

    pub fn with_api(mut self, api: Option<String>) -> Self {
        self.api = api;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn command(&self, args: &[String]) -> Command {
        let mut cmd = Command::new(&self.program);
        if let Some(api) = &self.api {
            cmd.arg(format!("--api={}", api));
        }
        cmd.args(args).kill_on_drop(true);
        cmd
    }

    async fn bounded<F, T>(&self, args: &[String], fut: F) -> Result<T, ToolError>
    where
        F: std::future::Future<Output = std::io::Result<T>>,
    {
        let result = match self.timeout {
            Some(after) => tokio::time::timeout(after, fut)
                .await
                .map_err(|_| ToolError::Timeout {
                    command: display_command(args),
                    after,
                })?,
            None => fut.await,
        };
        result.map_err(|source| ToolError::Spawn {
            command: display_command(args),
            source,
        })
    }
}

fn check_status(args: &[String], status: ExitStatus, stderr: &[u8]) -> Result<(), ToolError> {
    if status.success() {
        return Ok(());
    }
    Err(ToolError::Exited {
        command: display_command(args),
        status: status.to_string(),
        stderr: String::from_utf8_lossy(stderr).to_string(),
    })
}

#[async_trait::async_trait]
impl IpfsTool for IpfsCommand {
    async fn run(&self, args: &[String], stdin: Option<&[u8]>) -> Result<ToolOutput, ToolError> {
        tracing::debug!(command = %display_command(args), "running ipfs tool");

        let mut cmd = self.command(args);
        cmd.stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            });

        let mut child = cmd.spawn().map_err(|source| ToolError::Spawn {
            command: display_command(args),
            source,
        })?;

        // the writer runs alongside the reader so a chatty child cannot
        // deadlock against a full stdin pipe
        if let (Some(input), Some(mut pipe)) = (stdin, child.stdin.take()) {
            let input = input.to_vec();
            tokio::spawn(async move {
                if let Err(e) = pipe.write_all(&input).await {
                    tracing::warn!("failed writing to ipfs stdin: {}", e);
                }
            });
        }

        let output = self.bounded(args, child.wait_with_output()).await?;
        tracing::debug!(status = %output.status, "ipfs tool exited");
        check_status(args, output.status, &output.stderr)?;

        Ok(ToolOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    async fn run_to_file(&self, args: &[String], sink: File) -> Result<(), ToolError> {
        tracing::debug!(command = %display_command(args), "streaming ipfs tool output to file");

        let mut cmd = self.command(args);
        cmd.stdout(Stdio::from(sink))
            .stderr(Stdio::piped())
            .stdin(Stdio::null());

        let child = cmd.spawn().map_err(|source| ToolError::Spawn {
            command: display_command(args),
            source,
        })?;

        let output = self.bounded(args, child.wait_with_output()).await?;
        check_status(args, output.status, &output.stderr)
    }
}
