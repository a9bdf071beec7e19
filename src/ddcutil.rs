// SPDX-License-Identifier: GPL-3.0-only
//! ddcutil process invocation
//!
//! The backend never speaks DDC/CI itself; all bus traffic goes through the
//! `ddcutil` binary. This module owns the subprocess seam: a [`CommandRunner`]
//! trait with a blocking and a task-suspending variant, and the real
//! [`Ddcutil`] implementation. Detection code is written against the trait so
//! tests can substitute canned output.

use async_trait::async_trait;

use crate::error::{BackendError, Result};

/// VCP (Virtual Control Panel) feature code for brightness
pub const BRIGHTNESS_CODE: u8 = 0x10;

/// Captured result of one external command run
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Executes external commands and captures their output.
///
/// Both methods take the full command line as one string, split it on
/// whitespace, and fail with [`BackendError::CommandFailed`] when the process
/// exits non-zero.
#[async_trait]
pub trait CommandRunner {
    /// Run a command, blocking the calling thread until it exits.
    fn run(&self, cmd: &str) -> Result<CommandOutput>;

    /// Run a command, suspending the calling task until it exits.
    async fn run_async(&self, cmd: &str) -> Result<CommandOutput>;
}

/// The real runner, spawning `ddcutil` processes.
pub struct Ddcutil;

#[async_trait]
impl CommandRunner for Ddcutil {
    fn run(&self, cmd: &str) -> Result<CommandOutput> {
        debug!("running `{cmd}`");
        let (program, args) = split_command(cmd);
        let output = std::process::Command::new(program)
            .args(args.split_whitespace())
            .output()?;
        interpret(cmd, output.status.code(), output.stdout, output.stderr)
    }

    async fn run_async(&self, cmd: &str) -> Result<CommandOutput> {
        debug!("running `{cmd}`");
        let (program, args) = split_command(cmd);
        let output = tokio::process::Command::new(program)
            .args(args.split_whitespace())
            .output()
            .await?;
        interpret(cmd, output.status.code(), output.stdout, output.stderr)
    }
}

fn split_command(cmd: &str) -> (&str, &str) {
    cmd.split_once(' ').unwrap_or((cmd, ""))
}

/// Map raw process output to [`CommandOutput`]. A missing exit code (process
/// killed by a signal) counts as exit code 1.
fn interpret(cmd: &str, code: Option<i32>, stdout: Vec<u8>, stderr: Vec<u8>) -> Result<CommandOutput> {
    let status = code.unwrap_or(1);
    let stderr = String::from_utf8_lossy(&stderr).into_owned();
    if status != 0 {
        return Err(BackendError::CommandFailed {
            command: cmd.to_owned(),
            status,
            stderr,
        });
    }
    Ok(CommandOutput {
        status,
        stdout: String::from_utf8_lossy(&stdout).into_owned(),
        stderr,
    })
}
