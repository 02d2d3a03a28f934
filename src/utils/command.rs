//! External process execution.
//!
//! Workflows call `git` and `pnpm` through the [`CommandRunner`] trait. A
//! non-zero exit becomes a [`CommandFailed`] error that carries the status so
//! the binary can exit with the same code.

use anyhow::{Context, Result};
use std::fmt;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::info;

/// An external command exited unsuccessfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFailed {
    /// Rendered command line, for messages
    pub command: String,
    /// Exit status; `None` when the process was killed by a signal
    pub status: Option<i32>,
}

impl CommandFailed {
    /// Process exit code to propagate.
    pub fn exit_code(&self) -> i32 {
        self.status.unwrap_or(1)
    }
}

impl fmt::Display for CommandFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(code) => write!(f, "`{}` exited with status {}", self.command, code),
            None => write!(f, "`{}` was terminated by a signal", self.command),
        }
    }
}

impl std::error::Error for CommandFailed {}

/// Runs external programs in a working directory.
pub trait CommandRunner {
    /// Run with inherited stdio. Fails with [`CommandFailed`] on non-zero exit.
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<()>;
}

/// Render `program args...` for logs and errors.
pub fn command_line(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// [`CommandRunner`] that spawns real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    fn command(program: &str, args: &[&str], cwd: &Path) -> Command {
        let mut cmd = Command::new(program);
        cmd.args(args).current_dir(cwd);
        cmd
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<()> {
        let rendered = command_line(program, args);
        info!("Running `{}` in {:?}", rendered, cwd);

        let status = Self::command(program, args, cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .with_context(|| format!("Failed to start `{}`", rendered))?;

        if status.success() {
            Ok(())
        } else {
            Err(CommandFailed {
                command: rendered,
                status: status.code(),
            }
            .into())
        }
    }
}
