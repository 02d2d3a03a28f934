//! Shell completions for `symbols-workspace`.

use crate::cli::Cli;
use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::Shell;
use std::io::Write;

/// Print completions for `shell`, or for the shell named by `$SHELL`.
pub fn generate(shell: Option<Shell>) -> Result<()> {
    let shell = shell
        .or_else(Shell::from_env)
        .context("Could not detect the shell from $SHELL; pass it explicitly")?;

    let stdout = std::io::stdout();
    write_completions(shell, &mut stdout.lock());
    Ok(())
}

/// Write the completion script for `shell` into `out`.
pub fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, out);
}
