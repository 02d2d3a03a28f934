//! CLI module for the symbols workspace command-line interface.
//!
//! Every workspace script is a subcommand; none of them take flags besides
//! the global `--root`.

mod commands;
mod common;
pub mod completions;

// Re-export common utilities for use by CLI commands
pub use common::*;

pub use commands::{Cli, Commands};
