use crate::cli::common::{print_info, print_success, print_warning, CliContext};
use crate::config::Config;
use crate::services::{BuildService, WorkspaceService, ZedSyncSummary};
use crate::storage::FsStorage;
use crate::utils::SystemRunner;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use tracing::info;

/// Keeps the symbols icon theme workspace in sync
#[derive(Parser, Debug)]
#[command(name = "symbols-workspace", version, about = "Keeps the symbols icon theme workspace in sync", long_about = None, disable_help_subcommand = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Merge custom-mappings.jsonc into the vscode-symbols theme
    Apply,
    /// Generate the zed-symbols theme and icons from the vscode-symbols theme
    Zed,
    /// Apply custom mappings, then generate the zed-symbols theme
    Build,
    /// Generate the JSON Schema for custom-mappings.jsonc
    Schema,
    /// Generate demo files and folders under preview/
    Preview,
    /// Rebase both submodules onto upstream and regenerate
    WorkspaceSync,
    /// Regenerate, commit and push the submodules and the workspace
    Publish,
    /// Run the submodules' own upstream sync and build scripts
    SyncAll,
    /// Write symbols-workspace.toml with defaults if missing and show its path
    Config,
    /// Show the log file location
    Logs,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (detected from $SHELL if omitted)
        #[arg(value_enum)]
        shell: Option<Shell>,
    },
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let root = self.root.as_deref();
        match self.command {
            Commands::Apply => Self::cmd_apply(&CliContext::load(root)?),
            Commands::Zed => Self::cmd_zed(&CliContext::load(root)?),
            Commands::Build => Self::cmd_build(&CliContext::load(root)?),
            Commands::Schema => Self::cmd_schema(&CliContext::load(root)?),
            Commands::Preview => Self::cmd_preview(&CliContext::load(root)?),
            Commands::WorkspaceSync => Self::cmd_workspace_sync(&CliContext::load(root)?),
            Commands::Publish => Self::cmd_publish(&CliContext::load(root)?),
            Commands::SyncAll => Self::cmd_sync_all(&CliContext::load(root)?),
            Commands::Config => Self::cmd_config(&CliContext::load(root)?),
            Commands::Logs => Self::cmd_logs(),
            Commands::Completions { shell } => crate::cli::completions::generate(shell),
        }
    }

    fn cmd_apply(ctx: &CliContext) -> Result<()> {
        info!("CLI: apply command executed");
        BuildService::apply_custom_mappings(&FsStorage, &ctx.paths)?;
        print_success(&format!(
            "Applied custom mappings to {}",
            ctx.paths.display(&ctx.paths.modified_theme())
        ));
        Ok(())
    }

    fn cmd_zed(ctx: &CliContext) -> Result<()> {
        info!("CLI: zed command executed");
        let summary = BuildService::sync_zed(&FsStorage, &ctx.paths, &ctx.config.zed)?;
        Self::report_zed_sync(ctx, &summary);
        Ok(())
    }

    fn cmd_build(ctx: &CliContext) -> Result<()> {
        info!("CLI: build command executed");
        let summary = BuildService::build(&FsStorage, &ctx.paths, &ctx.config.zed)?;
        Self::report_zed_sync(ctx, &summary);
        Ok(())
    }

    fn cmd_schema(ctx: &CliContext) -> Result<()> {
        info!("CLI: schema command executed");
        let path = BuildService::generate_schema(&FsStorage, &ctx.paths)?;
        print_success(&format!("Generated {}", ctx.paths.display(&path)));
        Ok(())
    }

    fn cmd_preview(ctx: &CliContext) -> Result<()> {
        info!("CLI: preview command executed");
        let report = BuildService::generate_previews(&FsStorage, &ctx.paths)?;

        print_success(&format!(
            "Generated demos in {} ({} extensions, {} file names, {} folder names).",
            ctx.paths.display(&ctx.paths.preview_dir),
            report.counts.file_extensions,
            report.counts.file_names,
            report.counts.folder_names
        ));
        if !report.remapped_names.is_empty() {
            print_warning(&format!(
                "{} mapping names were sanitized or de-duplicated, see report.json",
                report.remapped_names.len()
            ));
        }
        Ok(())
    }

    fn cmd_workspace_sync(ctx: &CliContext) -> Result<()> {
        info!("CLI: workspace-sync command executed");
        let progress = |msg: &str| print_info(msg);
        let service =
            WorkspaceService::new(&ctx.config, &ctx.paths, &FsStorage, &SystemRunner, &progress);

        let summary = service.sync()?;
        Self::report_zed_sync(ctx, &summary);
        print_success("Workspace sync complete.");
        Ok(())
    }

    fn cmd_publish(ctx: &CliContext) -> Result<()> {
        info!("CLI: publish command executed");
        let progress = |msg: &str| print_info(msg);
        let service =
            WorkspaceService::new(&ctx.config, &ctx.paths, &FsStorage, &SystemRunner, &progress);

        let summary = service.publish()?;
        if !summary.zed_committed && !summary.root_committed {
            print_info("No changes to commit; pushed existing commits.");
        }
        print_success("Workspace publish complete.");
        Ok(())
    }

    fn cmd_sync_all(ctx: &CliContext) -> Result<()> {
        info!("CLI: sync-all command executed");
        let progress = |msg: &str| print_info(msg);
        let service =
            WorkspaceService::new(&ctx.config, &ctx.paths, &FsStorage, &SystemRunner, &progress);

        service.sync_all()?;
        print_success("Done.");
        Ok(())
    }

    fn cmd_config(ctx: &CliContext) -> Result<()> {
        let config_path = Config::config_path(ctx.root());
        if config_path.exists() {
            println!("{}", config_path.display());
            return Ok(());
        }

        ctx.config
            .save(ctx.root())
            .context("Failed to write default configuration")?;
        print_success(&format!("Created {}", config_path.display()));
        Ok(())
    }

    fn cmd_logs() -> Result<()> {
        let log_path = crate::utils::get_log_path();
        println!("{}", log_path.display());
        if !log_path.exists() {
            print_info("No log file yet; it is created on the first run.");
        }
        Ok(())
    }

    fn report_zed_sync(ctx: &CliContext, summary: &ZedSyncSummary) {
        print_success(&format!(
            "Synced zed-symbols from {} ({} file icons, {} named directories, {} icons copied, {} removed)",
            ctx.paths.display(&summary.theme_path),
            summary.file_icons,
            summary.named_directories,
            summary.file_assets.copied + summary.folder_assets.copied,
            summary.file_assets.removed + summary.folder_assets.removed
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::try_parse_from(["symbols-workspace", "workspace-sync"]).unwrap();
        assert!(matches!(cli.command, Commands::WorkspaceSync));
        assert!(cli.root.is_none());

        let cli = Cli::try_parse_from(["symbols-workspace", "preview", "--root", "/tmp/ws"]).unwrap();
        assert!(matches!(cli.command, Commands::Preview));
        assert_eq!(cli.root, Some(PathBuf::from("/tmp/ws")));
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Cli::try_parse_from(["symbols-workspace"]).is_err());
    }
}
