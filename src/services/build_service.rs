//! Build service: custom mappings, Zed manifest, schema and previews.
//!
//! Everything here runs against the [`Storage`] collaborator and never shells
//! out, so the whole pipeline can be tested in memory.

use crate::assets::{sync_flat_dir, FlatSyncReport};
use crate::preview::{self, PreviewReport};
use crate::schema::build_custom_mappings_schema;
use crate::storage::Storage;
use crate::theme::{merge_theme, CustomMappings, ThemeDocument};
use crate::utils::{to_json_string, Indent, WorkspacePaths};
use crate::zed::{build_manifest, ThemeIdentity};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Result of generating the Zed theme.
#[derive(Debug, Clone)]
pub struct ZedSyncSummary {
    /// Theme the manifest was generated from
    pub theme_path: PathBuf,
    /// Number of file icon definitions in the manifest
    pub file_icons: usize,
    /// Number of named directory entries (aliases included)
    pub named_directories: usize,
    pub file_assets: FlatSyncReport,
    pub folder_assets: FlatSyncReport,
}

/// Service for the file-generating steps of the workspace.
pub struct BuildService;

impl BuildService {
    /// Merge `custom-mappings.jsonc` into the source theme and write the result
    /// to `symbol-icon-theme.modified.json`.
    pub fn apply_custom_mappings(
        storage: &dyn Storage,
        paths: &WorkspacePaths,
    ) -> Result<ThemeDocument> {
        let source_theme = ThemeDocument::load(storage, &paths.source_theme())?;
        let custom_mappings = CustomMappings::load(storage, &paths.mappings)?;

        let merged = merge_theme(&source_theme, &[custom_mappings]);

        let output = paths.modified_theme();
        write_json(storage, &output, &merged, Indent::Tab, true)?;
        info!("Applied custom mappings to {}", paths.display(&output));

        Ok(merged)
    }

    /// Translate the merged (or source) theme into the Zed manifest and mirror
    /// the icon directories.
    pub fn sync_zed(
        storage: &dyn Storage,
        paths: &WorkspacePaths,
        identity: &ThemeIdentity,
    ) -> Result<ZedSyncSummary> {
        let theme_path = paths.resolve_theme(|path| storage.exists(path))?;
        let theme = ThemeDocument::load(storage, &theme_path)?;

        let manifest = build_manifest(&theme, identity)
            .with_context(|| format!("Failed to translate {}", paths.display(&theme_path)))?;

        let manifest_path = paths.zed_manifest();
        if let Some(parent) = manifest_path.parent() {
            storage.create_dir_all(parent)?;
        }
        write_json(storage, &manifest_path, &manifest, Indent::Spaces(2), false)?;

        let file_assets =
            sync_flat_dir(storage, &paths.vscode_file_icons(), &paths.zed_file_icons())?;
        let folder_assets =
            sync_flat_dir(storage, &paths.vscode_folder_icons(), &paths.zed_folder_icons())?;

        let (file_icons, named_directories) = manifest
            .themes
            .first()
            .map(|theme| (theme.file_icons.len(), theme.named_directory_icons.len()))
            .unwrap_or_default();

        info!(
            "Synced zed-symbols from {} ({} file icons, {} named directories)",
            paths.display(&theme_path),
            file_icons,
            named_directories
        );

        Ok(ZedSyncSummary {
            theme_path,
            file_icons,
            named_directories,
            file_assets,
            folder_assets,
        })
    }

    /// Apply custom mappings, then regenerate the Zed theme from the result.
    pub fn build(
        storage: &dyn Storage,
        paths: &WorkspacePaths,
        identity: &ThemeIdentity,
    ) -> Result<ZedSyncSummary> {
        Self::apply_custom_mappings(storage, paths)?;
        Self::sync_zed(storage, paths, identity)
    }

    /// Regenerate `custom-mappings.schema.json` from the source theme.
    pub fn generate_schema(storage: &dyn Storage, paths: &WorkspacePaths) -> Result<PathBuf> {
        let theme = ThemeDocument::load(storage, &paths.source_theme())?;
        let schema = build_custom_mappings_schema(&theme);

        write_json(storage, &paths.schema, &schema, Indent::Spaces(2), true)?;
        info!("Generated {}", paths.display(&paths.schema));

        Ok(paths.schema.clone())
    }

    /// Apply custom mappings, then regenerate `preview/` from the resulting
    /// theme.
    pub fn generate_previews(
        storage: &dyn Storage,
        paths: &WorkspacePaths,
    ) -> Result<PreviewReport> {
        Self::apply_custom_mappings(storage, paths)?;

        let theme_path = paths.resolve_theme(|path| storage.exists(path))?;
        let theme = ThemeDocument::load(storage, &theme_path)?;

        preview::generate_previews(
            storage,
            &theme,
            &paths.preview_dir,
            &paths.display(&theme_path),
        )
    }
}

fn write_json<T: serde::Serialize>(
    storage: &dyn Storage,
    path: &Path,
    value: &T,
    indent: Indent,
    trailing_newline: bool,
) -> Result<()> {
    let mut content = to_json_string(value, indent)?;
    if trailing_newline {
        content.push('\n');
    }
    storage
        .write(path, content.as_bytes())
        .with_context(|| format!("Failed to write {:?}", path))
}
