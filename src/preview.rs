//! Demo files and folders for eyeballing icon mappings in an editor.
//!
//! One artifact is created per mapping under `preview/`, named so the editor
//! resolves it through that mapping. Names that had to be sanitized or
//! de-duplicated are listed in `report.json`.

use crate::storage::Storage;
use crate::theme::{IconMap, ThemeDocument};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use tracing::info;

pub const FILE_EXTENSIONS_DIR: &str = "file-extensions";
pub const FILE_NAMES_DIR: &str = "file-names";
pub const FOLDER_NAMES_DIR: &str = "folder-names";
pub const FOLDER_MARKER_FILE: &str = ".demo-info.txt";

const FALLBACK_FILE_NAME: &str = "demo.txt";
const FALLBACK_DIR_NAME: &str = "demo-folder";
const NO_EXTENSION_FILE_NAME: &str = "demo-without-extension.txt";

/// Number of artifacts created per mapping category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewCounts {
    pub file_extensions: usize,
    pub file_names: usize,
    pub folder_names: usize,
}

/// A mapping whose artifact could not use the plain name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemappedName {
    #[serde(rename = "type")]
    pub category: String,
    pub original: String,
    pub created: String,
}

/// Contents of `preview/report.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewReport {
    pub source_theme: String,
    pub counts: PreviewCounts,
    pub remapped_names: Vec<RemappedName>,
    pub generated_at: DateTime<Utc>,
}

/// Entries ordered the way a file explorer lists them: case-insensitive,
/// lowercase first when two keys differ only in case.
fn sorted_entries(map: &IconMap) -> Vec<(&String, &String)> {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_by(|(a, _), (b, _)| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| b.cmp(a))
    });
    entries
}

/// Make a mapping key usable as a single path component.
pub fn to_safe_name(name: &str) -> String {
    name.replace('/', "__")
        .replace('\\', "__")
        .replace('\0', "")
        .trim()
        .to_string()
}

/// Split `name` into stem and extension (with its dot). A leading dot does not
/// start an extension, so `.bashrc` has none.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(index) if index > 0 => name.split_at(index),
        _ => (name, ""),
    }
}

fn sanitize_or(name: &str, fallback: &str) -> String {
    let safe = to_safe_name(name);
    if safe.is_empty() || safe == "." || safe == ".." {
        fallback.to_string()
    } else {
        safe
    }
}

/// Write `content` to a fresh file in `dir`, returning the name used.
///
/// Collisions are resolved as `{stem}--{n}{ext}` with `n` counting from 1.
pub fn create_unique_file(
    storage: &dyn Storage,
    dir: &Path,
    desired_name: &str,
    content: &str,
) -> Result<String> {
    let safe_name = sanitize_or(desired_name, FALLBACK_FILE_NAME);
    let (stem, ext) = split_extension(&safe_name);

    let mut candidate = safe_name.clone();
    let mut index = 1;
    while storage.exists(&dir.join(&candidate)) {
        candidate = format!("{stem}--{index}{ext}");
        index += 1;
    }

    storage.write(&dir.join(&candidate), content.as_bytes())?;
    Ok(candidate)
}

/// Create a fresh directory in `dir`, returning the name used.
pub fn create_unique_dir(storage: &dyn Storage, dir: &Path, desired_name: &str) -> Result<String> {
    let safe_name = sanitize_or(desired_name, FALLBACK_DIR_NAME);

    let mut candidate = safe_name.clone();
    let mut index = 1;
    while storage.exists(&dir.join(&candidate)) {
        candidate = format!("{safe_name}--{index}");
        index += 1;
    }

    storage.create_dir_all(&dir.join(&candidate))?;
    Ok(candidate)
}

/// Wipe `preview_dir` and regenerate every artifact for `theme`.
///
/// `source_label` is recorded in the report and README as the theme the
/// previews were generated from.
pub fn generate_previews(
    storage: &dyn Storage,
    theme: &ThemeDocument,
    preview_dir: &Path,
    source_label: &str,
) -> Result<PreviewReport> {
    let extensions_dir = preview_dir.join(FILE_EXTENSIONS_DIR);
    let file_names_dir = preview_dir.join(FILE_NAMES_DIR);
    let folder_names_dir = preview_dir.join(FOLDER_NAMES_DIR);

    storage
        .remove_dir_all(preview_dir)
        .context("Failed to clear previous previews")?;
    for dir in [&extensions_dir, &file_names_dir, &folder_names_dir] {
        storage.create_dir_all(dir)?;
    }

    let mut counts = PreviewCounts::default();
    let mut remapped_names = Vec::new();

    for (extension, icon_key) in sorted_entries(&theme.file_extensions) {
        let desired = if extension.is_empty() {
            NO_EXTENSION_FILE_NAME.to_string()
        } else {
            format!("demo.{}", to_safe_name(extension))
        };
        let created = create_unique_file(
            storage,
            &extensions_dir,
            &desired,
            &format!("extension={extension}\nicon={icon_key}\n"),
        )?;
        if created != desired {
            remapped_names.push(RemappedName {
                category: "fileExtensions".to_string(),
                original: desired,
                created,
            });
        }
        counts.file_extensions += 1;
    }

    for (file_name, icon_key) in sorted_entries(&theme.file_names) {
        let created = create_unique_file(
            storage,
            &file_names_dir,
            &to_safe_name(file_name),
            &format!("fileName={file_name}\nicon={icon_key}\n"),
        )?;
        if &created != file_name {
            remapped_names.push(RemappedName {
                category: "fileNames".to_string(),
                original: file_name.clone(),
                created,
            });
        }
        counts.file_names += 1;
    }

    for (folder_name, icon_key) in sorted_entries(&theme.folder_names) {
        let created = create_unique_dir(storage, &folder_names_dir, folder_name)?;
        storage.write(
            &folder_names_dir.join(&created).join(FOLDER_MARKER_FILE),
            format!("folderName={folder_name}\nicon={icon_key}\n").as_bytes(),
        )?;
        if &created != folder_name {
            remapped_names.push(RemappedName {
                category: "folderNames".to_string(),
                original: folder_name.clone(),
                created,
            });
        }
        counts.folder_names += 1;
    }

    let report = PreviewReport {
        source_theme: source_label.to_string(),
        counts,
        remapped_names,
        generated_at: Utc::now(),
    };

    let report_json =
        serde_json::to_string_pretty(&report).context("Failed to serialize preview report")?;
    storage.write(
        &preview_dir.join("report.json"),
        format!("{report_json}\n").as_bytes(),
    )?;
    storage.write(
        &preview_dir.join("README.md"),
        render_readme(&report)?.as_bytes(),
    )?;

    info!(
        "Generated previews in {:?}: {} extensions, {} file names, {} folder names ({} remapped)",
        preview_dir,
        report.counts.file_extensions,
        report.counts.file_names,
        report.counts.folder_names,
        report.remapped_names.len()
    );
    Ok(report)
}

fn render_readme(report: &PreviewReport) -> Result<String> {
    let counts = serde_json::to_string(&report.counts)?;
    Ok(indoc::formatdoc! {"
            # Previews

            Generated demo artifacts for icon mapping verification.

            - `file-extensions/`: one file per `fileExtensions` mapping
            - `file-names/`: one file per `fileNames` mapping
            - `folder-names/`: one folder per `folderNames` mapping

            Generation source:
            - {source}

            Counts: {counts}

            If any mapping key needed sanitization for filesystem compatibility, see `report.json`.
        ",
        source = report.source_theme,
        counts = counts,
    })
}
