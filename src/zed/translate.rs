//! Translation of a (merged) VS Code theme into a Zed icon theme manifest.

use super::manifest::{
    DirectoryIcons, ZedIconDefinition, ZedIconTheme, ZedIconThemeFamily, ZED_ICON_THEME_SCHEMA,
};
use super::ThemeIdentity;
use crate::theme::{is_folder_icon, IconMap, ThemeDocument};
use anyhow::{anyhow, Result};
use indexmap::IndexMap;
use tracing::debug;

/// VS Code icon identifiers that are named differently in the Zed theme.
pub const ICON_KEY_RENAMES: &[(&str, &str)] = &[
    ("git", "vcs"),
    ("console", "terminal"),
    ("code", "json"),
    ("coffeescript", "coffee"),
    ("default", "file"),
    ("storage", "database"),
    ("template", "templ"),
];

/// Rename a file icon identifier; unlisted and folder identifiers pass through.
pub fn to_zed_icon_key(icon_key: &str) -> &str {
    if is_folder_icon(icon_key) {
        return icon_key;
    }
    ICON_KEY_RENAMES
        .iter()
        .find(|(from, _)| *from == icon_key)
        .map_or(icon_key, |(_, to)| *to)
}

/// Lowercase and uppercase aliases of a file name. One entry when both agree.
pub fn file_stem_aliases(file_name: &str) -> Vec<String> {
    let lower = file_name.to_lowercase();
    let upper = file_name.to_uppercase();
    if lower == upper {
        vec![lower]
    } else {
        vec![lower, upper]
    }
}

/// Directory spellings Zed should treat as the same folder.
pub fn folder_aliases(folder_name: &str) -> [String; 4] {
    [
        folder_name.to_string(),
        format!(".{folder_name}"),
        format!("_{folder_name}"),
        format!("__{folder_name}__"),
    ]
}

/// Non-folder icon definitions keyed by their Zed identifier.
///
/// Font-only definitions have no asset to point at and are left out.
pub fn file_icons(theme: &ThemeDocument) -> Result<IndexMap<String, ZedIconDefinition>> {
    Ok(icon_definitions(theme)?
        .iter()
        .filter(|(key, _)| !is_folder_icon(key))
        .filter_map(|(key, definition)| {
            let path = definition.icon_path.clone()?;
            Some((to_zed_icon_key(key).to_string(), ZedIconDefinition { path }))
        })
        .collect())
}

/// `fileNames` → `file_stems`, covering both letter cases explicitly.
pub fn file_stems(file_names: &IconMap) -> IndexMap<String, String> {
    let mut stems = IndexMap::new();
    for (file_name, icon_key) in file_names {
        let zed_key = to_zed_icon_key(icon_key);
        for alias in file_stem_aliases(file_name) {
            stems.insert(alias, zed_key.to_string());
        }
    }
    stems
}

/// `fileExtensions` → `file_suffixes`; only the icon identifier changes.
pub fn file_suffixes(file_extensions: &IconMap) -> IndexMap<String, String> {
    file_extensions
        .iter()
        .map(|(extension, icon_key)| (extension.clone(), to_zed_icon_key(icon_key).to_string()))
        .collect()
}

/// `folderNames`/`folderNamesExpanded` → `named_directory_icons`.
///
/// A folder whose collapsed icon is not a known folder icon is skipped. A
/// missing or unknown expanded icon falls back to the collapsed one. Folders
/// are visited in document order, so a later exact name replaces an alias
/// generated from an earlier one.
pub fn named_directory_icons(theme: &ThemeDocument) -> Result<IndexMap<String, DirectoryIcons>> {
    icon_definitions(theme)?;
    let folder_icons = theme.folder_icon_paths();

    let mut named = IndexMap::new();
    for (folder_name, icon_key) in &theme.folder_names {
        let Some(collapsed) = folder_icons.get(icon_key.as_str()) else {
            debug!(
                "Skipping folder '{}': icon '{}' is not a folder icon definition",
                folder_name, icon_key
            );
            continue;
        };

        let expanded = theme
            .folder_names_expanded
            .get(folder_name)
            .filter(|key| !key.is_empty())
            .and_then(|key| folder_icons.get(key.as_str()))
            .unwrap_or(collapsed);

        let icons = DirectoryIcons::new(*collapsed, *expanded);
        for alias in folder_aliases(folder_name) {
            named.insert(alias, icons.clone());
        }
    }
    Ok(named)
}

/// Build the complete Zed manifest for a theme.
pub fn build_manifest(
    theme: &ThemeDocument,
    identity: &ThemeIdentity,
) -> Result<ZedIconThemeFamily> {
    let theme_entry = ZedIconTheme {
        name: identity.name.clone(),
        appearance: identity.appearance.clone(),
        file_icons: file_icons(theme)?,
        directory_icons: DirectoryIcons::default(),
        named_directory_icons: named_directory_icons(theme)?,
        file_suffixes: file_suffixes(&theme.file_extensions),
        file_stems: file_stems(&theme.file_names),
    };

    Ok(ZedIconThemeFamily {
        schema: ZED_ICON_THEME_SCHEMA.to_string(),
        name: identity.name.clone(),
        author: identity.author.clone(),
        themes: vec![theme_entry],
    })
}

fn icon_definitions(
    theme: &ThemeDocument,
) -> Result<&IndexMap<String, crate::theme::IconDefinition>> {
    theme
        .icon_definitions
        .as_ref()
        .ok_or_else(|| anyhow!("Icon theme has no iconDefinitions table"))
}
