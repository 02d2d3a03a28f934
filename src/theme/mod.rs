//! VS Code icon theme documents and the custom mapping overrides.

pub mod merge;

pub use merge::{merge_mappings, merge_theme};

use crate::storage::Storage;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Case-sensitive pattern → icon identifier map, in document order.
///
/// Order matters: when generated Zed aliases collide, the later entry wins.
pub type IconMap = IndexMap<String, String>;

/// Prefix that marks an icon identifier as a folder icon.
pub const FOLDER_ICON_PREFIX: &str = "folder";

/// Whether the identifier denotes a folder icon.
pub fn is_folder_icon(icon_key: &str) -> bool {
    icon_key.starts_with(FOLDER_ICON_PREFIX)
}

/// A single entry of `iconDefinitions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconDefinition {
    /// Asset path relative to the theme file. Font-only definitions have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_path: Option<String>,
    /// Any other keys (font characters, colors) kept as-is
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl IconDefinition {
    pub fn new(icon_path: impl Into<String>) -> Self {
        Self {
            icon_path: Some(icon_path.into()),
            extra: serde_json::Map::new(),
        }
    }
}

/// The VS Code icon theme document.
///
/// Only the fields the tooling reads are typed; everything else survives a
/// load/save cycle through `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_definitions: Option<IndexMap<String, IconDefinition>>,
    #[serde(default)]
    pub file_extensions: IconMap,
    #[serde(default)]
    pub file_names: IconMap,
    #[serde(default)]
    pub folder_names: IconMap,
    #[serde(default)]
    pub folder_names_expanded: IconMap,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// User overrides from `custom-mappings.jsonc`. Every category is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomMappings {
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_extensions: Option<IconMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_names: Option<IconMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_names: Option<IconMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_names_expanded: Option<IconMap>,
}

impl ThemeDocument {
    /// Parse a theme. Comments and trailing commas are accepted.
    pub fn parse(content: &str) -> Result<Self> {
        parse_jsonc(content).context("Failed to parse icon theme")
    }

    /// Load a theme through the storage collaborator.
    pub fn load(storage: &dyn Storage, path: &Path) -> Result<Self> {
        let content = read_required(storage, path, "icon theme")?;
        Self::parse(&content).with_context(|| format!("Invalid icon theme: {:?}", path))
    }

    /// Asset paths of the folder icon definitions. Definitions without an
    /// `iconPath` are left out.
    pub fn folder_icon_paths(&self) -> BTreeMap<&str, &str> {
        self.icon_definitions
            .iter()
            .flatten()
            .filter(|(key, _)| is_folder_icon(key))
            .filter_map(|(key, definition)| {
                definition
                    .icon_path
                    .as_deref()
                    .map(|path| (key.as_str(), path))
            })
            .collect()
    }
}

impl CustomMappings {
    /// Parse an override document. Comments and trailing commas are accepted.
    pub fn parse(content: &str) -> Result<Self> {
        parse_jsonc(content).context("Failed to parse custom mappings")
    }

    /// Load the override document through the storage collaborator.
    pub fn load(storage: &dyn Storage, path: &Path) -> Result<Self> {
        let content = read_required(storage, path, "custom mappings file")?;
        Self::parse(&content).with_context(|| format!("Invalid custom mappings: {:?}", path))
    }
}

fn parse_jsonc<T: DeserializeOwned>(content: &str) -> Result<T> {
    Ok(json5::from_str(content)?)
}

fn read_required(storage: &dyn Storage, path: &Path, what: &str) -> Result<String> {
    if !storage.exists(path) {
        anyhow::bail!("Missing {}: {:?}", what, path);
    }
    storage.read_to_string(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_theme_parse_keeps_unknown_fields() {
        let theme = ThemeDocument::parse(
            r#"{
                "hidesExplorerArrows": true,
                "iconDefinitions": {
                    "rust": { "iconPath": "./icons/files/rust.svg" }
                },
                "fileExtensions": { "rs": "rust" },
                "file": "document"
            }"#,
        )
        .unwrap();

        assert_eq!(theme.file_extensions.get("rs").map(String::as_str), Some("rust"));
        assert!(theme.file_names.is_empty());
        assert_eq!(theme.extra.get("file"), Some(&serde_json::json!("document")));
        assert_eq!(
            theme.extra.get("hidesExplorerArrows"),
            Some(&serde_json::json!(true))
        );

        let json = serde_json::to_value(&theme).unwrap();
        assert_eq!(json["hidesExplorerArrows"], serde_json::json!(true));
        assert_eq!(
            json["iconDefinitions"]["rust"]["iconPath"],
            serde_json::json!("./icons/files/rust.svg")
        );
    }

    #[test]
    fn test_custom_mappings_accept_comments() {
        let mappings = CustomMappings::parse(
            r#"{
                // Terraform variables
                "$schema": "./custom-mappings.schema.json",
                "fileExtensions": { "tfvars": "terraform", },
                /* no folders yet */
            }"#,
        )
        .unwrap();

        assert_eq!(mappings.schema.as_deref(), Some("./custom-mappings.schema.json"));
        assert_eq!(
            mappings.file_extensions.unwrap().get("tfvars").map(String::as_str),
            Some("terraform")
        );
        assert!(mappings.folder_names.is_none());
    }

    #[test]
    fn test_malformed_input_is_a_parse_error() {
        let err = ThemeDocument::parse("{ \"fileExtensions\": ").unwrap_err();
        assert!(err.to_string().contains("Failed to parse icon theme"));

        let err = CustomMappings::parse("[1, 2]").unwrap_err();
        assert!(err.to_string().contains("Failed to parse custom mappings"));
    }

    #[test]
    fn test_load_missing_file_fails_with_path() {
        let storage = MemoryStorage::new();
        let err = CustomMappings::load(&storage, Path::new("ws/custom-mappings.jsonc"))
            .unwrap_err();
        assert!(err.to_string().contains("Missing custom mappings file"));
    }

    #[test]
    fn test_folder_icon_paths_use_prefix() {
        let mut definitions = IndexMap::new();
        definitions.insert("folder-src".to_string(), IconDefinition::new("src.svg"));
        definitions.insert("rust".to_string(), IconDefinition::new("rust.svg"));
        let theme = ThemeDocument {
            icon_definitions: Some(definitions),
            ..ThemeDocument::default()
        };

        let folders = theme.folder_icon_paths();
        assert_eq!(folders.len(), 1);
        assert_eq!(folders["folder-src"], "src.svg");
    }

    #[test]
    fn test_font_only_definitions_parse() {
        let theme = ThemeDocument::parse(
            r##"{
                "iconDefinitions": {
                    "folder-font": { "fontCharacter": "\\E001", "fontColor": "#cccccc" },
                    "folder-src": { "iconPath": "./icons/folders/src.svg" }
                },
                "folderNames": { "src": "folder-src" }
            }"##,
        )
        .unwrap();

        let definitions = theme.icon_definitions.as_ref().unwrap();
        assert_eq!(definitions["folder-font"].icon_path, None);
        assert_eq!(
            definitions["folder-font"].extra.get("fontColor"),
            Some(&serde_json::json!("#cccccc"))
        );
        assert_eq!(theme.folder_icon_paths().len(), 1);

        let json = serde_json::to_value(&theme).unwrap();
        assert!(json["iconDefinitions"]["folder-font"].get("iconPath").is_none());
    }

    #[test]
    fn test_mapping_order_follows_the_document() {
        let theme = ThemeDocument::parse(
            r#"{ "folderNames": { "src": "folder-src", "assets": "folder-assets", ".github": "folder-github" } }"#,
        )
        .unwrap();

        let keys: Vec<&str> = theme.folder_names.keys().map(String::as_str).collect();
        assert_eq!(keys, ["src", "assets", ".github"]);
    }
}
