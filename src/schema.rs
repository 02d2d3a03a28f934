//! JSON Schema for `custom-mappings.jsonc`, derived from the source theme.

use crate::theme::{is_folder_icon, ThemeDocument};
use serde_json::{json, Value};

pub const SCHEMA_DIALECT: &str = "https://json-schema.org/draft/2020-12/schema";
pub const SCHEMA_ID: &str = "https://dir.github.io/symbols/custom-mappings.schema.json";

const ICON_KEY_DESCRIPTION: &str = "Icon key from vscode-symbols iconDefinitions.";
const FOLDER_ICON_KEY_DESCRIPTION: &str =
    "Folder icon key from vscode-symbols iconDefinitions (keys starting with 'folder').";

/// Build the schema. File categories accept every icon identifier, folder
/// categories only folder identifiers. Both lists are sorted.
pub fn build_custom_mappings_schema(theme: &ThemeDocument) -> Value {
    let mut icon_keys: Vec<&str> = theme
        .icon_definitions
        .iter()
        .flatten()
        .map(|(key, _)| key.as_str())
        .collect();
    icon_keys.sort_unstable();
    let folder_keys: Vec<&str> = icon_keys
        .iter()
        .copied()
        .filter(|key| is_folder_icon(key))
        .collect();

    json!({
        "$schema": SCHEMA_DIALECT,
        "$id": SCHEMA_ID,
        "title": "Symbols Custom Mappings",
        "description": "Custom mapping overrides merged into vscode-symbols before zed-symbols assets are generated.",
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "$schema": {
                "type": "string",
                "description": "Optional reference to this schema file for editor IntelliSense.",
            },
            "fileExtensions": category(
                "Map extension names (without '*.' prefix) to an icon key. Example: { \"tfvars\": \"terraform\" }",
                &icon_keys,
                ICON_KEY_DESCRIPTION,
            ),
            "fileNames": category(
                "Map exact file names to an icon key. Example: { \"Brewfile\": \"homebrew\" }",
                &icon_keys,
                ICON_KEY_DESCRIPTION,
            ),
            "folderNames": category(
                "Map directory names to a folder icon key. Example: { \"infra\": \"folder-assets\" }",
                &folder_keys,
                FOLDER_ICON_KEY_DESCRIPTION,
            ),
            "folderNamesExpanded": category(
                "Map directory names to expanded folder icon key. Example: { \"infra\": \"folder-assets\" }",
                &folder_keys,
                FOLDER_ICON_KEY_DESCRIPTION,
            ),
        },
        "required": ["fileExtensions", "fileNames", "folderNames", "folderNamesExpanded"],
    })
}

fn category(description: &str, allowed: &[&str], value_description: &str) -> Value {
    json!({
        "type": "object",
        "description": description,
        "additionalProperties": {
            "type": "string",
            "enum": allowed,
            "description": value_description,
        },
        "default": {},
    })
}
