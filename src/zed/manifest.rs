use serde::{Deserialize, Serialize};
use indexmap::IndexMap;

/// JSON schema the generated manifest declares.
pub const ZED_ICON_THEME_SCHEMA: &str = "https://zed.dev/schema/icon_themes/v0.3.0.json";

/// Default (unnamed) directory icons.
pub const DEFAULT_FOLDER_ICON: &str = "./icons/folders/folder.svg";
pub const DEFAULT_FOLDER_OPEN_ICON: &str = "./icons/folders/folder-open.svg";

/// Top-level Zed icon theme family file (`icon_themes/*.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZedIconThemeFamily {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub name: String,
    pub author: String,
    pub themes: Vec<ZedIconTheme>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZedIconTheme {
    pub name: String,
    pub appearance: String,
    pub file_icons: IndexMap<String, ZedIconDefinition>,
    pub directory_icons: DirectoryIcons,
    pub named_directory_icons: IndexMap<String, DirectoryIcons>,
    pub file_suffixes: IndexMap<String, String>,
    pub file_stems: IndexMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZedIconDefinition {
    pub path: String,
}

/// Icon pair for a closed and an open directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryIcons {
    pub collapsed: String,
    pub expanded: String,
}

impl DirectoryIcons {
    pub fn new(collapsed: impl Into<String>, expanded: impl Into<String>) -> Self {
        Self {
            collapsed: collapsed.into(),
            expanded: expanded.into(),
        }
    }
}

impl Default for DirectoryIcons {
    fn default() -> Self {
        Self::new(DEFAULT_FOLDER_ICON, DEFAULT_FOLDER_OPEN_ICON)
    }
}
