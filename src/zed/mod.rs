//! Zed icon theme generation.

pub mod manifest;
pub mod translate;

pub use manifest::{DirectoryIcons, ZedIconDefinition, ZedIconTheme, ZedIconThemeFamily};
pub use translate::{build_manifest, to_zed_icon_key, ICON_KEY_RENAMES};

use serde::{Deserialize, Serialize};

/// Name, author and appearance written into the generated manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeIdentity {
    #[serde(default = "default_theme_name")]
    pub name: String,
    #[serde(default = "default_author")]
    pub author: String,
    #[serde(default = "default_appearance")]
    pub appearance: String,
}

fn default_theme_name() -> String {
    "Symbols Icon Theme".to_string()
}

fn default_author() -> String {
    "Zed Industries".to_string()
}

fn default_appearance() -> String {
    "dark".to_string()
}

impl Default for ThemeIdentity {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            author: default_author(),
            appearance: default_appearance(),
        }
    }
}
