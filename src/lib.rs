//! symbols-workspace - tooling for the symbols icon theme workspace
//!
//! This library merges user icon mappings into the VS Code symbols theme,
//! generates the Zed flavour of the theme from it, produces preview artifacts
//! and drives the git workflows that keep the submodules in sync.

// Core modules
pub mod assets;
pub mod cli;
pub mod config;
pub mod git;
pub mod preview;
pub mod schema;
pub mod services;
pub mod storage;
pub mod theme;
pub mod utils;
pub mod zed;

// Re-exports for convenience
pub use config::Config;
pub use storage::{FsStorage, MemoryStorage, Storage};
pub use theme::{CustomMappings, ThemeDocument};
pub use utils::WorkspacePaths;
