//! Application services layer.
//!
//! Services hold the workflows behind each CLI entry point, separated from
//! argument parsing and terminal output.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                   CLI Layer                     │
//! │  (Cli, commands, output helpers)                │
//! └─────────────────────┬───────────────────────────┘
//!                       │
//!                       ▼
//! ┌─────────────────────────────────────────────────┐
//! │               Services Layer                    │
//! │  ┌──────────────┐ ┌──────────────────┐          │
//! │  │ BuildService │ │ WorkspaceService │          │
//! │  └──────────────┘ └──────────────────┘          │
//! └─────────────────────┬───────────────────────────┘
//!                       │
//!                       ▼
//! ┌─────────────────────────────────────────────────┐
//! │             Infrastructure Layer                │
//! │  (Storage, GitManager, CommandRunner, Config)   │
//! └─────────────────────────────────────────────────┘
//! ```

pub mod build_service;
pub mod workspace_service;

// Re-export common types
pub use build_service::{BuildService, ZedSyncSummary};
pub use workspace_service::{
    PublishSummary, WorkspaceService, ROOT_COMMIT_MESSAGE, ZED_COMMIT_MESSAGE,
};
