pub mod command;
pub mod json;
pub mod path;

// Export utilities that are used
pub use command::{CommandFailed, CommandRunner, SystemRunner};
pub use json::{to_json_string, Indent};
pub use path::{get_log_dir, get_log_path, WorkspacePaths};
