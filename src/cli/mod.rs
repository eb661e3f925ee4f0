//! CLI argument parsing and command handling.

mod args;
mod prompt;
mod validators;

pub use args::{AuditArgs, Cli, Command, ConfigAction};
pub use prompt::prompt_for_root;
