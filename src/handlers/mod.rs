//! Command-line handlers module
//!
//! Subcommands of the `retail-champions` binary, grouped by resource.

pub mod commands;

// Re-export commonly used handler items
pub use commands::{handle_command, Command, ListArgs};
