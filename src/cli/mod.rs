//! Command-line interface for docs-mirror.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, CompletionsArgs, DocsArgs, InstallArgs, UninstallArgs};
pub use commands::{Command, CommandContext, CommandDispatcher, CommandResult, HelperRequest};
