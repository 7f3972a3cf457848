//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! Commands are dispatched via [`CommandDispatcher`], which resolves
//! configuration once and shares it with every command through a
//! [`CommandContext`].

pub mod completions;
pub mod dispatcher;
pub mod docs;
pub mod install;
pub mod uninstall;

pub use dispatcher::{Command, CommandContext, CommandDispatcher, CommandResult};
pub use docs::{DocsCommand, HelperRequest};
