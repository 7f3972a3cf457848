//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandContext`] for the state every command shares
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::PathBuf;

use crate::cli::args::{Cli, Commands, DocsArgs};
use crate::config::{MirrorConfig, MirrorPaths};
use crate::error::Result;
use crate::git::GitRunner;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Resolved configuration and environment shared by every command.
pub struct CommandContext<'a> {
    pub config: MirrorConfig,
    pub paths: MirrorPaths,
    pub git: &'a dyn GitRunner,
    /// Executable written into the command file and hook.
    pub exe: PathBuf,
    /// Working directory, if it could be determined.
    pub cwd: Option<PathBuf>,
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher<'a> {
    context: CommandContext<'a>,
}

impl<'a> CommandDispatcher<'a> {
    /// Create a new dispatcher sharing `context` with every command.
    pub fn new(context: CommandContext<'a>) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &CommandContext<'a> {
        &self.context
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it. With no subcommand, the docs helper lists topics.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Install(args)) => {
                let cmd = super::install::InstallCommand::new(&self.context, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Uninstall(args)) => {
                let cmd = super::uninstall::UninstallCommand::new(&self.context, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Docs(args)) => {
                let cmd = super::docs::DocsCommand::new(&self.context, args);
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            None => {
                let cmd = super::docs::DocsCommand::new(&self.context, &DocsArgs::default());
                cmd.execute(ui)
            }
        }
    }
}
