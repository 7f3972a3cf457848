//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use super::commands::HelperRequest;

/// docs-mirror - a local, auto-updating mirror of the host tool's documentation.
#[derive(Debug, Parser)]
#[command(name = "docs-mirror")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Home directory all default paths derive from
    #[arg(long, global = true, env = "DOCS_MIRROR_HOME", value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Path to config file (overrides ~/.docs-mirror/config.yml)
    #[arg(short, long, global = true, env = "DOCS_MIRROR_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Mirror directory (overrides the configured install_dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub mirror: Option<PathBuf>,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Whether this invocation is the passive update hook.
    pub fn is_hook_check(&self) -> bool {
        matches!(&self.command, Some(Commands::Docs(args)) if args.is_hook_check())
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install the mirror, or update and re-register an existing one
    Install(InstallArgs),

    /// Remove the /docs command, the update hook and mirror directories
    Uninstall(UninstallArgs),

    /// Read documentation from the mirror (default if no command specified)
    Docs(DocsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `install` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InstallArgs {
    /// Discard local edits in the mirror without asking
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `uninstall` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct UninstallArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `docs` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct DocsArgs {
    /// Topic, `-t`, `what's new`, `hook-check` or `uninstall`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

impl DocsArgs {
    pub fn is_hook_check(&self) -> bool {
        HelperRequest::parse(&self.args) == HelperRequest::HookCheck
    }
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
