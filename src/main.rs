//! docs-mirror CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use docs_mirror::cli::{Cli, CommandContext, CommandDispatcher, CommandResult};
use docs_mirror::config::{expand_home, load_config, MirrorPaths};
use docs_mirror::git::SystemGit;
use docs_mirror::interrupt::install_interrupt_handler;
use docs_mirror::ui::{create_ui_with_color, OutputMode, UserInterface};
use docs_mirror::{MirrorError, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
///
/// Logs go to stderr so helper output on stdout stays clean.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("docs_mirror=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("docs_mirror=info"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn run(cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
    let home = match &cli.home {
        Some(home) => home.clone(),
        None => dirs::home_dir().ok_or(MirrorError::HomeNotFound)?,
    };
    let cwd = std::env::current_dir().ok();

    let config = load_config(&home, cli.config.as_deref())?;
    let mut paths = MirrorPaths::resolve(&home, &config);
    if let Some(dir) = &cli.mirror {
        let dir = expand_home(dir, &home);
        let dir = match &cwd {
            Some(cwd) if dir.is_relative() => cwd.join(dir),
            _ => dir,
        };
        paths = paths.with_install_dir(dir);
    }

    let exe = std::env::current_exe().unwrap_or_else(|_| PathBuf::from("docs-mirror"));
    let git = SystemGit;
    let dispatcher = CommandDispatcher::new(CommandContext {
        config,
        paths,
        git: &git,
        exe,
        cwd,
    });

    dispatcher.dispatch(cli, ui)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);
    install_interrupt_handler();

    tracing::debug!("docs-mirror starting with args: {:?}", cli);

    // The hook runs inside the host tool and must stay silent.
    let hook_check = cli.is_hook_check();
    let output_mode = if hook_check {
        OutputMode::Silent
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };

    let mut ui = create_ui_with_color(!hook_check, output_mode, !cli.no_color);

    match run(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) if hook_check => {
            tracing::debug!("hook check failed: {}", e);
            ExitCode::SUCCESS
        }
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
