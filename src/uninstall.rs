//! Reversing an installation.
//!
//! Registration (command file and hook) is always removed. Mirror
//! directories are deleted unless they hold local edits or are not
//! mirrors themselves.

use std::path::PathBuf;

use crate::config::{MirrorConfig, MirrorPaths};
use crate::error::Result;
use crate::git::GitRunner;
use crate::host::{remove_command_file, HookRemoval, SettingsFile};
use crate::install::{
    assess_directory, discover_installations, removal_blocker, remove_directory, DirectoryState,
    DiscoveryOptions,
};
use crate::ui::{Confirmation, UserInterface};

/// Confirmation key for the uninstall prompt.
pub const UNINSTALL_PROMPT_KEY: &str = "uninstall";

/// Inputs that come from the invocation.
#[derive(Debug, Clone, Default)]
pub struct UninstallOptions {
    /// Working directory, checked for being an installation.
    pub cwd: Option<PathBuf>,
    /// Skip the confirmation prompt.
    pub assume_yes: bool,
}

/// What an uninstall run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UninstallReport {
    /// The operator declined; nothing was touched.
    pub cancelled: bool,
    pub removed_command: bool,
    pub hooks_removed: usize,
    pub removed: Vec<PathBuf>,
    pub preserved: Vec<PathBuf>,
    /// Some step could not be completed.
    pub warnings: bool,
}

pub struct Uninstaller<'a> {
    config: &'a MirrorConfig,
    paths: &'a MirrorPaths,
    git: &'a dyn GitRunner,
}

impl<'a> Uninstaller<'a> {
    pub fn new(config: &'a MirrorConfig, paths: &'a MirrorPaths, git: &'a dyn GitRunner) -> Self {
        Self { config, paths, git }
    }

    pub fn run(
        &self,
        options: &UninstallOptions,
        ui: &mut dyn UserInterface,
    ) -> Result<UninstallReport> {
        ui.show_header("docs-mirror uninstaller");

        let installations = discover_installations(
            self.paths,
            &DiscoveryOptions {
                marker: &self.config.marker,
                cwd: options.cwd.as_deref(),
                include_canonical: true,
            },
        );

        if !installations.is_empty() {
            ui.message("Found installations at:");
            for dir in &installations {
                ui.message(&format!("  - {}", dir.display()));
            }
            ui.message("");
        }

        ui.message("This will remove:");
        ui.message(&format!(
            "  - The /docs command from {}",
            self.paths.command_file().display()
        ));
        ui.message(&format!(
            "  - All {} hooks from {}",
            self.config.marker,
            self.paths.settings_file().display()
        ));
        if !installations.is_empty() {
            ui.message("  - Installation directories (if safe to remove)");
        }
        ui.message("");

        let mut report = UninstallReport::default();

        let prompt = Confirmation::new(UNINSTALL_PROMPT_KEY, "Continue with uninstall?", false);
        if !options.assume_yes && !ui.confirm(&prompt)? {
            ui.message("Cancelled.");
            report.cancelled = true;
            return Ok(report);
        }

        self.remove_registration(&mut report, ui);
        self.remove_directories(&installations, &mut report, ui);

        ui.message("");
        if report.warnings {
            ui.warning("Uninstall completed with warnings");
        } else {
            ui.success("Uninstall complete!");
        }
        ui.message("");
        ui.message("To reinstall:");
        ui.message("  docs-mirror install");

        Ok(report)
    }

    fn remove_registration(&self, report: &mut UninstallReport, ui: &mut dyn UserInterface) {
        let command_file = self.paths.command_file();
        match remove_command_file(&command_file) {
            Ok(true) => {
                ui.success(&format!("Removed {}", command_file.display()));
                report.removed_command = true;
            }
            Ok(false) => tracing::debug!("no command file at {}", command_file.display()),
            Err(e) => {
                ui.warning(&format!("Could not remove {}: {}", command_file.display(), e));
                report.warnings = true;
            }
        }

        let settings = SettingsFile::new(self.paths.settings_file(), self.paths.settings_backup());
        match settings.unregister(&self.config.marker) {
            Ok(HookRemoval::Missing) => {
                tracing::debug!("no settings file at {}", settings.path().display())
            }
            Ok(HookRemoval::Removed { count: 0, .. }) => ui.success("No hooks to remove"),
            Ok(HookRemoval::Removed { count, backup }) => {
                ui.success(&format!(
                    "Removed {} hook(s) (backup: {})",
                    count,
                    backup.display()
                ));
                report.hooks_removed = count;
            }
            Ok(HookRemoval::Malformed(message)) => {
                ui.warning(&format!(
                    "Could not remove hooks: {} is not valid JSON ({})",
                    settings.path().display(),
                    message
                ));
                report.warnings = true;
            }
            Err(e) => {
                ui.warning(&format!("Could not remove hooks: {}", e));
                report.warnings = true;
            }
        }
    }

    fn remove_directories(
        &self,
        installations: &[PathBuf],
        report: &mut UninstallReport,
        ui: &mut dyn UserInterface,
    ) {
        if installations.is_empty() {
            return;
        }

        ui.message("");
        for dir in installations {
            if let Some(reason) = removal_blocker(dir, &self.paths.install_dir, installations) {
                ui.warning(&format!("Preserved {} ({})", dir.display(), reason));
                report.preserved.push(dir.clone());
                continue;
            }

            match assess_directory(dir, self.git) {
                DirectoryState::Missing => {}
                DirectoryState::Dirty(_) | DirectoryState::Unreadable => {
                    ui.warning(&format!(
                        "Preserved {} (has uncommitted changes)",
                        dir.display()
                    ));
                    report.preserved.push(dir.clone());
                }
                DirectoryState::Clean | DirectoryState::NotRepository => {
                    match remove_directory(dir) {
                        Ok(()) => {
                            ui.success(&format!("Removed {}", dir.display()));
                            report.removed.push(dir.clone());
                        }
                        Err(e) => {
                            ui.warning(&format!("Could not remove {}: {}", dir.display(), e));
                            report.warnings = true;
                        }
                    }
                }
            }
        }
    }
}
