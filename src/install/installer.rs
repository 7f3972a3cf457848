//! The install/migrate flow.

use std::path::PathBuf;

use crate::config::{MirrorConfig, MirrorPaths};
use crate::error::{MirrorError, Result};
use crate::git::{clone_repository, ensure_git, GitRunner, WorkingCopy};
use crate::host::{
    helper_command, hook_command, write_command_file, CommandTemplate, HookSpec, SettingsFile,
};
use crate::mirror::DocsDir;
use crate::ui::{wrap_words, UserInterface};

use super::cleanup::{
    assess_directory, is_empty_dir, removal_blocker, remove_directory, DirectoryState,
};
use super::discovery::{discover_installations, DiscoveryOptions};
use super::plan::{decide, InstallPlan};
use super::update::{SafeUpdate, UpdateOutcome};

/// Version reported by the installer.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Width topic lists are wrapped to.
pub const TOPIC_WIDTH: usize = 60;

/// Inputs that come from the invocation rather than configuration.
#[derive(Debug, Clone)]
pub struct InstallOptions {
    /// Executable the registered command and hook will run.
    pub exe: PathBuf,
    /// Working directory, checked for being a prior installation.
    pub cwd: Option<PathBuf>,
    /// Answer yes to the discard-local-changes confirmation.
    pub assume_yes: bool,
}

/// What an install run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub plan: InstallPlan,
    /// Outcome of the in-place update, if there was one.
    pub update: Option<UpdateOutcome>,
    /// Command file and hook were written.
    pub registered: bool,
    /// Prior installations deleted.
    pub removed: Vec<PathBuf>,
    /// Prior installations kept because deleting them would lose data.
    pub preserved: Vec<PathBuf>,
}

impl InstallReport {
    fn new(plan: InstallPlan) -> Self {
        Self {
            plan,
            update: None,
            registered: false,
            removed: Vec::new(),
            preserved: Vec::new(),
        }
    }

    /// Whether the install finished with the mirror registered.
    pub fn succeeded(&self) -> bool {
        self.registered
    }
}

/// Establishes the mirror and registers it with the host tool.
pub struct Installer<'a> {
    config: &'a MirrorConfig,
    paths: &'a MirrorPaths,
    git: &'a dyn GitRunner,
}

impl<'a> Installer<'a> {
    pub fn new(config: &'a MirrorConfig, paths: &'a MirrorPaths, git: &'a dyn GitRunner) -> Self {
        Self { config, paths, git }
    }

    pub fn run(&self, options: &InstallOptions, ui: &mut dyn UserInterface) -> Result<InstallReport> {
        ui.show_header(&format!("docs-mirror installer v{}", VERSION));
        self.check_dependencies(ui)?;

        let canonical = &self.paths.install_dir;
        if !canonical.to_string_lossy().contains(&self.config.marker) {
            ui.warning(&format!(
                "{} does not contain '{}'; later runs will not recognise it as an installation",
                canonical.display(),
                self.config.marker
            ));
        }

        let existing = discover_installations(
            self.paths,
            &DiscoveryOptions {
                marker: &self.config.marker,
                cwd: options.cwd.as_deref(),
                include_canonical: false,
            },
        );
        if !existing.is_empty() {
            ui.message(&format!(
                "Found {} existing installation(s):",
                existing.len()
            ));
            for dir in &existing {
                ui.message(&format!("  - {}", dir.display()));
            }
            ui.message("");
        }

        let plan = decide(self.paths.has_valid_mirror(), &existing);
        tracing::debug!("install plan: {:?}", plan);
        let mut report = InstallReport::new(plan.clone());

        match &plan {
            InstallPlan::UpdateInPlace => {
                let outcome = self.update_in_place(options, ui)?;
                report.update = Some(outcome);
                match outcome {
                    UpdateOutcome::Cancelled => {
                        ui.error("Update cancelled; registration left unchanged");
                        return Ok(report);
                    }
                    UpdateOutcome::Offline => {
                        ui.warning("Continuing with the existing mirror");
                    }
                    UpdateOutcome::Pulled | UpdateOutcome::Reset => {}
                }
            }
            InstallPlan::Migrate { from } => {
                ui.message(&format!("Found existing installation at: {}", from.display()));
                ui.message(&format!("  Migrating to: {}", canonical.display()));
                self.clone_fresh(ui)?;
            }
            InstallPlan::Fresh => {
                ui.message("No existing installation found");
                self.clone_fresh(ui)?;
            }
        }

        ui.message("");
        ui.message(&format!("Setting up docs-mirror v{}...", VERSION));
        self.register(options, ui)?;
        report.registered = true;

        self.cleanup(&existing, &mut report, ui);
        self.show_summary(ui)?;

        Ok(report)
    }

    fn check_dependencies(&self, ui: &mut dyn UserInterface) -> Result<()> {
        ui.message("Checking dependencies...");
        let version = ensure_git(self.git)?;
        ui.success(&format!("Git found ({})", version));
        ui.message("");
        Ok(())
    }

    fn update_in_place(
        &self,
        options: &InstallOptions,
        ui: &mut dyn UserInterface,
    ) -> Result<UpdateOutcome> {
        let dir = &self.paths.install_dir;
        let branch = &self.config.branch;
        ui.success(&format!("Found installation at {}", dir.display()));

        let wc = WorkingCopy::new(dir, self.git);
        let current = wc.current_branch().unwrap_or_else(|_| "unknown".to_string());
        if &current == branch {
            ui.message(&format!("  Updating {} branch...", branch));
        } else {
            ui.message(&format!(
                "  Switching from {} to {} branch...",
                current, branch
            ));
        }

        SafeUpdate::new(&wc, branch)
            .assume_yes(options.assume_yes)
            .run(ui)
    }

    /// Make way for a clone at the canonical path.
    ///
    /// Only an empty directory or a working copy without local edits is removed.
    fn prepare_target(&self, ui: &mut dyn UserInterface) -> Result<()> {
        let dir = &self.paths.install_dir;
        if !dir.exists() {
            return Ok(());
        }

        let disposable = is_empty_dir(dir) || assess_directory(dir, self.git).is_disposable();
        if !disposable {
            return Err(MirrorError::TargetOccupied { path: dir.clone() });
        }

        ui.message(&format!(
            "Removing incomplete installation at {}",
            dir.display()
        ));
        remove_directory(dir)
    }

    fn clone_fresh(&self, ui: &mut dyn UserInterface) -> Result<()> {
        self.prepare_target(ui)?;

        let dir = &self.paths.install_dir;
        let mut spinner = ui.start_spinner(&format!("Installing fresh to {}...", dir.display()));
        match clone_repository(self.git, &self.config.repo_url, &self.config.branch, dir) {
            Ok(()) => spinner.finish_success("Repository cloned"),
            Err(e) => {
                spinner.finish_error("Clone failed");
                return Err(e);
            }
        }

        if !self.paths.has_valid_mirror() {
            ui.warning(&format!(
                "{} has no docs/docs_manifest.json; the next install will clone again",
                dir.display()
            ));
        }
        Ok(())
    }

    fn register(&self, options: &InstallOptions, ui: &mut dyn UserInterface) -> Result<()> {
        let dir = &self.paths.install_dir;

        ui.message("Setting up /docs command...");
        let execute = helper_command(&options.exe, dir);
        let content = CommandTemplate {
            mirror_dir: dir,
            execute: &execute,
            repo_web_url: self.config.repo_web_url(),
            official_docs_url: &self.config.official_docs_url,
        }
        .render();
        if write_command_file(&self.paths.command_file(), &content)? {
            ui.success("Updated /docs command");
        } else {
            ui.success("Created /docs command");
        }

        ui.message("Setting up automatic updates...");
        let hook = HookSpec {
            marker: self.config.marker.clone(),
            matcher: self.config.hook_matcher.clone(),
            command: hook_command(&options.exe, dir),
        };
        let settings = SettingsFile::new(self.paths.settings_file(), self.paths.settings_backup());
        let registration = settings.register(&hook)?;
        if registration.replaced_malformed {
            ui.warning(&format!(
                "Invalid {} replaced",
                self.paths.settings_file().display()
            ));
        }
        if let Some(backup) = &registration.backup {
            tracing::debug!("settings backup at {}", backup.display());
        }
        ui.success(if registration.created {
            "Created host settings"
        } else {
            "Updated host settings"
        });

        Ok(())
    }

    /// Retire prior installations that hold nothing worth keeping.
    fn cleanup(&self, existing: &[PathBuf], report: &mut InstallReport, ui: &mut dyn UserInterface) {
        if existing.is_empty() {
            return;
        }

        ui.message("");
        ui.message("Cleaning up old installations...");
        for dir in existing {
            ui.message(&format!("  - {}", dir.display()));

            if let Some(reason) = removal_blocker(dir, &self.paths.install_dir, existing) {
                ui.warning(&format!("    Preserved ({})", reason));
                report.preserved.push(dir.clone());
                continue;
            }

            match assess_directory(dir, self.git) {
                DirectoryState::Missing => {}
                DirectoryState::Clean => match remove_directory(dir) {
                    Ok(()) => {
                        ui.success("    Removed (clean)");
                        report.removed.push(dir.clone());
                    }
                    Err(e) => {
                        ui.warning(&format!("    Could not remove: {}", e));
                        report.preserved.push(dir.clone());
                    }
                },
                DirectoryState::Dirty(_) | DirectoryState::Unreadable => {
                    ui.warning("    Preserved (has uncommitted changes)");
                    report.preserved.push(dir.clone());
                }
                DirectoryState::NotRepository => {
                    ui.warning("    Preserved (not a git repository)");
                    report.preserved.push(dir.clone());
                }
            }
        }
    }

    fn show_summary(&self, ui: &mut dyn UserInterface) -> Result<()> {
        ui.message("");
        ui.success(&format!("docs-mirror v{} installed successfully!", VERSION));
        ui.message("");
        ui.message("Command: /docs (user)");
        ui.message(&format!("Location: {}", self.paths.install_dir.display()));
        ui.message("");
        ui.message("Usage examples:");
        ui.message("  /docs hooks         # Read hooks documentation");
        ui.message("  /docs -t            # Check when docs were last updated");
        ui.message("  /docs what's new    # See recent documentation changes");
        ui.message("");
        ui.message(&format!(
            "Auto-updates: Enabled - checks the remote at most every {} hour(s)",
            self.config.check_interval_hours
        ));
        ui.message("");
        ui.message("Available topics:");
        let topics = DocsDir::new(self.paths.docs_dir()).list_topics()?;
        for line in wrap_words(&topics, TOPIC_WIDTH, "  ") {
            ui.message(&line);
        }
        ui.message("");
        ui.warning("Note: Restart the host tool for auto-updates to take effect");
        Ok(())
    }
}
