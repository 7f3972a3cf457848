//! The `docs-mirror install` command.

use crate::cli::args::InstallArgs;
use crate::error::Result;
use crate::install::{InstallOptions, Installer};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The install command implementation.
pub struct InstallCommand<'a> {
    context: &'a CommandContext<'a>,
    args: InstallArgs,
}

impl<'a> InstallCommand<'a> {
    /// Create a new install command.
    pub fn new(context: &'a CommandContext<'a>, args: InstallArgs) -> Self {
        Self { context, args }
    }
}

impl Command for InstallCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let options = InstallOptions {
            exe: self.context.exe.clone(),
            cwd: self.context.cwd.clone(),
            assume_yes: self.args.yes,
        };
        let installer = Installer::new(&self.context.config, &self.context.paths, self.context.git);
        let report = installer.run(&options, ui)?;

        if report.succeeded() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}
