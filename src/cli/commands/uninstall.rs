//! The `docs-mirror uninstall` command.

use crate::cli::args::UninstallArgs;
use crate::error::Result;
use crate::ui::UserInterface;
use crate::uninstall::{UninstallOptions, Uninstaller};

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The uninstall command implementation.
pub struct UninstallCommand<'a> {
    context: &'a CommandContext<'a>,
    args: UninstallArgs,
}

impl<'a> UninstallCommand<'a> {
    /// Create a new uninstall command.
    pub fn new(context: &'a CommandContext<'a>, args: UninstallArgs) -> Self {
        Self { context, args }
    }
}

impl Command for UninstallCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let options = UninstallOptions {
            cwd: self.context.cwd.clone(),
            assume_yes: self.args.yes,
        };
        // A declined prompt is not a failure.
        Uninstaller::new(&self.context.config, &self.context.paths, self.context.git)
            .run(&options, ui)?;
        Ok(CommandResult::success())
    }
}
