//! Registration with the host tool: the `/docs` command file and the
//! update hook in its settings.

pub mod command_file;
pub mod settings;

pub use command_file::{
    helper_command, hook_command, remove_command_file, write_command_file, CommandTemplate,
};
pub use settings::{
    hook_commands, references_marker, remove_hooks, upsert_hook, HookRegistration, HookRemoval,
    HookSpec, SettingsDocument, SettingsFile,
};
