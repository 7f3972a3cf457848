//! Installing, migrating and updating the mirror.
//!
//! The installer discovers prior installations, picks an [`InstallPlan`],
//! brings the canonical directory up to date (cloning or running a
//! [`SafeUpdate`]) and then registers the command file and hook with the
//! host tool. Prior installations are only deleted when git can restore
//! everything in them.

pub mod cleanup;
pub mod discovery;
pub mod installer;
pub mod plan;
pub mod update;

pub use cleanup::{
    assess_directory, contains_path, is_empty_dir, remove_directory, removal_blocker,
    DirectoryState,
};
pub use discovery::{discover_installations, same_dir, scan_candidate_paths, DiscoveryOptions};
pub use installer::{InstallOptions, InstallReport, Installer, VERSION};
pub use plan::{decide, InstallPlan};
pub use update::{needs_confirmation, SafeUpdate, UpdateOutcome, UpdateState, DISCARD_PROMPT_KEY};
