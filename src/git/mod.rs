//! Git subprocess plumbing.
//!
//! - [`runner`] - the [`GitRunner`] seam and the system `git` implementation
//! - [`status`] - porcelain status parsing and the local-change policy
//! - [`working_copy`] - pull/fetch/reset/log operations on a working copy

pub mod runner;
pub mod status;
pub mod working_copy;

pub use runner::{ensure_git, GitOutput, GitRunner, SystemGit};
pub use status::{StatusEntry, WorkingCopyStatus};
pub use working_copy::{clone_repository, WorkingCopy};
