//! docs-mirror - a local, auto-updating mirror of product documentation.
//!
//! docs-mirror clones a documentation repository into a fixed directory,
//! registers a `/docs` command and an update hook with the host tool, and
//! answers `/docs` requests from the local copy. Re-running the installer
//! updates or migrates an existing mirror without discarding local edits
//! unless the operator agrees.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and derived paths
//! - [`error`] - Error types and result aliases
//! - [`git`] - Git subprocess execution and working copy operations
//! - [`host`] - Command file and settings hook registration
//! - [`install`] - Discovery, install planning, safe update and cleanup
//! - [`mirror`] - Document lookup, changelog and freshness checks
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//! - [`uninstall`] - Reversing an installation
//!
//! # Example
//!
//! ```
//! use docs_mirror::mirror::resolve_topic;
//!
//! let topics = vec!["hooks".to_string(), "memory".to_string()];
//! assert_eq!(resolve_topic(&topics, "Hooks"), Some("hooks"));
//! assert_eq!(resolve_topic(&topics, "mem"), Some("memory"));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod host;
pub mod install;
pub mod interrupt;
pub mod mirror;
pub mod ui;
pub mod uninstall;

pub use error::{MirrorError, Result};
