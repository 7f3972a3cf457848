//! Configuration loading and path layout.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Derived filesystem layout in [`paths`]
//!
//! # Example
//!
//! ```
//! use docs_mirror::config::{load_config, MirrorPaths};
//! use tempfile::TempDir;
//!
//! let home = TempDir::new().unwrap();
//! let config = load_config(home.path(), None).unwrap();
//! let paths = MirrorPaths::resolve(home.path(), &config);
//! assert!(paths.install_dir.ends_with(".claude-code-docs"));
//! ```
//!
//! # Configuration File Location
//!
//! `~/.docs-mirror/config.yml`, or the file named by `--config`.

pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::{default_config_path, load_config, parse_config};
pub use paths::{expand_home, is_mirror, MirrorPaths, MANIFEST_FILE};
pub use schema::{
    MirrorConfig, DEFAULT_BRANCH, DEFAULT_MARKER, DEFAULT_OFFICIAL_DOCS_URL, DEFAULT_REPO_URL,
};
