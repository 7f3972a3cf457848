//! Configuration schema.
//!
//! Every key is optional; an empty file (or no file at all) yields the
//! defaults below.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Remote documentation repository cloned into the mirror.
pub const DEFAULT_REPO_URL: &str = "https://github.com/ericbuess/claude-code-docs.git";

/// Branch tracked by the mirror.
pub const DEFAULT_BRANCH: &str = "main";

/// Substring identifying this tool's installations and hook entries.
pub const DEFAULT_MARKER: &str = "claude-code-docs";

/// Base URL of the upstream documentation site.
pub const DEFAULT_OFFICIAL_DOCS_URL: &str = "https://docs.anthropic.com/en/docs/claude-code";

/// Docs mirror configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MirrorConfig {
    /// Git URL of the documentation repository.
    pub repo_url: String,

    /// Branch to clone and track.
    pub branch: String,

    /// Mirror directory (default: `~/.claude-code-docs`).
    pub install_dir: Option<PathBuf>,

    /// Host tool configuration directory (default: `~/.claude`).
    pub host_dir: Option<PathBuf>,

    /// Marker substring used to recognise installations and hook entries.
    pub marker: String,

    /// Minimum hours between passive update checks.
    pub check_interval_hours: u64,

    /// Base URL for "official page" links.
    pub official_docs_url: String,

    /// Number of commits shown by the changelog.
    pub changelog_limit: usize,

    /// Host tool event matcher for the update hook.
    pub hook_matcher: String,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            repo_url: DEFAULT_REPO_URL.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            install_dir: None,
            host_dir: None,
            marker: DEFAULT_MARKER.to_string(),
            check_interval_hours: 3,
            official_docs_url: DEFAULT_OFFICIAL_DOCS_URL.to_string(),
            changelog_limit: 5,
            hook_matcher: "Read".to_string(),
        }
    }
}

impl MirrorConfig {
    /// Web URL of the repository (the clone URL without a `.git` suffix).
    pub fn repo_web_url(&self) -> &str {
        self.repo_url
            .strip_suffix(".git")
            .unwrap_or(&self.repo_url)
            .trim_end_matches('/')
    }
}
