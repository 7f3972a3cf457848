//! Error types for docs-mirror operations.
//!
//! This module defines [`MirrorError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `MirrorError` for failures the CLI reports distinctly (missing git,
//!   failed clone, unusable config)
//! - Use `anyhow::Error` (via `MirrorError::Other`) for unexpected errors
//! - Network failures during checks are not errors at this level; callers
//!   downgrade them to warnings or swallow them

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for docs-mirror operations.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// The git executable could not be found or started.
    #[error("Git is required but not installed (https://git-scm.com/downloads)")]
    GitMissing,

    /// Cloning the documentation repository failed.
    #[error("Failed to clone {url}: {message}")]
    CloneFailed { url: String, message: String },

    /// A git command exited non-zero where success was required.
    #[error("git {command} failed: {message}")]
    GitFailed { command: String, message: String },

    /// No home directory could be determined and none was given.
    #[error("Could not determine home directory (use --home)")]
    HomeNotFound,

    /// An explicitly requested config file does not exist.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse the config file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// The mirror directory exists, is not a mirror, and cannot be safely replaced.
    #[error("{path} exists and is not a documentation mirror; move it aside and retry")]
    TargetOccupied { path: PathBuf },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for docs-mirror operations.
pub type Result<T> = std::result::Result<T, MirrorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn git_missing_mentions_git() {
        let err = MirrorError::GitMissing;
        assert!(err.to_string().contains("Git is required"));
    }

    #[test]
    fn clone_failed_displays_url_and_message() {
        let err = MirrorError::CloneFailed {
            url: "https://example.com/docs.git".into(),
            message: "could not resolve host".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("https://example.com/docs.git"));
        assert!(msg.contains("could not resolve host"));
    }

    #[test]
    fn git_failed_displays_command() {
        let err = MirrorError::GitFailed {
            command: "rev-list --count".into(),
            message: "bad revision".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("git rev-list --count"));
        assert!(msg.contains("bad revision"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = MirrorError::ConfigParseError {
            path: PathBuf::from("/home/me/.docs-mirror/config.yml"),
            message: "invalid type".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("config.yml"));
        assert!(msg.contains("invalid type"));
    }

    #[test]
    fn target_occupied_displays_path() {
        let err = MirrorError::TargetOccupied {
            path: PathBuf::from("/home/me/.claude-code-docs"),
        };
        assert!(err.to_string().contains(".claude-code-docs"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: MirrorError = io_err.into();
        assert!(matches!(err, MirrorError::Io(_)));
    }

    #[test]
    fn anyhow_error_is_transparent() {
        let err: MirrorError = anyhow::anyhow!("something odd").into();
        assert_eq!(err.to_string(), "something odd");
    }
}
