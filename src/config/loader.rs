//! Configuration file discovery and loading.

use crate::config::schema::MirrorConfig;
use crate::error::{MirrorError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Default config location relative to the home directory.
pub fn default_config_path(home: &Path) -> PathBuf {
    home.join(".docs-mirror").join("config.yml")
}

/// Parse configuration from a YAML string.
pub fn parse_config(content: &str, path: &Path) -> Result<MirrorConfig> {
    if content.trim().is_empty() {
        return Ok(MirrorConfig::default());
    }

    let config: MirrorConfig =
        serde_yaml::from_str(content).map_err(|e| MirrorError::ConfigParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    // An empty marker would match every hook and every path.
    if config.marker.trim().is_empty() {
        return Err(MirrorError::ConfigParseError {
            path: path.to_path_buf(),
            message: "marker must not be empty".to_string(),
        });
    }

    Ok(config)
}

/// Load configuration.
///
/// An explicit path must exist. Without one, the default location is used
/// when present and defaults apply otherwise.
pub fn load_config(home: &Path, explicit: Option<&Path>) -> Result<MirrorConfig> {
    let path = match explicit {
        Some(p) => {
            if !p.exists() {
                return Err(MirrorError::ConfigNotFound {
                    path: p.to_path_buf(),
                });
            }
            p.to_path_buf()
        }
        None => {
            let p = default_config_path(home);
            if !p.exists() {
                tracing::debug!("No config at {}, using defaults", p.display());
                return Ok(MirrorConfig::default());
            }
            p
        }
    };

    tracing::debug!("Loading config from {}", path.display());
    let content = fs::read_to_string(&path)?;
    parse_config(&content, &path)
}
