//! Filesystem layout derived from the home directory and configuration.

use std::path::{Path, PathBuf};

use super::schema::MirrorConfig;

/// Name of the manifest file inside `docs/`.
pub const MANIFEST_FILE: &str = "docs_manifest.json";

/// Every path docs-mirror reads or writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorPaths {
    /// Home directory all defaults hang off.
    pub home: PathBuf,
    /// Canonical mirror directory.
    pub install_dir: PathBuf,
    /// Host tool configuration directory.
    pub host_dir: PathBuf,
}

impl MirrorPaths {
    /// Resolve paths for `home`, applying config overrides.
    pub fn resolve(home: &Path, config: &MirrorConfig) -> Self {
        Self {
            home: home.to_path_buf(),
            install_dir: config
                .install_dir
                .as_ref()
                .map(|p| expand_home(p, home))
                .unwrap_or_else(|| home.join(".claude-code-docs")),
            host_dir: config
                .host_dir
                .as_ref()
                .map(|p| expand_home(p, home))
                .unwrap_or_else(|| home.join(".claude")),
        }
    }

    /// Replace the mirror directory (the `--mirror` flag).
    pub fn with_install_dir(mut self, dir: PathBuf) -> Self {
        self.install_dir = dir;
        self
    }

    pub fn docs_dir(&self) -> PathBuf {
        self.install_dir.join("docs")
    }

    pub fn manifest(&self) -> PathBuf {
        self.docs_dir().join(MANIFEST_FILE)
    }

    pub fn commands_dir(&self) -> PathBuf {
        self.host_dir.join("commands")
    }

    /// Command registration file owned by the installer.
    pub fn command_file(&self) -> PathBuf {
        self.commands_dir().join("docs.md")
    }

    /// Host settings file shared with the host tool.
    pub fn settings_file(&self) -> PathBuf {
        self.host_dir.join("settings.json")
    }

    pub fn settings_backup(&self) -> PathBuf {
        self.host_dir.join("settings.json.backup")
    }

    /// Throttle marker for passive update checks.
    ///
    /// Lives inside `.git` so it never shows up in `status --porcelain`
    /// and survives `clean -fd`.
    pub fn last_check_marker(&self) -> PathBuf {
        self.install_dir.join(".git").join("last_check")
    }

    /// Whether the canonical directory holds a valid mirror.
    pub fn has_valid_mirror(&self) -> bool {
        is_mirror(&self.install_dir)
    }
}

/// A directory is a mirror when it has `docs/docs_manifest.json`.
pub fn is_mirror(dir: &Path) -> bool {
    dir.join("docs").join(MANIFEST_FILE).is_file()
}

/// Expand a leading `~` against `home`.
pub fn expand_home(path: &Path, home: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => home.join(rest),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_layout() {
        let paths = MirrorPaths::resolve(Path::new("/home/me"), &MirrorConfig::default());
        assert_eq!(paths.install_dir, PathBuf::from("/home/me/.claude-code-docs"));
        assert_eq!(
            paths.command_file(),
            PathBuf::from("/home/me/.claude/commands/docs.md")
        );
        assert_eq!(
            paths.settings_file(),
            PathBuf::from("/home/me/.claude/settings.json")
        );
        assert_eq!(
            paths.manifest(),
            PathBuf::from("/home/me/.claude-code-docs/docs/docs_manifest.json")
        );
        assert_eq!(
            paths.last_check_marker(),
            PathBuf::from("/home/me/.claude-code-docs/.git/last_check")
        );
    }

    #[test]
    fn config_overrides_expand_tilde() {
        let config = MirrorConfig {
            install_dir: Some(PathBuf::from("~/mirrors/claude-code-docs")),
            host_dir: Some(PathBuf::from("/etc/host")),
            ..Default::default()
        };
        let paths = MirrorPaths::resolve(Path::new("/home/me"), &config);
        assert_eq!(
            paths.install_dir,
            PathBuf::from("/home/me/mirrors/claude-code-docs")
        );
        assert_eq!(paths.host_dir, PathBuf::from("/etc/host"));
    }

    #[test]
    fn with_install_dir_replaces_mirror() {
        let paths = MirrorPaths::resolve(Path::new("/home/me"), &MirrorConfig::default())
            .with_install_dir(PathBuf::from("/tmp/m"));
        assert_eq!(paths.docs_dir(), PathBuf::from("/tmp/m/docs"));
    }

    #[test]
    fn is_mirror_requires_manifest() {
        let temp = TempDir::new().unwrap();
        assert!(!is_mirror(temp.path()));

        fs::create_dir_all(temp.path().join("docs")).unwrap();
        assert!(!is_mirror(temp.path()));

        fs::write(temp.path().join("docs").join(MANIFEST_FILE), "{}").unwrap();
        assert!(is_mirror(temp.path()));
    }
}
