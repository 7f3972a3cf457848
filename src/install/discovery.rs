//! Best-effort discovery of existing mirror directories.
//!
//! Paths are scraped from the command file and hook commands, so results
//! are only hints: every candidate is checked on disk before use.

use std::path::{Path, PathBuf};

use regex::Regex;
use serde_json::Value;

use crate::config::{expand_home, is_mirror, MirrorPaths};
use crate::host::{hook_commands, SettingsDocument, SettingsFile};

/// Characters that end a path inside a command line.
const PATH_STOP: &str = r#"\s"'`"#;

/// Path-like substrings of `text` whose last component contains `marker`.
///
/// A leading `~` is expanded against `home`. URLs are skipped.
pub fn scan_candidate_paths(text: &str, marker: &str, home: &Path) -> Vec<PathBuf> {
    if marker.is_empty() {
        return Vec::new();
    }
    let pattern = format!(
        r"(?:~|[A-Za-z]:)?[/\\][^{stop}]*?{marker}[^{stop}/\\]*",
        stop = PATH_STOP,
        marker = regex::escape(marker),
    );
    let Ok(re) = Regex::new(&pattern) else {
        return Vec::new();
    };

    let mut found = Vec::new();
    for m in re.find_iter(text) {
        if m.as_str().contains("://") || text[..m.start()].ends_with(':') {
            continue;
        }
        let path = expand_home(Path::new(m.as_str()), home);
        if !found.contains(&path) {
            found.push(path);
        }
    }
    found
}

/// Where to look and what to keep.
#[derive(Debug, Clone)]
pub struct DiscoveryOptions<'a> {
    pub marker: &'a str,
    /// Working directory, checked for being a mirror itself.
    pub cwd: Option<&'a Path>,
    /// Include the canonical mirror directory in the results.
    pub include_canonical: bool,
}

/// Existing directories believed to be mirrors, deduplicated, in discovery
/// order: command file, hook commands, working directory, canonical path.
pub fn discover_installations(paths: &MirrorPaths, options: &DiscoveryOptions<'_>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    match std::fs::read_to_string(paths.command_file()) {
        Ok(text) => candidates.extend(scan_candidate_paths(&text, options.marker, &paths.home)),
        Err(e) => tracing::debug!("no command file to scan: {}", e),
    }

    let settings = SettingsFile::new(paths.settings_file(), paths.settings_backup());
    if let Ok(SettingsDocument::Parsed(value)) = settings.read() {
        candidates.extend(scan_hook_commands(&value, options.marker, &paths.home));
    }

    if let Some(cwd) = options.cwd {
        if is_mirror(cwd) {
            candidates.push(cwd.to_path_buf());
        }
    }

    if options.include_canonical {
        candidates.push(paths.install_dir.clone());
    }

    let mut found: Vec<PathBuf> = Vec::new();
    for candidate in candidates {
        if !candidate.is_dir() {
            continue;
        }
        let is_canonical = same_dir(&candidate, &paths.install_dir);
        if is_canonical && !options.include_canonical {
            continue;
        }
        if found.iter().any(|f| same_dir(f, &candidate)) {
            continue;
        }
        tracing::debug!("found installation at {}", candidate.display());
        found.push(candidate);
    }
    found
}

fn scan_hook_commands(settings: &Value, marker: &str, home: &Path) -> Vec<PathBuf> {
    hook_commands(settings)
        .iter()
        .filter(|cmd| cmd.contains(marker))
        .flat_map(|cmd| scan_candidate_paths(cmd, marker, home))
        .collect()
}

/// Compare directories, resolving symlinks and `..` where possible.
pub fn same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MirrorConfig;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    const MARKER: &str = "claude-code-docs";

    #[test]
    fn scan_finds_quoted_and_bare_paths() {
        let text = r#"Execute the helper at /home/me/.claude-code-docs

Execute: "/usr/bin/docs-mirror" --mirror "/srv/claude-code-docs" docs "$ARGUMENTS""#;
        let found = scan_candidate_paths(text, MARKER, Path::new("/home/me"));
        assert_eq!(
            found,
            vec![
                PathBuf::from("/home/me/.claude-code-docs"),
                PathBuf::from("/srv/claude-code-docs"),
            ]
        );
    }

    #[test]
    fn scan_stops_at_marker_component() {
        let text = "/opt/claude-code-docs/claude-docs-helper.sh hook-check";
        let found = scan_candidate_paths(text, MARKER, Path::new("/home/me"));
        assert_eq!(found, vec![PathBuf::from("/opt/claude-code-docs")]);

        let text = "/opt/claude-code-docs-fork/helper";
        let found = scan_candidate_paths(text, MARKER, Path::new("/home/me"));
        assert_eq!(found, vec![PathBuf::from("/opt/claude-code-docs-fork")]);
    }

    #[test]
    fn scan_expands_tilde() {
        let found = scan_candidate_paths(
            "~/.claude-code-docs/helper.sh",
            MARKER,
            Path::new("/home/me"),
        );
        assert_eq!(found, vec![PathBuf::from("/home/me/.claude-code-docs")]);
    }

    #[test]
    fn scan_skips_urls_and_dedups() {
        let text = "https://github.com/example/claude-code-docs/commit/abc \
                    /a/claude-code-docs /a/claude-code-docs";
        let found = scan_candidate_paths(text, MARKER, Path::new("/home/me"));
        assert_eq!(found, vec![PathBuf::from("/a/claude-code-docs")]);
    }

    #[test]
    fn scan_windows_paths() {
        let text = r#"python "C:\Users\me\.claude-code-docs\helper.py" hook-check"#;
        let found = scan_candidate_paths(text, MARKER, Path::new("/home/me"));
        assert_eq!(found, vec![PathBuf::from(r"C:\Users\me\.claude-code-docs")]);
    }

    #[test]
    fn scan_without_marker_finds_nothing() {
        assert!(scan_candidate_paths("/usr/bin/git", MARKER, Path::new("/h")).is_empty());
    }

    struct Home {
        _temp: TempDir,
        paths: MirrorPaths,
    }

    fn home() -> Home {
        let temp = TempDir::new().unwrap();
        let paths = MirrorPaths::resolve(temp.path(), &MirrorConfig::default());
        fs::create_dir_all(paths.commands_dir()).unwrap();
        Home { _temp: temp, paths }
    }

    fn options(include_canonical: bool) -> DiscoveryOptions<'static> {
        DiscoveryOptions {
            marker: MARKER,
            cwd: None,
            include_canonical,
        }
    }

    #[test]
    fn discover_reads_command_file_and_hooks() {
        let h = home();
        let from_command = h.paths.home.join("old/claude-code-docs");
        let from_hook = h.paths.home.join("older/claude-code-docs");
        fs::create_dir_all(&from_command).unwrap();
        fs::create_dir_all(&from_hook).unwrap();

        fs::write(
            h.paths.command_file(),
            format!("Execute: {}/claude-docs-helper.sh \"$ARGUMENTS\"", from_command.display()),
        )
        .unwrap();
        fs::write(
            h.paths.settings_file(),
            json!({"hooks": {"PreToolUse": [{
                "matcher": "Read",
                "hooks": [{"type": "command", "command": format!("{}/helper.sh hook-check", from_hook.display())}]
            }]}})
            .to_string(),
        )
        .unwrap();

        let found = discover_installations(&h.paths, &options(false));
        assert_eq!(found, vec![from_command, from_hook]);
    }

    #[test]
    fn discover_skips_missing_dirs() {
        let h = home();
        fs::write(h.paths.command_file(), "Execute: /nowhere/claude-code-docs/x").unwrap();
        assert!(discover_installations(&h.paths, &options(false)).is_empty());
    }

    #[test]
    fn discover_excludes_or_includes_canonical() {
        let h = home();
        fs::create_dir_all(&h.paths.install_dir).unwrap();
        fs::write(
            h.paths.command_file(),
            format!("Execute: \"{}\"", h.paths.install_dir.display()),
        )
        .unwrap();

        assert!(discover_installations(&h.paths, &options(false)).is_empty());
        assert_eq!(
            discover_installations(&h.paths, &options(true)),
            vec![h.paths.install_dir.clone()]
        );
    }

    #[test]
    fn discover_checks_working_directory() {
        let h = home();
        let cwd = h.paths.home.join("checkout");
        fs::create_dir_all(cwd.join("docs")).unwrap();
        fs::write(cwd.join("docs/docs_manifest.json"), "{}").unwrap();

        let opts = DiscoveryOptions {
            marker: MARKER,
            cwd: Some(&cwd),
            include_canonical: false,
        };
        assert_eq!(discover_installations(&h.paths, &opts), vec![cwd.clone()]);
    }

    #[test]
    fn discover_ignores_malformed_settings() {
        let h = home();
        fs::write(h.paths.settings_file(), "{ nope").unwrap();
        assert!(discover_installations(&h.paths, &options(false)).is_empty());
    }
}
