//! Deciding whether a mirror directory can be deleted.

use std::path::{Path, PathBuf};

use crate::config::is_mirror;
use crate::error::Result;
use crate::git::{GitRunner, WorkingCopy, WorkingCopyStatus};

use super::discovery::same_dir;

/// What is on disk at a directory we may want to delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryState {
    /// Gone already.
    Missing,
    /// Exists but has no git metadata.
    NotRepository,
    /// A working copy with nothing but manifest drift.
    Clean,
    /// A working copy with local edits.
    Dirty(WorkingCopyStatus),
    /// A working copy whose status could not be read.
    Unreadable,
}

impl DirectoryState {
    /// Whether deleting loses nothing git could not restore.
    pub fn is_disposable(&self) -> bool {
        matches!(self, Self::Clean)
    }
}

/// Inspect a directory.
pub fn assess_directory(dir: &Path, git: &dyn GitRunner) -> DirectoryState {
    if !dir.exists() {
        return DirectoryState::Missing;
    }

    let wc = WorkingCopy::new(dir, git);
    if !wc.is_repository() {
        return DirectoryState::NotRepository;
    }

    match wc.status() {
        Ok(status) if status.has_local_edits() => DirectoryState::Dirty(status),
        Ok(_) => DirectoryState::Clean,
        Err(e) => {
            tracing::warn!("could not read status of {}: {}", dir.display(), e);
            DirectoryState::Unreadable
        }
    }
}

/// Why `dir` must not be deleted whatever its git state, if anything.
///
/// Discovered paths are scraped from command lines, so one may name a
/// parent of the real mirror. Only the canonical directory or a directory
/// holding a manifest is a deletion candidate, and never one that contains
/// the canonical mirror or another installation.
pub fn removal_blocker(
    dir: &Path,
    canonical: &Path,
    discovered: &[PathBuf],
) -> Option<&'static str> {
    if !same_dir(dir, canonical) && !is_mirror(dir) {
        return Some("not a documentation mirror");
    }

    let nests_another = std::iter::once(canonical)
        .chain(discovered.iter().map(PathBuf::as_path))
        .filter(|other| !same_dir(dir, other))
        .any(|other| contains_path(dir, other));
    if nests_another {
        return Some("contains another installation");
    }

    None
}

/// Whether `inner` is `outer` or lies beneath it.
pub fn contains_path(outer: &Path, inner: &Path) -> bool {
    match (outer.canonicalize(), inner.canonicalize()) {
        (Ok(outer), Ok(inner)) => inner.starts_with(outer),
        _ => inner.starts_with(outer),
    }
}

/// Whether `dir` exists and has no entries.
pub fn is_empty_dir(dir: &Path) -> bool {
    std::fs::read_dir(dir)
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false)
}

/// Delete a directory tree.
pub fn remove_directory(dir: &Path) -> Result<()> {
    tracing::debug!("removing {}", dir.display());
    std::fs::remove_dir_all(dir)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::runner::testing::ScriptedGit;
    use crate::git::GitOutput;
    use tempfile::TempDir;

    fn repo_dir() -> TempDir {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join(".git")).unwrap();
        temp
    }

    #[test]
    fn missing_and_plain_directories() {
        let temp = TempDir::new().unwrap();
        let git = ScriptedGit::new();

        assert_eq!(
            assess_directory(&temp.path().join("gone"), &git),
            DirectoryState::Missing
        );
        assert_eq!(
            assess_directory(temp.path(), &git),
            DirectoryState::NotRepository
        );
        assert!(git.calls().is_empty());
    }

    #[test]
    fn manifest_drift_is_clean() {
        let temp = repo_dir();
        let git = ScriptedGit::new();
        git.respond("status", GitOutput::ok(" M docs/docs_manifest.json"));

        let state = assess_directory(temp.path(), &git);
        assert_eq!(state, DirectoryState::Clean);
        assert!(state.is_disposable());
    }

    #[test]
    fn untracked_files_are_dirty() {
        let temp = repo_dir();
        let git = ScriptedGit::new();
        git.respond("status", GitOutput::ok("?? my-notes.md"));

        let state = assess_directory(temp.path(), &git);
        assert!(matches!(state, DirectoryState::Dirty(_)));
        assert!(!state.is_disposable());
    }

    #[test]
    fn failed_status_is_unreadable() {
        let temp = repo_dir();
        let git = ScriptedGit::new();
        git.respond("status", GitOutput::failed("not a git repository"));

        let state = assess_directory(temp.path(), &git);
        assert_eq!(state, DirectoryState::Unreadable);
        assert!(!state.is_disposable());
    }

    fn mirror_at(dir: &Path) {
        std::fs::create_dir_all(dir.join("docs")).unwrap();
        std::fs::write(dir.join("docs/docs_manifest.json"), "{}").unwrap();
    }

    #[test]
    fn contains_path_checks_ancestry() {
        assert!(contains_path(Path::new("/a"), Path::new("/a/b")));
        assert!(contains_path(Path::new("/a/b"), Path::new("/a/b")));
        assert!(!contains_path(Path::new("/a/b"), Path::new("/a/c")));
    }

    #[test]
    fn parent_of_canonical_is_blocked() {
        let temp = TempDir::new().unwrap();
        let parent = temp.path().join("claude-code-docs-data");
        let canonical = parent.join("mirror");
        mirror_at(&canonical);

        assert_eq!(
            removal_blocker(&parent, &canonical, &[parent.clone(), canonical.clone()]),
            Some("not a documentation mirror")
        );
        assert_eq!(removal_blocker(&canonical, &canonical, &[parent.clone()]), None);
    }

    #[test]
    fn mirror_nesting_another_install_is_blocked() {
        let temp = TempDir::new().unwrap();
        let outer = temp.path().join("claude-code-docs");
        let inner = outer.join("nested-claude-code-docs");
        let canonical = temp.path().join(".claude-code-docs");
        mirror_at(&outer);
        mirror_at(&inner);

        let discovered = [outer.clone(), inner.clone()];
        assert_eq!(
            removal_blocker(&outer, &canonical, &discovered),
            Some("contains another installation")
        );
        assert_eq!(removal_blocker(&inner, &canonical, &discovered), None);
    }

    #[test]
    fn canonical_without_manifest_is_a_candidate() {
        let temp = TempDir::new().unwrap();
        let canonical = temp.path().join(".claude-code-docs");
        std::fs::create_dir_all(&canonical).unwrap();

        assert_eq!(removal_blocker(&canonical, &canonical, &[]), None);
        assert_eq!(
            removal_blocker(temp.path(), &canonical, &[]),
            Some("not a documentation mirror")
        );
    }

    #[test]
    fn empty_dir_detection() {
        let temp = TempDir::new().unwrap();
        assert!(is_empty_dir(temp.path()));
        std::fs::write(temp.path().join("f"), "x").unwrap();
        assert!(!is_empty_dir(temp.path()));
        assert!(!is_empty_dir(&temp.path().join("missing")));
    }
}
