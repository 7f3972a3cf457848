//! Porcelain status parsing.
//!
//! Local-change policy: a working copy is "dirty" when `status --porcelain`
//! reports any entry (staged, unstaged, or untracked) other than the
//! manifest file, which is expected to drift on every sync.

use crate::config::MANIFEST_FILE;

/// One line of `git status --porcelain`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    /// Two-character XY status code (e.g. ` M`, `??`, `R `).
    pub code: String,
    /// Path relative to the working copy root (the new path for renames).
    pub path: String,
}

impl StatusEntry {
    /// Whether this entry is the manifest file.
    pub fn is_manifest(&self) -> bool {
        let name = self
            .path
            .trim_end_matches('"')
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default();
        name == MANIFEST_FILE
    }

    pub fn is_untracked(&self) -> bool {
        self.code == "??"
    }
}

/// Parsed working copy status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkingCopyStatus {
    pub entries: Vec<StatusEntry>,
}

impl WorkingCopyStatus {
    /// Parse porcelain v1 output.
    pub fn parse(porcelain: &str) -> Self {
        let entries = porcelain
            .lines()
            .filter(|line| line.len() > 3)
            .map(|line| {
                let (code, rest) = line.split_at(2);
                let rest = rest.trim_start();
                let path = match rest.split_once(" -> ") {
                    Some((_, new)) => new,
                    None => rest,
                };
                StatusEntry {
                    code: code.to_string(),
                    path: path.trim_start_matches('"').to_string(),
                }
            })
            .collect();
        Self { entries }
    }

    pub fn is_clean(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries other than the manifest.
    pub fn non_manifest_changes(&self) -> Vec<&StatusEntry> {
        self.entries.iter().filter(|e| !e.is_manifest()).collect()
    }

    /// Whether any change would be lost by a hard reset and clean.
    pub fn has_local_edits(&self) -> bool {
        self.entries.iter().any(|e| !e.is_manifest())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_output_is_clean() {
        let status = WorkingCopyStatus::parse("");
        assert!(status.is_clean());
        assert!(!status.has_local_edits());
    }

    #[test]
    fn parses_modified_and_untracked() {
        let status = WorkingCopyStatus::parse(" M docs/hooks.md\n?? notes.txt\n");
        assert_eq!(status.entries.len(), 2);
        assert_eq!(status.entries[0].code, " M");
        assert_eq!(status.entries[0].path, "docs/hooks.md");
        assert!(status.entries[1].is_untracked());
    }

    #[test]
    fn rename_uses_new_path() {
        let status = WorkingCopyStatus::parse("R  docs/old.md -> docs/new.md");
        assert_eq!(status.entries[0].path, "docs/new.md");
    }

    #[test]
    fn manifest_only_changes_are_not_local_edits() {
        let status = WorkingCopyStatus::parse(" M docs/docs_manifest.json\n");
        assert!(!status.is_clean());
        assert!(!status.has_local_edits());
        assert!(status.non_manifest_changes().is_empty());
    }

    #[test]
    fn windows_separator_manifest_is_recognised() {
        let entry = StatusEntry {
            code: " M".to_string(),
            path: "docs\\docs_manifest.json".to_string(),
        };
        assert!(entry.is_manifest());
    }

    #[test]
    fn similarly_named_file_is_not_manifest() {
        let status = WorkingCopyStatus::parse(" M docs/old_docs_manifest.json.bak\n");
        assert!(status.has_local_edits());
    }

    #[test]
    fn mixed_changes_report_only_non_manifest() {
        let status =
            WorkingCopyStatus::parse(" M docs/docs_manifest.json\nA  docs/new.md\n?? scratch\n");
        let changes = status.non_manifest_changes();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].path, "docs/new.md");
        assert!(status.has_local_edits());
    }

    #[test]
    fn untracked_only_counts_as_local_edit() {
        let status = WorkingCopyStatus::parse("?? my-notes.md\n");
        assert!(status.has_local_edits());
    }
}
