//! Recent commits touching the documentation tree.

use chrono::{DateTime, TimeZone, Utc};

/// One commit from `git log --pretty=format:%H|%ct|%s`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSummary {
    pub hash: String,
    pub time: DateTime<Utc>,
    pub subject: String,
}

impl CommitSummary {
    /// Abbreviated hash used in commit links.
    pub fn short_hash(&self) -> &str {
        self.hash.get(..7).unwrap_or(&self.hash)
    }

    /// Document names listed after `Updated:` or `Added:` in the subject.
    pub fn changed_docs(&self) -> Vec<String> {
        changed_docs(&self.subject)
    }
}

/// Parse `hash|timestamp|subject` lines, skipping malformed ones.
///
/// Subjects may themselves contain `|`.
pub fn parse_log(output: &str) -> Vec<CommitSummary> {
    output
        .lines()
        .filter_map(|line| {
            let mut parts = line.splitn(3, '|');
            let hash = parts.next()?.trim();
            let secs: i64 = parts.next()?.trim().parse().ok()?;
            let subject = parts.next()?;
            if hash.is_empty() {
                return None;
            }
            Some(CommitSummary {
                hash: hash.to_string(),
                time: Utc.timestamp_opt(secs, 0).single()?,
                subject: subject.to_string(),
            })
        })
        .collect()
}

/// Doc stems from a sync commit subject like `Update docs - Updated: a.md, b.md`.
///
/// Takes the text after the last `Updated:`, then after the last `Added:`.
pub fn changed_docs(subject: &str) -> Vec<String> {
    if !subject.contains("Updated:") && !subject.contains("Added:") {
        return Vec::new();
    }

    let tail = after_last(subject, "Updated:");
    let tail = after_last(tail, "Added:");

    tail.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.strip_suffix(".md").unwrap_or(s).to_string())
        .collect()
}

fn after_last<'a>(text: &'a str, marker: &str) -> &'a str {
    match text.rfind(marker) {
        Some(idx) => &text[idx + marker.len()..],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_log_reads_lines() {
        let out = "0123456789abcdef|1700000000|Updated: hooks.md\n\
                   fedcba9876543210|1699990000|Fix typo | in title";
        let commits = parse_log(out);
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].short_hash(), "0123456");
        assert_eq!(commits[0].time.timestamp(), 1_700_000_000);
        assert_eq!(commits[1].subject, "Fix typo | in title");
    }

    #[test]
    fn parse_log_skips_malformed_lines() {
        let out = "garbage\nabc|notatime|subject\n\nabc1234|1700000000|ok";
        let commits = parse_log(out);
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].subject, "ok");
    }

    #[test]
    fn short_hash_of_short_hash() {
        let commit = CommitSummary {
            hash: "abc".to_string(),
            time: Utc::now(),
            subject: String::new(),
        };
        assert_eq!(commit.short_hash(), "abc");
    }

    #[test]
    fn changed_docs_from_updated() {
        assert_eq!(
            changed_docs("Update docs - Updated: hooks.md, settings.md"),
            ["hooks", "settings"]
        );
    }

    #[test]
    fn changed_docs_added_after_updated_wins() {
        assert_eq!(
            changed_docs("Updated: hooks.md Added: memory.md"),
            ["memory"]
        );
    }

    #[test]
    fn changed_docs_without_markers() {
        assert!(changed_docs("Fix README").is_empty());
        assert!(changed_docs("Updated:").is_empty());
    }
}
