//! Topic listing and document lookup.

use std::path::{Path, PathBuf};

use crate::error::Result;

/// File extension of mirrored documents.
const DOC_EXTENSION: &str = "md";

/// A document read from the mirror.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// File stem, which is the topic name.
    pub stem: String,
    pub path: PathBuf,
    /// File contents, unchanged.
    pub content: String,
}

/// Outcome of a topic lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(Document),
    NotFound {
        /// Topics overlapping the query.
        suggestions: Vec<String>,
    },
}

/// The `docs/` directory of a mirror.
#[derive(Debug, Clone)]
pub struct DocsDir {
    dir: PathBuf,
}

impl DocsDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Sorted stems of every `*.md` file. A missing directory has no topics.
    pub fn list_topics(&self) -> Result<Vec<String>> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut topics = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(DOC_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                topics.push(stem.to_string());
            }
        }

        topics.sort();
        Ok(topics)
    }

    /// Resolve a topic: exact stem, then case-insensitive stem, then the first
    /// stem containing the topic.
    ///
    /// Only listed stems are ever opened, so a topic cannot name a path
    /// outside the directory.
    pub fn lookup(&self, topic: &str) -> Result<Lookup> {
        let topics = self.list_topics()?;

        let Some(stem) = resolve_topic(&topics, topic) else {
            return Ok(Lookup::NotFound {
                suggestions: suggestions(&topics, topic),
            });
        };

        let path = self.dir.join(format!("{stem}.{DOC_EXTENSION}"));
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Lookup::Found(Document {
                stem: stem.to_string(),
                path,
                content,
            })),
            Err(e) => {
                tracing::warn!("could not read {}: {}", path.display(), e);
                Ok(Lookup::NotFound {
                    suggestions: suggestions(&topics, topic),
                })
            }
        }
    }
}

/// Pick the stem a topic refers to.
pub fn resolve_topic<'a>(topics: &'a [String], topic: &str) -> Option<&'a str> {
    if topic.is_empty() {
        return None;
    }

    if let Some(exact) = topics.iter().find(|t| *t == topic) {
        return Some(exact);
    }

    let wanted = topic.to_lowercase();
    topics
        .iter()
        .find(|t| t.to_lowercase() == wanted)
        .or_else(|| topics.iter().find(|t| t.to_lowercase().contains(&wanted)))
        .map(String::as_str)
}

/// Topics where the query is a substring of the topic or the topic of the query.
pub fn suggestions(topics: &[String], query: &str) -> Vec<String> {
    let query = query.to_lowercase();
    topics
        .iter()
        .filter(|t| {
            let t = t.to_lowercase();
            t.contains(&query) || query.contains(&t)
        })
        .cloned()
        .collect()
}
