//! The mirror's `docs_manifest.json`.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

/// Index of the mirrored documents.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Entries keyed by file name (`hooks.md`).
    pub files: BTreeMap<String, ManifestEntry>,
}

/// Metadata for one mirrored document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ManifestEntry {
    /// Page the document was mirrored from.
    pub original_url: Option<String>,
}

impl Manifest {
    /// Load a manifest, treating a missing or malformed file as empty.
    pub fn load(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("no manifest at {}: {}", path.display(), e);
                return Self::default();
            }
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("ignoring malformed manifest {}: {}", path.display(), e);
            Self::default()
        })
    }

    /// Official page for a document stem.
    pub fn official_url(&self, stem: &str, official_docs_url: &str) -> String {
        self.files
            .get(&format!("{stem}.md"))
            .and_then(|entry| entry.original_url.clone())
            .unwrap_or_else(|| format!("{}/{}", official_docs_url.trim_end_matches('/'), stem))
    }
}
