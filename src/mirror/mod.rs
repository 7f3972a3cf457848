//! Reading and refreshing a local documentation mirror.

pub mod changelog;
pub mod docs;
pub mod freshness;
pub mod manifest;

pub use changelog::{changed_docs, parse_log, CommitSummary};
pub use docs::{resolve_topic, suggestions, DocsDir, Document, Lookup};
pub use freshness::{
    check_for_updates, passive_update, run_freshness_check, HookThrottle, PassiveOutcome,
    UpdateCheck, DOCS_PATHSPEC,
};
pub use manifest::{Manifest, ManifestEntry};
