//! Freshness checks and the throttled passive update.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use crate::git::WorkingCopy;
use crate::ui::{format_relative_time, UserInterface};

/// Path, relative to the mirror root, whose history defines "last updated".
pub const DOCS_PATHSPEC: &str = "docs/";

/// Result of comparing the mirror with its remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateCheck {
    /// The remote has this many commits not in the mirror.
    Behind(u32),
    UpToDate,
    /// The remote could not be reached or compared.
    Unavailable(String),
}

impl UpdateCheck {
    pub fn message(&self) -> String {
        match self {
            Self::Behind(n) => format!("{} update(s) available", n),
            Self::UpToDate => "Already up to date".to_string(),
            Self::Unavailable(reason) => reason.clone(),
        }
    }
}

/// Fetch the tracked branch and count the commits the mirror is missing.
pub fn check_for_updates(wc: &WorkingCopy<'_>, branch: &str) -> UpdateCheck {
    if let Err(e) = wc.fetch(branch) {
        tracing::debug!("fetch failed: {}", e);
        return UpdateCheck::Unavailable("Could not check for updates".to_string());
    }

    match wc.behind_count(branch) {
        Ok(0) => UpdateCheck::UpToDate,
        Ok(n) => UpdateCheck::Behind(n),
        Err(e) => {
            tracing::debug!("behind count failed: {}", e);
            UpdateCheck::Unavailable("Could not compare with remote".to_string())
        }
    }
}

/// Report when the docs last changed and apply any waiting updates.
pub fn run_freshness_check(
    wc: &WorkingCopy<'_>,
    branch: &str,
    ui: &mut dyn UserInterface,
) -> UpdateCheck {
    match wc.last_change_time(DOCS_PATHSPEC) {
        Ok(Some(time)) => ui.message(&format!(
            "Docs last updated: {}",
            format_relative_time(time)
        )),
        _ => ui.message("Could not determine last update time"),
    }

    let check = check_for_updates(wc, branch);
    match &check {
        UpdateCheck::Behind(_) => {
            ui.message(&check.message());
            ui.message("Updating documentation...");
            match wc.pull(branch) {
                Ok(()) => ui.success("Documentation updated successfully"),
                Err(e) => ui.warning(&format!("Update failed: {}", e)),
            }
        }
        UpdateCheck::UpToDate => ui.success(&check.message()),
        UpdateCheck::Unavailable(_) => ui.warning(&check.message()),
    }
    ui.message("");

    check
}

/// Limits passive checks to one per interval using a marker file's mtime.
#[derive(Debug, Clone)]
pub struct HookThrottle {
    marker: PathBuf,
    interval: Duration,
}

impl HookThrottle {
    pub fn new(marker: impl Into<PathBuf>, interval: Duration) -> Self {
        Self {
            marker: marker.into(),
            interval,
        }
    }

    /// Throttle with an interval given in hours.
    pub fn hours(marker: impl Into<PathBuf>, hours: u64) -> Self {
        Self::new(marker, Duration::from_secs(hours.saturating_mul(3600)))
    }

    pub fn marker(&self) -> &Path {
        &self.marker
    }

    /// Whether a check should run at `now`.
    ///
    /// A missing or unreadable marker means due. A marker dated in the
    /// future means not due.
    pub fn is_due(&self, now: SystemTime) -> bool {
        let Ok(last) = std::fs::metadata(&self.marker).and_then(|m| m.modified()) else {
            return true;
        };

        match now.duration_since(last) {
            Ok(elapsed) => elapsed >= self.interval,
            Err(_) => false,
        }
    }

    /// Record a check at `now`, creating the marker if needed.
    pub fn mark(&self, now: SystemTime) -> std::io::Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&self.marker)?;
        file.set_modified(now)
    }
}

/// What a passive update did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassiveOutcome {
    /// No working copy to update.
    NoMirror,
    /// Checked too recently.
    Throttled,
    UpToDate,
    Updated(u32),
    /// The check or the pull failed; the mirror is unchanged.
    Failed,
}

/// Throttled check-and-pull for the host hook. Never fails and prints nothing.
pub fn passive_update(
    wc: &WorkingCopy<'_>,
    branch: &str,
    throttle: &HookThrottle,
    now: SystemTime,
) -> PassiveOutcome {
    if !wc.is_repository() {
        tracing::debug!("no mirror at {}", wc.dir().display());
        return PassiveOutcome::NoMirror;
    }

    if !throttle.is_due(now) {
        tracing::debug!("update check throttled");
        return PassiveOutcome::Throttled;
    }

    // Marked before checking so an overlapping hook run sees it.
    if let Err(e) = throttle.mark(now) {
        tracing::warn!(
            "could not write {}: {}",
            throttle.marker().display(),
            e
        );
    }

    match check_for_updates(wc, branch) {
        UpdateCheck::Behind(n) => match wc.pull(branch) {
            Ok(()) => PassiveOutcome::Updated(n),
            Err(e) => {
                tracing::warn!("passive update failed: {}", e);
                PassiveOutcome::Failed
            }
        },
        UpdateCheck::UpToDate => PassiveOutcome::UpToDate,
        UpdateCheck::Unavailable(reason) => {
            tracing::debug!("passive update skipped: {}", reason);
            PassiveOutcome::Failed
        }
    }
}
