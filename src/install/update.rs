//! Safe update of an existing mirror.
//!
//! ```text
//! Pull ──ok──────────────────────────────────────────▶ Done(Pulled)
//!   │ failed
//!   ▼
//! FetchRemote ──failed───────────────────────────────▶ Done(Offline)
//!   │ ok
//!   ▼
//! InspectLocal ──manifest-only / clean──▶ Reset ─────▶ Done(Reset)
//!   │ local edits                           ▲
//!   ▼                                       │ yes
//! AwaitConfirm ──no──────────────────────────────────▶ Done(Cancelled)
//! ```

use crate::error::Result;
use crate::git::{WorkingCopy, WorkingCopyStatus};
use crate::ui::{Confirmation, UserInterface};

/// Confirmation key for discarding local edits.
pub const DISCARD_PROMPT_KEY: &str = "discard_local_changes";

/// How an update ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// A plain pull succeeded.
    Pulled,
    /// The working copy was reset to the remote branch tip.
    Reset,
    /// The remote was unreachable; the mirror is unchanged.
    Offline,
    /// The operator declined to discard local edits; nothing was touched.
    Cancelled,
}

/// States of the update sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateState {
    Pull,
    FetchRemote,
    InspectLocal,
    /// Local edits found. `None` when status could not be read.
    AwaitConfirm(Option<WorkingCopyStatus>),
    Reset,
    Done(UpdateOutcome),
}

/// Whether discarding the working copy needs the operator's consent.
///
/// An unreadable status counts as having edits.
pub fn needs_confirmation(status: Option<&WorkingCopyStatus>) -> bool {
    status.is_none_or(WorkingCopyStatus::has_local_edits)
}

/// Drives a mirror from its current state to the remote branch tip.
pub struct SafeUpdate<'a, 'g> {
    wc: &'a WorkingCopy<'g>,
    branch: &'a str,
    assume_yes: bool,
}

impl<'a, 'g> SafeUpdate<'a, 'g> {
    pub fn new(wc: &'a WorkingCopy<'g>, branch: &'a str) -> Self {
        Self {
            wc,
            branch,
            assume_yes: false,
        }
    }

    /// Treat the discard confirmation as already given (`--yes`).
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    /// Run every step until done.
    pub fn run(&self, ui: &mut dyn UserInterface) -> Result<UpdateOutcome> {
        let mut state = UpdateState::Pull;
        loop {
            state = self.step(state, ui)?;
            if let UpdateState::Done(outcome) = state {
                return Ok(outcome);
            }
        }
    }

    /// Perform one transition.
    pub fn step(&self, state: UpdateState, ui: &mut dyn UserInterface) -> Result<UpdateState> {
        tracing::debug!("update step: {:?}", state);

        let next = match state {
            UpdateState::Pull => {
                ui.message("Updating to latest version...");
                match self.wc.pull(self.branch) {
                    Ok(()) => UpdateState::Done(UpdateOutcome::Pulled),
                    Err(e) => {
                        tracing::debug!("pull failed: {}", e);
                        ui.message("  Standard update failed, trying harder...");
                        UpdateState::FetchRemote
                    }
                }
            }

            UpdateState::FetchRemote => match self.wc.fetch(self.branch) {
                Ok(()) => UpdateState::InspectLocal,
                Err(e) => {
                    tracing::debug!("fetch failed: {}", e);
                    ui.warning("Could not fetch from the remote (offline?)");
                    UpdateState::Done(UpdateOutcome::Offline)
                }
            },

            UpdateState::InspectLocal => {
                let status = match self.wc.status() {
                    Ok(status) => Some(status),
                    Err(e) => {
                        tracing::warn!("could not read working copy status: {}", e);
                        None
                    }
                };
                if needs_confirmation(status.as_ref()) {
                    UpdateState::AwaitConfirm(status)
                } else {
                    UpdateState::Reset
                }
            }

            UpdateState::AwaitConfirm(status) => {
                ui.warning("Local changes detected in your installation:");
                match &status {
                    Some(status) => {
                        for entry in status.non_manifest_changes() {
                            ui.message(&format!("  {} {}", entry.code, entry.path));
                        }
                    }
                    None => ui.message("  (could not read working copy status)"),
                }
                ui.message("The installer will reset to a clean state, discarding these changes.");

                let prompt = Confirmation::new(
                    DISCARD_PROMPT_KEY,
                    "Continue and discard local changes?",
                    false,
                );
                if self.assume_yes || ui.confirm(&prompt)? {
                    UpdateState::Reset
                } else {
                    ui.message("Installation cancelled. Your local changes are preserved.");
                    UpdateState::Done(UpdateOutcome::Cancelled)
                }
            }

            UpdateState::Reset => {
                ui.message("  Updating to clean state...");
                self.wc.abort_in_progress()?;
                self.wc.reset_hard(self.branch)?;
                self.wc.clean()?;
                ui.success("Updated successfully to clean state");
                UpdateState::Done(UpdateOutcome::Reset)
            }

            done @ UpdateState::Done(_) => done,
        };

        Ok(next)
    }
}
