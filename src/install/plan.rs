//! Choosing how to reach a valid mirror at the canonical path.

use std::path::PathBuf;

/// What the installer will do to establish the mirror.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallPlan {
    /// The canonical directory already holds a mirror.
    UpdateInPlace,
    /// Clone fresh, then retire a prior installation elsewhere.
    Migrate { from: PathBuf },
    /// Nothing to migrate; clone fresh.
    Fresh,
}

/// Pick a plan. `prior` excludes the canonical directory.
pub fn decide(canonical_is_mirror: bool, prior: &[PathBuf]) -> InstallPlan {
    if canonical_is_mirror {
        return InstallPlan::UpdateInPlace;
    }

    match prior.first() {
        Some(from) => InstallPlan::Migrate { from: from.clone() },
        None => InstallPlan::Fresh,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn existing_mirror_updates_in_place() {
        let prior = vec![PathBuf::from("/old/claude-code-docs")];
        assert_eq!(decide(true, &prior), InstallPlan::UpdateInPlace);
        assert_eq!(decide(true, &[]), InstallPlan::UpdateInPlace);
    }

    #[test]
    fn first_prior_installation_is_migrated() {
        let prior = vec![PathBuf::from("/a/claude-code-docs"), PathBuf::from("/b/claude-code-docs")];
        assert_eq!(
            decide(false, &prior),
            InstallPlan::Migrate {
                from: PathBuf::from("/a/claude-code-docs")
            }
        );
    }

    #[test]
    fn nothing_found_is_fresh() {
        assert_eq!(decide(false, &[]), InstallPlan::Fresh);
    }
}
