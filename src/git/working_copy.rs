//! Operations on a local working copy.

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};

use super::runner::GitRunner;
use super::status::WorkingCopyStatus;
use crate::error::{MirrorError, Result};

/// A git working copy on disk.
pub struct WorkingCopy<'g> {
    dir: PathBuf,
    git: &'g dyn GitRunner,
}

impl<'g> WorkingCopy<'g> {
    pub fn new(dir: impl Into<PathBuf>, git: &'g dyn GitRunner) -> Self {
        Self {
            dir: dir.into(),
            git,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether the directory carries git metadata.
    pub fn is_repository(&self) -> bool {
        self.dir.join(".git").exists()
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        self.git.run(Some(&self.dir), args)?.into_stdout(args)
    }

    /// Run a command whose failure is acceptable, returning whether it succeeded.
    fn try_run(&self, args: &[&str]) -> Result<bool> {
        Ok(self.git.run(Some(&self.dir), args)?.success)
    }

    /// `status --porcelain`.
    pub fn status(&self) -> Result<WorkingCopyStatus> {
        let out = self.run(&["status", "--porcelain"])?;
        Ok(WorkingCopyStatus::parse(&out))
    }

    /// Name of the checked-out branch.
    pub fn current_branch(&self) -> Result<String> {
        self.run(&["rev-parse", "--abbrev-ref", "HEAD"])
    }

    /// `pull --quiet origin <branch>`.
    pub fn pull(&self, branch: &str) -> Result<()> {
        self.run(&["pull", "--quiet", "origin", branch]).map(|_| ())
    }

    /// `fetch --quiet origin <branch>`, updating `origin/<branch>`.
    pub fn fetch(&self, branch: &str) -> Result<()> {
        self.run(&["fetch", "--quiet", "origin", branch]).map(|_| ())
    }

    /// Commits on `origin/<branch>` not reachable from `HEAD`.
    ///
    /// Only as fresh as the last fetch.
    pub fn behind_count(&self, branch: &str) -> Result<u32> {
        let range = format!("HEAD..origin/{branch}");
        let out = self.run(&["rev-list", "--count", &range])?;
        out.trim().parse().map_err(|_| MirrorError::GitFailed {
            command: format!("rev-list --count {range}"),
            message: format!("unexpected output: {out}"),
        })
    }

    /// Abort any merge or rebase in progress. Failures mean nothing was in progress.
    pub fn abort_in_progress(&self) -> Result<()> {
        self.try_run(&["merge", "--abort"])?;
        self.try_run(&["rebase", "--abort"])?;
        Ok(())
    }

    /// `reset --hard origin/<branch>`.
    pub fn reset_hard(&self, branch: &str) -> Result<()> {
        let target = format!("origin/{branch}");
        self.run(&["reset", "--hard", &target]).map(|_| ())
    }

    /// `clean -fd`.
    pub fn clean(&self) -> Result<()> {
        self.run(&["clean", "-fd"]).map(|_| ())
    }

    /// Commit time of the last change under `path`.
    pub fn last_change_time(&self, path: &str) -> Result<Option<DateTime<Utc>>> {
        let out = self.run(&["log", "-1", "--format=%ct", "--", path])?;
        Ok(out
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single()))
    }

    /// Raw `hash|timestamp|subject` log lines for commits touching `path`.
    pub fn log_summaries(&self, path: &str, limit: usize) -> Result<String> {
        let limit = format!("-{limit}");
        self.run(&["log", "--pretty=format:%H|%ct|%s", &limit, "--", path])
    }
}

/// `clone -b <branch> <url> <dest>`.
pub fn clone_repository(git: &dyn GitRunner, url: &str, branch: &str, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let dest_str = dest.to_string_lossy();
    let output = git.run(None, &["clone", "-b", branch, url, &dest_str])?;
    if output.success {
        Ok(())
    } else {
        Err(MirrorError::CloneFailed {
            url: url.to_string(),
            message: output.stderr,
        })
    }
}

/// Local bare-repository fixtures for tests that need real git.
#[cfg(test)]
pub(crate) mod fixtures {
    use std::path::{Path, PathBuf};
    use std::process::Command;
    use std::sync::Mutex;

    /// Serialize git-process tests to avoid flaky failures under parallel execution.
    pub static GIT_LOCK: Mutex<()> = Mutex::new(());

    pub fn git(dir: &Path, args: &[&str]) -> String {
        let output = Command::new("git")
            .args(["-c", "user.name=Test", "-c", "user.email=test@test.com"])
            .args(args)
            .current_dir(dir)
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// A bare "remote" plus a seeding working copy that can push to it.
    pub struct Remote {
        pub bare: PathBuf,
        pub work: PathBuf,
    }

    impl Remote {
        /// Create a remote with one commit holding `docs/` and a manifest.
        pub fn create(parent: &Path) -> Self {
            let bare = parent.join("remote.git");
            let work = parent.join("seed");
            std::fs::create_dir_all(&work).unwrap();

            git(
                parent,
                &[
                    "init",
                    "--bare",
                    "--initial-branch=main",
                    bare.to_string_lossy().as_ref(),
                ],
            );
            git(
                parent,
                &[
                    "clone",
                    bare.to_string_lossy().as_ref(),
                    work.to_string_lossy().as_ref(),
                ],
            );
            git(&work, &["symbolic-ref", "HEAD", "refs/heads/main"]);

            let remote = Self { bare, work };
            remote.commit_file("docs/docs_manifest.json", "{\"files\": {}}\n", "a");
            remote.commit_file("docs/hooks.md", "# Hooks\n", "Added: hooks.md");
            remote
        }

        pub fn url(&self) -> String {
            self.bare.to_string_lossy().to_string()
        }

        /// Commit and push one file change.
        pub fn commit_file(&self, rel: &str, content: &str, message: &str) {
            let path = self.work.join(rel);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, content).unwrap();
            git(&self.work, &["add", "."]);
            git(&self.work, &["commit", "-m", message]);
            git(&self.work, &["push", "origin", "HEAD:main"]);
        }

        /// Clone the remote into `dest`.
        pub fn clone_to(&self, dest: &Path) {
            git(
                dest.parent().unwrap(),
                &[
                    "clone",
                    "-b",
                    "main",
                    self.bare.to_string_lossy().as_ref(),
                    dest.to_string_lossy().as_ref(),
                ],
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{Remote, GIT_LOCK};
    use super::*;
    use crate::git::runner::testing::ScriptedGit;
    use crate::git::runner::{GitOutput, SystemGit};
    use tempfile::TempDir;

    #[test]
    fn clone_creates_working_copy() {
        let _lock = GIT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let temp = TempDir::new().unwrap();
        let remote = Remote::create(temp.path());
        let dest = temp.path().join("nested").join("mirror");

        clone_repository(&SystemGit, &remote.url(), "main", &dest).unwrap();

        let wc = WorkingCopy::new(&dest, &SystemGit);
        assert!(wc.is_repository());
        assert!(dest.join("docs/hooks.md").exists());
        assert_eq!(wc.current_branch().unwrap(), "main");
        assert!(wc.status().unwrap().is_clean());
    }

    #[test]
    fn clone_from_missing_remote_fails() {
        let _lock = GIT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let temp = TempDir::new().unwrap();
        let result = clone_repository(
            &SystemGit,
            "/nonexistent/path/repo.git",
            "main",
            &temp.path().join("mirror"),
        );
        assert!(matches!(result, Err(MirrorError::CloneFailed { .. })));
    }

    #[test]
    fn behind_count_tracks_remote_commits() {
        let _lock = GIT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let temp = TempDir::new().unwrap();
        let remote = Remote::create(temp.path());
        let dest = temp.path().join("mirror");
        remote.clone_to(&dest);

        remote.commit_file("docs/b.md", "b\n", "b");
        remote.commit_file("docs/c.md", "c\n", "c");

        let wc = WorkingCopy::new(&dest, &SystemGit);
        assert_eq!(wc.behind_count("main").unwrap(), 0);
        wc.fetch("main").unwrap();
        assert_eq!(wc.behind_count("main").unwrap(), 2);
        wc.pull("main").unwrap();
        assert_eq!(wc.behind_count("main").unwrap(), 0);
    }

    #[test]
    fn reset_and_clean_discard_local_edits() {
        let _lock = GIT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let temp = TempDir::new().unwrap();
        let remote = Remote::create(temp.path());
        let dest = temp.path().join("mirror");
        remote.clone_to(&dest);

        std::fs::write(dest.join("docs/hooks.md"), "edited\n").unwrap();
        std::fs::write(dest.join("scratch.txt"), "tmp\n").unwrap();

        let wc = WorkingCopy::new(&dest, &SystemGit);
        assert!(wc.status().unwrap().has_local_edits());

        wc.fetch("main").unwrap();
        wc.abort_in_progress().unwrap();
        wc.reset_hard("main").unwrap();
        wc.clean().unwrap();

        assert!(wc.status().unwrap().is_clean());
        assert!(!dest.join("scratch.txt").exists());
    }

    #[test]
    fn last_change_time_and_log() {
        let _lock = GIT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let temp = TempDir::new().unwrap();
        let remote = Remote::create(temp.path());
        let dest = temp.path().join("mirror");
        remote.clone_to(&dest);

        let wc = WorkingCopy::new(&dest, &SystemGit);
        assert!(wc.last_change_time("docs/").unwrap().is_some());

        let log = wc.log_summaries("docs/", 5).unwrap();
        assert_eq!(log.lines().count(), 2);
        assert!(log.lines().next().unwrap().ends_with("|Added: hooks.md"));
    }

    #[test]
    fn behind_count_rejects_garbage() {
        let git = ScriptedGit::new();
        git.respond("rev-list", GitOutput::ok("lots"));
        let wc = WorkingCopy::new("/tmp/none", &git);
        assert!(wc.behind_count("main").is_err());
    }

    #[test]
    fn abort_in_progress_ignores_failures() {
        let git = ScriptedGit::new();
        git.respond("merge", GitOutput::failed("no merge to abort"));
        git.respond("rebase", GitOutput::failed("no rebase in progress"));
        let wc = WorkingCopy::new("/tmp/none", &git);
        wc.abort_in_progress().unwrap();
        assert_eq!(git.calls(), vec!["merge --abort", "rebase --abort"]);
    }
}
