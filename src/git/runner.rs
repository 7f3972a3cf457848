//! Git subprocess execution.

use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;

use crate::error::{MirrorError, Result};

/// Captured result of one git invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitOutput {
    /// Whether git exited with status 0.
    pub success: bool,
    /// Standard output, trailing whitespace removed.
    pub stdout: String,
    /// Standard error, trimmed.
    pub stderr: String,
}

impl GitOutput {
    /// A successful invocation with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed invocation with the given stderr.
    pub fn failed(stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Convert to stdout, or a [`MirrorError::GitFailed`] naming `args`.
    pub fn into_stdout(self, args: &[&str]) -> Result<String> {
        if self.success {
            Ok(self.stdout)
        } else {
            Err(MirrorError::GitFailed {
                command: args.join(" "),
                message: self.stderr,
            })
        }
    }
}

/// Runs git commands.
///
/// Non-zero exit is reported through [`GitOutput::success`], not as an
/// error; `Err` means git could not be run at all.
pub trait GitRunner {
    fn run(&self, cwd: Option<&Path>, args: &[&str]) -> Result<GitOutput>;
}

/// Runs the `git` executable found on `PATH`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemGit;

impl GitRunner for SystemGit {
    fn run(&self, cwd: Option<&Path>, args: &[&str]) -> Result<GitOutput> {
        tracing::debug!("git {} (in {:?})", args.join(" "), cwd);

        let mut cmd = Command::new("git");
        cmd.args(args);
        // Never block on a credential prompt; remote failures are handled by callers.
        cmd.env("GIT_TERMINAL_PROMPT", "0");
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }

        let output = cmd.output().map_err(|e| match e.kind() {
            ErrorKind::NotFound => MirrorError::GitMissing,
            _ => MirrorError::Io(e),
        })?;

        let result = GitOutput {
            success: output.status.success(),
            // Leading whitespace is significant in porcelain output.
            stdout: String::from_utf8_lossy(&output.stdout).trim_end().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        };

        if !result.success {
            tracing::debug!("git {} failed: {}", args.join(" "), result.stderr);
        }

        Ok(result)
    }
}

/// Check that git is available, returning its version string.
pub fn ensure_git(git: &dyn GitRunner) -> Result<String> {
    let output = git.run(None, &["--version"])?;
    if output.success {
        Ok(output.stdout)
    } else {
        Err(MirrorError::GitMissing)
    }
}

/// Scripted git runner for tests.
#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::collections::{HashMap, VecDeque};
    use std::path::Path;

    use super::{GitOutput, GitRunner};
    use crate::error::Result;

    /// Returns queued outputs keyed by git subcommand and records every call.
    ///
    /// Subcommands with nothing queued succeed with empty output.
    #[derive(Debug, Default)]
    pub struct ScriptedGit {
        responses: RefCell<HashMap<String, VecDeque<GitOutput>>>,
        calls: RefCell<Vec<String>>,
    }

    impl ScriptedGit {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(&self, subcommand: &str, output: GitOutput) -> &Self {
            self.responses
                .borrow_mut()
                .entry(subcommand.to_string())
                .or_default()
                .push_back(output);
            self
        }

        /// Every call as a space-joined argument string.
        pub fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        pub fn count(&self, subcommand: &str) -> usize {
            self.calls
                .borrow()
                .iter()
                .filter(|c| c.split(' ').next() == Some(subcommand))
                .count()
        }
    }

    impl GitRunner for ScriptedGit {
        fn run(&self, _cwd: Option<&Path>, args: &[&str]) -> Result<GitOutput> {
            self.calls.borrow_mut().push(args.join(" "));
            let key = args.first().copied().unwrap_or_default();
            let next = self
                .responses
                .borrow_mut()
                .get_mut(key)
                .and_then(|q| q.pop_front());
            Ok(next.unwrap_or_else(|| GitOutput::ok("")))
        }
    }
}
