//! The `/docs` command registration file.

use std::path::Path;

use crate::error::Result;

/// Subcommand the registered commands invoke.
const HELPER_SUBCOMMAND: &str = "docs";

/// Command line the host runs for `/docs`, forwarding its arguments.
pub fn helper_command(exe: &Path, mirror: &Path) -> String {
    format!(
        "\"{}\" --mirror \"{}\" {} \"$ARGUMENTS\"",
        exe.display(),
        mirror.display(),
        HELPER_SUBCOMMAND
    )
}

/// Command line the host runs from the update hook.
pub fn hook_command(exe: &Path, mirror: &Path) -> String {
    format!(
        "\"{}\" --mirror \"{}\" {} hook-check",
        exe.display(),
        mirror.display(),
        HELPER_SUBCOMMAND
    )
}

/// Values substituted into the command file.
#[derive(Debug, Clone)]
pub struct CommandTemplate<'a> {
    pub mirror_dir: &'a Path,
    /// Full helper command line (see [`helper_command`]).
    pub execute: &'a str,
    pub repo_web_url: &'a str,
    pub official_docs_url: &'a str,
}

impl CommandTemplate<'_> {
    pub fn render(&self) -> String {
        let repo = self.repo_web_url;
        let official = self.official_docs_url;
        format!(
            "Execute the docs-mirror helper for the documentation mirror at {mirror}

Usage:
- /docs - List all available documentation topics
- /docs <topic> - Read specific documentation with link to official docs
- /docs -t - Check sync status without reading a doc
- /docs -t <topic> - Check freshness then read documentation
- /docs whats new - Show recent documentation changes (or \"what's new\")

Examples of expected output:

When reading a doc:
COMMUNITY MIRROR: {repo}
OFFICIAL DOCS: {official}

[Doc content here...]

Official page: {official}/hooks

When showing what's new:
Recent documentation updates:

* 5 hours ago:
  Link: {repo}/commit/eacd8e1
  Doc: data-usage: {official}/data-usage
  Doc: security: {official}/security

Full changelog: {repo}/commits/main/docs
COMMUNITY MIRROR - NOT AFFILIATED WITH THE DOCUMENTATION PUBLISHER

Reading a doc is served from the local mirror; a hook keeps it in sync
with the remote at most once every few hours.

Execute: {execute}
",
            mirror = self.mirror_dir.display(),
            execute = self.execute,
        )
    }
}

/// Write the command file, returning whether one was already there.
pub fn write_command_file(path: &Path, content: &str) -> Result<bool> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let existed = path.exists();
    std::fs::write(path, content)?;
    Ok(existed)
}

/// Remove the command file, returning whether there was one.
pub fn remove_command_file(path: &Path) -> Result<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn helper_command_quotes_paths() {
        let cmd = helper_command(
            Path::new("/opt/bin/docs-mirror"),
            Path::new("/home/me/.claude-code-docs"),
        );
        assert_eq!(
            cmd,
            "\"/opt/bin/docs-mirror\" --mirror \"/home/me/.claude-code-docs\" docs \"$ARGUMENTS\""
        );
    }

    #[test]
    fn hook_command_runs_hook_check() {
        let cmd = hook_command(
            Path::new("/opt/bin/docs-mirror"),
            Path::new("/home/me/.claude-code-docs"),
        );
        assert!(cmd.ends_with("docs hook-check"));
        assert!(cmd.contains("claude-code-docs"));
    }

    #[test]
    fn render_ends_with_execute_line() {
        let execute = "\"/bin/docs-mirror\" --mirror \"/m/claude-code-docs\" docs \"$ARGUMENTS\"";
        let content = CommandTemplate {
            mirror_dir: Path::new("/m/claude-code-docs"),
            execute,
            repo_web_url: "https://github.com/example/claude-code-docs",
            official_docs_url: "https://docs.example.com",
        }
        .render();

        assert!(content.starts_with(
            "Execute the docs-mirror helper for the documentation mirror at /m/claude-code-docs"
        ));
        assert!(content.contains("Official page: https://docs.example.com/hooks"));
        assert_eq!(
            content.lines().last().unwrap(),
            format!("Execute: {}", execute)
        );
    }

    #[test]
    fn write_and_remove_command_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("commands/docs.md");

        assert!(!write_command_file(&path, "one").unwrap());
        assert!(write_command_file(&path, "two").unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "two");

        assert!(remove_command_file(&path).unwrap());
        assert!(!remove_command_file(&path).unwrap());
    }
}
