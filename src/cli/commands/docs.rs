//! The `docs-mirror docs` command.
//!
//! Answers `/docs` requests from the local mirror and doubles as the
//! passive update hook.

use std::time::SystemTime;

use crate::cli::args::DocsArgs;
use crate::error::Result;
use crate::git::WorkingCopy;
use crate::mirror::{
    parse_log, passive_update, run_freshness_check, DocsDir, HookThrottle, Lookup, Manifest,
    DOCS_PATHSPEC,
};
use crate::ui::{format_relative_time, wrap_words, UserInterface};

use super::dispatcher::{Command, CommandContext, CommandResult};

/// Lowercased phrases that ask for the changelog.
const CHANGELOG_PHRASES: &[&str] = &["what's new", "whats new", "what is new", "changelog"];

const TOPIC_WIDTH: usize = 60;
const MAX_SIMILAR: usize = 5;
const MAX_LISTED: usize = 10;

/// A normalized helper request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelperRequest {
    /// Throttled silent update, run by the host hook.
    HookCheck,
    /// Print how to uninstall.
    UninstallInfo,
    ListTopics { fresh: bool },
    WhatsNew { fresh: bool },
    Read { topic: String, fresh: bool },
}

impl HelperRequest {
    /// Interpret helper arguments.
    ///
    /// The host passes everything as one string, so arguments are split on
    /// whitespace first. `-t` anywhere asks for a freshness check.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Self {
        let mut tokens: Vec<&str> = args
            .iter()
            .flat_map(|a| a.as_ref().split_whitespace())
            .collect();
        let fresh = tokens.contains(&"-t");
        tokens.retain(|t| *t != "-t");

        let Some(first) = tokens.first() else {
            return Self::ListTopics { fresh };
        };
        match *first {
            "hook-check" => return Self::HookCheck,
            "uninstall" => return Self::UninstallInfo,
            _ => {}
        }

        let joined = tokens.join(" ").to_lowercase();
        if CHANGELOG_PHRASES.contains(&joined.as_str()) {
            Self::WhatsNew { fresh }
        } else {
            Self::Read {
                topic: first.to_string(),
                fresh,
            }
        }
    }
}

/// The docs command implementation.
pub struct DocsCommand<'a> {
    context: &'a CommandContext<'a>,
    request: HelperRequest,
}

impl<'a> DocsCommand<'a> {
    /// Create a new docs command.
    pub fn new(context: &'a CommandContext<'a>, args: &DocsArgs) -> Self {
        Self {
            context,
            request: HelperRequest::parse(&args.args),
        }
    }

    pub fn request(&self) -> &HelperRequest {
        &self.request
    }

    fn docs_dir(&self) -> DocsDir {
        DocsDir::new(self.context.paths.docs_dir())
    }

    fn working_copy(&self) -> WorkingCopy<'a> {
        WorkingCopy::new(&self.context.paths.install_dir, self.context.git)
    }

    fn official_url(&self, manifest: &Manifest, stem: &str) -> String {
        manifest.official_url(stem, &self.context.config.official_docs_url)
    }

    fn hook_check(&self) {
        let config = &self.context.config;
        let throttle = HookThrottle::hours(
            self.context.paths.last_check_marker(),
            config.check_interval_hours,
        );
        let outcome = passive_update(
            &self.working_copy(),
            &config.branch,
            &throttle,
            SystemTime::now(),
        );
        tracing::debug!("hook check: {:?}", outcome);
    }

    fn check_freshness(&self, ui: &mut dyn UserInterface) {
        let wc = self.working_copy();
        if !wc.is_repository() {
            ui.warning(&format!(
                "No mirror at {} (run docs-mirror install)",
                wc.dir().display()
            ));
            ui.message("");
            return;
        }
        run_freshness_check(&wc, &self.context.config.branch, ui);
    }

    fn show_banners(&self, ui: &mut dyn UserInterface) {
        let config = &self.context.config;
        ui.message(&format!("COMMUNITY MIRROR: {}", config.repo_web_url()));
        ui.message(&format!("OFFICIAL DOCS: {}", config.official_docs_url));
        ui.message("");
    }

    fn show_local_hint(ui: &mut dyn UserInterface) {
        ui.message("");
        ui.message("Reading from local docs (run /docs -t to check freshness)");
    }

    fn list_topics(&self, ui: &mut dyn UserInterface) -> Result<()> {
        self.show_banners(ui);
        ui.message("Available documentation topics:");
        ui.message("");

        let topics = self.docs_dir().list_topics()?;
        if topics.is_empty() {
            ui.message("  No documentation files found");
        } else {
            for line in wrap_words(&topics, TOPIC_WIDTH, "  ") {
                ui.message(&line);
            }
        }

        ui.message("");
        ui.message("Usage: /docs <topic>");
        ui.message("       /docs -t         # Check sync status");
        ui.message("       /docs what's new # Show recent changes");
        Ok(())
    }

    fn read(&self, topic: &str, ui: &mut dyn UserInterface) -> Result<()> {
        self.show_banners(ui);

        let docs = self.docs_dir();
        match docs.lookup(topic)? {
            Lookup::Found(doc) => {
                let manifest = Manifest::load(&self.context.paths.manifest());
                ui.message(&doc.content);
                ui.message("");
                ui.message(&format!(
                    "Official page: {}",
                    self.official_url(&manifest, &doc.stem)
                ));
            }
            Lookup::NotFound { suggestions } => {
                ui.error(&format!("Documentation for '{}' not found", topic));
                ui.message("");
                ui.message("Available topics:");
                if !suggestions.is_empty() {
                    ui.message("  Similar topics:");
                    for s in suggestions.iter().take(MAX_SIMILAR) {
                        ui.message(&format!("    - {}", s));
                    }
                } else {
                    let topics = docs.list_topics()?;
                    for t in topics.iter().take(MAX_LISTED) {
                        ui.message(&format!("  - {}", t));
                    }
                    if topics.len() > MAX_LISTED {
                        ui.message(&format!("  ... and {} more", topics.len() - MAX_LISTED));
                    }
                }
            }
        }
        Ok(())
    }

    fn whats_new(&self, ui: &mut dyn UserInterface) {
        let config = &self.context.config;
        ui.message("Recent documentation updates:");
        ui.message("");

        let log = match self
            .working_copy()
            .log_summaries(DOCS_PATHSPEC, config.changelog_limit)
        {
            Ok(log) => log,
            Err(e) => {
                tracing::debug!("changelog unavailable: {}", e);
                ui.message("Could not retrieve recent changes");
                return;
            }
        };

        let commits = parse_log(&log);
        if commits.is_empty() {
            ui.message("No recent changes found");
            return;
        }

        let repo = config.repo_web_url();
        let manifest = Manifest::load(&self.context.paths.manifest());
        for commit in &commits {
            ui.message(&format!("* {}:", format_relative_time(commit.time)));
            ui.message(&format!("  Link: {}/commit/{}", repo, commit.short_hash()));
            for doc in commit.changed_docs() {
                ui.message(&format!(
                    "  Doc: {}: {}",
                    doc,
                    self.official_url(&manifest, &doc)
                ));
            }
            ui.message("");
        }

        ui.message(&format!(
            "Full changelog: {}/commits/{}/docs",
            repo, config.branch
        ));
        ui.message("COMMUNITY MIRROR - NOT AFFILIATED WITH THE DOCUMENTATION PUBLISHER");
    }
}

impl Command for DocsCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &self.request {
            HelperRequest::HookCheck => self.hook_check(),
            HelperRequest::UninstallInfo => {
                ui.message("To uninstall, run:");
                ui.message("");
                ui.message(&format!("{} uninstall", self.context.exe.display()));
            }
            HelperRequest::ListTopics { fresh } => {
                if *fresh {
                    self.check_freshness(ui);
                }
                self.list_topics(ui)?;
                if !fresh {
                    Self::show_local_hint(ui);
                }
            }
            HelperRequest::WhatsNew { fresh } => {
                if *fresh {
                    self.check_freshness(ui);
                }
                self.whats_new(ui);
            }
            HelperRequest::Read { topic, fresh } => {
                if *fresh {
                    self.check_freshness(ui);
                }
                self.read(topic, ui)?;
                if !fresh {
                    Self::show_local_hint(ui);
                }
            }
        }
        Ok(CommandResult::success())
    }
}
