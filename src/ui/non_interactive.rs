//! Non-interactive UI for hooks, pipes, and CI.

use std::collections::HashMap;

use crate::error::Result;

use super::prompts::parse_answer;
use super::spinner::NoopSpinner;
use super::{Confirmation, OutputMode, SpinnerHandle, UserInterface};

/// Prefix of environment variables that answer confirmations.
pub const PROMPT_ENV_PREFIX: &str = "DOCS_MIRROR_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Confirmations are answered from `DOCS_MIRROR_PROMPT_<KEY>` variables,
/// falling back to the prompt's default.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self {
            mode,
            env_overrides,
        }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn confirm(&mut self, prompt: &Confirmation) -> Result<bool> {
        let env_key = format!("{}{}", PROMPT_ENV_PREFIX, prompt.key.to_uppercase());
        let answer = self
            .env_overrides
            .get(&env_key)
            .and_then(|value| parse_answer(value));

        match answer {
            Some(answer) => Ok(answer),
            None => {
                tracing::debug!(
                    "no answer for '{}' in non-interactive mode, using default",
                    prompt.key
                );
                Ok(prompt.default)
            }
        }
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        let visible = self.mode.shows_progress();
        if visible {
            println!("{}", message);
        }
        Box::new(NoopSpinner { visible })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_progress() {
            println!("{}\n{}\n", title, "=".repeat(title.chars().count()));
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}
