//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. It can be configured with
//! pre-determined confirmation answers.
//!
//! # Example
//!
//! ```
//! use docs_mirror::ui::{Confirmation, MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_confirm_response("discard_changes", true);
//!
//! let prompt = Confirmation::new("discard_changes", "Discard local edits?", false);
//! assert!(ui.confirm(&prompt).unwrap());
//! assert!(ui.prompt_was_shown("discard_changes"));
//! ```

use std::collections::HashMap;

use crate::error::Result;

use super::{Confirmation, OutputMode, SpinnerHandle, UserInterface};

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    spinners: Vec<String>,
    confirm_responses: HashMap<String, bool>,
    prompts_shown: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Set the answer for a confirmation key.
    pub fn set_confirm_response(&mut self, key: &str, answer: bool) {
        self.confirm_responses.insert(key.to_string(), answer);
    }

    /// Set whether this mock behaves as interactive.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warning messages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all captured headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get all spinner messages.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Keys of every confirmation asked, in order.
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    /// Check whether a confirmation with this key was asked.
    pub fn prompt_was_shown(&self, key: &str) -> bool {
        self.prompts_shown.iter().any(|k| k == key)
    }

    /// Check if any message, success, or warning contains the given text.
    pub fn has_output(&self, text: &str) -> bool {
        self.messages
            .iter()
            .chain(&self.successes)
            .chain(&self.warnings)
            .chain(&self.errors)
            .any(|m| m.contains(text))
    }

    /// All captured messages joined by newlines.
    pub fn output(&self) -> String {
        self.messages.join("\n")
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn confirm(&mut self, prompt: &Confirmation) -> Result<bool> {
        self.prompts_shown.push(prompt.key.clone());
        Ok(self
            .confirm_responses
            .get(&prompt.key)
            .copied()
            .unwrap_or(prompt.default))
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner)
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Mock spinner that does nothing.
#[derive(Debug, Default)]
pub struct MockSpinner;

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, _msg: &str) {}
    fn finish_success(&mut self, _msg: &str) {}
    fn finish_error(&mut self, _msg: &str) {}
}
