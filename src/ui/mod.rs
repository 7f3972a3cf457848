//! User interface components.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for hooks, pipes, and CI
//! - [`MockUI`] for asserting on output in tests
//!
//! # Example
//!
//! ```
//! use docs_mirror::ui::{create_ui, OutputMode};
//!
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.success("Documentation updated");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod progress;
pub mod prompts;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::{MockSpinner, MockUI};
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use progress::{format_relative_time, wrap_words};
pub use prompts::confirm_user;
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, create_ui_with_color, TerminalUI};
pub use theme::{should_use_colors, MirrorTheme};

use crate::error::Result;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Ask a yes/no question.
    fn confirm(&mut self, prompt: &Confirmation) -> Result<bool>;

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Update the spinner message.
    fn set_message(&mut self, msg: &str);

    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as failed.
    fn finish_error(&mut self, msg: &str);
}

/// A yes/no question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    /// Unique key, used for `DOCS_MIRROR_PROMPT_<KEY>` overrides.
    pub key: String,
    /// The question to display.
    pub question: String,
    /// Answer when the user just presses enter or cannot be asked.
    pub default: bool,
}

impl Confirmation {
    pub fn new(key: &str, question: impl Into<String>, default: bool) -> Self {
        Self {
            key: key.to_string(),
            question: question.into(),
            default,
        }
    }
}
