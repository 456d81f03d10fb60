//! Terminal output.
//!
//! Commands talk to a [`UserInterface`] rather than to stdout, so their
//! output can be asserted with [`MockUI`]. [`TerminalUI`] is the real one:
//! status on stdout, problems on stderr, spinners only on a terminal.
//!
//! ```
//! use pyensure::ui::{MockUI, OutputMode, UserInterface};
//!
//! let mut ui = MockUI::with_mode(OutputMode::Quiet);
//! ui.success("Installed numpy");
//! assert!(ui.has_success("numpy"));
//! ```

pub mod mock;
pub mod output;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::{MockSpinner, MockUI, UiEvent};
pub use output::OutputMode;
pub use spinner::ProgressSpinner;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, PyensureTheme};

/// Where command output goes.
pub trait UserInterface {
    fn output_mode(&self) -> OutputMode;

    /// Plain status line.
    fn message(&mut self, msg: &str);

    fn success(&mut self, msg: &str);

    fn warning(&mut self, msg: &str);

    /// Shown in every mode.
    fn error(&mut self, msg: &str);

    /// Verbose-only line.
    fn detail(&mut self, msg: &str);

    /// One row of an aligned two-column listing.
    fn key_value(&mut self, key: &str, value: &str);

    /// Output the user asked for, such as JSON or a dependency list.
    /// Never suppressed by the output mode.
    fn data(&mut self, text: &str);

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    fn show_header(&mut self, title: &str);
}

/// A running spinner. Finishing it replaces the spinner line.
pub trait SpinnerHandle {
    fn finish_success(&mut self, msg: &str);

    fn finish_error(&mut self, msg: &str);
}
