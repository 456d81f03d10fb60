//! Terminal UI.

use console::Term;

use super::{OutputMode, ProgressSpinner, PyensureTheme, SpinnerHandle, UserInterface};

/// Key column width for `key_value` rows.
const KEY_WIDTH: usize = 12;

/// Writes to the real stdout and stderr.
///
/// Write errors (a closed pipe, say) are ignored; there is nowhere left to
/// report them.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: PyensureTheme,
    mode: OutputMode,
}

impl TerminalUI {
    pub fn new(mode: OutputMode, colors: bool) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme: PyensureTheme::for_colors(colors),
            mode,
        }
    }

    fn out_line(&self, line: &str) {
        let _ = self.out.write_line(line);
    }

    fn err_line(&self, line: &str) {
        let _ = self.err.write_line(line);
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            self.out_line(msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_outcome() {
            self.out_line(&self.theme.format_success(msg));
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_outcome() {
            self.err_line(&self.theme.format_warning(msg));
        }
    }

    fn error(&mut self, msg: &str) {
        self.err_line(&self.theme.format_error(msg));
    }

    fn detail(&mut self, msg: &str) {
        if self.mode.shows_details() {
            self.out_line(&format!("  {}", self.theme.dim.apply_to(msg)));
        }
    }

    fn key_value(&mut self, key: &str, value: &str) {
        if self.mode.shows_status() {
            self.out_line(&self.theme.format_key_value(key, value, KEY_WIDTH));
        }
    }

    fn data(&mut self, text: &str) {
        self.out_line(text);
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() && self.out.is_term() {
            Box::new(ProgressSpinner::new(message, self.theme.clone()))
        } else {
            Box::new(ProgressSpinner::hidden())
        }
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            self.out_line(&self.theme.format_header(title));
            self.out_line("");
        }
    }
}
