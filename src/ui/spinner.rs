//! Spinner shown while an installer runs.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use super::theme::PyensureTheme;
use super::SpinnerHandle;

const TICK: Duration = Duration::from_millis(80);
const FRAMES: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// indicatif spinner whose final line carries a status glyph.
pub struct ProgressSpinner {
    bar: ProgressBar,
    theme: PyensureTheme,
}

impl ProgressSpinner {
    pub fn new(message: &str, theme: PyensureTheme) -> Self {
        let bar = ProgressBar::new_spinner().with_message(message.to_string());
        apply_template(&bar, "{spinner:.cyan} {msg}", true);
        bar.enable_steady_tick(TICK);
        Self { bar, theme }
    }

    /// Draws nothing; used when stdout is not a terminal or output is silent.
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            theme: PyensureTheme::plain(),
        }
    }

    fn settle(&self, line: String) {
        apply_template(&self.bar, "{msg}", false);
        self.bar.finish_with_message(line);
    }
}

fn apply_template(bar: &ProgressBar, template: &str, ticking: bool) {
    let Ok(style) = ProgressStyle::default_spinner().template(template) else {
        return;
    };
    bar.set_style(if ticking { style.tick_chars(FRAMES) } else { style });
}

impl SpinnerHandle for ProgressSpinner {
    fn finish_success(&mut self, msg: &str) {
        self.settle(self.theme.format_success(msg));
    }

    fn finish_error(&mut self, msg: &str) {
        self.settle(self.theme.format_error(msg));
    }
}
