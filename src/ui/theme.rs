//! Colours and status glyphs.

use console::{Style, Term};

/// Styles used by the terminal UI.
#[derive(Debug, Clone)]
pub struct PyensureTheme {
    pub success: Style,
    pub warning: Style,
    pub error: Style,
    pub dim: Style,
    /// Header titles and key-value keys.
    pub emphasis: Style,
    /// Installer names, package names.
    pub accent: Style,
}

impl Default for PyensureTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl PyensureTheme {
    /// Coloured theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            emphasis: Style::new().bold(),
            accent: Style::new().cyan(),
        }
    }

    /// Every style is a no-op.
    pub fn plain() -> Self {
        let none = Style::new();
        Self {
            success: none.clone(),
            warning: none.clone(),
            error: none.clone(),
            dim: none.clone(),
            emphasis: none.clone(),
            accent: none,
        }
    }

    pub fn for_colors(colors: bool) -> Self {
        if colors {
            Self::new()
        } else {
            Self::plain()
        }
    }

    pub fn format_success(&self, msg: &str) -> String {
        glyph_line(&self.success, '✓', msg)
    }

    pub fn format_warning(&self, msg: &str) -> String {
        glyph_line(&self.warning, '!', msg)
    }

    pub fn format_error(&self, msg: &str) -> String {
        glyph_line(&self.error, '✗', msg)
    }

    /// `key` left-aligned in `width` columns, then `value`.
    pub fn format_key_value(&self, key: &str, value: &str, width: usize) -> String {
        let padded = format!("{:<width$}", key, width = width);
        format!(
            "{} {}",
            self.emphasis.apply_to(padded),
            self.accent.apply_to(value)
        )
    }

    pub fn format_header(&self, title: &str) -> String {
        self.emphasis.apply_to(title).to_string()
    }
}

fn glyph_line(style: &Style, glyph: char, msg: &str) -> String {
    style.apply_to(format!("{} {}", glyph, msg)).to_string()
}

/// Colour unless `NO_COLOR` is set or stdout is not a terminal.
pub fn should_use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none() && Term::stdout().is_term()
}
