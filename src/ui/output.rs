//! Output verbosity.
//!
//! One enum serves both the `settings.default_output` config key and the
//! `-v`/`-q` flags.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How much the terminal UI prints.
///
/// Ordered from most to least output. Errors and requested data (`--json`,
/// dependency lists) are printed in every mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Per-package details too.
    Verbose,
    #[default]
    Normal,
    /// Spinners and final outcome only.
    Quiet,
    Silent,
}

impl OutputMode {
    /// Detail lines such as the install method used.
    pub fn shows_details(self) -> bool {
        self == Self::Verbose
    }

    pub fn shows_spinners(self) -> bool {
        self <= Self::Quiet
    }

    /// Plain status messages, headers and key-value tables.
    pub fn shows_status(self) -> bool {
        self <= Self::Normal
    }

    /// Success and warning lines.
    pub fn shows_outcome(self) -> bool {
        self != Self::Silent
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Verbose => "verbose",
            Self::Normal => "normal",
            Self::Quiet => "quiet",
            Self::Silent => "silent",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visibility_narrows_with_each_mode() {
        let modes = [
            OutputMode::Verbose,
            OutputMode::Normal,
            OutputMode::Quiet,
            OutputMode::Silent,
        ];
        let visible: Vec<_> = modes
            .iter()
            .map(|m| (m.shows_details(), m.shows_status(), m.shows_spinners(), m.shows_outcome()))
            .collect();

        assert_eq!(
            visible,
            vec![
                (true, true, true, true),
                (false, true, true, true),
                (false, false, true, true),
                (false, false, false, false),
            ]
        );
    }

    #[test]
    fn yaml_names_are_lowercase() {
        let mode: OutputMode = serde_yaml::from_str("quiet").unwrap();
        assert_eq!(mode, OutputMode::Quiet);
        assert_eq!(mode.to_string(), "quiet");
        assert!(serde_yaml::from_str::<OutputMode>("QUIET").is_err());
    }
}
