//! Configuration schema definitions for pyensure.
//!
//! This module contains the struct definitions that map to the YAML
//! configuration file format.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::install::{ExecutorOptions, DEFAULT_MAX_ATTEMPTS};
use crate::resolver::{DEFAULT_INDEX_TIMEOUT, DEFAULT_INDEX_URL};
use crate::ui::OutputMode;

/// Root configuration structure for `.pyensure/config.yml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PyensureConfig {
    /// Global settings
    pub settings: Settings,

    /// Package index used to resolve unknown import names
    pub index: IndexConfig,

    /// Extra import name -> distribution name entries
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub aliases: BTreeMap<String, String>,

    /// Extra distribution name -> import module entries
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub import_names: BTreeMap<String, String>,

    /// Extra distribution -> companion distributions entries
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub common_dependencies: BTreeMap<String, Vec<String>>,
}

/// Global settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Interpreter whose environment is managed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub python: Option<PathBuf>,

    /// Install attempts allowed per package per run
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Pause after a fallback installer succeeds, in milliseconds
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Default output mode: verbose, normal, quiet, silent
    pub default_output: OutputMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            python: None,
            max_attempts: default_max_attempts(),
            settle_delay_ms: default_settle_delay_ms(),
            default_output: OutputMode::default(),
        }
    }
}

impl Settings {
    /// Executor tunables derived from these settings.
    pub fn executor_options(&self) -> ExecutorOptions {
        ExecutorOptions {
            max_attempts: self.max_attempts,
            settle_delay: Duration::from_millis(self.settle_delay_ms),
        }
    }
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_settle_delay_ms() -> u64 {
    1000
}

/// Package index settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Consult the index at all
    pub enabled: bool,

    /// Base URL of a PyPI-compatible index
    pub url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Take the first search hit when the exact lookup misses
    pub search_fallback: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: DEFAULT_INDEX_URL.to_string(),
            timeout_secs: DEFAULT_INDEX_TIMEOUT.as_secs(),
            search_fallback: false,
        }
    }
}

impl IndexConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_gives_defaults() {
        let config: PyensureConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, PyensureConfig::default());
        assert_eq!(config.settings.max_attempts, 2);
        assert!(config.index.enabled);
        assert_eq!(config.index.url, "https://pypi.org");
        assert!(!config.index.search_fallback);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: PyensureConfig = serde_yaml::from_str(
            r#"
settings:
  max_attempts: 5
index:
  search_fallback: true
"#,
        )
        .unwrap();
        assert_eq!(config.settings.max_attempts, 5);
        assert_eq!(config.settings.settle_delay_ms, 1000);
        assert!(config.index.search_fallback);
        assert_eq!(config.index.timeout_secs, 5);
    }

    #[test]
    fn tables_parse() {
        let config: PyensureConfig = serde_yaml::from_str(
            r#"
aliases:
  skimage: scikit-image
import_names:
  scikit-image: skimage
common_dependencies:
  scikit-image: [numpy, scipy]
"#,
        )
        .unwrap();
        assert_eq!(config.aliases["skimage"], "scikit-image");
        assert_eq!(config.import_names["scikit-image"], "skimage");
        assert_eq!(
            config.common_dependencies["scikit-image"],
            vec!["numpy", "scipy"]
        );
    }

    #[test]
    fn output_mode_is_lowercase() {
        let settings: Settings = serde_yaml::from_str("default_output: quiet").unwrap();
        assert_eq!(settings.default_output, OutputMode::Quiet);
        assert!(serde_yaml::from_str::<Settings>("default_output: loud").is_err());
    }

    #[test]
    fn executor_options_convert_units() {
        let settings = Settings {
            settle_delay_ms: 250,
            ..Default::default()
        };
        let options = settings.executor_options();
        assert_eq!(options.settle_delay, Duration::from_millis(250));
        assert_eq!(options.max_attempts, 2);
    }
}
