//! Finding and reading config files.
//!
//! Three layers are read, lowest precedence first:
//!
//! | layer   | file                                  |
//! |---------|---------------------------------------|
//! | user    | `~/.pyensure/config.yml`              |
//! | project | `<root>/.pyensure/config.yml`         |
//! | local   | `<root>/.pyensure/config.local.yml`   |
//!
//! A missing layer is skipped. `--config` replaces all three with one file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::config::merger::merge_configs;
use crate::config::schema::PyensureConfig;
use crate::error::{PyensureError, Result};

/// Directory holding pyensure configuration, in the home and project roots.
pub const CONFIG_DIR: &str = ".pyensure";

const PROJECT_FILE: &str = "config.yml";
const LOCAL_FILE: &str = "config.local.yml";

/// The config files that exist for one project root.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    pub user_global: Option<PathBuf>,
    pub project: Option<PathBuf>,
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    pub fn discover(project_root: &Path) -> Self {
        let project_dir = project_root.join(CONFIG_DIR);
        Self {
            user_global: dirs::home_dir()
                .map(|home| home.join(CONFIG_DIR).join(PROJECT_FILE))
                .filter(|p| p.is_file()),
            project: Some(project_dir.join(PROJECT_FILE)).filter(|p| p.is_file()),
            project_local: Some(project_dir.join(LOCAL_FILE)).filter(|p| p.is_file()),
        }
    }

    /// Existing files, lowest precedence first.
    pub fn layers(&self) -> impl Iterator<Item = &Path> {
        [&self.user_global, &self.project, &self.project_local]
            .into_iter()
            .filter_map(|p| p.as_deref())
    }

    pub fn has_project_config(&self) -> bool {
        self.project.is_some()
    }
}

/// Nearest ancestor of `start` (inclusive) holding a `.pyensure` directory,
/// else the nearest holding `.git`.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let has = |marker: &str| {
        start
            .ancestors()
            .find(|dir| dir.join(marker).exists())
            .map(Path::to_path_buf)
    };
    has(CONFIG_DIR).or_else(|| has(".git"))
}

/// Read one file as a YAML document, without deserializing it.
pub fn load_config_value(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => PyensureError::ConfigNotFound {
            path: path.to_path_buf(),
        },
        _ => PyensureError::Io(e),
    })?;
    yaml_document(&text, path)
}

pub fn parse_config(content: &str, source_path: &Path) -> Result<PyensureConfig> {
    let doc = yaml_document(content, source_path)?;
    into_config(merge_configs(&[doc]), source_path)
}

/// Load exactly one file. An empty file yields the defaults.
pub fn load_config_file(path: &Path) -> Result<PyensureConfig> {
    let doc = load_config_value(path)?;
    into_config(merge_configs(&[doc]), path)
}

/// Merge every layer that exists under `project_root`.
pub fn load_merged_config(project_root: &Path) -> Result<PyensureConfig> {
    let paths = ConfigPaths::discover(project_root);
    let docs = paths
        .layers()
        .map(|path| {
            tracing::debug!(path = %path.display(), "reading config layer");
            load_config_value(path)
        })
        .collect::<Result<Vec<_>>>()?;

    // Type errors after merging are reported against the project file.
    let blame = project_root.join(CONFIG_DIR).join(PROJECT_FILE);
    into_config(merge_configs(&docs), &blame)
}

/// `config_override` if given, else the merged layers.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<PyensureConfig> {
    config_override.map_or_else(|| load_merged_config(project_root), load_config_file)
}

fn yaml_document(text: &str, path: &Path) -> Result<Value> {
    serde_yaml::from_str(text).map_err(|e| parse_error(path, e))
}

fn into_config(doc: Value, path: &Path) -> Result<PyensureConfig> {
    serde_yaml::from_value(doc).map_err(|e| parse_error(path, e))
}

fn parse_error(path: &Path, err: serde_yaml::Error) -> PyensureError {
    PyensureError::ConfigParseError {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}
