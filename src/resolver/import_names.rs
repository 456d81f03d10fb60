//! Distribution name to import name mapping.

use std::collections::HashMap;

use super::tables::DEFAULT_IMPORT_NAMES;

/// Knows which module to import to verify a distribution is installed.
#[derive(Debug, Clone)]
pub struct ImportNames {
    names: HashMap<String, String>,
}

impl ImportNames {
    /// Create the table with the built-in entries.
    pub fn new() -> Self {
        Self {
            names: DEFAULT_IMPORT_NAMES
                .iter()
                .map(|(dist, module)| (dist.to_string(), module.to_string()))
                .collect(),
        }
    }

    /// Add or override entries.
    pub fn with_entries<I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.names
            .extend(entries.into_iter().map(|(k, v)| (k.to_ascii_lowercase(), v)));
        self
    }

    /// Module name for `distribution`.
    ///
    /// Falls back to the distribution name with `-` replaced by `_`.
    pub fn module_for(&self, distribution: &str) -> String {
        self.names
            .get(distribution)
            .or_else(|| self.names.get(&distribution.to_ascii_lowercase()))
            .cloned()
            .unwrap_or_else(|| distribution.replace('-', "_"))
    }
}

impl Default for ImportNames {
    fn default() -> Self {
        Self::new()
    }
}
