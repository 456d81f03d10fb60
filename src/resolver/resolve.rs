//! Import name to distribution name resolution.

use std::collections::HashMap;

use crate::install::is_valid_distribution_name;

use super::index::PackageIndex;
use super::tables::{is_type_hint_name, DEFAULT_ALIASES};

/// Outcome of resolving a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A typing-vocabulary name; must never be installed.
    TypeHint(String),
    /// An installable distribution name.
    Package(String),
}

impl Resolution {
    /// The distribution name, unless this is a type hint.
    pub fn package(&self) -> Option<&str> {
        match self {
            Resolution::Package(name) => Some(name),
            Resolution::TypeHint(_) => None,
        }
    }

    /// Whether this resolution is the "not a package" sentinel.
    pub fn is_type_hint(&self) -> bool {
        matches!(self, Resolution::TypeHint(_))
    }
}

/// Maps import names to installable distribution names.
pub struct NameResolver {
    aliases: HashMap<String, String>,
    index: Option<Box<dyn PackageIndex>>,
    search_fallback: bool,
}

impl NameResolver {
    /// Create a resolver with the built-in alias table and no index.
    pub fn new() -> Self {
        Self {
            aliases: DEFAULT_ALIASES
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            index: None,
            search_fallback: false,
        }
    }

    /// Consult `index` for names the alias table does not know.
    pub fn with_index(mut self, index: Box<dyn PackageIndex>) -> Self {
        self.index = Some(index);
        self
    }

    /// Also take the first index search hit when the exact lookup misses.
    pub fn with_search_fallback(mut self, enabled: bool) -> Self {
        self.search_fallback = enabled;
        self
    }

    /// Add or override aliases.
    pub fn with_aliases<I>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.aliases.extend(aliases);
        self
    }

    /// Whether an index is configured.
    pub fn has_index(&self) -> bool {
        self.index.is_some()
    }

    /// Whether `name` is a typing-vocabulary name.
    pub fn is_type_hint(&self, name: &str) -> bool {
        is_type_hint_name(name)
    }

    /// Alias table lookup: exact key first, then lowercase.
    pub fn alias(&self, name: &str) -> Option<&str> {
        self.aliases
            .get(name)
            .or_else(|| self.aliases.get(&name.to_ascii_lowercase()))
            .map(String::as_str)
    }

    /// Resolve `name` to a distribution name.
    ///
    /// Always terminates with an answer; index failures only degrade the
    /// result to the original name.
    pub fn resolve(&self, name: &str) -> Resolution {
        if self.is_type_hint(name) {
            tracing::info!(
                "'{}' is a typing name; import it from typing instead of installing it",
                name
            );
            return Resolution::TypeHint(name.to_string());
        }

        if let Some(mapped) = self.alias(name) {
            if mapped != name {
                tracing::info!("Normalized package name: {} -> {}", name, mapped);
            }
            return Resolution::Package(mapped.to_string());
        }

        if let Some(found) = self.lookup_index(name) {
            return Resolution::Package(found);
        }

        Resolution::Package(name.to_string())
    }

    fn lookup_index(&self, name: &str) -> Option<String> {
        let index = self.index.as_ref()?;
        if !is_valid_distribution_name(name) {
            return None;
        }

        match index.exists(name) {
            Ok(true) => return Some(name.to_string()),
            Ok(false) => tracing::debug!("Index has no distribution named '{}'", name),
            Err(e) => tracing::debug!("Index lookup for '{}' failed: {:#}", name, e),
        }

        if !self.search_fallback {
            return None;
        }

        match index.search_first(name) {
            Ok(Some(hit)) if is_valid_distribution_name(&hit) => {
                tracing::info!("Index search mapped {} -> {}", name, hit);
                Some(hit)
            }
            Ok(_) => None,
            Err(e) => {
                tracing::debug!("Index search for '{}' failed: {:#}", name, e);
                None
            }
        }
    }
}

impl Default for NameResolver {
    fn default() -> Self {
        Self::new()
    }
}
