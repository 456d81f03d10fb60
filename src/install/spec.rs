//! Package specifications.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{PyensureError, Result};

/// Distribution names as the package index accepts them.
static DISTRIBUTION_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?$")
        .expect("DISTRIBUTION_NAME must compile")
});

/// Exact versions accepted after `==`.
static VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9.*+!_-]*$").expect("VERSION must compile")
});

/// Whether `name` is a syntactically valid distribution name.
pub fn is_valid_distribution_name(name: &str) -> bool {
    DISTRIBUTION_NAME.is_match(name)
}

/// A distribution name with an optional exact version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageSpec {
    /// Distribution name.
    pub name: String,
    /// Exact version, rendered as `name==version`.
    pub version: Option<String>,
}

impl PackageSpec {
    /// Spec for any version.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
        }
    }

    /// Spec pinned to an exact version.
    pub fn with_version(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: Some(version.into()),
        }
    }

    /// Reject anything an installer could read as a flag or a second argument.
    pub fn validate(&self) -> Result<()> {
        if !is_valid_distribution_name(&self.name) {
            return Err(PyensureError::InvalidPackageSpec {
                spec: self.to_string(),
                reason: "not a valid distribution name".to_string(),
            });
        }
        if let Some(version) = &self.version {
            if !VERSION.is_match(version) {
                return Err(PyensureError::InvalidPackageSpec {
                    spec: self.to_string(),
                    reason: format!("'{}' is not a valid version", version),
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for PackageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}=={}", self.name, version),
            None => f.write_str(&self.name),
        }
    }
}
