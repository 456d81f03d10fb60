//! Configuration validation rules.
//!
//! - `max_attempts` and `index.timeout_secs` must be at least 1
//! - The index URL must be http or https
//! - Table entries must name valid distributions

use crate::config::schema::PyensureConfig;
use crate::error::{PyensureError, Result};
use crate::install::is_valid_distribution_name;

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    fn new(rule: &str, message: String) -> Self {
        Self {
            rule: rule.to_string(),
            message,
        }
    }
}

/// Validate a configuration and return all errors.
pub fn validate_config(config: &PyensureConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    errors.extend(validate_settings(config));
    errors.extend(validate_index(config));
    errors.extend(validate_tables(config));

    errors
}

fn validate_settings(config: &PyensureConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.settings.max_attempts == 0 {
        errors.push(ValidationError::new(
            "max-attempts",
            "settings.max_attempts must be at least 1".to_string(),
        ));
    }

    if let Some(python) = &config.settings.python {
        if python.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "python-path",
                "settings.python must not be empty".to_string(),
            ));
        }
    }

    errors
}

fn validate_index(config: &PyensureConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.index.timeout_secs == 0 {
        errors.push(ValidationError::new(
            "index-timeout",
            "index.timeout_secs must be at least 1".to_string(),
        ));
    }

    let url = &config.index.url;
    if !url.starts_with("http://") && !url.starts_with("https://") {
        errors.push(ValidationError::new(
            "index-url",
            format!("index.url '{}' must start with http:// or https://", url),
        ));
    }

    errors
}

fn validate_tables(config: &PyensureConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (import, dist) in &config.aliases {
        if !is_valid_distribution_name(dist) {
            errors.push(ValidationError::new(
                "invalid-alias",
                format!("Alias '{}' maps to invalid distribution name '{}'", import, dist),
            ));
        }
    }

    for dist in config.import_names.keys() {
        if !is_valid_distribution_name(dist) {
            errors.push(ValidationError::new(
                "invalid-import-name",
                format!("import_names key '{}' is not a valid distribution name", dist),
            ));
        }
    }

    for (dist, deps) in &config.common_dependencies {
        for name in std::iter::once(dist).chain(deps) {
            if !is_valid_distribution_name(name) {
                errors.push(ValidationError::new(
                    "invalid-dependency",
                    format!(
                        "common_dependencies entry for '{}' has invalid distribution name '{}'",
                        dist, name
                    ),
                ));
            }
        }
    }

    errors
}

/// Validate and return Result (for convenience).
///
/// # Errors
///
/// Returns `ConfigValidationError` if any validation rules fail.
pub fn validate(config: &PyensureConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(PyensureError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}
