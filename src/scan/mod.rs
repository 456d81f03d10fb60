//! Dependency scanning.
//!
//! - [`imports`] - Pulls module names out of import statements
//! - [`scanner`] - Filters, resolves and expands them into distributions

pub mod imports;
pub mod scanner;

pub use imports::{extract_imports, ImportedNames};
pub use scanner::DependencyScanner;
