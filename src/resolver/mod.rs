//! Name resolution.
//!
//! Turns the name a piece of code imports into the name a package index
//! publishes it under, and recognises typing-vocabulary names that must
//! never be installed.
//!
//! # Modules
//!
//! - [`tables`] - Built-in alias, type-hint, stdlib and dependency tables
//! - [`index`] - Package index client
//! - [`import_names`] - Which module verifies a distribution
//! - [`resolve`] - The resolver itself
//!
//! # Example
//!
//! ```
//! use pyensure::resolver::{NameResolver, Resolution};
//!
//! let resolver = NameResolver::new();
//! assert_eq!(resolver.resolve("sklearn"), Resolution::Package("scikit-learn".into()));
//! assert!(resolver.resolve("Optional").is_type_hint());
//! ```

pub mod import_names;
pub mod index;
pub mod resolve;
pub mod tables;

pub use import_names::ImportNames;
pub use index::{
    first_search_result, HttpIndex, PackageIndex, DEFAULT_INDEX_TIMEOUT, DEFAULT_INDEX_URL,
};
pub use resolve::{NameResolver, Resolution};
pub use tables::{is_known_stdlib, is_type_hint_name, TYPE_HINT_NAMES};
