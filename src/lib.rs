//! pyensure - Make sure a piece of Python code can import what it needs.
//!
//! pyensure scans Python source for imports, maps import names to the
//! distributions that provide them, and installs whatever is missing using
//! the best installer the environment offers, falling back through the
//! others when that fails. Every install is verified by importing the
//! module in the target interpreter.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, merging, and validation
//! - [`ensure`] - Scan-then-install orchestration
//! - [`error`] - Error types and result aliases
//! - [`install`] - Package specs and the installation executor
//! - [`installers`] - Installer discovery and ranking
//! - [`python`] - Probing the target Python interpreter
//! - [`resolver`] - Import name to distribution name resolution
//! - [`scan`] - Import extraction and dependency scanning
//! - [`shell`] - Process execution
//! - [`tool`] - Command-style entry point returning uniform results
//! - [`ui`] - Spinners and terminal output
//!
//! # Example
//!
//! ```
//! use pyensure::scan::extract_imports;
//!
//! let imports = extract_imports("import numpy as np\nfrom os import path\n");
//! assert!(imports.modules.contains("numpy"));
//! assert!(imports.modules.contains("os"));
//! ```

pub mod cli;
pub mod config;
pub mod ensure;
pub mod error;
pub mod install;
pub mod installers;
pub mod python;
pub mod resolver;
pub mod scan;
pub mod shell;
pub mod tool;
pub mod ui;

pub use error::{PyensureError, Result};
