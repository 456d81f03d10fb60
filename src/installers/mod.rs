//! Installer registry.
//!
//! Finds which package-installation backends the host can run and ranks them:
//! uv first, then `pip`, then `pip3`, then `python -m pip`, which is expected
//! to exist in any working Python installation.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use pyensure::installers::{discover, select_preferred, InstallerKind};
//! use pyensure::python::PythonRuntime;
//! use pyensure::shell::MockRunner;
//!
//! let runner = Rc::new(MockRunner::new().with_program("pip", "/usr/bin/pip"));
//! let python = PythonRuntime::discover(runner.clone(), None);
//!
//! let installers = discover(runner.as_ref(), &python);
//! let preferred = select_preferred(&installers);
//! assert_eq!(preferred.descriptor().map(|d| d.kind), Some(InstallerKind::PipCmd));
//! ```

pub mod registry;

pub use registry::{
    discover, select_preferred, InstallerDescriptor, InstallerKind, PreferredInstaller,
};
