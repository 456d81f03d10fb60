//! Executable lookup on the search path.
//!
//! Lookup walks `PATH` directly instead of shelling out to `which`.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Ordered list of directories searched for bare program names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    /// The current process's `PATH`.
    pub fn from_env() -> Self {
        Self::parse(std::env::var_os("PATH").as_deref())
    }

    /// Split a `PATH`-style value. `None` gives an empty search path.
    pub fn parse(value: Option<&OsStr>) -> Self {
        let dirs: Vec<PathBuf> = value
            .map(|v| std::env::split_paths(v).collect())
            .unwrap_or_default();
        Self::new(dirs)
    }

    /// First runnable `program` in search order.
    pub fn find(&self, program: &str) -> Option<PathBuf> {
        self.dirs
            .iter()
            .flat_map(|dir| file_names(program).map(move |name| dir.join(name)))
            .find(|candidate| is_runnable(candidate))
    }
}

#[cfg(windows)]
fn file_names(program: &str) -> impl Iterator<Item = String> {
    [format!("{program}.exe"), program.to_string()].into_iter()
}

#[cfg(not(windows))]
fn file_names(program: &str) -> impl Iterator<Item = String> {
    std::iter::once(program.to_string())
}

/// A regular file with an execute bit set.
#[cfg(unix)]
pub fn is_runnable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .is_ok_and(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
}

/// Any regular file; the `.exe` suffix in [`SearchPath::find`] does the rest.
#[cfg(not(unix))]
pub fn is_runnable(path: &Path) -> bool {
    path.is_file()
}
