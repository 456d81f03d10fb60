//! Reading Python source for `find-deps` and `ensure`.

use std::io::Read;
use std::path::Path;

use crate::error::Result;

/// Read source from `path`, or stdin when `path` is `None` or `-`.
pub fn read_source(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => {
            tracing::debug!("Reading source from {}", path.display());
            Ok(std::fs::read_to_string(path)?)
        }
        _ => read_from(std::io::stdin().lock()),
    }
}

fn read_from(mut reader: impl Read) -> Result<String> {
    let mut code = String::new();
    reader.read_to_string(&mut code)?;
    Ok(code)
}
