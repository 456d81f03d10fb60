//! Third-party dependency detection.

use std::collections::{BTreeMap, BTreeSet};

use crate::python::{is_stdlib_origin, PythonRuntime};
use crate::resolver::tables::{CANDIDATE_DENYLIST, DEFAULT_COMMON_DEPENDENCIES};
use crate::resolver::{is_known_stdlib, is_type_hint_name, NameResolver, Resolution};

use super::imports::extract_imports;

/// Finds the distributions a piece of Python code needs.
pub struct DependencyScanner {
    python: PythonRuntime,
    resolver: NameResolver,
    common_dependencies: BTreeMap<String, Vec<String>>,
}

impl DependencyScanner {
    /// Create a scanner with the built-in common-dependency table.
    pub fn new(python: PythonRuntime, resolver: NameResolver) -> Self {
        Self {
            python,
            resolver,
            common_dependencies: DEFAULT_COMMON_DEPENDENCIES
                .iter()
                .map(|(dist, deps)| {
                    (
                        dist.to_string(),
                        deps.iter().map(|d| d.to_string()).collect(),
                    )
                })
                .collect(),
        }
    }

    /// Add or replace common-dependency entries.
    pub fn with_common_dependencies<I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        self.common_dependencies.extend(entries);
        self
    }

    /// The resolver used for import names.
    pub fn resolver(&self) -> &NameResolver {
        &self.resolver
    }

    /// Distributions usually needed alongside `distribution`.
    pub fn common_dependencies_of(&self, distribution: &str) -> &[String] {
        self.common_dependencies
            .get(distribution)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether `module` belongs to the standard library.
    ///
    /// Checks the static list first and only asks the interpreter for names
    /// it does not know.
    pub fn is_stdlib(&self, module: &str) -> bool {
        if is_known_stdlib(module) {
            return true;
        }
        match self.python.module_origin(module) {
            Some(origin) => is_stdlib_origin(&origin),
            None => false,
        }
    }

    /// Sorted, deduplicated distribution names `code` depends on.
    pub fn scan(&self, code: &str) -> Vec<String> {
        let imports = extract_imports(code);
        let mut candidates = BTreeSet::new();

        for module in &imports.modules {
            if is_type_hint_name(module)
                || imports.typing_names.contains(module)
                || CANDIDATE_DENYLIST.contains(&module.as_str())
            {
                continue;
            }
            if self.is_stdlib(module) {
                tracing::debug!("Skipping standard library module: {}", module);
                continue;
            }
            match self.resolver.resolve(module) {
                Resolution::Package(name) => {
                    candidates.insert(name);
                }
                Resolution::TypeHint(_) => {}
            }
        }

        let expanded: Vec<String> = candidates
            .iter()
            .flat_map(|name| self.common_dependencies_of(name).iter().cloned())
            .collect();
        candidates.extend(expanded);

        candidates.retain(|name| {
            !CANDIDATE_DENYLIST.contains(&name.as_str()) && !is_type_hint_name(name)
        });

        tracing::debug!("Found dependencies: {:?}", candidates);
        candidates.into_iter().collect()
    }
}
