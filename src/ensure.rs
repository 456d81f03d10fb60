//! Making sure code's dependencies are installed.
//!
//! [`DependencyManager::ensure_dependencies`] scans a piece of code, skips
//! what is already importable and installs the rest, collecting every failure
//! instead of stopping at the first one.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::install::{InstallExecutor, PackageSpec};
use crate::resolver::TYPE_HINT_NAMES;
use crate::scan::DependencyScanner;

static TYPING_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(?:from\s+typing\s+import\b|import\s+typing\b)")
        .expect("TYPING_IMPORT must compile")
});

static TYPE_HINT_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b(?:{})\b", TYPE_HINT_NAMES.join("|")))
        .expect("TYPE_HINT_WORD must compile")
});

/// Prepend `from typing import ...` when code uses typing names without
/// importing `typing` at all.
///
/// Returns `None` when nothing needs patching.
pub fn patch_missing_typing_import(code: &str) -> Option<String> {
    if TYPING_IMPORT.is_match(code) {
        return None;
    }

    let used: BTreeSet<&str> = TYPE_HINT_WORD
        .find_iter(code)
        .map(|m| m.as_str())
        .collect();
    if used.is_empty() {
        return None;
    }

    let names: Vec<&str> = used.into_iter().collect();
    tracing::info!("Adding missing typing import for: {}", names.join(", "));
    Some(format!("from typing import {}\n{}", names.join(", "), code))
}

/// A dependency that could not be satisfied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedDependency {
    pub package: String,
    pub reason: String,
}

/// Outcome of [`DependencyManager::ensure_dependencies`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencyReport {
    /// Importable now, whether installed by this run or already present.
    pub satisfied: Vec<String>,
    /// Could not be installed.
    pub failed: Vec<FailedDependency>,
    /// The code with a typing import added, when one was missing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patched_code: Option<String>,
}

impl DependencyReport {
    /// Whether every dependency is satisfied.
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }

    /// Satisfied dependencies.
    pub fn installed(&self) -> &[String] {
        &self.satisfied
    }

    /// One `Failed to install <pkg>: <reason>` line per failure.
    pub fn errors(&self) -> Vec<String> {
        self.failed
            .iter()
            .map(|f| format!("Failed to install {}: {}", f.package, f.reason))
            .collect()
    }
}

/// Scans code and installs what it needs.
pub struct DependencyManager {
    scanner: DependencyScanner,
    executor: InstallExecutor,
}

impl DependencyManager {
    pub fn new(scanner: DependencyScanner, executor: InstallExecutor) -> Self {
        Self { scanner, executor }
    }

    pub fn scanner(&self) -> &DependencyScanner {
        &self.scanner
    }

    pub fn executor(&self) -> &InstallExecutor {
        &self.executor
    }

    pub fn executor_mut(&mut self) -> &mut InstallExecutor {
        &mut self.executor
    }

    /// Distributions `code` needs, without installing anything.
    pub fn find_dependencies(&self, code: &str) -> Vec<String> {
        self.scanner.scan(code)
    }

    /// Make every third-party dependency of `code` importable.
    pub fn ensure_dependencies(&mut self, code: &str) -> DependencyReport {
        let patched_code = patch_missing_typing_import(code);
        let candidates = self
            .scanner
            .scan(patched_code.as_deref().unwrap_or(code));

        let mut report = DependencyReport {
            patched_code,
            ..Default::default()
        };

        for package in candidates {
            if self.executor.is_installed(&package) {
                tracing::debug!("{} is already installed", package);
                report.satisfied.push(package);
                continue;
            }

            match self.executor.install(&PackageSpec::new(package.as_str())) {
                Ok(success) => {
                    tracing::info!("{}", success.message);
                    report.satisfied.push(package);
                }
                Err(e) => report.failed.push(FailedDependency {
                    package,
                    reason: e.to_string(),
                }),
            }
        }

        if !report.all_succeeded() {
            tracing::warn!(
                "Some dependencies failed to install: {}",
                report.errors().join("; ")
            );
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::install::ExecutorOptions;
    use crate::installers::{discover, select_preferred};
    use crate::python::{import_probe_suffix, PythonRuntime};
    use crate::resolver::{ImportNames, NameResolver};
    use crate::shell::MockRunner;
    use std::rc::Rc;
    use std::time::Duration;

    fn manager(runner: &Rc<MockRunner>) -> DependencyManager {
        let python = PythonRuntime::discover(runner.clone(), None);
        let preferred = select_preferred(&discover(runner.as_ref(), &python));
        let executor = InstallExecutor::new(
            python.clone(),
            preferred,
            ImportNames::new(),
            ExecutorOptions {
                max_attempts: 2,
                settle_delay: Duration::ZERO,
            },
        );
        DependencyManager::new(
            DependencyScanner::new(python, NameResolver::new()),
            executor,
        )
    }

    fn env() -> Rc<MockRunner> {
        Rc::new(
            MockRunner::new()
                .with_program("pip", "/mock/bin/pip")
                .with_program("python3", "/mock/bin/python3"),
        )
    }

    #[test]
    fn patch_adds_single_sorted_import() {
        let patched = patch_missing_typing_import("def f(x: Optional[Dict]) -> List: ...").unwrap();
        assert!(patched.starts_with("from typing import Dict, List, Optional\n"));
    }

    #[test]
    fn patch_skips_code_that_imports_typing() {
        assert!(patch_missing_typing_import("from typing import Dict\nx: Dict = {}").is_none());
        assert!(patch_missing_typing_import("import typing\nx: List = []").is_none());
        assert!(patch_missing_typing_import("x = 1").is_none());
    }

    #[test]
    fn patch_matches_whole_words_only() {
        assert!(patch_missing_typing_import("Anything = Settings()").is_none());
    }

    #[test]
    fn pure_stdlib_code_needs_nothing() {
        let runner = env();
        let mut manager = manager(&runner);
        runner.clear_calls();

        let report = manager.ensure_dependencies("import os\nimport sys");
        assert!(report.all_succeeded());
        assert!(report.installed().is_empty());
        assert!(report.errors().is_empty());
        assert!(runner.install_calls().is_empty());
    }

    #[test]
    fn importable_packages_are_not_reinstalled() {
        let runner = env();
        runner.on(&import_probe_suffix("requests"), 0, "");
        let mut manager = manager(&runner);

        let report = manager.ensure_dependencies("import requests");
        assert_eq!(report.installed(), ["requests".to_string()]);
        assert!(runner.install_calls().is_empty());
    }

    #[test]
    fn missing_packages_are_installed() {
        let runner = env();
        runner.on("/mock/bin/pip install requests", 0, "");
        runner.on_once(&import_probe_suffix("requests"), 1, "");
        runner.on(&import_probe_suffix("requests"), 0, "");
        let mut manager = manager(&runner);

        let report = manager.ensure_dependencies("import requests");
        assert!(report.all_succeeded());
        assert_eq!(
            runner.install_calls(),
            vec!["/mock/bin/pip install requests"]
        );
    }

    #[test]
    fn failures_accumulate() {
        let runner = env();
        runner.on(&import_probe_suffix("numpy"), 0, "");
        let mut manager = manager(&runner);

        let report =
            manager.ensure_dependencies("import numpy\nimport nosuchthing\nimport alsomissing");
        assert_eq!(report.installed(), ["numpy".to_string()]);
        assert_eq!(report.failed.len(), 2);
        let errors = report.errors();
        assert!(errors[0].starts_with("Failed to install alsomissing: "));
        assert!(errors[1].starts_with("Failed to install nosuchthing: "));
    }

    #[test]
    fn patched_code_is_reported() {
        let runner = env();
        let mut manager = manager(&runner);
        let report = manager.ensure_dependencies("def f() -> Any: ...");
        assert_eq!(
            report.patched_code.as_deref(),
            Some("from typing import Any\ndef f() -> Any: ...")
        );
        assert!(report.all_succeeded());
    }
}
