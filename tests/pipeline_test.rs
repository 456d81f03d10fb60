//! End-to-end tests of scanning, resolving and installing through the
//! public library API, against a scripted process runner and an in-memory
//! package index.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;
use std::time::Duration;

use pyensure::ensure::DependencyManager;
use pyensure::install::{ExecutorOptions, InstallExecutor, PackageSpec};
use pyensure::installers::{discover, select_preferred};
use pyensure::python::{import_probe_suffix, version_probe_suffix, PythonRuntime};
use pyensure::resolver::{ImportNames, NameResolver, PackageIndex, Resolution, TYPE_HINT_NAMES};
use pyensure::scan::DependencyScanner;
use pyensure::shell::MockRunner;
use pyensure::tool::{PackageTool, ToolParams};
use pyensure::PyensureError;
use serde_json::json;

/// Index that knows a fixed set of distributions and records lookups.
#[derive(Default)]
struct StubIndex {
    known: BTreeSet<String>,
    lookups: Rc<RefCell<Vec<String>>>,
}

impl StubIndex {
    fn with(names: &[&str]) -> Self {
        Self {
            known: names.iter().map(|n| n.to_string()).collect(),
            lookups: Rc::default(),
        }
    }
}

impl PackageIndex for StubIndex {
    fn exists(&self, name: &str) -> anyhow::Result<bool> {
        self.lookups.borrow_mut().push(name.to_string());
        Ok(self.known.contains(name))
    }

    fn search_first(&self, _query: &str) -> anyhow::Result<Option<String>> {
        Ok(None)
    }
}

/// uv, pip and `python3 -m pip` all present.
fn full_env() -> Rc<MockRunner> {
    let runner = Rc::new(
        MockRunner::new()
            .with_program("uv", "/mock/bin/uv")
            .with_program("pip", "/mock/bin/pip")
            .with_program("python3", "/mock/bin/python3"),
    );
    runner.on("-m pip --version", 0, "pip 24.0");
    runner
}

fn build_tool(runner: &Rc<MockRunner>, index: StubIndex) -> PackageTool {
    let python = PythonRuntime::discover(runner.clone(), None);
    let installers = discover(runner.as_ref(), &python);
    let preferred = select_preferred(&installers);

    let resolver = NameResolver::new().with_index(Box::new(index));
    let scanner = DependencyScanner::new(python.clone(), resolver);
    let executor = InstallExecutor::new(
        python,
        preferred,
        ImportNames::new(),
        ExecutorOptions {
            max_attempts: 2,
            settle_delay: Duration::ZERO,
        },
    );

    runner.clear_calls();
    PackageTool::new(DependencyManager::new(scanner, executor), installers)
}

#[test]
fn typing_names_are_never_installed() {
    let runner = full_env();
    let mut tool = build_tool(&runner, StubIndex::default());

    for name in TYPE_HINT_NAMES {
        let resolution = tool.manager().scanner().resolver().resolve(name);
        assert!(resolution.is_type_hint());
        let result = tool.execute("install", &ToolParams::package(*name));
        assert!(result.success, "{}: {:?}", name, result.error);
    }
    assert!(runner.calls().is_empty());
}

#[test]
fn well_known_aliases_skip_the_index() {
    let index = StubIndex::with(&["bs4", "sklearn", "cv2"]);
    let lookups = index.lookups.clone();
    let resolver = NameResolver::new().with_index(Box::new(index));

    assert_eq!(
        resolver.resolve("bs4"),
        Resolution::Package("beautifulsoup4".into())
    );
    assert_eq!(
        resolver.resolve("sklearn"),
        Resolution::Package("scikit-learn".into())
    );
    assert_eq!(
        resolver.resolve("cv2"),
        Resolution::Package("opencv-python".into())
    );
    assert!(lookups.borrow().is_empty());
}

#[test]
fn unknown_names_consult_the_index() {
    let index = StubIndex::with(&["requests"]);
    let lookups = index.lookups.clone();
    let resolver = NameResolver::new().with_index(Box::new(index));

    assert_eq!(resolver.resolve("requests").package(), Some("requests"));
    assert_eq!(resolver.resolve("in_house").package(), Some("in_house"));
    assert_eq!(*lookups.borrow(), vec!["requests", "in_house"]);
}

#[test]
fn check_twice_gives_same_answer() {
    let runner = full_env();
    runner.on(&import_probe_suffix("requests"), 0, "");
    runner.on(&version_probe_suffix("requests"), 0, "2.31.0\n");
    let mut tool = build_tool(&runner, StubIndex::default());

    let params = ToolParams::package("requests");
    let first = tool.execute("check", &params);
    let second = tool.execute("check", &params);

    assert_eq!(
        first.result,
        json!({"installed": true, "version": "2.31.0"})
    );
    assert_eq!(first, second);
    assert!(runner.install_calls().is_empty());
}

#[test]
fn scan_keeps_only_third_party_imports() {
    let runner = full_env();
    let tool = build_tool(&runner, StubIndex::with(&["pandas"]));

    let deps = tool
        .manager()
        .find_dependencies("from typing import Dict, List\nimport os\nimport pandas");
    assert_eq!(deps, vec!["pandas"]);
}

#[test]
fn third_install_attempt_spawns_nothing() {
    let runner = full_env();
    let mut tool = build_tool(&runner, StubIndex::default());
    let params = ToolParams::package("ghost");

    assert!(!tool.execute("install", &params).success);
    assert!(!tool.execute("install", &params).success);

    runner.clear_calls();
    let third = tool.execute("install", &params);
    assert!(!third.success);
    assert!(third.error.unwrap().contains("Max install attempts reached for ghost"));
    assert!(runner.calls().is_empty());
}

#[test]
fn failing_preferred_installer_falls_back_in_order() {
    let runner = full_env();
    let mut tool = build_tool(&runner, StubIndex::default());

    let err = tool
        .manager_mut()
        .executor_mut()
        .install(&PackageSpec::new("broken"))
        .unwrap_err();

    assert!(matches!(err, PyensureError::AllMethodsFailed { .. }));
    assert_eq!(
        runner.install_calls(),
        vec![
            "/mock/bin/uv pip install broken",
            "pip install broken",
            "/mock/bin/pip install broken",
            "/mock/bin/uv pip install broken",
            "/mock/bin/python3 -m pip install broken",
        ]
    );
}

#[test]
fn matplotlib_and_numpy_deduplicated() {
    let runner = full_env();
    let mut tool = build_tool(&runner, StubIndex::with(&["matplotlib", "numpy"]));

    let result = tool.execute(
        "find_dependencies",
        &ToolParams::code("import matplotlib.pyplot as plt\nimport numpy as np"),
    );
    assert!(result.success);
    assert_eq!(result.result, json!(["matplotlib", "numpy"]));
}

#[test]
fn stdlib_only_code_needs_no_installs() {
    let runner = full_env();
    let mut tool = build_tool(&runner, StubIndex::default());

    let result = tool.execute(
        "ensure_dependencies",
        &ToolParams::code("import os\nimport sys"),
    );

    assert!(result.success);
    assert!(result.error.is_none());
    assert_eq!(result.result["satisfied"], json!([]));
    assert_eq!(result.result["failed"], json!([]));
    assert!(runner.install_calls().is_empty());
}

#[test]
fn ensure_installs_missing_and_reports_failures() {
    let runner = full_env();
    runner.on("/mock/bin/uv pip install requests", 0, "");
    runner.on_once(&import_probe_suffix("requests"), 1, "");
    runner.on(&import_probe_suffix("requests"), 0, "");
    let mut tool = build_tool(&runner, StubIndex::with(&["requests"]));

    let result = tool.execute(
        "ensure_dependencies",
        &ToolParams::code("import requests\nimport not_on_index"),
    );

    assert!(!result.success);
    assert_eq!(result.result["satisfied"], json!(["requests"]));
    assert_eq!(result.result["failed"][0]["package"], "not_on_index");
    assert!(result
        .error
        .unwrap()
        .starts_with("Failed to install not_on_index: "));
}
