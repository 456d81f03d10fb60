//! Command-style entry point over the whole subsystem.
//!
//! [`PackageTool::execute`] takes a command name and loosely-typed parameters
//! and always answers with a [`ToolResult`], so it can sit behind any
//! JSON-speaking caller as well as the CLI.

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::PyensureConfig;
use crate::ensure::DependencyManager;
use crate::error::Result;
use crate::install::{InstallExecutor, PackageSpec};
use crate::installers::{discover, select_preferred, InstallerDescriptor, PreferredInstaller};
use crate::python::PythonRuntime;
use crate::resolver::{HttpIndex, ImportNames, NameResolver, Resolution};
use crate::scan::DependencyScanner;
use crate::shell::CommandRunner;

/// Commands understood by [`PackageTool::execute`].
pub const COMMANDS: &[&str] = &[
    "install",
    "check",
    "list",
    "find_dependencies",
    "ensure_dependencies",
];

/// Parameters for a tool command. Which fields are required depends on
/// the command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ToolParams {
    pub package: Option<String>,
    pub version: Option<String>,
    pub code: Option<String>,
}

impl ToolParams {
    pub fn package(name: impl Into<String>) -> Self {
        Self {
            package: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn code(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            ..Default::default()
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    fn require<'a>(field: &'a Option<String>, name: &str) -> Result<&'a str> {
        field
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("Missing required parameter: {}", name).into())
    }
}

/// Uniform answer from every tool command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolResult {
    pub success: bool,
    pub result: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResult {
    pub fn ok(result: Value) -> Self {
        Self {
            success: true,
            result,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            result: Value::Null,
            error: Some(error.into()),
        }
    }
}

/// Package management tool bound to one Python environment.
pub struct PackageTool {
    manager: DependencyManager,
    installers: Vec<InstallerDescriptor>,
}

impl PackageTool {
    pub fn new(manager: DependencyManager, installers: Vec<InstallerDescriptor>) -> Self {
        Self {
            manager,
            installers,
        }
    }

    /// Wire up every component from configuration.
    ///
    /// Probes the environment for installers once; the result is kept for
    /// the lifetime of the tool.
    pub fn from_config(config: &PyensureConfig, runner: Rc<dyn CommandRunner>) -> Result<Self> {
        let python = PythonRuntime::discover(runner.clone(), config.settings.python.as_deref());
        let installers = discover(runner.as_ref(), &python);
        let preferred = select_preferred(&installers);
        tracing::debug!("{}", preferred.message());

        let mut resolver = NameResolver::new()
            .with_aliases(config.aliases.clone())
            .with_search_fallback(config.index.search_fallback);
        if config.index.enabled {
            let index = HttpIndex::with_url(&config.index.url, config.index.timeout())?;
            tracing::debug!(
                url = index.base_url(),
                timeout = ?index.timeout(),
                "Package index enabled"
            );
            resolver = resolver.with_index(Box::new(index));
        }

        let scanner = DependencyScanner::new(python.clone(), resolver)
            .with_common_dependencies(config.common_dependencies.clone());
        let executor = InstallExecutor::new(
            python,
            preferred,
            ImportNames::new().with_entries(config.import_names.clone()),
            config.settings.executor_options(),
        );

        Ok(Self::new(DependencyManager::new(scanner, executor), installers))
    }

    /// Every installer found in the environment.
    pub fn installers(&self) -> &[InstallerDescriptor] {
        &self.installers
    }

    /// The installer used for primary installs.
    pub fn preferred(&self) -> &PreferredInstaller {
        self.manager.executor().preferred()
    }

    pub fn manager(&self) -> &DependencyManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut DependencyManager {
        &mut self.manager
    }

    /// Run a command by name.
    ///
    /// Never fails: unknown commands, missing parameters and unexpected
    /// errors all come back as a failed [`ToolResult`].
    pub fn execute(&mut self, command: &str, params: &ToolParams) -> ToolResult {
        tracing::debug!("Executing tool command: {}", command);
        match self.dispatch(command, params) {
            Ok(result) => result,
            Err(e) => {
                let error = anyhow::Error::from(e);
                tracing::error!("Error executing package command: {:#}", error);
                ToolResult::failure(format!("{:?}", error))
            }
        }
    }

    fn dispatch(&mut self, command: &str, params: &ToolParams) -> Result<ToolResult> {
        match command {
            "install" => {
                let package = ToolParams::require(&params.package, "package")?;
                Ok(self.install(package, params.version.as_deref()))
            }
            "check" => {
                let package = ToolParams::require(&params.package, "package")?;
                Ok(ToolResult::ok(self.check(package)))
            }
            "list" => Ok(ToolResult::ok(self.list()?)),
            "find_dependencies" => {
                let code = ToolParams::require(&params.code, "code")?;
                Ok(ToolResult::ok(json!(self.manager.find_dependencies(code))))
            }
            "ensure_dependencies" => {
                let code = ToolParams::require(&params.code, "code")?;
                self.ensure(code)
            }
            other => Ok(ToolResult::failure(format!("Unknown command: {}", other))),
        }
    }

    /// Install a package by import or distribution name.
    pub fn install(&mut self, package: &str, version: Option<&str>) -> ToolResult {
        let name = match self.manager.scanner().resolver().resolve(package) {
            Resolution::Package(name) => name,
            Resolution::TypeHint(name) => name,
        };
        let spec = match version {
            Some(version) => PackageSpec::with_version(name, version),
            None => PackageSpec::new(name),
        };

        match self.manager.executor_mut().install(&spec) {
            Ok(success) => match serde_json::to_value(&success) {
                Ok(value) => ToolResult::ok(value),
                Err(e) => ToolResult::failure(format!("{:?}", anyhow::Error::from(e))),
            },
            Err(e) => ToolResult::failure(e.to_string()),
        }
    }

    /// `{installed, version?}` for a package, without side effects.
    ///
    /// Accepts import names as well: `bs4` is checked by importing `bs4`
    /// and reported with the version of `beautifulsoup4`.
    pub fn check(&self, package: &str) -> Value {
        let distribution = self
            .manager
            .scanner()
            .resolver()
            .alias(package)
            .unwrap_or(package)
            .to_string();
        let executor = self.manager.executor();

        if !executor.is_installed(&distribution) {
            return json!({ "installed": false });
        }

        let version = executor
            .python()
            .distribution_version(&distribution)
            .unwrap_or_else(|| "unknown".to_string());
        json!({ "installed": true, "version": version })
    }

    /// Installed distributions and their versions.
    pub fn list(&self) -> Result<Value> {
        let packages = self.manager.executor().python().list_distributions()?;
        Ok(json!(packages))
    }

    fn ensure(&mut self, code: &str) -> Result<ToolResult> {
        let report = self.manager.ensure_dependencies(code);
        let errors = report.errors();
        let result = serde_json::to_value(&report).map_err(anyhow::Error::from)?;

        Ok(ToolResult {
            success: report.all_succeeded(),
            result,
            error: (!errors.is_empty()).then(|| errors.join("\n")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::python::{import_probe_suffix, version_probe_suffix, LIST_PROBE};
    use crate::shell::MockRunner;

    fn offline_config() -> PyensureConfig {
        let mut config = PyensureConfig::default();
        config.index.enabled = false;
        config.settings.settle_delay_ms = 0;
        config
    }

    fn tool(runner: &Rc<MockRunner>) -> PackageTool {
        PackageTool::from_config(&offline_config(), runner.clone()).unwrap()
    }

    fn env() -> Rc<MockRunner> {
        Rc::new(
            MockRunner::new()
                .with_program("pip", "/mock/bin/pip")
                .with_program("python3", "/mock/bin/python3"),
        )
    }

    #[test]
    fn unknown_command_is_reported() {
        let runner = env();
        let result = tool(&runner).execute("frobnicate", &ToolParams::default());
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Unknown command: frobnicate"));
    }

    #[test]
    fn missing_parameter_is_named() {
        let runner = env();
        let result = tool(&runner).execute("install", &ToolParams::default());
        assert!(!result.success);
        assert!(result.error.unwrap().contains("Missing required parameter: package"));
    }

    #[test]
    fn check_is_idempotent() {
        let runner = env();
        runner.on(&import_probe_suffix("numpy"), 0, "");
        runner.on(&version_probe_suffix("numpy"), 0, "1.26.4\n");
        let mut tool = tool(&runner);

        let params = ToolParams::package("numpy");
        let first = tool.execute("check", &params);
        let second = tool.execute("check", &params);
        assert_eq!(first, second);
        assert_eq!(
            first.result,
            json!({"installed": true, "version": "1.26.4"})
        );
        assert!(runner.install_calls().is_empty());
    }

    #[test]
    fn check_understands_import_names() {
        let runner = env();
        runner.on(&import_probe_suffix("bs4"), 0, "");
        let mut tool = tool(&runner);

        let result = tool.execute("check", &ToolParams::package("bs4"));
        assert_eq!(
            result.result,
            json!({"installed": true, "version": "unknown"})
        );
        assert!(runner
            .calls()
            .iter()
            .any(|c| c.ends_with(&version_probe_suffix("beautifulsoup4"))));
    }

    #[test]
    fn check_missing_package() {
        let runner = env();
        let result = tool(&runner).execute("check", &ToolParams::package("nothere"));
        assert!(result.success);
        assert_eq!(result.result, json!({"installed": false}));
    }

    #[test]
    fn install_normalizes_alias_and_pins_version() {
        let runner = env();
        runner.on("/mock/bin/pip install scikit-learn==1.4.0", 0, "");
        runner.on(&import_probe_suffix("sklearn"), 0, "");
        let mut tool = tool(&runner);

        let result = tool.execute(
            "install",
            &ToolParams::package("sklearn").with_version("1.4.0"),
        );
        assert!(result.success, "{:?}", result.error);
        assert_eq!(result.result["package"], "scikit-learn");
        assert_eq!(result.result["spec"], "scikit-learn==1.4.0");
    }

    #[test]
    fn install_type_hint_is_a_noop() {
        let runner = env();
        let mut tool = tool(&runner);
        runner.clear_calls();

        let result = tool.execute("install", &ToolParams::package("Optional"));
        assert!(result.success);
        assert_eq!(result.result["method"], "already-satisfied");
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn install_failure_carries_message() {
        let runner = env();
        let result = tool(&runner).execute("install", &ToolParams::package("nosuchpkg"));
        assert!(!result.success);
        assert!(result.error.unwrap().starts_with("Failed to install nosuchpkg"));
    }

    #[test]
    fn list_returns_distribution_map() {
        let runner = env();
        runner.on(LIST_PROBE, 0, r#"{"numpy": "1.26.4"}"#);
        let result = tool(&runner).execute("list", &ToolParams::default());
        assert!(result.success);
        assert_eq!(result.result, json!({"numpy": "1.26.4"}));
    }

    #[test]
    fn list_failure_carries_error_chain() {
        let runner = env();
        runner.on(LIST_PROBE, 0, "garbage");
        let result = tool(&runner).execute("list", &ToolParams::default());
        assert!(!result.success);
        assert!(result.error.unwrap().contains("unexpected distribution listing"));
    }

    #[test]
    fn find_dependencies_expands_common_dependencies() {
        let runner = env();
        let result = tool(&runner).execute(
            "find_dependencies",
            &ToolParams::code("import matplotlib.pyplot as plt\nimport numpy as np"),
        );
        assert!(result.success);
        assert_eq!(result.result, json!(["matplotlib", "numpy"]));
    }

    #[test]
    fn ensure_dependencies_on_stdlib_code() {
        let runner = env();
        let result = tool(&runner).execute(
            "ensure_dependencies",
            &ToolParams::code("import os\nimport sys"),
        );
        assert!(result.success);
        assert!(result.error.is_none());
        assert_eq!(result.result["satisfied"], json!([]));
        assert_eq!(result.result["failed"], json!([]));
    }

    #[test]
    fn params_deserialize_from_json() {
        let params: ToolParams =
            serde_json::from_value(json!({"package": "numpy", "version": "1.26.4"})).unwrap();
        assert_eq!(params, ToolParams::package("numpy").with_version("1.26.4"));
    }
}
