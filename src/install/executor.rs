//! Package installation with fallbacks and import verification.
//!
//! The executor tries the preferred installer first. When that fails, or the
//! package still cannot be imported afterwards, it walks a fixed fallback
//! chain, then a last-resort `pip3` run, before giving up.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use serde::Serialize;

use crate::error::{PyensureError, Result};
use crate::installers::{InstallerKind, PreferredInstaller};
use crate::python::PythonRuntime;
use crate::resolver::{is_type_hint_name, ImportNames};
use crate::shell::{CommandRunner, CommandSpec};

use super::spec::PackageSpec;

/// Default cap on install attempts per package.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 2;

/// Default pause after a fallback succeeds, before re-checking the import.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(1);

/// Tunables for the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutorOptions {
    /// Attempts allowed per package within this executor's lifetime.
    pub max_attempts: u32,
    /// Pause after a successful fallback run.
    pub settle_delay: Duration,
}

impl Default for ExecutorOptions {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }
}

/// Per-package install attempt counts.
#[derive(Debug, Clone, Default)]
pub struct AttemptCounter {
    counts: HashMap<String, u32>,
}

impl AttemptCounter {
    /// Attempts recorded for `package`.
    pub fn attempts(&self, package: &str) -> u32 {
        self.counts.get(package).copied().unwrap_or(0)
    }

    /// Record one more attempt, returning the new count.
    pub fn record(&mut self, package: &str) -> u32 {
        let count = self.counts.entry(package.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    /// Forget all attempts.
    pub fn clear(&mut self) {
        self.counts.clear();
    }
}

/// How a package ended up installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallMethod {
    /// Nothing to do (typing names).
    AlreadySatisfied,
    /// The preferred installer.
    Preferred(InstallerKind),
    /// `pip install`, resolved by the OS when spawned.
    Pip,
    /// `pip install` via the path found by an explicit PATH search.
    PipResolved,
    /// `uv pip install`.
    UvPip,
    /// `<python> -m pip install`.
    PythonModule,
    /// `pip3 install`, exit status ignored; only success of the final import
    /// check counts. `pip3` rather than `pip`, which the chain has already
    /// tried twice by then. Skipped when `pip3` cannot be located.
    LastResort,
}

impl fmt::Display for InstallMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallMethod::AlreadySatisfied => f.write_str("already-satisfied"),
            InstallMethod::Preferred(kind) => write!(f, "preferred installer ({})", kind),
            InstallMethod::Pip => f.write_str("pip"),
            InstallMethod::PipResolved => f.write_str("pip (resolved path)"),
            InstallMethod::UvPip => f.write_str("uv pip"),
            InstallMethod::PythonModule => f.write_str("python -m pip"),
            InstallMethod::LastResort => f.write_str("pip3 (last resort)"),
        }
    }
}

impl Serialize for InstallMethod {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Fallbacks in the order they are tried.
pub const FALLBACK_CHAIN: [InstallMethod; 4] = [
    InstallMethod::Pip,
    InstallMethod::PipResolved,
    InstallMethod::UvPip,
    InstallMethod::PythonModule,
];

/// A successful install (or a no-op for typing names).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallSuccess {
    /// Distribution name.
    pub package: String,
    /// What was passed to the installer.
    pub spec: String,
    /// Which method worked.
    pub method: InstallMethod,
    /// Human-readable summary.
    pub message: String,
}

/// What happened across the methods tried for one install.
#[derive(Debug, Default)]
struct ChainState {
    tried: Vec<String>,
    exited_zero: bool,
}

impl ChainState {
    fn ran(&mut self, method: InstallMethod) {
        self.tried.push(method.to_string());
    }
}

/// Installs packages and verifies them by importing.
pub struct InstallExecutor {
    runner: Rc<dyn CommandRunner>,
    python: PythonRuntime,
    preferred: PreferredInstaller,
    import_names: ImportNames,
    attempts: AttemptCounter,
    options: ExecutorOptions,
}

impl InstallExecutor {
    /// Create an executor for `python`'s environment.
    pub fn new(
        python: PythonRuntime,
        preferred: PreferredInstaller,
        import_names: ImportNames,
        options: ExecutorOptions,
    ) -> Self {
        Self {
            runner: python.runner().clone(),
            python,
            preferred,
            import_names,
            attempts: AttemptCounter::default(),
            options,
        }
    }

    /// The installer used for primary installs.
    pub fn preferred(&self) -> &PreferredInstaller {
        &self.preferred
    }

    /// Attempts recorded so far.
    pub fn attempts(&self) -> &AttemptCounter {
        &self.attempts
    }

    /// Executor settings.
    pub fn options(&self) -> &ExecutorOptions {
        &self.options
    }

    /// Module imported to verify `distribution`.
    pub fn import_name(&self, distribution: &str) -> String {
        self.import_names.module_for(distribution)
    }

    /// Whether `distribution` can already be imported.
    pub fn is_installed(&self, distribution: &str) -> bool {
        self.python.can_import(&self.import_name(distribution))
    }

    /// The interpreter installs are verified against.
    pub fn python(&self) -> &PythonRuntime {
        &self.python
    }

    /// Install one package and verify it imports.
    pub fn install(&mut self, spec: &PackageSpec) -> Result<InstallSuccess> {
        if is_type_hint_name(&spec.name) {
            tracing::info!(
                "'{}' is a typing name; import it from typing directly",
                spec.name
            );
            return Ok(InstallSuccess {
                package: spec.name.clone(),
                spec: spec.to_string(),
                method: InstallMethod::AlreadySatisfied,
                message: format!(
                    "'{}' is a Python type hint from typing module. No installation needed.",
                    spec.name
                ),
            });
        }

        spec.validate()?;

        if self.attempts.attempts(&spec.name) >= self.options.max_attempts {
            return Err(PyensureError::MaxAttemptsReached {
                package: spec.to_string(),
                attempts: self.options.max_attempts,
            });
        }
        let attempt = self.attempts.record(&spec.name);
        tracing::info!("Installing package: {} (attempt {})", spec, attempt);

        let module = self.import_names.module_for(&spec.name);
        let mut state = ChainState::default();

        if let Some(success) = self.try_preferred(spec, &module, &mut state) {
            return Ok(success);
        }

        for method in FALLBACK_CHAIN {
            if let Some(success) = self.try_fallback(method, spec, &module, &mut state) {
                return Ok(success);
            }
        }

        if let Some(success) = self.try_last_resort(spec, &module, &mut state) {
            return Ok(success);
        }

        Err(self.classify_failure(spec, module, state))
    }

    fn try_preferred(
        &self,
        spec: &PackageSpec,
        module: &str,
        state: &mut ChainState,
    ) -> Option<InstallSuccess> {
        let Some(descriptor) = self.preferred.descriptor() else {
            tracing::debug!("No preferred installer; trying fallbacks");
            return None;
        };

        let method = InstallMethod::Preferred(descriptor.kind);
        let cmd = descriptor.command_for(spec);
        tracing::debug!("Running command: {}", cmd);

        match self.runner.run(&cmd) {
            Ok(result) if result.success => {
                state.ran(method);
                state.exited_zero = true;
                if self.python.can_import(module) {
                    return Some(success(spec, method, result.stdout.trim()));
                }
                tracing::warn!(
                    "{} installed but 'import {}' failed",
                    spec,
                    module
                );
            }
            Ok(result) => {
                state.ran(method);
                tracing::warn!(
                    "Installation failed with {}: {}",
                    descriptor.kind,
                    result.stderr.trim()
                );
            }
            Err(e) => tracing::warn!("Could not run {}: {}", descriptor.kind, e),
        }
        None
    }

    fn try_fallback(
        &self,
        method: InstallMethod,
        spec: &PackageSpec,
        module: &str,
        state: &mut ChainState,
    ) -> Option<InstallSuccess> {
        let Some(cmd) = self.fallback_command(method, spec) else {
            tracing::debug!("Skipping fallback {}: executable not found", method);
            return None;
        };

        tracing::info!("Trying fallback: {}", cmd);
        let result = match self.runner.run(&cmd) {
            Ok(result) => result,
            Err(e) => {
                tracing::debug!("Skipping fallback {}: {}", method, e);
                return None;
            }
        };
        state.ran(method);

        if !result.success {
            tracing::debug!(
                "Fallback {} exited with {:?}: {}",
                method,
                result.exit_code,
                result.stderr.trim()
            );
            return None;
        }

        state.exited_zero = true;
        self.settle();
        if self.python.can_import(module) {
            return Some(success(spec, method, ""));
        }
        tracing::warn!("Fallback {} installed {} but import failed", method, spec);
        None
    }

    fn try_last_resort(
        &self,
        spec: &PackageSpec,
        module: &str,
        state: &mut ChainState,
    ) -> Option<InstallSuccess> {
        if let Some(pip3) = self.runner.locate("pip3") {
            let cmd = CommandSpec::new(pip3).args(["install".to_string(), spec.to_string()]);
            tracing::info!("Last resort: {}", cmd);
            if let Ok(result) = self.runner.run(&cmd) {
                state.ran(InstallMethod::LastResort);
                state.exited_zero |= result.success;
            }
        }

        self.python
            .can_import(module)
            .then(|| success(spec, InstallMethod::LastResort, ""))
    }

    fn fallback_command(&self, method: InstallMethod, spec: &PackageSpec) -> Option<CommandSpec> {
        let spec = spec.to_string();
        match method {
            InstallMethod::Pip => Some(CommandSpec::new("pip").args(["install".to_string(), spec])),
            InstallMethod::PipResolved => self
                .runner
                .locate("pip")
                .map(|pip| CommandSpec::new(pip).args(["install".to_string(), spec])),
            InstallMethod::UvPip => self.runner.locate("uv").map(|uv| {
                CommandSpec::new(uv).args(["pip".to_string(), "install".to_string(), spec])
            }),
            InstallMethod::PythonModule => Some(self.python.command([
                "-m".to_string(),
                "pip".to_string(),
                "install".to_string(),
                spec,
            ])),
            InstallMethod::AlreadySatisfied
            | InstallMethod::Preferred(_)
            | InstallMethod::LastResort => None,
        }
    }

    fn settle(&self) {
        if !self.options.settle_delay.is_zero() {
            std::thread::sleep(self.options.settle_delay);
        }
    }

    fn classify_failure(
        &self,
        spec: &PackageSpec,
        module: String,
        state: ChainState,
    ) -> PyensureError {
        if state.exited_zero {
            PyensureError::ImportFailed {
                package: spec.to_string(),
                module,
            }
        } else if state.tried.is_empty() {
            PyensureError::NoInstallerAvailable {
                package: spec.to_string(),
                message: format!(
                    "{} No fallback installer could be started.",
                    self.preferred.message()
                ),
            }
        } else {
            PyensureError::AllMethodsFailed {
                package: spec.to_string(),
                methods: state.tried.join(", "),
            }
        }
    }
}

fn success(spec: &PackageSpec, method: InstallMethod, output: &str) -> InstallSuccess {
    let mut message = format!("Successfully installed {} via {}", spec, method);
    if !output.is_empty() {
        message.push('\n');
        message.push_str(output);
    }
    InstallSuccess {
        package: spec.name.clone(),
        spec: spec.to_string(),
        method,
        message,
    }
}
