//! Python interpreter handle.
//!
//! Everything pyensure needs to know about the target environment comes
//! from running the interpreter with a one-line `-c` probe. Module and
//! distribution names are passed as `sys.argv[1]`, never interpolated into
//! the probe source.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Context;

use crate::error::Result;
use crate::shell::{run_check, CommandRunner, CommandSpec};

/// Imports `sys.argv[1]`; exit status is the answer.
pub const IMPORT_PROBE: &str = "import importlib,sys; importlib.import_module(sys.argv[1])";

/// Prints the spec origin of `sys.argv[1]`, or an empty line when not found.
pub const ORIGIN_PROBE: &str = "import importlib.util,sys; s=importlib.util.find_spec(sys.argv[1]); print(s.origin if s and s.origin else '')";

/// Prints the installed version of distribution `sys.argv[1]`.
pub const VERSION_PROBE: &str = "import importlib.metadata as m,sys; print(m.version(sys.argv[1]))";

/// Prints a JSON object of lowercase distribution name to version.
pub const LIST_PROBE: &str = "import importlib.metadata as m,json; print(json.dumps({d.metadata['Name'].lower(): d.version for d in m.distributions() if d.metadata['Name']}))";

/// Interpreter names tried in order when none is configured.
const INTERPRETER_CANDIDATES: &[&str] = &["python3", "python"];

/// Handle to the Python interpreter whose environment is being managed.
#[derive(Clone)]
pub struct PythonRuntime {
    interpreter: PathBuf,
    located: bool,
    runner: Rc<dyn CommandRunner>,
}

impl std::fmt::Debug for PythonRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PythonRuntime")
            .field("interpreter", &self.interpreter)
            .field("located", &self.located)
            .finish()
    }
}

impl PythonRuntime {
    /// Use an explicit interpreter, or look for `python3` then `python`.
    ///
    /// When nothing is found the handle still points at `python3` so that
    /// later probes fail the normal way instead of panicking.
    pub fn discover(runner: Rc<dyn CommandRunner>, configured: Option<&Path>) -> Self {
        if let Some(path) = configured {
            return Self {
                interpreter: path.to_path_buf(),
                located: true,
                runner,
            };
        }

        for name in INTERPRETER_CANDIDATES {
            if let Some(path) = runner.locate(name) {
                tracing::debug!("Using Python interpreter at {}", path.display());
                return Self {
                    interpreter: path,
                    located: true,
                    runner,
                };
            }
        }

        tracing::warn!("No Python interpreter found on PATH; falling back to 'python3'");
        Self {
            interpreter: PathBuf::from(INTERPRETER_CANDIDATES[0]),
            located: false,
            runner,
        }
    }

    /// Path (or bare name) of the interpreter.
    pub fn interpreter(&self) -> &Path {
        &self.interpreter
    }

    /// Whether the interpreter was configured or found on PATH.
    pub fn is_located(&self) -> bool {
        self.located
    }

    /// The runner probes go through.
    pub fn runner(&self) -> &Rc<dyn CommandRunner> {
        &self.runner
    }

    /// Build `<python> <args..>`.
    pub fn command<I, S>(&self, args: I) -> CommandSpec
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandSpec::new(&self.interpreter).args(args)
    }

    fn probe(&self, script: &str, arg: &str) -> CommandSpec {
        self.command(["-c", script, arg])
    }

    /// Whether `import <module>` succeeds in the target environment.
    pub fn can_import(&self, module: &str) -> bool {
        let ok = run_check(self.runner.as_ref(), &self.probe(IMPORT_PROBE, module));
        tracing::debug!("import {} -> {}", module, if ok { "ok" } else { "failed" });
        ok
    }

    /// Where `importlib.util.find_spec` locates `module`, if anywhere.
    pub fn module_origin(&self, module: &str) -> Option<String> {
        let result = self.runner.run(&self.probe(ORIGIN_PROBE, module)).ok()?;
        if !result.success {
            return None;
        }
        let origin = result.stdout.trim();
        (!origin.is_empty()).then(|| origin.to_string())
    }

    /// Installed version of a distribution.
    pub fn distribution_version(&self, distribution: &str) -> Option<String> {
        let result = self
            .runner
            .run(&self.probe(VERSION_PROBE, distribution))
            .ok()?;
        if !result.success {
            return None;
        }
        let version = result.stdout.trim();
        (!version.is_empty()).then(|| version.to_string())
    }

    /// All installed distributions with their versions.
    pub fn list_distributions(&self) -> Result<BTreeMap<String, String>> {
        let cmd = self.command(["-c", LIST_PROBE]);
        let result = self.runner.run(&cmd)?;
        if !result.success {
            return Err(anyhow::anyhow!(
                "listing distributions failed (exit {:?}): {}",
                result.exit_code,
                result.stderr.trim()
            )
            .into());
        }
        let packages = serde_json::from_str(result.stdout.trim())
            .context("interpreter printed an unexpected distribution listing")?;
        Ok(packages)
    }

    /// Whether `python -m pip --version` works.
    pub fn has_pip_module(&self) -> bool {
        run_check(
            self.runner.as_ref(),
            &self.command(["-m", "pip", "--version"]),
        )
    }
}

/// Whether a spec origin points into the standard library.
///
/// Anything found outside `site-packages`/`dist-packages` counts, including
/// `built-in` and `frozen` modules.
pub fn is_stdlib_origin(origin: &str) -> bool {
    !origin.is_empty() && !origin.contains("site-packages") && !origin.contains("dist-packages")
}

/// Command-line suffix of the import probe for `module`.
pub fn import_probe_suffix(module: &str) -> String {
    format!("{} {}", IMPORT_PROBE, module)
}

/// Command-line suffix of the origin probe for `module`.
pub fn origin_probe_suffix(module: &str) -> String {
    format!("{} {}", ORIGIN_PROBE, module)
}

/// Command-line suffix of the version probe for `distribution`.
pub fn version_probe_suffix(distribution: &str) -> String {
    format!("{} {}", VERSION_PROBE, distribution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::MockRunner;

    fn runtime(runner: &Rc<MockRunner>) -> PythonRuntime {
        PythonRuntime::discover(runner.clone(), None)
    }

    #[test]
    fn discover_prefers_configured_interpreter() {
        let runner = Rc::new(MockRunner::new().with_program("python3", "/mock/bin/python3"));
        let py = PythonRuntime::discover(runner, Some(Path::new("/opt/py/bin/python")));
        assert_eq!(py.interpreter(), Path::new("/opt/py/bin/python"));
    }

    #[test]
    fn discover_tries_python3_then_python() {
        let runner = Rc::new(MockRunner::new().with_program("python", "/mock/bin/python"));
        let py = runtime(&runner);
        assert_eq!(py.interpreter(), Path::new("/mock/bin/python"));
        assert!(py.is_located());
    }

    #[test]
    fn discover_falls_back_to_bare_name() {
        let runner = Rc::new(MockRunner::new());
        let py = runtime(&runner);
        assert_eq!(py.interpreter(), Path::new("python3"));
        assert!(!py.is_located());
    }

    #[test]
    fn can_import_passes_module_as_argument() {
        let runner = Rc::new(MockRunner::new().with_program("python3", "/mock/bin/python3"));
        runner.on(&import_probe_suffix("bs4"), 0, "");
        let py = runtime(&runner);

        assert!(py.can_import("bs4"));
        assert!(!py.can_import("bs45"));
        assert_eq!(
            runner.calls()[0],
            format!("/mock/bin/python3 -c {} bs4", IMPORT_PROBE)
        );
    }

    #[test]
    fn module_origin_trims_output() {
        let runner = Rc::new(MockRunner::new().with_program("python3", "/mock/bin/python3"));
        runner.on(
            &origin_probe_suffix("json"),
            0,
            "/usr/lib/python3.12/json/__init__.py\n",
        );
        runner.on(&origin_probe_suffix("nothing"), 0, "\n");
        let py = runtime(&runner);

        assert_eq!(
            py.module_origin("json").as_deref(),
            Some("/usr/lib/python3.12/json/__init__.py")
        );
        assert!(py.module_origin("nothing").is_none());
        assert!(py.module_origin("unknown").is_none());
    }

    #[test]
    fn distribution_version_reads_stdout() {
        let runner = Rc::new(MockRunner::new().with_program("python3", "/mock/bin/python3"));
        runner.on(&version_probe_suffix("numpy"), 0, "1.26.4\n");
        let py = runtime(&runner);

        assert_eq!(py.distribution_version("numpy").as_deref(), Some("1.26.4"));
        assert!(py.distribution_version("pandas").is_none());
    }

    #[test]
    fn list_distributions_parses_json() {
        let runner = Rc::new(MockRunner::new().with_program("python3", "/mock/bin/python3"));
        runner.on(
            LIST_PROBE,
            0,
            r#"{"numpy": "1.26.4", "requests": "2.31.0"}"#,
        );
        let py = runtime(&runner);

        let packages = py.list_distributions().unwrap();
        assert_eq!(packages.get("numpy").map(String::as_str), Some("1.26.4"));
        assert_eq!(packages.len(), 2);
    }

    #[test]
    fn list_distributions_reports_failure() {
        let runner = Rc::new(MockRunner::new().with_program("python3", "/mock/bin/python3"));
        let py = runtime(&runner);
        assert!(py.list_distributions().is_err());
    }

    #[test]
    fn list_distributions_rejects_garbage() {
        let runner = Rc::new(MockRunner::new().with_program("python3", "/mock/bin/python3"));
        runner.on(LIST_PROBE, 0, "not json");
        let py = runtime(&runner);
        assert!(py.list_distributions().is_err());
    }

    #[test]
    fn stdlib_origin_classification() {
        assert!(is_stdlib_origin("/usr/lib/python3.12/json/__init__.py"));
        assert!(is_stdlib_origin("built-in"));
        assert!(is_stdlib_origin("frozen"));
        assert!(!is_stdlib_origin(
            "/usr/lib/python3/dist-packages/yaml/__init__.py"
        ));
        assert!(!is_stdlib_origin(
            "/home/u/.venv/lib/python3.12/site-packages/numpy/__init__.py"
        ));
        assert!(!is_stdlib_origin(""));
    }
}
