//! Installer discovery and ranking.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::install::PackageSpec;
use crate::python::PythonRuntime;
use crate::shell::{CommandRunner, CommandSpec};

/// Kind of installation backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallerKind {
    /// `uv pip install`.
    Uv,
    /// `pip install`.
    PipCmd,
    /// `pip3 install`.
    Pip3Cmd,
    /// `python -m pip install`.
    PipModule,
}

impl InstallerKind {
    /// Short name used in messages and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            InstallerKind::Uv => "uv",
            InstallerKind::PipCmd => "pip_cmd",
            InstallerKind::Pip3Cmd => "pip3_cmd",
            InstallerKind::PipModule => "pip_module",
        }
    }
}

impl fmt::Display for InstallerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A backend found in the current environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallerDescriptor {
    /// Which backend this is.
    pub kind: InstallerKind,
    /// Resolved executable (the interpreter for the module form).
    pub executable: PathBuf,
    /// Tokens placed between the executable and the package spec.
    pub invocation: Vec<String>,
    /// Higher wins.
    pub priority: u8,
}

impl InstallerDescriptor {
    /// Build the install command for a package spec.
    pub fn command_for(&self, spec: &PackageSpec) -> CommandSpec {
        CommandSpec::new(&self.executable)
            .args(self.invocation.iter().cloned())
            .arg(spec.to_string())
    }
}

/// Definition of a command-form backend to look for on PATH.
struct CommandInstallerDef {
    kind: InstallerKind,
    program: &'static str,
    invocation: &'static [&'static str],
    priority: u8,
}

/// Command-form backends, highest priority first.
const COMMAND_INSTALLERS: &[CommandInstallerDef] = &[
    CommandInstallerDef {
        kind: InstallerKind::Uv,
        program: "uv",
        invocation: &["pip", "install"],
        priority: 4,
    },
    CommandInstallerDef {
        kind: InstallerKind::PipCmd,
        program: "pip",
        invocation: &["install"],
        priority: 3,
    },
    CommandInstallerDef {
        kind: InstallerKind::Pip3Cmd,
        program: "pip3",
        invocation: &["install"],
        priority: 2,
    },
];

/// Priority of `python -m pip`.
const PIP_MODULE_PRIORITY: u8 = 1;

/// Probe the environment for every usable installer.
///
/// Never fails: a backend that is not on PATH, or whose version check fails,
/// is left out.
pub fn discover(runner: &dyn CommandRunner, python: &PythonRuntime) -> Vec<InstallerDescriptor> {
    let mut installers = Vec::new();

    for def in COMMAND_INSTALLERS {
        if let Some(path) = runner.locate(def.program) {
            tracing::debug!("Found {} at {}", def.kind, path.display());
            installers.push(InstallerDescriptor {
                kind: def.kind,
                executable: path,
                invocation: def.invocation.iter().map(|s| s.to_string()).collect(),
                priority: def.priority,
            });
        }
    }

    if python.has_pip_module() {
        tracing::debug!("Found pip module for {}", python.interpreter().display());
        installers.push(InstallerDescriptor {
            kind: InstallerKind::PipModule,
            executable: python.interpreter().to_path_buf(),
            invocation: vec!["-m".into(), "pip".into(), "install".into()],
            priority: PIP_MODULE_PRIORITY,
        });
    }

    installers
}

/// The installer chosen for primary installs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferredInstaller {
    /// The highest-priority backend.
    Found {
        descriptor: InstallerDescriptor,
        message: String,
    },
    /// Nothing usable was discovered.
    NotFound { message: String },
}

impl PreferredInstaller {
    /// Whether a backend was found.
    pub fn found(&self) -> bool {
        matches!(self, PreferredInstaller::Found { .. })
    }

    /// Human-readable explanation of the selection.
    pub fn message(&self) -> &str {
        match self {
            PreferredInstaller::Found { message, .. }
            | PreferredInstaller::NotFound { message } => message,
        }
    }

    /// The chosen descriptor, if any.
    pub fn descriptor(&self) -> Option<&InstallerDescriptor> {
        match self {
            PreferredInstaller::Found { descriptor, .. } => Some(descriptor),
            PreferredInstaller::NotFound { .. } => None,
        }
    }
}

/// Pick the highest-priority descriptor.
pub fn select_preferred(installers: &[InstallerDescriptor]) -> PreferredInstaller {
    match installers.iter().max_by_key(|i| i.priority) {
        Some(best) => PreferredInstaller::Found {
            descriptor: best.clone(),
            message: format!("Using '{}' package installer.", best.kind),
        },
        None => PreferredInstaller::NotFound {
            message: "No package installer found.".to_string(),
        },
    }
}
