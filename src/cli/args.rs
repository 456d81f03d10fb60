//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::PyensureConfig;

/// Command-line entry point. `--help` shows the package description.
#[derive(Debug, Parser)]
#[command(name = "pyensure")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides .pyensure/config.yml discovery)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Python interpreter whose environment is managed
    #[arg(long, global = true, env = "PYENSURE_PYTHON")]
    pub python: Option<PathBuf>,

    /// Never contact the package index
    #[arg(long, global = true, env = "PYENSURE_OFFLINE")]
    pub offline: bool,

    /// Install attempts allowed per package
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: Option<u32>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Apply command-line overrides on top of loaded configuration.
    pub fn apply_overrides(&self, config: &mut PyensureConfig) {
        if let Some(python) = &self.python {
            config.settings.python = Some(python.clone());
        }
        if self.offline {
            config.index.enabled = false;
        }
        if let Some(max_attempts) = self.max_attempts {
            config.settings.max_attempts = max_attempts;
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install a package and verify it imports
    Install(InstallArgs),

    /// Check whether a package is installed
    Check(CheckArgs),

    /// List installed distributions
    List,

    /// Print the third-party distributions a Python file needs
    FindDeps(SourceArgs),

    /// Install whatever a Python file needs
    Ensure(SourceArgs),

    /// Show the package installers found in this environment
    Installers,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `install` command.
#[derive(Debug, Clone, clap::Args)]
pub struct InstallArgs {
    /// Import or distribution name
    pub package: String,

    /// Exact version to install
    #[arg(long)]
    pub version: Option<String>,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CheckArgs {
    /// Import or distribution name
    pub package: String,
}

/// Python source input for `find-deps` and `ensure`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SourceArgs {
    /// Python file to read; stdin when omitted or `-`
    pub file: Option<PathBuf>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
