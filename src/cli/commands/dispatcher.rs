//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandContext`] for what every command shares
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::rc::Rc;

use crate::cli::args::Commands;
use crate::config::PyensureConfig;
use crate::error::Result;
use crate::shell::CommandRunner;
use crate::tool::{PackageTool, ToolResult};
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    /// Success or exit code 1.
    pub fn from_success(success: bool) -> Self {
        if success {
            Self::success()
        } else {
            Self::failure(1)
        }
    }
}

/// Resolved configuration and process runner shared by all commands.
#[derive(Clone)]
pub struct CommandContext {
    config: PyensureConfig,
    runner: Rc<dyn CommandRunner>,
    json: bool,
}

impl CommandContext {
    pub fn new(config: PyensureConfig, runner: Rc<dyn CommandRunner>, json: bool) -> Self {
        Self {
            config,
            runner,
            json,
        }
    }

    pub fn config(&self) -> &PyensureConfig {
        &self.config
    }

    /// Whether results should be printed as JSON.
    pub fn json(&self) -> bool {
        self.json
    }

    /// Build a tool for this environment.
    pub fn tool(&self) -> Result<PackageTool> {
        PackageTool::from_config(&self.config, self.runner.clone())
    }

    /// Print `result` as JSON and turn it into an exit status.
    pub fn print_json(
        &self,
        ui: &mut dyn UserInterface,
        result: &ToolResult,
    ) -> Result<CommandResult> {
        let text = serde_json::to_string_pretty(result).map_err(anyhow::Error::from)?;
        ui.data(&text);
        Ok(CommandResult::from_success(result.success))
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    context: CommandContext,
}

impl CommandDispatcher {
    /// Create a new dispatcher.
    pub fn new(context: CommandContext) -> Self {
        Self { context }
    }

    /// Get the shared command context.
    pub fn context(&self) -> &CommandContext {
        &self.context
    }

    /// Dispatch and execute a command.
    pub fn dispatch(
        &self,
        command: &Commands,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let ctx = self.context.clone();
        match command {
            Commands::Install(args) => {
                super::install::InstallCommand::new(ctx, args.clone()).execute(ui)
            }
            Commands::Check(args) => super::check::CheckCommand::new(ctx, args.clone()).execute(ui),
            Commands::List => super::list::ListCommand::new(ctx).execute(ui),
            Commands::FindDeps(args) => {
                super::find_deps::FindDepsCommand::new(ctx, args.clone()).execute(ui)
            }
            Commands::Ensure(args) => {
                super::ensure::EnsureCommand::new(ctx, args.clone()).execute(ui)
            }
            Commands::Installers => super::installers::InstallersCommand::new(ctx).execute(ui),
            Commands::Completions(args) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
        }
    }
}
