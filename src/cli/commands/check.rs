//! Check command implementation.
//!
//! The `pyensure check` command reports whether a package is installed.
//! It exits 1 when it is not, so it can gate shell scripts.

use crate::cli::args::CheckArgs;
use crate::error::Result;
use crate::tool::ToolParams;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The check command implementation.
pub struct CheckCommand {
    context: CommandContext,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(context: CommandContext, args: CheckArgs) -> Self {
        Self { context, args }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut tool = self.context.tool()?;
        let result = tool.execute("check", &ToolParams::package(self.args.package.as_str()));
        let installed = result.result["installed"].as_bool().unwrap_or(false);

        if self.context.json() {
            self.context.print_json(ui, &result)?;
            return Ok(CommandResult::from_success(installed));
        }

        if !result.success {
            ui.error(result.error.as_deref().unwrap_or("check failed"));
            return Ok(CommandResult::failure(1));
        }

        if installed {
            let version = result.result["version"].as_str().unwrap_or("unknown");
            ui.success(&format!("{} {}", self.args.package, version));
            Ok(CommandResult::success())
        } else {
            ui.warning(&format!("{} is not installed", self.args.package));
            Ok(CommandResult::failure(1))
        }
    }
}
