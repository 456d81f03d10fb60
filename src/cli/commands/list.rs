//! List command implementation.
//!
//! The `pyensure list` command prints installed distributions as
//! `name==version` lines.

use crate::error::Result;
use crate::tool::ToolParams;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    context: CommandContext,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(context: CommandContext) -> Self {
        Self { context }
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut tool = self.context.tool()?;
        let result = tool.execute("list", &ToolParams::default());

        if self.context.json() {
            return self.context.print_json(ui, &result);
        }

        if !result.success {
            ui.error(result.error.as_deref().unwrap_or("Could not list packages"));
            return Ok(CommandResult::failure(1));
        }

        let Some(packages) = result.result.as_object() else {
            return Ok(CommandResult::success());
        };
        for (name, version) in packages {
            ui.data(&format!(
                "{}=={}",
                name,
                version.as_str().unwrap_or("unknown")
            ));
        }
        ui.detail(&format!("{} distributions", packages.len()));

        Ok(CommandResult::success())
    }
}
