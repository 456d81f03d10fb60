//! Installers command implementation.
//!
//! The `pyensure installers` command shows every installer backend found
//! in the environment and which one is preferred.

use serde_json::json;

use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The installers command implementation.
pub struct InstallersCommand {
    context: CommandContext,
}

impl InstallersCommand {
    /// Create a new installers command.
    pub fn new(context: CommandContext) -> Self {
        Self { context }
    }
}

impl Command for InstallersCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let tool = self.context.tool()?;
        let preferred = tool.preferred();

        if self.context.json() {
            let value = json!({
                "installers": tool.installers(),
                "preferred": preferred.descriptor().map(|d| d.kind),
                "message": preferred.message(),
            });
            let text = serde_json::to_string_pretty(&value).map_err(anyhow::Error::from)?;
            ui.data(&text);
            return Ok(CommandResult::success());
        }

        ui.show_header("Package installers");
        for installer in tool.installers() {
            let mut line = installer.executable.display().to_string();
            if !installer.invocation.is_empty() {
                line = format!("{} {}", line, installer.invocation.join(" "));
            }
            ui.key_value(installer.kind.as_str(), &line);
        }

        if preferred.found() {
            ui.success(preferred.message());
        } else {
            ui.warning(preferred.message());
        }
        Ok(CommandResult::success())
    }
}
