//! Find-deps command implementation.
//!
//! The `pyensure find-deps` command prints the third-party distributions a
//! Python file needs, one per line, without installing anything.

use crate::cli::args::SourceArgs;
use crate::error::Result;
use crate::tool::ToolParams;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};
use super::input::read_source;

/// The find-deps command implementation.
pub struct FindDepsCommand {
    context: CommandContext,
    args: SourceArgs,
}

impl FindDepsCommand {
    /// Create a new find-deps command.
    pub fn new(context: CommandContext, args: SourceArgs) -> Self {
        Self { context, args }
    }

    fn run_with_code(&self, code: String, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut tool = self.context.tool()?;
        let result = tool.execute("find_dependencies", &ToolParams::code(code));

        if self.context.json() {
            return self.context.print_json(ui, &result);
        }
        if !result.success {
            ui.error(result.error.as_deref().unwrap_or("Dependency scan failed"));
            return Ok(CommandResult::failure(1));
        }

        let names: Vec<&str> = result
            .result
            .as_array()
            .map(|a| a.iter().filter_map(|v| v.as_str()).collect())
            .unwrap_or_default();
        if names.is_empty() {
            ui.message("No third-party dependencies found");
        }
        for name in names {
            ui.data(name);
        }
        Ok(CommandResult::success())
    }
}

impl Command for FindDepsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let code = read_source(self.args.file.as_deref())?;
        self.run_with_code(code, ui)
    }
}
