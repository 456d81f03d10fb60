//! Ensure command implementation.
//!
//! The `pyensure ensure` command installs every third-party dependency a
//! Python file needs and reports what could not be installed.

use serde_json::Value;

use crate::cli::args::SourceArgs;
use crate::error::Result;
use crate::tool::ToolParams;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};
use super::input::read_source;

/// The ensure command implementation.
pub struct EnsureCommand {
    context: CommandContext,
    args: SourceArgs,
}

impl EnsureCommand {
    /// Create a new ensure command.
    pub fn new(context: CommandContext, args: SourceArgs) -> Self {
        Self { context, args }
    }

    fn run_with_code(&self, code: String, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut tool = self.context.tool()?;

        if self.context.json() {
            let result = tool.execute("ensure_dependencies", &ToolParams::code(code));
            return self.context.print_json(ui, &result);
        }

        let mut spinner = ui.start_spinner("Checking dependencies");
        let result = tool.execute("ensure_dependencies", &ToolParams::code(code));
        let satisfied = string_list(&result.result["satisfied"]);
        let failed = result.result["failed"].as_array().map_or(0, Vec::len);

        if result.success {
            spinner.finish_success(&format!("{} dependencies satisfied", satisfied.len()));
        } else {
            spinner.finish_error(&format!(
                "{} of {} dependencies failed",
                failed,
                satisfied.len() + failed
            ));
        }

        for name in &satisfied {
            ui.detail(name);
        }
        if let Some(patched) = result.result["patched_code"].as_str() {
            if let Some(first) = patched.lines().next() {
                ui.detail(&format!("added missing import: {}", first));
            }
        }
        if let Some(errors) = &result.error {
            for line in errors.lines() {
                ui.error(line);
            }
        }

        Ok(CommandResult::from_success(result.success))
    }
}

impl Command for EnsureCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let code = read_source(self.args.file.as_deref())?;
        self.run_with_code(code, ui)
    }
}

fn string_list(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|a| a.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
        .unwrap_or_default()
}
