//! Install command implementation.
//!
//! The `pyensure install` command installs one package and verifies it
//! imports.

use crate::cli::args::InstallArgs;
use crate::error::Result;
use crate::tool::ToolParams;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The install command implementation.
pub struct InstallCommand {
    context: CommandContext,
    args: InstallArgs,
}

impl InstallCommand {
    /// Create a new install command.
    pub fn new(context: CommandContext, args: InstallArgs) -> Self {
        Self { context, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &InstallArgs {
        &self.args
    }

    fn params(&self) -> ToolParams {
        let params = ToolParams::package(self.args.package.as_str());
        match &self.args.version {
            Some(version) => params.with_version(version.as_str()),
            None => params,
        }
    }
}

impl Command for InstallCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut tool = self.context.tool()?;
        let params = self.params();

        if self.context.json() {
            let result = tool.execute("install", &params);
            return self.context.print_json(ui, &result);
        }

        let mut spinner = ui.start_spinner(&format!("Installing {}", self.args.package));
        let result = tool.execute("install", &params);

        if result.success {
            let message = result.result["message"]
                .as_str()
                .unwrap_or("Installed")
                .lines()
                .next()
                .unwrap_or_default()
                .to_string();
            spinner.finish_success(&message);
            if let Some(method) = result.result["method"].as_str() {
                ui.detail(&format!("method: {}", method));
            }
            Ok(CommandResult::success())
        } else {
            let error = result.error.unwrap_or_default();
            spinner.finish_error(&format!("Could not install {}", self.args.package));
            ui.error(&error);
            Ok(CommandResult::failure(1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::test_support::{mock_env, offline_context};
    use crate::python::import_probe_suffix;
    use crate::ui::MockUI;

    fn args(package: &str, version: Option<&str>) -> InstallArgs {
        InstallArgs {
            package: package.to_string(),
            version: version.map(str::to_string),
        }
    }

    #[test]
    fn install_reports_success_through_spinner() {
        let runner = mock_env();
        runner.on("/mock/bin/pip install requests==2.31.0", 0, "");
        runner.on(&import_probe_suffix("requests"), 0, "");
        let cmd = InstallCommand::new(
            offline_context(&runner, false),
            args("requests", Some("2.31.0")),
        );
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert_eq!(ui.spinners(), ["Installing requests".to_string()]);
        let (ok, message) = &ui.spinner_results()[0];
        assert!(ok);
        assert!(message.contains("requests==2.31.0"));
    }

    #[test]
    fn install_failure_exits_one() {
        let runner = mock_env();
        let cmd = InstallCommand::new(offline_context(&runner, false), args("nosuchpkg", None));
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("Failed to install nosuchpkg"));
        assert!(!ui.spinner_results()[0].0);
    }

    #[test]
    fn install_json_prints_tool_result() {
        let runner = mock_env();
        let cmd = InstallCommand::new(offline_context(&runner, true), args("Optional", None));
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        let printed: serde_json::Value = serde_json::from_str(&ui.data_lines()[0]).unwrap();
        assert_eq!(printed["success"], true);
        assert_eq!(printed["result"]["method"], "already-satisfied");
        assert!(ui.spinners().is_empty());
    }
}
