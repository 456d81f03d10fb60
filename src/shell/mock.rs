//! Scriptable command runner for tests.
//!
//! `MockRunner` implements [`CommandRunner`] without spawning anything. It
//! records every command it is asked to run and answers from rules keyed on
//! the end of the rendered command line.
//!
//! # Example
//!
//! ```
//! use pyensure::shell::{CommandRunner, CommandSpec, MockRunner};
//!
//! let runner = MockRunner::new().with_program("pip", "/mock/bin/pip");
//! runner.on("install numpy", 0, "Successfully installed numpy");
//!
//! let cmd = CommandSpec::new("/mock/bin/pip").args(["install", "numpy"]);
//! assert!(runner.run(&cmd).unwrap().success);
//! assert_eq!(runner.calls(), vec!["/mock/bin/pip install numpy".to_string()]);
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{PyensureError, Result};

use super::command::{CommandResult, CommandRunner, CommandSpec};

#[derive(Debug, Clone)]
struct Rule {
    suffix: String,
    exit_code: i32,
    stdout: String,
}

/// Mock runner that records calls and replays scripted results.
///
/// Commands matching no rule exit with code 1. Rules registered later take
/// precedence over earlier ones; one-shot rules take precedence over both
/// and are consumed when used.
#[derive(Debug, Default)]
pub struct MockRunner {
    programs: HashMap<String, PathBuf>,
    unspawnable: Vec<String>,
    rules: RefCell<Vec<Rule>>,
    once: RefCell<VecDeque<Rule>>,
    calls: RefCell<Vec<String>>,
}

impl MockRunner {
    /// Create a runner where nothing is on the search path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `locate(name)` return `path`.
    pub fn with_program(mut self, name: &str, path: &str) -> Self {
        self.programs.insert(name.to_string(), PathBuf::from(path));
        self
    }

    /// Make any command whose program is `program` fail to spawn.
    pub fn with_unspawnable(mut self, program: &str) -> Self {
        self.unspawnable.push(program.to_string());
        self
    }

    /// Answer every command ending with `suffix`.
    pub fn on(&self, suffix: &str, exit_code: i32, stdout: &str) {
        self.rules.borrow_mut().push(Rule {
            suffix: suffix.to_string(),
            exit_code,
            stdout: stdout.to_string(),
        });
    }

    /// Answer the next command ending with `suffix`, once.
    pub fn on_once(&self, suffix: &str, exit_code: i32, stdout: &str) {
        self.once.borrow_mut().push_back(Rule {
            suffix: suffix.to_string(),
            exit_code,
            stdout: stdout.to_string(),
        });
    }

    /// Every command run so far, rendered as a single line.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Commands run so far that contain an `install` argument.
    pub fn install_calls(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.split(' ').any(|t| t == "install"))
            .cloned()
            .collect()
    }

    /// Forget recorded calls, keeping the rules.
    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn answer(&self, line: &str) -> Option<Rule> {
        let mut once = self.once.borrow_mut();
        if let Some(pos) = once.iter().position(|r| line.ends_with(&r.suffix)) {
            return once.remove(pos);
        }
        self.rules
            .borrow()
            .iter()
            .rev()
            .find(|r| line.ends_with(&r.suffix))
            .cloned()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, command: &CommandSpec) -> Result<CommandResult> {
        let line = command.to_string();
        self.calls.borrow_mut().push(line.clone());

        let program = command.program.to_string_lossy();
        if self.unspawnable.iter().any(|p| *p == program) {
            return Err(PyensureError::CommandFailed {
                command: line,
                code: None,
            });
        }

        Ok(match self.answer(&line) {
            Some(rule) if rule.exit_code == 0 => {
                CommandResult::success(rule.stdout, String::new(), Duration::ZERO)
            }
            Some(rule) => CommandResult::failure(
                Some(rule.exit_code),
                rule.stdout,
                String::new(),
                Duration::ZERO,
            ),
            None => CommandResult::failure(Some(1), String::new(), String::new(), Duration::ZERO),
        })
    }

    fn locate(&self, program: &str) -> Option<PathBuf> {
        self.programs.get(program).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmatched_commands_fail() {
        let runner = MockRunner::new();
        let result = runner.run(&CommandSpec::new("pip").arg("list")).unwrap();
        assert!(!result.success);
        assert_eq!(runner.calls(), vec!["pip list"]);
    }

    #[test]
    fn later_rules_win() {
        let runner = MockRunner::new();
        runner.on("install x", 1, "");
        runner.on("install x", 0, "ok");
        let result = runner
            .run(&CommandSpec::new("pip").args(["install", "x"]))
            .unwrap();
        assert!(result.success);
        assert_eq!(result.stdout, "ok");
    }

    #[test]
    fn once_rules_are_consumed() {
        let runner = MockRunner::new();
        runner.on("check", 0, "");
        runner.on_once("check", 1, "");
        let cmd = CommandSpec::new("tool").arg("check");
        assert!(!runner.run(&cmd).unwrap().success);
        assert!(runner.run(&cmd).unwrap().success);
    }

    #[test]
    fn locate_uses_registered_programs() {
        let runner = MockRunner::new().with_program("uv", "/mock/bin/uv");
        assert_eq!(runner.locate("uv"), Some(PathBuf::from("/mock/bin/uv")));
        assert!(runner.locate("pip").is_none());
    }

    #[test]
    fn unspawnable_programs_error_but_are_recorded() {
        let runner = MockRunner::new().with_unspawnable("pip");
        let result = runner.run(&CommandSpec::new("pip").args(["install", "x"]));
        assert!(result.is_err());
        assert_eq!(runner.install_calls(), vec!["pip install x"]);
    }
}
