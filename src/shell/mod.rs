//! Subprocess execution and executable lookup.

pub mod command;
pub mod mock;
pub mod path;

pub use command::{run_check, CommandResult, CommandRunner, CommandSpec, SystemRunner};
pub use mock::MockRunner;
pub use path::{is_runnable, SearchPath};
