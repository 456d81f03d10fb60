//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Every command except
//! `completions` goes through [`crate::tool::PackageTool`], built from the
//! shared [`CommandContext`].

pub mod check;
pub mod completions;
pub mod dispatcher;
pub mod ensure;
pub mod find_deps;
pub mod input;
pub mod install;
pub mod installers;
pub mod list;

pub use dispatcher::{Command, CommandContext, CommandDispatcher, CommandResult};
