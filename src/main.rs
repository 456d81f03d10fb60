//! pyensure CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use clap::Parser;
use pyensure::cli::{Cli, CommandContext, CommandDispatcher};
use pyensure::config::{find_project_root, load_config, validate};
use pyensure::shell::SystemRunner;
use pyensure::ui::{should_use_colors, OutputMode, TerminalUI, UserInterface};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
///
/// Logs go to stderr so they never mix with printed results.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("pyensure=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pyensure=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("pyensure starting with args: {:?}", cli);

    let colors = !cli.no_color && should_use_colors();
    console::set_colors_enabled(colors);
    console::set_colors_enabled_stderr(colors);

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let project_root = cli
        .project
        .clone()
        .or_else(|| find_project_root(&cwd))
        .unwrap_or(cwd);

    let config = load_config(&project_root, cli.config.as_deref()).and_then(|mut config| {
        cli.apply_overrides(&mut config);
        validate(&config)?;
        Ok(config)
    });

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            let mut ui = TerminalUI::new(OutputMode::Normal, colors);
            ui.error(&format!("Error: {}", e));
            return ExitCode::from(2);
        }
    };

    let output_mode = if cli.quiet {
        OutputMode::Quiet
    } else if cli.verbose {
        OutputMode::Verbose
    } else {
        config.settings.default_output
    };
    let mut ui = TerminalUI::new(output_mode, colors);

    let context = CommandContext::new(config, Rc::new(SystemRunner::new()), cli.json);
    let dispatcher = CommandDispatcher::new(context);

    match dispatcher.dispatch(&cli.command, &mut ui) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
