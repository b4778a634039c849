//! Slidewright CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 2: Template unreadable
//! - 3: Generation failed
//! - 4: No usable layout
//! - 5: Output could not be written
//! - 64: Invalid request
//! - 78: Configuration error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod commands;

use commands::{Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let crate_level = if cli.verbose { "slidewright=debug" } else { "slidewright=info" };
    let mut filter = EnvFilter::from_default_env();
    for directive in [crate_level, "warn"] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }
    // Already initialised when embedded; keep the existing subscriber
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let result = match cli.command {
        Commands::Generate(args) => commands::generate::execute(args, cli.config.as_deref()).await,
        Commands::Inspect(args) => commands::inspect::execute(args),
        Commands::Render(args) => commands::render::execute(args, cli.config.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        },
    }
}
