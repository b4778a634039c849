//! CLI command definitions.

use clap::{Parser, Subcommand};
use slidewright::{DeckConfig, Result};
use std::path::{Path, PathBuf};

pub mod generate;
pub mod inspect;
pub mod render;

/// Slidewright - template-aware presentation generator
#[derive(Parser)]
#[command(name = "slidewright")]
#[command(version, about = "Generate presentations that use the layouts of an existing template")]
#[command(long_about = r#"
Slidewright introspects a .pptx template, plans slide content for a topic with
a language model, and binds every slide to the template layout that fits it.

COMMANDS:
  generate  → Plan and render a presentation for a topic
  inspect   → Print the layouts and placeholders of a template
  render    → Render a saved plan against a template, without the model

EXIT CODES:
  0  - Success
  2  - Template unreadable
  3  - Generation failed
  4  - No usable layout in the template
  5  - Output could not be written
  64 - Invalid request
  78 - Configuration error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging for slidewright
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// YAML configuration file
    #[arg(short, long, global = true, env = "SLIDEWRIGHT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Plan and render a presentation for a topic
    Generate(generate::GenerateArgs),

    /// Print the layouts and placeholders of a template
    Inspect(inspect::InspectArgs),

    /// Render a saved plan against a template
    Render(render::RenderArgs),
}

/// Configuration file (or defaults) with environment overrides applied.
pub fn load_config(path: Option<&Path>) -> Result<DeckConfig> {
    let config = match path {
        Some(path) => DeckConfig::load(path)?,
        None => DeckConfig::default(),
    };
    Ok(config.with_env_overrides())
}
