//! Render command - bind a saved plan to a template.

use clap::Args;
use slidewright::pipeline::render_plan;
use slidewright::{DeckError, Result, SlideSpec};
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct RenderArgs {
    /// Slide plan written by `generate --save-plan`
    plan: PathBuf,

    /// Template to take layouts and styling from (.pptx)
    #[arg(short, long)]
    template: PathBuf,

    /// Output file; defaults to a timestamped name in the configured directory
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn execute(args: RenderArgs, config_path: Option<&Path>) -> Result<()> {
    let config = super::load_config(config_path)?;

    let text = std::fs::read_to_string(&args.plan)
        .map_err(|e| DeckError::InvalidRequest(format!("{}: {}", args.plan.display(), e)))?;
    let specs: Vec<SlideSpec> = serde_json::from_str(&text)
        .map_err(|e| DeckError::InvalidRequest(format!("{}: {}", args.plan.display(), e)))?;

    let (output, slides) = render_plan(&config, &args.template, &specs, args.output.as_deref())?;

    for slide in &slides {
        println!("{:>3}  {}", slide.ordinal, slide.layout_name);
    }
    println!("{}", output.display());
    Ok(())
}
