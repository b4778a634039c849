//! Generate command - plan and render a presentation.

use clap::Args;
use slidewright::config::PlanMode;
use slidewright::{
    DeckError, DeckPipeline, DeckRequest, LlmError, OpenAiClient, Result, SlideSpec,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Args)]
pub struct GenerateArgs {
    /// Topic of the presentation
    topic: String,

    /// Template to take layouts and styling from (.pptx)
    #[arg(short, long)]
    template: PathBuf,

    /// Number of slides
    #[arg(short = 'n', long, default_value_t = 8)]
    slides: usize,

    /// Authoring instructions (tone, audience, emphasis)
    #[arg(short, long)]
    instructions: Option<String>,

    /// Output file; defaults to a timestamped name in the configured directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Model name, overriding configuration and SLIDEWRIGHT_MODEL
    #[arg(long)]
    model: Option<String>,

    /// Request each slide separately, several at a time
    #[arg(long)]
    per_slide: bool,

    /// Also write the slide plan as JSON, for `slidewright render`
    #[arg(long)]
    save_plan: Option<PathBuf>,
}

pub async fn execute(args: GenerateArgs, config_path: Option<&Path>) -> Result<()> {
    let mut config = super::load_config(config_path)?;
    if let Some(model) = args.model {
        config.llm.model = model;
    }
    if args.per_slide {
        config.planner.mode = PlanMode::PerSlide;
    }

    let model = OpenAiClient::from_config(&config.llm).map_err(|e| match e {
        LlmError::NotConfigured(_) => DeckError::Config(e.to_string()),
        other => DeckError::GenerationFailed {
            attempts: 0,
            reason: other.to_string(),
        },
    })?;
    info!(model = %config.llm.model, "using language model");

    let pipeline = DeckPipeline::new(config, Arc::new(model));
    let outcome = pipeline
        .generate(&DeckRequest {
            template: args.template,
            topic: args.topic,
            slide_count: args.slides,
            instructions: args.instructions,
            output: args.output,
        })
        .await?;

    // The deck is already written; a plan that cannot be saved is not fatal.
    if let Some(plan_path) = args.save_plan {
        match save_plan(&plan_path, &outcome.specs) {
            Ok(()) => info!(plan = %plan_path.display(), "slide plan saved"),
            Err(e) => warn!(plan = %plan_path.display(), error = %e, "slide plan not saved"),
        }
    }

    for slide in &outcome.slides {
        println!("{:>3}  {}", slide.ordinal, slide.layout_name);
    }
    println!("{}", outcome.output.display());
    Ok(())
}

fn save_plan(path: &Path, specs: &[SlideSpec]) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(specs)?;
    std::fs::write(path, json)
}
