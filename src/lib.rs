//! Slidewright - template-aware presentation generation
//!
//! Turns a topic, a slide count and free-text instructions into a populated
//! `.pptx` whose slides use layouts drawn from an existing template.
//!
//! # Stages
//!
//! - **Template Model Builder** ([`template`]): introspects a template into a
//!   [`TemplateCatalog`] of layouts and classified placeholders
//! - **Content Planner** ([`planner`]): asks a [`LanguageModel`] for slide
//!   content and validates it into [`SlideSpec`]s
//! - **Layout Binder & Renderer** ([`binder`]): binds each spec to the best
//!   fitting layout and writes the slides into a copy of the template
//!
//! [`DeckPipeline`] runs the three in sequence for one request.
//!
//! # Example - Inspecting a template
//!
//! ```no_run
//! use slidewright::build_catalog;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = build_catalog("brand.pptx")?;
//! for layout in &catalog.layouts {
//!     println!("{}: {} placeholders", layout.name, layout.placeholders.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Generating a presentation
//!
//! ```no_run
//! use slidewright::{DeckConfig, DeckPipeline, DeckRequest, OpenAiClient};
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DeckConfig::default().with_env_overrides();
//! let model = Arc::new(OpenAiClient::from_config(&config.llm)?);
//! let pipeline = DeckPipeline::new(config, model);
//!
//! let outcome = pipeline
//!     .generate(&DeckRequest {
//!         template: "brand.pptx".into(),
//!         topic: "Quarterly results".to_string(),
//!         slide_count: 8,
//!         instructions: None,
//!         output: Some("results.pptx".into()),
//!     })
//!     .await?;
//! println!("wrote {} slides to {}", outcome.slides.len(), outcome.output.display());
//! # Ok(())
//! # }
//! ```

/// Layout Binder & Renderer
pub mod binder;

/// Shared helpers: unit conversion and XML escaping
pub mod common;

pub mod config;
pub mod error;

/// Language-model capability and the OpenAI-compatible client
pub mod llm;

/// OOXML packaging and PresentationML reading and writing
///
/// This module provides the package layer the other stages build on: it
/// reads templates and writes the generated presentation.
pub mod ooxml;

pub mod pipeline;

/// Content Planner
pub mod planner;

/// Template Model Builder
pub mod template;

// Re-export commonly used types for convenience
pub use binder::{BindTier, BoundSlide, Renderer};
pub use config::DeckConfig;
pub use error::{DeckError, Result};
pub use llm::{LanguageModel, LlmError, OpenAiClient};
pub use pipeline::{DeckOutcome, DeckPipeline, DeckRequest};
pub use planner::{ContentPlanner, ShapeCategory, SlideIntent, SlideSpec};
pub use template::{
    LayoutDescriptor, PlaceholderRole, PlaceholderSlot, TemplateCatalog, build_catalog,
};
