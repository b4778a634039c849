//! One generation request, end to end.
//!
//! The three stages run strictly in sequence because each consumes the
//! previous one's output: the template is introspected, content is planned
//! against its catalog, then the plan is bound and written. Nothing is shared
//! between requests; each call builds its own catalog, specs and output.

use crate::binder::{BoundSlide, Renderer};
use crate::config::DeckConfig;
use crate::error::{DeckError, Result};
use crate::llm::LanguageModel;
use crate::planner::{ContentPlanner, SlideSpec};
use crate::template::{TemplateCatalog, build_catalog};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Parameters of one generation request.
#[derive(Debug, Clone)]
pub struct DeckRequest {
    pub template: PathBuf,
    pub topic: String,
    pub slide_count: usize,
    /// Free-text authoring instructions; configured defaults when `None`
    pub instructions: Option<String>,
    /// Output file; resolved from the output configuration when `None`
    pub output: Option<PathBuf>,
}

/// Result of a completed request.
#[derive(Debug)]
pub struct DeckOutcome {
    pub output: PathBuf,
    pub catalog: TemplateCatalog,
    pub specs: Vec<SlideSpec>,
    pub slides: Vec<BoundSlide>,
}

/// Template introspection, content planning and rendering for one request.
pub struct DeckPipeline {
    config: DeckConfig,
    planner: ContentPlanner,
    renderer: Renderer,
}

impl DeckPipeline {
    pub fn new(config: DeckConfig, model: Arc<dyn LanguageModel>) -> Self {
        let planner = ContentPlanner::new(model, config.planner.clone());
        let renderer = Renderer::new(config.render.clone());
        Self {
            config,
            planner,
            renderer,
        }
    }

    /// Run all three stages.
    ///
    /// Request parameters are checked before the template is read, and the
    /// template is read before the language model is called.
    pub async fn generate(&self, request: &DeckRequest) -> Result<DeckOutcome> {
        let started = Instant::now();
        self.planner
            .validate_request(&request.topic, request.slide_count)?;

        let catalog = build_catalog(&request.template)?;
        info!(
            template = %request.template.display(),
            layouts = catalog.len(),
            "stage 1/3: template introspected"
        );

        let specs = self
            .planner
            .plan(
                &request.topic,
                request.slide_count,
                request.instructions.as_deref(),
                &catalog,
            )
            .await?;
        info!(slides = specs.len(), "stage 2/3: content planned");

        let output = self.output_path(request.output.as_deref());
        let slides = self.renderer.render(&specs, &catalog, &output)?;
        info!(
            output = %output.display(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "stage 3/3: presentation rendered"
        );

        Ok(DeckOutcome {
            output,
            catalog,
            specs,
            slides,
        })
    }

    fn output_path(&self, requested: Option<&Path>) -> PathBuf {
        output_path(&self.config, requested)
    }
}

/// Bind and write a saved plan against a template, without a language model.
pub fn render_plan(
    config: &DeckConfig,
    template: &Path,
    specs: &[SlideSpec],
    output: Option<&Path>,
) -> Result<(PathBuf, Vec<BoundSlide>)> {
    let specs = ordered_plan(specs)?;

    let catalog = build_catalog(template)?;
    let output = output_path(config, output);
    let slides = Renderer::new(config.render.clone()).render(&specs, &catalog, &output)?;
    info!(
        output = %output.display(),
        slides = slides.len(),
        "saved plan rendered"
    );
    Ok((output, slides))
}

/// A saved plan in deck order, numbered exactly 1..=N with a title on every slide.
fn ordered_plan(specs: &[SlideSpec]) -> Result<Vec<SlideSpec>> {
    if specs.is_empty() {
        return Err(DeckError::InvalidRequest("plan contains no slides".to_string()));
    }

    let mut ordered = specs.to_vec();
    ordered.sort_by_key(SlideSpec::ordinal);
    for (expected, spec) in (1..).zip(&ordered) {
        if spec.ordinal() != expected {
            return Err(DeckError::InvalidRequest(format!(
                "plan slides must be numbered 1 to {}, found ordinal {} at position {}",
                ordered.len(),
                spec.ordinal(),
                expected
            )));
        }
        if spec.title().trim().is_empty() {
            return Err(DeckError::InvalidRequest(format!(
                "plan slide {} has no title",
                expected
            )));
        }
    }
    Ok(ordered)
}

fn output_path(config: &DeckConfig, requested: Option<&Path>) -> PathBuf {
    match requested {
        Some(path) => path.to_path_buf(),
        None => config.output.resolve_path(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::pptx::Package;
    use crate::ooxml::pptx::fixtures::{FixturePlaceholder, TemplateFixture};
    use crate::planner::SlideIntent;
    use crate::planner::testing::{Reply, ScriptedModel, deck_json};

    fn write_template(dir: &Path) -> PathBuf {
        let path = dir.join("brand.pptx");
        let bytes = TemplateFixture::new()
            .layout(
                "Title Slide",
                vec![FixturePlaceholder::ctr_title(), FixturePlaceholder::subtitle(1)],
            )
            .layout(
                "Title and Content",
                vec![FixturePlaceholder::title(), FixturePlaceholder::body(1)],
            )
            .layout("Blank", vec![])
            .build();
        std::fs::write(&path, bytes).unwrap();
        path
    }

    fn request(template: PathBuf, output: PathBuf, slide_count: usize) -> DeckRequest {
        DeckRequest {
            template,
            topic: "Quarterly results".to_string(),
            slide_count,
            instructions: None,
            output: Some(output),
        }
    }

    #[tokio::test]
    async fn test_generate_writes_requested_slides() {
        let dir = tempfile::tempdir().unwrap();
        let template = write_template(dir.path());
        let output = dir.path().join("out.pptx");
        let model = Arc::new(ScriptedModel::new(vec![Reply::Text(deck_json(3))]));
        let pipeline = DeckPipeline::new(DeckConfig::default(), model.clone());

        let outcome = pipeline
            .generate(&request(template, output.clone(), 3))
            .await
            .unwrap();

        assert_eq!(model.calls(), 1);
        assert_eq!(outcome.specs.len(), 3);
        assert_eq!(outcome.slides.len(), 3);
        assert!(outcome.slides.iter().all(|slide| slide.layout_name == "Title and Content"));

        let package = Package::open(&output).unwrap();
        let entries = package.presentation_part().unwrap().slide_entries().unwrap();
        assert_eq!(entries.len(), 3);
    }

    #[tokio::test]
    async fn test_zero_byte_template_skips_generation() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("empty.pptx");
        std::fs::write(&template, b"").unwrap();
        let output = dir.path().join("out.pptx");
        let model = Arc::new(ScriptedModel::new(vec![Reply::Text(deck_json(3))]));
        let pipeline = DeckPipeline::new(DeckConfig::default(), model.clone());

        let result = pipeline.generate(&request(template, output.clone(), 3)).await;

        assert!(matches!(result, Err(DeckError::TemplateUnreadable { .. })));
        assert_eq!(model.calls(), 0);
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_invalid_request_rejected_before_template_read() {
        let dir = tempfile::tempdir().unwrap();
        let model = Arc::new(ScriptedModel::new(vec![Reply::Text(deck_json(1))]));
        let pipeline = DeckPipeline::new(DeckConfig::default(), model.clone());

        let mut req = request(dir.path().join("missing.pptx"), dir.path().join("out.pptx"), 0);
        assert!(matches!(
            pipeline.generate(&req).await,
            Err(DeckError::InvalidRequest(_))
        ));

        req.slide_count = 2;
        req.topic = "   ".to_string();
        assert!(matches!(
            pipeline.generate(&req).await,
            Err(DeckError::InvalidRequest(_))
        ));
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_generation_failure_leaves_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let template = write_template(dir.path());
        let output = dir.path().join("out.pptx");
        let model = Arc::new(ScriptedModel::new(vec![Reply::Text(deck_json(2))]));
        let config = DeckConfig {
            planner: crate::config::PlannerConfig {
                retry_backoff_ms: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        let pipeline = DeckPipeline::new(config, model.clone());

        let result = pipeline.generate(&request(template, output.clone(), 4)).await;
        assert!(matches!(result, Err(DeckError::GenerationFailed { attempts: 2, .. })));
        assert_eq!(model.calls(), 2);
        assert!(!output.exists());
    }

    #[test]
    fn test_saved_plan_renders_without_model() {
        let dir = tempfile::tempdir().unwrap();
        let template = write_template(dir.path());
        let output = dir.path().join("replayed.pptx");
        let specs = vec![
            SlideSpec::new(1, "Welcome", vec![], "Hello.", SlideIntent::Title),
            SlideSpec::new(
                2,
                "Numbers",
                vec!["Revenue up".to_string(), "Costs flat".to_string()],
                "",
                SlideIntent::Content,
            ),
        ];

        let (written, slides) =
            render_plan(&DeckConfig::default(), &template, &specs, Some(&output)).unwrap();
        assert_eq!(written, output);
        assert_eq!(slides[0].layout_name, "Title Slide");
        assert_eq!(slides[1].layout_name, "Title and Content");

        let empty = render_plan(&DeckConfig::default(), &template, &[], Some(&output));
        assert!(matches!(empty, Err(DeckError::InvalidRequest(_))));
    }

    #[test]
    fn test_saved_plan_ordinals_must_run_from_one() {
        let dir = tempfile::tempdir().unwrap();
        let template = write_template(dir.path());
        let output = dir.path().join("replayed.pptx");
        let slide = |ordinal: usize, title: &str| {
            SlideSpec::new(ordinal, title, vec![], "", SlideIntent::Content)
        };

        let bad_plans = [
            vec![slide(0, "A"), slide(0, "B")],
            vec![slide(1, "A"), slide(1, "B")],
            vec![slide(1, "A"), slide(3, "B")],
            vec![slide(1, "A"), slide(2, "  ")],
        ];
        for plan in &bad_plans {
            let result = render_plan(&DeckConfig::default(), &template, plan, Some(&output));
            assert!(matches!(result, Err(DeckError::InvalidRequest(_))));
        }
        assert!(!output.exists());

        let shuffled = vec![slide(2, "Second"), slide(1, "First")];
        let (_, slides) =
            render_plan(&DeckConfig::default(), &template, &shuffled, Some(&output)).unwrap();
        let ordinals: Vec<usize> = slides.iter().map(|slide| slide.ordinal).collect();
        assert_eq!(ordinals, [1, 2]);
    }
}
