//! Content Planner.
//!
//! Turns a topic, slide count and instructions into an ordered list of
//! [`SlideSpec`]s. Generation goes through a [`LanguageModel`] with a per-call
//! timeout and a bounded number of attempts; responses are parsed leniently
//! and validated strictly (exact slide count, non-empty titles).
//!
//! The planner never picks a layout. It only assigns each slide a coarse
//! [`ShapeCategory`], so the same plan can be rendered against any template.

pub mod prompt;
pub mod response;
pub mod spec;

pub use prompt::ShapeHints;
pub use spec::{ContentVolume, ShapeCategory, SlideIntent, SlideSpec, categorize};

use crate::config::{PlanMode, PlannerConfig};
use crate::error::{DeckError, Result};
use crate::llm::LanguageModel;
use crate::template::TemplateCatalog;
use response::{DraftSlide, parse_slides};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Timeout and retry settings for one generation request.
#[derive(Debug, Clone, Copy)]
struct RetryPolicy {
    timeout: Duration,
    backoff: Duration,
    max_attempts: u32,
}

impl RetryPolicy {
    fn from_config(config: &PlannerConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.request_timeout_secs),
            backoff: Duration::from_millis(config.retry_backoff_ms),
            max_attempts: config.max_attempts.max(1),
        }
    }
}

/// Generates slide specifications for a request.
pub struct ContentPlanner {
    model: Arc<dyn LanguageModel>,
    config: PlannerConfig,
}

impl ContentPlanner {
    pub fn new(model: Arc<dyn LanguageModel>, config: PlannerConfig) -> Self {
        Self { model, config }
    }

    /// Plan `slide_count` slides about `topic`.
    ///
    /// Blank or missing `instructions` fall back to the configured defaults.
    /// Returns exactly `slide_count` specs with ordinals `1..=slide_count`.
    pub async fn plan(
        &self,
        topic: &str,
        slide_count: usize,
        instructions: Option<&str>,
        catalog: &TemplateCatalog,
    ) -> Result<Vec<SlideSpec>> {
        let topic = topic.trim();
        self.validate_request(topic, slide_count)?;

        let instructions = instructions
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .unwrap_or(self.config.default_instructions.as_str());
        let hints = ShapeHints::from_catalog(catalog);
        let policy = RetryPolicy::from_config(&self.config);

        info!(
            topic,
            slides = slide_count,
            mode = ?self.config.mode,
            model = self.model.model_name(),
            "planning slides"
        );

        let specs = match self.config.mode {
            PlanMode::Batched => {
                let prompt = prompt::deck_prompt(topic, slide_count, instructions, hints);
                let drafts = generate(self.model.as_ref(), &prompt, slide_count, policy).await?;
                drafts
                    .into_iter()
                    .enumerate()
                    .map(|(n, draft)| into_spec(n + 1, draft))
                    .collect()
            },
            PlanMode::PerSlide => {
                self.plan_per_slide(topic, slide_count, instructions, hints, policy)
                    .await?
            },
        };

        for spec in &specs {
            if !hints.supports(spec.shape()) {
                debug!(
                    ordinal = spec.ordinal(),
                    shape = %spec.shape(),
                    "no layout has this shape, binding will relax"
                );
            }
        }

        Ok(specs)
    }

    /// Reject an empty topic or a slide count outside `1..=max_slides`.
    pub fn validate_request(&self, topic: &str, slide_count: usize) -> Result<()> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(DeckError::InvalidRequest("topic must not be empty".to_string()));
        }
        if slide_count == 0 || slide_count > self.config.max_slides {
            return Err(DeckError::InvalidRequest(format!(
                "slide count must be between 1 and {}, got {}",
                self.config.max_slides, slide_count
            )));
        }
        Ok(())
    }

    /// One request per slide, at most `concurrency` in flight, reassembled by
    /// ordinal.
    async fn plan_per_slide(
        &self,
        topic: &str,
        slide_count: usize,
        instructions: &str,
        hints: ShapeHints,
        policy: RetryPolicy,
    ) -> Result<Vec<SlideSpec>> {
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency.max(1)));
        let mut tasks = JoinSet::new();

        for ordinal in 1..=slide_count {
            let model = Arc::clone(&self.model);
            let semaphore = Arc::clone(&semaphore);
            let prompt = prompt::slide_prompt(topic, slide_count, ordinal, instructions, hints);

            tasks.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| failed(0, e.to_string()))?;
                let mut drafts = generate(model.as_ref(), &prompt, 1, policy).await?;
                let draft = drafts.pop().unwrap_or_default();
                Ok::<_, DeckError>(into_spec(ordinal, draft))
            });
        }

        let mut slots: Vec<Option<SlideSpec>> = vec![None; slide_count];
        while let Some(joined) = tasks.join_next().await {
            // Returning drops the set, which aborts the remaining requests.
            let spec = joined.map_err(|e| failed(0, format!("generation task failed: {}", e)))??;
            debug!(ordinal = spec.ordinal(), "slide planned");
            let index = spec.ordinal() - 1;
            slots[index] = Some(spec);
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(n, slot)| slot.ok_or_else(|| failed(0, format!("slide {} missing", n + 1))))
            .collect()
    }
}

fn failed(attempts: u32, reason: impl Into<String>) -> DeckError {
    DeckError::GenerationFailed {
        attempts,
        reason: reason.into(),
    }
}

/// Run one generation request with timeout, validation and bounded retry.
async fn generate(
    model: &dyn LanguageModel,
    prompt: &str,
    expected: usize,
    policy: RetryPolicy,
) -> Result<Vec<DraftSlide>> {
    let mut last_reason = String::new();

    for attempt in 1..=policy.max_attempts {
        if attempt > 1 {
            tokio::time::sleep(policy.backoff * (attempt - 1)).await;
        }

        let outcome = match tokio::time::timeout(policy.timeout, model.complete(prompt)).await {
            Err(_) => Err(format!("timed out after {}s", policy.timeout.as_secs())),
            Ok(Err(e)) => Err(e.to_string()),
            Ok(Ok(text)) => parse_slides(&text).and_then(|drafts| validate(drafts, expected)),
        };

        match outcome {
            Ok(drafts) => return Ok(drafts),
            Err(reason) => {
                warn!(
                    attempt,
                    max_attempts = policy.max_attempts,
                    reason = %reason,
                    "generation attempt failed"
                );
                last_reason = reason;
            },
        }
    }

    Err(failed(policy.max_attempts, last_reason))
}

fn validate(
    mut drafts: Vec<DraftSlide>,
    expected: usize,
) -> std::result::Result<Vec<DraftSlide>, String> {
    if drafts.len() != expected {
        return Err(format!(
            "expected {} slides, model returned {}",
            expected,
            drafts.len()
        ));
    }

    for (n, draft) in drafts.iter_mut().enumerate() {
        draft.title = draft.title.trim().to_string();
        if draft.title.is_empty() {
            return Err(format!("slide {} has an empty title", n + 1));
        }
    }

    Ok(drafts)
}

fn into_spec(ordinal: usize, draft: DraftSlide) -> SlideSpec {
    let body = draft
        .body
        .into_iter()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();
    let intent = draft
        .intent
        .as_deref()
        .map(SlideIntent::from_label)
        .unwrap_or_default();

    SlideSpec::new(ordinal, draft.title, body, draft.notes.trim(), intent)
}
