//! Deck generation configuration.
//!
//! `DeckConfig` is a plain value handed to each component at construction.
//! Every field has a default, so a YAML file only needs the keys it changes:
//!
//! ```yaml
//! llm:
//!   model: gpt-4o-mini
//! planner:
//!   mode: per_slide
//!   concurrency: 4
//! render:
//!   overflow: move_to_notes
//! ```

use crate::error::{DeckError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding `llm.model`.
pub const MODEL_ENV: &str = "SLIDEWRIGHT_MODEL";
/// Environment variable overriding `llm.provider_url`.
pub const LLM_URL_ENV: &str = "SLIDEWRIGHT_LLM_URL";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    pub llm: LlmConfig,
    pub planner: PlannerConfig,
    pub render: RenderConfig,
    pub output: OutputConfig,
}

/// Chat-completions endpoint settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub provider_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider_url: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.6,
            max_tokens: 4096,
            api_key_env: "OPENAI_API_KEY".to_string(),
        }
    }
}

/// How slide content is requested from the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanMode {
    /// One request covering every slide
    #[default]
    Batched,
    /// One request per slide, issued concurrently
    PerSlide,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Upper bound on the requested slide count
    pub max_slides: usize,
    pub request_timeout_secs: u64,
    pub retry_backoff_ms: u64,
    /// Attempts per generation request, including the first
    pub max_attempts: u32,
    pub mode: PlanMode,
    /// Concurrent requests in `per_slide` mode
    pub concurrency: usize,
    pub default_instructions: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_slides: 30,
            request_timeout_secs: 120,
            retry_backoff_ms: 1500,
            max_attempts: 2,
            mode: PlanMode::Batched,
            concurrency: 4,
            default_instructions:
                "Make it professional and suitable for an internal company presentation."
                    .to_string(),
        }
    }
}

/// What happens to body lines that do not fit the chosen layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Lines beyond the body capacity are appended to the speaker notes
    #[default]
    MoveToNotes,
    /// Every line is written to the slide
    Keep,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub overflow: OverflowPolicy,
    /// Lines assumed for a body slot without geometry
    pub fallback_bullet_capacity: usize,
    pub keep_template_slides: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            overflow: OverflowPolicy::MoveToNotes,
            fallback_bullet_capacity: 8,
            keep_template_slides: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    /// Fixed output name; timestamped when absent
    pub file_name: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            file_name: None,
        }
    }
}

impl OutputConfig {
    /// Output path for a request started now.
    pub fn resolve_path(&self) -> PathBuf {
        self.resolve_path_at(chrono::Local::now().naive_local())
    }

    /// Output path for a request started at `started`.
    pub fn resolve_path_at(&self, started: chrono::NaiveDateTime) -> PathBuf {
        let file_name = match &self.file_name {
            Some(name) => name.clone(),
            None => format!("Presentation_{}.pptx", started.format("%Y%m%d_%H%M%S")),
        };
        self.directory.join(file_name)
    }
}

impl DeckConfig {
    /// Load a YAML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| DeckError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml(&text)
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_saphyr::from_str(text).map_err(|e| DeckError::Config(e.to_string()))
    }

    /// Apply `SLIDEWRIGHT_MODEL` and `SLIDEWRIGHT_LLM_URL` when set.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(model) = lookup(MODEL_ENV).filter(|v| !v.is_empty()) {
            self.llm.model = model;
        }
        if let Some(url) = lookup(LLM_URL_ENV).filter(|v| !v.is_empty()) {
            self.llm.provider_url = url;
        }
        self
    }
}
