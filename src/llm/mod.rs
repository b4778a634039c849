//! Language-model capability.
//!
//! The planner only needs "prompt in, text out". `LanguageModel` is that
//! contract; `OpenAiClient` implements it over an OpenAI-compatible
//! chat-completions endpoint, and tests substitute scripted doubles.

pub mod error;
pub mod openai;

pub use error::LlmError;
pub use openai::OpenAiClient;

use async_trait::async_trait;

/// A text-generation capability.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Complete a single user prompt and return the raw model text.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;

    /// Identifier used in logs.
    fn model_name(&self) -> &str;
}
