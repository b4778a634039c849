/// Errors from the language-model capability.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    /// No API key in the configured environment variable
    #[error("Language model not configured: set {0}")]
    NotConfigured(String),

    /// Transport failure before a response arrived
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success HTTP status
    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body did not have the expected shape
    #[error("Failed to parse response: {0}")]
    InvalidResponse(String),

    /// Response carried no completion text
    #[error("Empty completion")]
    EmptyCompletion,
}
