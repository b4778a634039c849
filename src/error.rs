/// Request-level error taxonomy.
///
/// Every failure aborts the whole request: either a complete, fully bound
/// presentation is written or nothing is.
use thiserror::Error;

/// Result type for deck generation.
pub type Result<T> = std::result::Result<T, DeckError>;

/// Errors surfaced by the generation pipeline and its stages.
#[derive(Error, Debug)]
pub enum DeckError {
    /// Template missing, not a presentation container, or without layouts
    #[error("Template unreadable: {path}: {reason}")]
    TemplateUnreadable { path: String, reason: String },

    /// The language model timed out, failed or returned an unusable plan
    #[error("Generation failed after {attempts} attempt(s): {reason}")]
    GenerationFailed { attempts: u32, reason: String },

    /// No layout in the catalog can carry a slide title
    #[error(
        "No usable layout: the template has no layout with a title placeholder; supply a different template"
    )]
    NoUsableLayout,

    /// The output document could not be written
    #[error("Cannot write {path}: {reason}")]
    RenderWriteFailed { path: String, reason: String },

    /// Request parameters rejected before any stage runs
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration file unreadable or malformed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DeckError {
    pub fn template(path: impl AsRef<std::path::Path>, reason: impl ToString) -> Self {
        DeckError::TemplateUnreadable {
            path: path.as_ref().display().to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn write_failed(path: impl AsRef<std::path::Path>, reason: impl ToString) -> Self {
        DeckError::RenderWriteFailed {
            path: path.as_ref().display().to_string(),
            reason: reason.to_string(),
        }
    }

    /// Process exit code for the command-line front end.
    pub fn exit_code(&self) -> u8 {
        match self {
            DeckError::TemplateUnreadable { .. } => 2,
            DeckError::GenerationFailed { .. } => 3,
            DeckError::NoUsableLayout => 4,
            DeckError::RenderWriteFailed { .. } => 5,
            DeckError::InvalidRequest(_) => 64,
            DeckError::Config(_) => 78,
        }
    }
}
