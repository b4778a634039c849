//! Writers that turn a loaded template into a generated presentation.

pub mod deck;
pub mod notes;
pub mod pres;
pub mod slide;

// Re-export main types
pub use deck::DeckWriter;
pub use slide::{PlaceholderContent, has_text_frame, slide_xml};
