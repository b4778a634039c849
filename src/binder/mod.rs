//! Layout Binder & Renderer.
//!
//! Each [`SlideSpec`](crate::planner::SlideSpec) is bound to the layout that
//! covers its roles and fits its content best, then written as a slide whose
//! placeholders inherit geometry and styling from that layout.
//!
//! Binding is deterministic: the same specs and catalog always produce the
//! same layout choices, with ties broken towards the lowest layout id.

pub mod bound;
pub mod render;
pub mod score;

pub use bound::{BoundSlide, OVERFLOW_HEADING};
pub use render::Renderer;
pub use score::{BindTier, select};
