//! Template Model Builder.
//!
//! Introspects a presentation template into a [`TemplateCatalog`]: every
//! layout in template order with its classified placeholder slots.

pub mod builder;
pub mod classify;
pub mod model;

pub use builder::{build_catalog, build_catalog_from_bytes};
pub use classify::classify;
pub use model::{BoundingBox, LayoutDescriptor, PlaceholderRole, PlaceholderSlot, TemplateCatalog};
