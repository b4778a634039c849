/// Open Packaging Conventions (OPC) implementation.
///
/// Reads a ZIP-based package into an in-memory part graph, lets callers add,
/// replace and remove parts, and serializes the graph back to ZIP bytes.
///
/// - Content types come from `[Content_Types].xml` on read and are rebuilt on write
/// - Relationships are resolved against each source part's directory
/// - Output ordering is deterministic (parts by partname, relationships by rId)

pub mod constants;
pub mod error;
pub mod package;
pub mod packuri;
pub mod part;
pub mod phys_pkg;
pub mod pkgreader;
pub mod pkgwriter;
pub mod rel;

// Re-export commonly used types
pub use package::OpcPackage;
pub use packuri::PackURI;
pub use part::{BlobPart, Part, XmlPart};
pub use rel::{Relationship, Relationships};
