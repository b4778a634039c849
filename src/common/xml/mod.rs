//! XML text helpers shared by the package writer and slide builders.

pub mod escape;

pub use escape::{escape_xml, strip_invalid_xml_chars};
