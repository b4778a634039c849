/// Shapes declared on slide masters and layouts.
///
/// Only placeholders matter for template modelling: their type, index and
/// geometry decide which content a layout can carry.
pub mod placeholder;

pub use placeholder::{PlaceholderShape, Xfrm, parse_placeholders};
