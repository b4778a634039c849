//! Small utilities shared by the package layer and the deck pipeline.

pub mod unit;
pub mod xml;
