//! Office Open XML (OOXML) support for presentation templates.
//!
//! The module is organized into two layers:
//!
//! 1. **OPC Layer** (`opc`): Low-level package handling (ZIP, parts, relationships)
//! 2. **PresentationML Layer** (`pptx`): masters, layouts, placeholders, and the
//!    writers that add slides and notes to a loaded template
//!
//! # Example
//!
//! ```rust,no_run
//! use slidewright::ooxml::pptx::Package;
//!
//! let pkg = Package::open("template.pptx")?;
//! for master in pkg.slide_masters()? {
//!     println!("{} layouts", pkg.master_layout_partnames(master)?.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod error;
pub mod opc;
pub mod pptx;

// Re-export commonly used types from OPC layer
pub use opc::{OpcPackage, PackURI};

// Re-export error types
pub use error::{OoxmlError, Result};
