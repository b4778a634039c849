//! PowerPoint (.pptx) template support.
//!
//! Reads the slide masters and layouts of a presentation template and writes
//! new slides and speaker notes back into the same package.
//!
//! - `Package`: the `.pptx` package with presentation-level accessors
//! - `parts`: typed views over presentation, master and layout parts
//! - `shapes`: placeholder declarations found on masters and layouts
//! - `writer`: slide, notes and `presentation.xml` generation
//!
//! # Example
//!
//! ```rust,no_run
//! use slidewright::ooxml::pptx::Package;
//!
//! let package = Package::open("template.pptx")?;
//! for master in package.slide_masters()? {
//!     for layout in package.master_layout_partnames(master)? {
//!         println!("layout: {}", layout);
//!     }
//! }
//! # Ok::<(), slidewright::ooxml::OoxmlError>(())
//! ```

pub mod package;
pub mod parts;
pub mod shapes;
pub mod writer;

#[cfg(test)]
pub(crate) mod fixtures;

pub use package::Package;
