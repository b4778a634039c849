//! Inspect command - print a template's catalog.

use clap::{Args, ValueEnum};
use slidewright::common::unit::emu_to_inch_f64;
use slidewright::{DeckError, Result, TemplateCatalog, build_catalog};
use std::path::PathBuf;

#[derive(Clone, Copy, Default, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct InspectArgs {
    /// Template to introspect (.pptx)
    template: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let catalog = build_catalog(&args.template)?;

    match args.format {
        Format::Json => {
            let json = serde_json::to_string_pretty(&catalog)
                .map_err(|e| DeckError::template(&args.template, e))?;
            println!("{}", json);
        },
        Format::Text => print_catalog(&catalog),
    }

    if !catalog.has_title_capable_layout() {
        eprintln!("warning: no layout has a title placeholder; this template cannot be rendered to");
    }
    Ok(())
}

fn print_catalog(catalog: &TemplateCatalog) {
    println!("{}", catalog.source.display());
    if let Some((cx, cy)) = catalog.slide_size {
        println!(
            "slide size: {:.2}in x {:.2}in",
            emu_to_inch_f64(cx),
            emu_to_inch_f64(cy)
        );
    }

    for layout in &catalog.layouts {
        let marker = if layout.is_blank() { " (blank)" } else { "" };
        println!("\n[{}] {}{}", layout.id, layout.name, marker);
        for slot in &layout.placeholders {
            let idx = slot.idx.map(|idx| idx.to_string()).unwrap_or_else(|| "-".to_string());
            let bbox = slot
                .bbox
                .map(|bbox| bbox.to_string())
                .unwrap_or_else(|| "no geometry".to_string());
            println!(
                "  {:<9} idx {:<3} {:<10} {}",
                slot.role.to_string(),
                idx,
                slot.ph_type.as_deref().unwrap_or("(obj)"),
                bbox
            );
        }
    }
}
