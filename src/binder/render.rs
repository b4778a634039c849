/// Layout Binder & Renderer: binds slide specs to layouts and writes the
/// output presentation.
use super::bound::{BoundSlide, SlidePlacement, place};
use super::score::{BindTier, select};
use crate::config::RenderConfig;
use crate::error::{DeckError, Result};
use crate::ooxml::PackURI;
use crate::ooxml::pptx::Package;
use crate::ooxml::pptx::writer::{DeckWriter, PlaceholderContent, slide_xml};
use crate::planner::SlideSpec;
use crate::template::{PlaceholderRole, TemplateCatalog};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, warn};

/// Binds and renders slides for one request.
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Choose a layout for every spec, in ordinal order, without writing
    /// anything.
    ///
    /// Fails with `NoUsableLayout` when no layout has a title placeholder.
    pub fn bind(&self, specs: &[SlideSpec], catalog: &TemplateCatalog) -> Result<Vec<BoundSlide>> {
        Ok(self
            .placements(specs, catalog)?
            .into_iter()
            .map(|placement| placement.bound)
            .collect())
    }

    fn placements(
        &self,
        specs: &[SlideSpec],
        catalog: &TemplateCatalog,
    ) -> Result<Vec<SlidePlacement>> {
        if !catalog.has_title_capable_layout() {
            return Err(DeckError::NoUsableLayout);
        }

        let mut ordered: Vec<&SlideSpec> = specs.iter().collect();
        ordered.sort_by_key(|spec| spec.ordinal());

        let mut placements = Vec::with_capacity(ordered.len());
        for spec in ordered {
            let (layout_id, tier) = select(spec, catalog, self.config.fallback_bullet_capacity)
                .ok_or(DeckError::NoUsableLayout)?;
            let layout = catalog.get(layout_id).ok_or(DeckError::NoUsableLayout)?;

            let placement = place(spec, layout, tier, &self.config);
            if tier != BindTier::Full {
                warn!(
                    ordinal = spec.ordinal(),
                    layout = %layout.name,
                    ?tier,
                    "no layout covers every role, binding relaxed"
                );
            }
            if placement.bound.moved_to_notes > 0 {
                warn!(
                    ordinal = spec.ordinal(),
                    lines = placement.bound.moved_to_notes,
                    "body overflow moved to speaker notes"
                );
            }
            debug!(
                ordinal = spec.ordinal(),
                shape = %spec.shape(),
                volume = spec.volume().total(),
                layout = layout_id,
                name = %layout.name,
                "slide bound"
            );
            placements.push(placement);
        }

        Ok(placements)
    }

    /// Bind `specs` and write the presentation to `output_path`.
    ///
    /// Either the complete presentation is written or nothing is: binding
    /// happens before any file is touched, and the file is written to a
    /// temporary sibling and atomically renamed into place.
    pub fn render(
        &self,
        specs: &[SlideSpec],
        catalog: &TemplateCatalog,
        output_path: &Path,
    ) -> Result<Vec<BoundSlide>> {
        let placements = self.placements(specs, catalog)?;

        if same_file(output_path, &catalog.source) {
            return Err(DeckError::write_failed(
                output_path,
                "output path is the template itself",
            ));
        }

        let bytes = self
            .assemble(&placements, catalog)
            .map_err(|e| {
                DeckError::write_failed(output_path, format!("assembling presentation: {}", e))
            })?;
        persist(output_path, &bytes)?;

        info!(
            output = %output_path.display(),
            slides = placements.len(),
            bytes = bytes.len(),
            "presentation written"
        );
        Ok(placements.into_iter().map(|placement| placement.bound).collect())
    }

    fn assemble(
        &self,
        placements: &[SlidePlacement],
        catalog: &TemplateCatalog,
    ) -> crate::ooxml::Result<Vec<u8>> {
        let mut package = Package::from_bytes(catalog.template_bytes())?;

        {
            let mut deck = DeckWriter::new(&mut package)?;
            if !self.config.keep_template_slides {
                let removed = deck.remove_existing_slides()?;
                if removed > 0 {
                    debug!(removed, "template slides removed");
                }
            }

            for placement in placements {
                let Some(layout) = catalog.get(placement.bound.layout_id) else {
                    continue;
                };

                let declarations: Vec<_> = layout
                    .placeholders
                    .iter()
                    .map(|slot| slot.declaration())
                    .collect();
                let contents: Vec<PlaceholderContent<'_>> = layout
                    .placeholders
                    .iter()
                    .zip(&declarations)
                    .zip(&placement.paragraphs)
                    .filter(|((slot, _), _)| slot.role != PlaceholderRole::Footer)
                    .map(|((_, placeholder), paragraphs)| PlaceholderContent {
                        placeholder,
                        paragraphs,
                    })
                    .collect();

                let layout_uri = PackURI::new(layout.partname.as_str())
                    .map_err(crate::ooxml::OoxmlError::PartNotFound)?;
                let slide = deck.add_slide(&layout_uri, slide_xml(&contents)?)?;
                if !placement.bound.notes.is_empty() {
                    deck.add_notes(&slide, &placement.bound.notes)?;
                }
            }

            let pruned = deck.finish()?;
            debug!(pruned, "unreferenced parts pruned");
        }

        package.to_bytes()
    }
}

/// Whether two paths name the same file, resolving links when both exist.
fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Write `bytes` to a temporary file next to `path`, then rename it over `path`.
fn persist(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file =
        tempfile::NamedTempFile::new_in(dir).map_err(|e| DeckError::write_failed(path, e))?;
    file.write_all(bytes)
        .and_then(|_| file.as_file().sync_all())
        .map_err(|e| DeckError::write_failed(path, e))?;
    file.persist(path)
        .map_err(|e| DeckError::write_failed(path, e.error))?;
    Ok(())
}
