/// Template Model Builder: reads a template's masters and layouts into a
/// [`TemplateCatalog`].
use super::classify::{classify, master_type};
use super::model::{BoundingBox, LayoutDescriptor, PlaceholderSlot, TemplateCatalog};
use crate::error::{DeckError, Result};
use crate::ooxml::pptx::Package;
use crate::ooxml::pptx::parts::{SlideLayoutPart, SlideMasterPart};
use crate::ooxml::pptx::shapes::placeholder::PlaceholderShape;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Build the catalog of the template at `path`.
///
/// Fails with `TemplateUnreadable` when the file is missing, is not a
/// presentation package, or has no slide layouts. The file is only read.
pub fn build_catalog<P: AsRef<Path>>(path: P) -> Result<TemplateCatalog> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(DeckError::template(path, "file not found"));
    }

    let bytes = std::fs::read(path).map_err(|e| DeckError::template(path, e))?;
    build_catalog_from_bytes(path, bytes)
}

/// Build a catalog from template bytes already in memory.
///
/// `source` is recorded in the catalog and used in error messages.
pub fn build_catalog_from_bytes(
    source: impl Into<PathBuf>,
    bytes: Vec<u8>,
) -> Result<TemplateCatalog> {
    let source = source.into();
    let package = Package::from_bytes(&bytes).map_err(|e| DeckError::template(&source, e))?;

    let layouts = read_layouts(&package).map_err(|e| DeckError::template(&source, e))?;
    if layouts.is_empty() {
        return Err(DeckError::template(&source, "template has no slide layouts"));
    }

    let slide_size = package
        .slide_size()
        .map_err(|e| DeckError::template(&source, e))?
        .map(|size| (size.cx, size.cy));

    info!(
        template = %source.display(),
        layouts = layouts.len(),
        "template catalog built"
    );

    Ok(TemplateCatalog {
        source,
        slide_size,
        layouts,
        template_bytes: bytes,
    })
}

/// Layouts of every master, masters in `sldMasterIdLst` order and each
/// master's layouts in `sldLayoutIdLst` order.
fn read_layouts(package: &Package) -> crate::ooxml::Result<Vec<LayoutDescriptor>> {
    let mut layouts = Vec::new();

    for master in package.slide_masters()? {
        let master_geometry = geometry_by_type(&SlideMasterPart::from_part(master).placeholders()?);

        for partname in package.master_layout_partnames(master)? {
            let Ok(part) = package.opc_package().get_part(&partname) else {
                warn!(layout = %partname, "layout listed by master is missing, skipped");
                continue;
            };
            let layout = SlideLayoutPart::from_part(part);

            let id = layouts.len();
            let placeholders: Vec<PlaceholderSlot> = layout
                .placeholders()?
                .into_iter()
                .map(|ph| slot_from(ph, &master_geometry))
                .collect();

            let mut name = layout.name()?;
            if name.is_empty() {
                name = format!("Layout {}", id + 1);
            }

            debug!(
                id,
                name = %name,
                placeholders = placeholders.len(),
                "layout catalogued"
            );
            layouts.push(LayoutDescriptor {
                id,
                name,
                partname: partname.to_string(),
                placeholders,
            });
        }
    }

    Ok(layouts)
}

/// First geometry the master declares for each inheritable type.
fn geometry_by_type(placeholders: &[PlaceholderShape]) -> HashMap<&'static str, BoundingBox> {
    let mut geometry = HashMap::new();
    for ph in placeholders {
        if let Some(xfrm) = ph.xfrm {
            geometry
                .entry(master_type(ph.ph_type.as_deref()))
                .or_insert_with(|| BoundingBox::from(xfrm));
        }
    }
    geometry
}

fn slot_from(
    ph: PlaceholderShape,
    master_geometry: &HashMap<&'static str, BoundingBox>,
) -> PlaceholderSlot {
    let bbox = ph
        .xfrm
        .map(BoundingBox::from)
        .or_else(|| master_geometry.get(master_type(ph.ph_type.as_deref())).copied());

    PlaceholderSlot {
        role: classify(ph.ph_type.as_deref()),
        idx: ph.idx,
        ph_type: ph.ph_type,
        name: ph.name,
        orient: ph.orient,
        sz: ph.sz,
        bbox,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::content_type as ct;
    use crate::ooxml::pptx::fixtures::{FixturePlaceholder, TemplateFixture};
    use crate::template::model::PlaceholderRole;
    use std::io::Write;

    fn standard_fixture() -> TemplateFixture {
        TemplateFixture::new()
            .layout(
                "Title Slide",
                vec![FixturePlaceholder::ctr_title(), FixturePlaceholder::subtitle(1)],
            )
            .layout(
                "Title and Content",
                vec![
                    FixturePlaceholder::title(),
                    FixturePlaceholder::object(1),
                    FixturePlaceholder::date(10),
                    FixturePlaceholder::slide_number(12),
                ],
            )
            .layout("Blank", vec![FixturePlaceholder::slide_number(12)])
    }

    #[test]
    fn test_catalog_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&standard_fixture().build()).unwrap();

        let catalog = build_catalog(file.path()).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.source, file.path());
        assert_eq!(catalog.slide_size, Some((12192000, 6858000)));

        let names: Vec<&str> = catalog.layouts.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["Title Slide", "Title and Content", "Blank"]);

        let roles: Vec<PlaceholderRole> = catalog.layouts[1]
            .placeholders
            .iter()
            .map(|slot| slot.role)
            .collect();
        assert_eq!(
            roles,
            [
                PlaceholderRole::Title,
                PlaceholderRole::Body,
                PlaceholderRole::Footer,
                PlaceholderRole::Footer
            ]
        );
        assert!(catalog.layouts[2].is_blank());
    }

    #[test]
    fn test_ids_follow_master_then_layout_order() {
        let bytes = TemplateFixture::new()
            .layout("A1", vec![FixturePlaceholder::title()])
            .layout("A2", vec![FixturePlaceholder::title()])
            .master()
            .layout("B1", vec![FixturePlaceholder::title()])
            .build();

        let catalog = build_catalog_from_bytes("two-masters.pptx", bytes).unwrap();
        let ids: Vec<(usize, &str)> = catalog
            .layouts
            .iter()
            .map(|l| (l.id, l.name.as_str()))
            .collect();
        assert_eq!(ids, [(0, "A1"), (1, "A2"), (2, "B1")]);
    }

    #[test]
    fn test_geometry_inherited_from_master() {
        let bytes = TemplateFixture::new()
            .layout(
                "Content",
                vec![
                    FixturePlaceholder::title(),
                    FixturePlaceholder::body(1).at(100, 200, 3000, 4000),
                    FixturePlaceholder::picture(2),
                ],
            )
            .build();

        let catalog = build_catalog_from_bytes("inherit.pptx", bytes).unwrap();
        let slots = &catalog.layouts[0].placeholders;

        // Master title geometry
        assert_eq!(slots[0].bbox.map(|b| b.cy), Some(1325563));
        // Own geometry wins
        assert_eq!(
            slots[1].bbox,
            Some(BoundingBox {
                x: 100,
                y: 200,
                cx: 3000,
                cy: 4000
            })
        );
        // Picture placeholders inherit from the master body
        assert_eq!(slots[2].bbox.map(|b| b.cy), Some(4351338));
    }

    #[test]
    fn test_classification_stable_across_loads() {
        let bytes = standard_fixture().build();
        let first = build_catalog_from_bytes("t.pptx", bytes.clone()).unwrap();
        let second = build_catalog_from_bytes("t.pptx", bytes).unwrap();
        assert_eq!(first.layouts, second.layouts);
    }

    #[test]
    fn test_zero_byte_file_is_unreadable() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(matches!(
            build_catalog(file.path()),
            Err(DeckError::TemplateUnreadable { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        assert!(matches!(
            build_catalog("/nonexistent/brand.pptx"),
            Err(DeckError::TemplateUnreadable { .. })
        ));
    }

    #[test]
    fn test_template_without_layouts_is_unreadable() {
        let bytes = TemplateFixture::new().build();
        let err = build_catalog_from_bytes("empty.pptx", bytes).unwrap_err();
        assert!(err.to_string().contains("no slide layouts"));
    }

    #[test]
    fn test_non_presentation_package_is_unreadable() {
        let bytes = TemplateFixture::new()
            .layout("Title", vec![FixturePlaceholder::title()])
            .main_content_type(
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
            )
            .build();
        assert!(matches!(
            build_catalog_from_bytes("letter.docx", bytes),
            Err(DeckError::TemplateUnreadable { .. })
        ));

        let bytes = TemplateFixture::new()
            .layout("Title", vec![FixturePlaceholder::title()])
            .main_content_type(ct::PML_TEMPLATE_MAIN)
            .build();
        assert!(build_catalog_from_bytes("brand.potx", bytes).is_ok());
    }
}
