//! Adds generated slides and speaker notes to a loaded template package.
//!
//! `DeckWriter` edits the package in memory only: slides are created as new
//! parts related to their layout, notes slides hang off a notes master
//! (created when the template has none), and `finish` rewrites the slide list
//! of `presentation.xml` and drops parts nothing refers to any more.

use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};
use crate::ooxml::opc::part::{Part, XmlPart};
use crate::ooxml::opc::PackURI;
use crate::ooxml::pptx::Package;
use crate::ooxml::pptx::parts::SlideIdEntry;
use crate::ooxml::pptx::writer::notes::{notes_master_xml, notes_slide_xml};
use crate::ooxml::pptx::writer::pres::rewrite_presentation_xml;

/// Lowest slide ID PowerPoint accepts.
const MIN_SLIDE_ID: u32 = 256;

pub struct DeckWriter<'p> {
    package: &'p mut Package,
    presentation: PackURI,
    slides: Vec<SlideIdEntry>,
    next_slide_id: u32,
    notes_master: Option<PackURI>,
    /// rId of a notes master created by this writer, still missing from `notesMasterIdLst`
    new_notes_master_rid: Option<String>,
}

impl<'p> DeckWriter<'p> {
    pub fn new(package: &'p mut Package) -> Result<Self> {
        let presentation = package.presentation_partname()?;
        let slides = package.presentation_part()?.slide_entries()?;
        let next_slide_id = slides
            .iter()
            .map(|entry| entry.id.saturating_add(1))
            .max()
            .unwrap_or(MIN_SLIDE_ID)
            .max(MIN_SLIDE_ID);

        let opc = package.opc_package();
        let notes_master = opc
            .get_part(&presentation)?
            .rels()
            .all_with_reltype(rt::NOTES_MASTER)
            .first()
            .and_then(|rel| rel.target_partname().ok())
            .filter(|partname| opc.contains_part(partname));

        Ok(Self {
            package,
            presentation,
            slides,
            next_slide_id,
            notes_master,
            new_notes_master_rid: None,
        })
    }

    /// Detach every slide already listed in the presentation.
    ///
    /// Returns the number of slides removed. Their notes, media and other
    /// dependent parts are dropped by `finish` once unreferenced.
    pub fn remove_existing_slides(&mut self) -> Result<usize> {
        let removed = std::mem::take(&mut self.slides);
        let opc = self.package.opc_package_mut();

        for entry in &removed {
            let slide = opc.get_part(&self.presentation)?.related_partname(&entry.r_id);
            opc.get_part_mut(&self.presentation)?.rels_mut().remove(&entry.r_id);
            if let Ok(slide) = slide {
                opc.remove_part(&slide);
            }
        }

        Ok(removed.len())
    }

    /// Number of slides the presentation will list.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Add a slide built on `layout` and append it to the slide list.
    pub fn add_slide(&mut self, layout: &PackURI, slide_xml: String) -> Result<PackURI> {
        let opc = self.package.opc_package_mut();
        if !opc.contains_part(layout) {
            return Err(OoxmlError::PartNotFound(layout.to_string()));
        }

        let partname = opc.next_partname("/ppt/slides/slide%d.xml")?;
        let mut slide = XmlPart::new(
            partname.clone(),
            ct::PML_SLIDE.to_string(),
            slide_xml.into_bytes(),
        );
        slide.relate_to(layout, rt::SLIDE_LAYOUT);
        opc.add_part(Box::new(slide));

        let r_id = opc
            .get_part_mut(&self.presentation)?
            .relate_to(&partname, rt::SLIDE);
        self.slides.push(SlideIdEntry {
            id: self.next_slide_id,
            r_id,
        });
        self.next_slide_id += 1;

        Ok(partname)
    }

    /// Attach a notes slide holding `paragraphs` to `slide`.
    pub fn add_notes(&mut self, slide: &PackURI, paragraphs: &[String]) -> Result<PackURI> {
        let notes_master = self.ensure_notes_master()?;
        let opc = self.package.opc_package_mut();

        let partname = opc.next_partname("/ppt/notesSlides/notesSlide%d.xml")?;
        let mut notes = XmlPart::new(
            partname.clone(),
            ct::PML_NOTES_SLIDE.to_string(),
            notes_slide_xml(paragraphs)?.into_bytes(),
        );
        notes.relate_to(&notes_master, rt::NOTES_MASTER);
        notes.relate_to(slide, rt::SLIDE);
        opc.add_part(Box::new(notes));

        opc.get_part_mut(slide)?.relate_to(&partname, rt::NOTES_SLIDE);

        Ok(partname)
    }

    /// The template's notes master, or a new one themed like the first slide master.
    fn ensure_notes_master(&mut self) -> Result<PackURI> {
        if let Some(partname) = &self.notes_master {
            return Ok(partname.clone());
        }

        let theme_blob = {
            let masters = self.package.slide_masters()?;
            let master = masters.first().ok_or_else(|| {
                OoxmlError::InvalidFormat("presentation has no slide master".to_string())
            })?;
            let theme = master
                .rels()
                .part_with_reltype(rt::THEME)
                .and_then(|rel| rel.target_partname())?;
            self.package.opc_package().get_part(&theme)?.blob().to_vec()
        };

        let opc = self.package.opc_package_mut();

        let theme_partname = opc.next_partname("/ppt/theme/theme%d.xml")?;
        opc.add_part(Box::new(XmlPart::new(
            theme_partname.clone(),
            ct::OFC_THEME.to_string(),
            theme_blob,
        )));

        let partname = opc.next_partname("/ppt/notesMasters/notesMaster%d.xml")?;
        let mut notes_master = XmlPart::new(
            partname.clone(),
            ct::PML_NOTES_MASTER.to_string(),
            notes_master_xml().into_bytes(),
        );
        notes_master.relate_to(&theme_partname, rt::THEME);
        opc.add_part(Box::new(notes_master));

        let r_id = opc
            .get_part_mut(&self.presentation)?
            .relate_to(&partname, rt::NOTES_MASTER);

        self.new_notes_master_rid = Some(r_id);
        self.notes_master = Some(partname.clone());
        Ok(partname)
    }

    /// Write the slide list into `presentation.xml` and drop unreferenced parts.
    ///
    /// Returns the number of slides in the finished presentation.
    pub fn finish(self) -> Result<usize> {
        let opc = self.package.opc_package_mut();
        let presentation = opc.get_part_mut(&self.presentation)?;
        let xml = rewrite_presentation_xml(
            presentation.blob(),
            &self.slides,
            self.new_notes_master_rid.as_deref(),
        )?;
        presentation.set_blob(xml);

        opc.prune_unreachable();
        Ok(self.slides.len())
    }
}
