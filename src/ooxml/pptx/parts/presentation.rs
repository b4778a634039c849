/// Presentation part - the main part in a .pptx package.
///
/// Corresponds to `/ppt/presentation.xml` in the package.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::part::Part;
use crate::ooxml::pptx::parts::id_list_rids;
use quick_xml::Reader;
use quick_xml::events::Event;

/// Slide dimensions in EMUs, from `<p:sldSz>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideSize {
    pub cx: i64,
    pub cy: i64,
}

/// An entry of `<p:sldIdLst>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideIdEntry {
    /// Slide ID, unique in the presentation and at least 256
    pub id: u32,
    pub r_id: String,
}

/// The main presentation part.
///
/// Holds the presentation-level lists of slide masters, notes masters and
/// slides, each referring to its part through a relationship ID.
pub struct PresentationPart<'a> {
    part: &'a dyn Part,
}

impl<'a> PresentationPart<'a> {
    pub fn from_part(part: &'a dyn Part) -> Self {
        Self { part }
    }

    #[inline]
    fn xml_bytes(&self) -> &[u8] {
        self.part.blob()
    }

    /// Relationship IDs of all slide masters, in `sldMasterIdLst` order.
    pub fn slide_master_rids(&self) -> Result<Vec<String>> {
        id_list_rids(self.xml_bytes(), b"sldMasterId")
    }

    /// Relationship IDs of the notes masters (zero or one in practice).
    pub fn notes_master_rids(&self) -> Result<Vec<String>> {
        id_list_rids(self.xml_bytes(), b"notesMasterId")
    }

    /// Slide list entries in presentation order.
    pub fn slide_entries(&self) -> Result<Vec<SlideIdEntry>> {
        let mut reader = Reader::from_reader(self.xml_bytes());
        reader.config_mut().trim_text(true);

        let mut entries = Vec::new();

        loop {
            match reader.read_event()? {
                Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"sldId" => {
                    let mut id = None;
                    let mut r_id = None;
                    for attr in e.attributes() {
                        let attr = attr?;
                        if attr.key.as_ref() == b"id" {
                            id = atoi_simd::parse::<u32, false, false>(&attr.value).ok();
                        } else if attr.key.prefix().is_some()
                            && attr.key.local_name().as_ref() == b"id"
                        {
                            r_id = Some(attr.unescape_value()?.into_owned());
                        }
                    }
                    if let (Some(id), Some(r_id)) = (id, r_id) {
                        entries.push(SlideIdEntry { id, r_id });
                    }
                },
                Event::Eof => break,
                _ => {},
            }
        }

        Ok(entries)
    }

    /// Get the slide size, if the presentation declares one.
    pub fn slide_size(&self) -> Result<Option<SlideSize>> {
        let mut reader = Reader::from_reader(self.xml_bytes());
        reader.config_mut().trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                    if e.local_name().as_ref() == b"sldSz" {
                        let mut size = SlideSize { cx: 0, cy: 0 };
                        for attr in e.attributes().flatten() {
                            let value = atoi_simd::parse::<i64, false, false>(&attr.value).map_err(|_| {
                                OoxmlError::Xml("Invalid slide size".to_string())
                            });
                            match attr.key.as_ref() {
                                b"cx" => size.cx = value?,
                                b"cy" => size.cy = value?,
                                _ => {},
                            }
                        }
                        return Ok(Some(size));
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e.to_string())),
                _ => {},
            }
        }

        Ok(None)
    }

    #[inline]
    pub fn part(&self) -> &'a dyn Part {
        self.part
    }
}
