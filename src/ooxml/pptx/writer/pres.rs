//! Rewrites `presentation.xml` with a new slide list.
//!
//! Everything outside `<p:sldIdLst>` passes through untouched so the
//! template's presentation-level settings survive. A notes master list is
//! inserted after `<p:sldMasterIdLst>` when a notes master was created.

use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::namespace;
use crate::ooxml::pptx::parts::SlideIdEntry;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};

#[inline]
fn write_err(err: impl std::fmt::Display) -> OoxmlError {
    OoxmlError::Xml(err.to_string())
}

/// Prefixes bound on the root element to the PresentationML and
/// relationships namespaces (`p` and `r` in everything PowerPoint writes).
struct RootPrefixes {
    pml: String,
    rel: String,
}

impl RootPrefixes {
    fn from_root(root: &BytesStart<'_>) -> Self {
        let pml = root
            .name()
            .prefix()
            .map(|p| String::from_utf8_lossy(p.as_ref()).into_owned());
        let mut rel = None;
        for attr in root.attributes().flatten() {
            if attr.key.as_ref().starts_with(b"xmlns:")
                && attr.value.as_ref() == namespace::OFC_RELATIONSHIPS.as_bytes()
            {
                rel = Some(String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned());
            }
        }
        Self {
            pml: pml.unwrap_or_else(|| "p".to_string()),
            rel: rel.unwrap_or_else(|| "r".to_string()),
        }
    }

    fn qualify(prefix: &str, local: &str) -> String {
        if prefix.is_empty() {
            local.to_string()
        } else {
            format!("{}:{}", prefix, local)
        }
    }

    fn pml(&self, local: &str) -> String {
        Self::qualify(&self.pml, local)
    }

    fn rel(&self, local: &str) -> String {
        Self::qualify(&self.rel, local)
    }
}

/// Produce a new `presentation.xml` whose `<p:sldIdLst>` holds exactly `slides`.
///
/// The list is placed right before `<p:sldSz>` (or `<p:notesSz>`), which is
/// where the schema sequence puts it. An empty `slides` drops the list.
/// `notes_master_rid` adds a `<p:notesMasterIdLst>` unless one exists.
pub fn rewrite_presentation_xml(
    xml: &[u8],
    slides: &[SlideIdEntry],
    notes_master_rid: Option<&str>,
) -> Result<Vec<u8>> {
    let mut reader = Reader::from_reader(xml);
    let mut writer = Writer::new(Vec::with_capacity(xml.len() + slides.len() * 48));

    let mut prefixes: Option<RootPrefixes> = None;
    let has_notes_master_list = memchr::memmem::find(xml, b"notesMasterIdLst").is_some();
    let mut notes_master_pending = notes_master_rid.filter(|_| !has_notes_master_list);
    let mut slides_written = false;

    loop {
        let event = reader.read_event()?;
        match &event {
            Event::Start(e) | Event::Empty(e) if prefixes.is_none() => {
                prefixes = Some(RootPrefixes::from_root(e));
            },
            _ => {},
        }
        let Some(names) = prefixes.as_ref() else {
            writer.write_event(event).map_err(write_err)?;
            continue;
        };

        match &event {
            Event::Start(e) if e.local_name().as_ref() == b"sldIdLst" => {
                let end = e.to_end().into_owned();
                reader.read_to_end(end.name())?;
                continue;
            },
            Event::Empty(e) if e.local_name().as_ref() == b"sldIdLst" => continue,
            Event::Start(e) | Event::Empty(e)
                if matches!(e.local_name().as_ref(), b"sldSz" | b"notesSz") =>
            {
                if let Some(r_id) = notes_master_pending.take() {
                    write_notes_master_list(&mut writer, names, r_id)?;
                }
                if !slides_written {
                    write_slide_list(&mut writer, names, slides)?;
                    slides_written = true;
                }
            },
            Event::End(e) if e.local_name().as_ref() == b"presentation" => {
                if let Some(r_id) = notes_master_pending.take() {
                    write_notes_master_list(&mut writer, names, r_id)?;
                }
                if !slides_written {
                    write_slide_list(&mut writer, names, slides)?;
                    slides_written = true;
                }
            },
            Event::Eof => break,
            _ => {},
        }

        let is_master_list_end =
            matches!(&event, Event::End(e) if e.local_name().as_ref() == b"sldMasterIdLst");
        writer.write_event(event).map_err(write_err)?;

        if is_master_list_end && let Some(r_id) = notes_master_pending.take() {
            write_notes_master_list(&mut writer, names, r_id)?;
        }
    }

    if prefixes.is_none() {
        return Err(OoxmlError::InvalidFormat(
            "presentation part has no root element".to_string(),
        ));
    }

    Ok(writer.into_inner())
}

fn write_slide_list(
    writer: &mut Writer<Vec<u8>>,
    names: &RootPrefixes,
    slides: &[SlideIdEntry],
) -> Result<()> {
    if slides.is_empty() {
        return Ok(());
    }

    let list = names.pml("sldIdLst");
    let item = names.pml("sldId");
    let rid_attr = names.rel("id");

    writer
        .write_event(Event::Start(BytesStart::new(list.as_str())))
        .map_err(write_err)?;
    for slide in slides {
        let id = slide.id.to_string();
        let element = BytesStart::new(item.as_str())
            .with_attributes([("id", id.as_str()), (rid_attr.as_str(), slide.r_id.as_str())]);
        writer.write_event(Event::Empty(element)).map_err(write_err)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(list.as_str())))
        .map_err(write_err)?;

    Ok(())
}

fn write_notes_master_list(
    writer: &mut Writer<Vec<u8>>,
    names: &RootPrefixes,
    r_id: &str,
) -> Result<()> {
    let list = names.pml("notesMasterIdLst");
    let item = names.pml("notesMasterId");
    let rid_attr = names.rel("id");

    writer
        .write_event(Event::Start(BytesStart::new(list.as_str())))
        .map_err(write_err)?;
    writer
        .write_event(Event::Empty(
            BytesStart::new(item.as_str()).with_attributes([(rid_attr.as_str(), r_id)]),
        ))
        .map_err(write_err)?;
    writer
        .write_event(Event::End(BytesEnd::new(list.as_str())))
        .map_err(write_err)?;

    Ok(())
}
