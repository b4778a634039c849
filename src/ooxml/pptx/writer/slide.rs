/// Slide XML built from a layout's placeholders.
///
/// Each placeholder is cloned as a `<p:sp>` that carries only its `<p:ph>`
/// reference and an empty `<p:spPr/>`, so position, size, fonts and colours
/// keep flowing from the layout and master. Only text is written.
use crate::common::xml::{escape_xml, strip_invalid_xml_chars};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::pptx::shapes::placeholder::PlaceholderShape;
use std::fmt::Write as FmtWrite;

/// A layout placeholder and the paragraphs to place in its clone.
///
/// An empty `paragraphs` slice leaves the clone empty, which PowerPoint shows
/// as the layout's prompt text while editing and as nothing in a slideshow.
#[derive(Debug, Clone, Copy)]
pub struct PlaceholderContent<'a> {
    pub placeholder: &'a PlaceholderShape,
    pub paragraphs: &'a [String],
}

/// Whether a placeholder of this type is cloned with a text body.
#[inline]
pub fn has_text_frame(ph_type: Option<&str>) -> bool {
    matches!(
        ph_type,
        None | Some("title" | "ctrTitle" | "subTitle" | "body" | "obj")
    )
}

pub(crate) const SLIDE_OPEN: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">"#,
);

/// Group shape properties every `<p:spTree>` starts with.
pub(crate) const SP_TREE_HEADER: &str = concat!(
    "<p:nvGrpSpPr>",
    r#"<p:cNvPr id="1" name=""/>"#,
    "<p:cNvGrpSpPr/>",
    "<p:nvPr/>",
    "</p:nvGrpSpPr>",
    "<p:grpSpPr>",
    "<a:xfrm>",
    r#"<a:off x="0" y="0"/>"#,
    r#"<a:ext cx="0" cy="0"/>"#,
    r#"<a:chOff x="0" y="0"/>"#,
    r#"<a:chExt cx="0" cy="0"/>"#,
    "</a:xfrm>",
    "</p:grpSpPr>",
);

/// Generate slide XML cloning `placeholders` in order.
pub fn slide_xml(placeholders: &[PlaceholderContent<'_>]) -> Result<String> {
    let mut xml = String::with_capacity(1024 + placeholders.len() * 512);

    xml.push_str(SLIDE_OPEN);
    xml.push_str("<p:cSld>");
    xml.push_str("<p:spTree>");
    xml.push_str(SP_TREE_HEADER);

    // Group shape uses id=1
    for (offset, content) in placeholders.iter().enumerate() {
        write_placeholder_clone(&mut xml, offset as u32 + 2, content)?;
    }

    xml.push_str("</p:spTree>");
    xml.push_str("</p:cSld>");
    xml.push_str(r#"<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>"#);
    xml.push_str("</p:sld>");

    Ok(xml)
}

fn write_placeholder_clone(
    xml: &mut String,
    shape_id: u32,
    content: &PlaceholderContent<'_>,
) -> Result<()> {
    let ph = content.placeholder;

    xml.push_str("<p:sp>");
    xml.push_str("<p:nvSpPr>");
    write!(
        xml,
        r#"<p:cNvPr id="{}" name="{}"/>"#,
        shape_id,
        escape_xml(&ph.name)
    )
    .map_err(|e| OoxmlError::Xml(e.to_string()))?;
    xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#);
    xml.push_str("<p:nvPr>");
    write_ph(xml, ph)?;
    xml.push_str("</p:nvPr>");
    xml.push_str("</p:nvSpPr>");
    xml.push_str("<p:spPr/>");

    if has_text_frame(ph.ph_type.as_deref()) {
        write_text_body(xml, content.paragraphs)?;
    }

    xml.push_str("</p:sp>");
    Ok(())
}

fn write_ph(xml: &mut String, ph: &PlaceholderShape) -> Result<()> {
    xml.push_str("<p:ph");
    if let Some(ph_type) = &ph.ph_type {
        write!(xml, r#" type="{}""#, escape_xml(ph_type)).map_err(|e| OoxmlError::Xml(e.to_string()))?;
    }
    if let Some(orient) = &ph.orient {
        write!(xml, r#" orient="{}""#, escape_xml(orient)).map_err(|e| OoxmlError::Xml(e.to_string()))?;
    }
    if let Some(sz) = &ph.sz {
        write!(xml, r#" sz="{}""#, escape_xml(sz)).map_err(|e| OoxmlError::Xml(e.to_string()))?;
    }
    if let Some(idx) = ph.idx {
        write!(xml, r#" idx="{}""#, idx).map_err(|e| OoxmlError::Xml(e.to_string()))?;
    }
    xml.push_str("/>");
    Ok(())
}

/// Write a `<p:txBody>` with one `<a:p>` per paragraph.
///
/// Line breaks inside a paragraph become `<a:br/>`; an empty slice yields a
/// single empty paragraph, which the schema requires.
pub(crate) fn write_text_body(xml: &mut String, paragraphs: &[String]) -> Result<()> {
    xml.push_str("<p:txBody>");
    xml.push_str("<a:bodyPr/>");
    xml.push_str("<a:lstStyle/>");

    if paragraphs.is_empty() {
        xml.push_str("<a:p/>");
    }

    for paragraph in paragraphs {
        xml.push_str("<a:p>");
        let clean = strip_invalid_xml_chars(paragraph);
        for (n, line) in clean.lines().enumerate() {
            if n > 0 {
                xml.push_str(r#"<a:br><a:rPr lang="en-US" dirty="0"/></a:br>"#);
            }
            xml.push_str("<a:r>");
            xml.push_str(r#"<a:rPr lang="en-US" dirty="0"/>"#);
            write!(xml, "<a:t>{}</a:t>", escape_xml(line))
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
            xml.push_str("</a:r>");
        }
        xml.push_str("</a:p>");
    }

    xml.push_str("</p:txBody>");
    Ok(())
}
