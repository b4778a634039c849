/// Notes slides and the notes master they hang off.
use crate::ooxml::error::Result;
use crate::ooxml::pptx::writer::slide::{SP_TREE_HEADER, write_text_body};

const NOTES_NAMESPACES: &str = concat!(
    r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#,
);

/// Generate a notes slide: the slide image placeholder plus a body
/// placeholder (`idx="1"`) holding `paragraphs`.
pub fn notes_slide_xml(paragraphs: &[String]) -> Result<String> {
    let mut xml = String::with_capacity(1536 + paragraphs.iter().map(String::len).sum::<usize>());

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str("<p:notes ");
    xml.push_str(NOTES_NAMESPACES);
    xml.push('>');
    xml.push_str("<p:cSld>");
    xml.push_str("<p:spTree>");
    xml.push_str(SP_TREE_HEADER);

    xml.push_str("<p:sp>");
    xml.push_str("<p:nvSpPr>");
    xml.push_str(r#"<p:cNvPr id="2" name="Slide Image Placeholder 1"/>"#);
    xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1" noRot="1" noChangeAspect="1"/></p:cNvSpPr>"#);
    xml.push_str(r#"<p:nvPr><p:ph type="sldImg"/></p:nvPr>"#);
    xml.push_str("</p:nvSpPr>");
    xml.push_str("<p:spPr/>");
    xml.push_str("</p:sp>");

    xml.push_str("<p:sp>");
    xml.push_str("<p:nvSpPr>");
    xml.push_str(r#"<p:cNvPr id="3" name="Notes Placeholder 2"/>"#);
    xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#);
    xml.push_str(r#"<p:nvPr><p:ph type="body" idx="1"/></p:nvPr>"#);
    xml.push_str("</p:nvSpPr>");
    xml.push_str("<p:spPr/>");
    write_text_body(&mut xml, paragraphs)?;
    xml.push_str("</p:sp>");

    xml.push_str("</p:spTree>");
    xml.push_str("</p:cSld>");
    xml.push_str(r#"<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>"#);
    xml.push_str("</p:notes>");

    Ok(xml)
}

/// Generate a minimal notes master for a portrait notes page of the default
/// 6858000 x 9144000 EMU size.
///
/// Declares the slide image and notes body placeholders that notes slides
/// inherit their geometry from; colours map straight onto the theme.
pub fn notes_master_xml() -> String {
    let mut xml = String::with_capacity(2048);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str("<p:notesMaster ");
    xml.push_str(NOTES_NAMESPACES);
    xml.push('>');
    xml.push_str("<p:cSld>");
    xml.push_str("<p:spTree>");
    xml.push_str(SP_TREE_HEADER);

    xml.push_str("<p:sp>");
    xml.push_str("<p:nvSpPr>");
    xml.push_str(r#"<p:cNvPr id="2" name="Slide Image Placeholder 1"/>"#);
    xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1" noRot="1" noChangeAspect="1"/></p:cNvSpPr>"#);
    xml.push_str(r#"<p:nvPr><p:ph type="sldImg" idx="2"/></p:nvPr>"#);
    xml.push_str("</p:nvSpPr>");
    xml.push_str("<p:spPr>");
    xml.push_str(r#"<a:xfrm><a:off x="1143000" y="685800"/><a:ext cx="4572000" cy="3429000"/></a:xfrm>"#);
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
    xml.push_str(r#"<a:noFill/><a:ln w="12700"><a:solidFill><a:prstClr val="black"/></a:solidFill></a:ln>"#);
    xml.push_str("</p:spPr>");
    xml.push_str("</p:sp>");

    xml.push_str("<p:sp>");
    xml.push_str("<p:nvSpPr>");
    xml.push_str(r#"<p:cNvPr id="3" name="Notes Placeholder 2"/>"#);
    xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#);
    xml.push_str(r#"<p:nvPr><p:ph type="body" sz="quarter" idx="3"/></p:nvPr>"#);
    xml.push_str("</p:nvSpPr>");
    xml.push_str("<p:spPr>");
    xml.push_str(r#"<a:xfrm><a:off x="685800" y="4343400"/><a:ext cx="5486400" cy="4114800"/></a:xfrm>"#);
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
    xml.push_str("</p:spPr>");
    xml.push_str(r#"<p:txBody><a:bodyPr vert="horz" lIns="91440" tIns="45720" rIns="91440" bIns="45720" rtlCol="0"/><a:lstStyle/><a:p><a:pPr lvl="0"/><a:r><a:rPr lang="en-US"/><a:t>Click to edit Master text styles</a:t></a:r></a:p></p:txBody>"#);
    xml.push_str("</p:sp>");

    xml.push_str("</p:spTree>");
    xml.push_str("</p:cSld>");
    xml.push_str(concat!(
        r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" "#,
        r#"accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>"#,
    ));
    xml.push_str(concat!(
        "<p:notesStyle>",
        r#"<a:lvl1pPr marL="0" algn="l" defTabSz="914400" rtl="0" eaLnBrk="1" latinLnBrk="0" hangingPunct="1">"#,
        r#"<a:defRPr sz="1200" kern="1200"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill>"#,
        r#"<a:latin typeface="+mn-lt"/><a:ea typeface="+mn-ea"/><a:cs typeface="+mn-cs"/></a:defRPr>"#,
        "</a:lvl1pPr>",
        "</p:notesStyle>",
    ));
    xml.push_str("</p:notesMaster>");

    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::pptx::shapes::placeholder::parse_placeholders;

    #[test]
    fn test_notes_slide_body_placeholder() {
        let xml = notes_slide_xml(&[
            "Open with the headline number.".to_string(),
            "Additional points:".to_string(),
        ])
        .unwrap();

        let placeholders = parse_placeholders(xml.as_bytes()).unwrap();
        assert_eq!(placeholders.len(), 2);
        assert_eq!(placeholders[0].ph_type.as_deref(), Some("sldImg"));
        assert_eq!(placeholders[1].ph_type.as_deref(), Some("body"));
        assert_eq!(placeholders[1].idx, Some(1));
        assert!(xml.contains("<a:t>Additional points:</a:t>"));
    }

    #[test]
    fn test_notes_master_declares_inherited_geometry() {
        let xml = notes_master_xml();
        let placeholders = parse_placeholders(xml.as_bytes()).unwrap();
        assert_eq!(placeholders.len(), 2);
        assert!(placeholders.iter().all(|ph| ph.xfrm.is_some()));
        assert!(xml.contains("<p:clrMap "));
    }
}
