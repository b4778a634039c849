/// Slide master and slide layout parts.
///
/// Masters list their layouts in `<p:sldLayoutIdLst>`; both masters and
/// layouts declare placeholder shapes that slides inherit geometry and
/// formatting from.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::part::Part;
use crate::ooxml::pptx::parts::id_list_rids;
use crate::ooxml::pptx::shapes::placeholder::{PlaceholderShape, parse_placeholders};
use quick_xml::Reader;
use quick_xml::events::Event;

/// Read the `name` attribute of `<p:cSld>`, empty when absent.
fn common_slide_data_name(xml: &[u8]) -> Result<String> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == b"cSld" {
                    for attr in e.attributes().flatten() {
                        if attr.key.as_ref() == b"name" {
                            return Ok(attr.unescape_value()?.into_owned());
                        }
                    }
                    return Ok(String::new());
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(OoxmlError::Xml(e.to_string())),
            _ => {},
        }
    }

    Ok(String::new())
}

/// A slide layout part.
///
/// Corresponds to `/ppt/slideLayouts/slideLayoutN.xml` in the package.
pub struct SlideLayoutPart<'a> {
    part: &'a dyn Part,
}

impl<'a> SlideLayoutPart<'a> {
    pub fn from_part(part: &'a dyn Part) -> Self {
        Self { part }
    }

    /// Get the layout name.
    pub fn name(&self) -> Result<String> {
        common_slide_data_name(self.part.blob())
    }

    /// Placeholder shapes declared on this layout, in document order.
    pub fn placeholders(&self) -> Result<Vec<PlaceholderShape>> {
        parse_placeholders(self.part.blob())
    }

    #[inline]
    pub fn part(&self) -> &'a dyn Part {
        self.part
    }
}

/// A slide master part.
///
/// Corresponds to `/ppt/slideMasters/slideMasterN.xml` in the package.
pub struct SlideMasterPart<'a> {
    part: &'a dyn Part,
}

impl<'a> SlideMasterPart<'a> {
    pub fn from_part(part: &'a dyn Part) -> Self {
        Self { part }
    }

    /// Get the master name.
    pub fn name(&self) -> Result<String> {
        common_slide_data_name(self.part.blob())
    }

    /// Relationship IDs of the master's layouts, in `sldLayoutIdLst` order.
    pub fn slide_layout_rids(&self) -> Result<Vec<String>> {
        id_list_rids(self.part.blob(), b"sldLayoutId")
    }

    /// Placeholder shapes declared on the master; layouts inherit geometry from these.
    pub fn placeholders(&self) -> Result<Vec<PlaceholderShape>> {
        parse_placeholders(self.part.blob())
    }

    #[inline]
    pub fn part(&self) -> &'a dyn Part {
        self.part
    }
}
