/// Parts for PowerPoint presentation documents.
///
/// Borrowing read-only views over the XML of the presentation, slide master
/// and slide layout parts of a loaded package.
pub mod presentation;
pub mod slide;

pub use presentation::{PresentationPart, SlideIdEntry, SlideSize};
pub use slide::{SlideLayoutPart, SlideMasterPart};

use crate::ooxml::error::Result;
use quick_xml::Reader;
use quick_xml::events::Event;

/// Collect the relationship IDs (`r:id`) of every `element` in an ID list
/// such as `sldMasterIdLst` or `sldLayoutIdLst`, in document order.
pub(crate) fn id_list_rids(xml: &[u8], element: &[u8]) -> Result<Vec<String>> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut rids = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == element => {
                for attr in e.attributes() {
                    let attr = attr?;
                    // `r:id`, whatever prefix the relationships namespace was bound to
                    if attr.key.prefix().is_some() && attr.key.local_name().as_ref() == b"id" {
                        rids.push(attr.unescape_value()?.into_owned());
                        break;
                    }
                }
            },
            Event::Eof => break,
            _ => {},
        }
    }

    Ok(rids)
}
