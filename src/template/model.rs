/// Normalized model of a template's layouts and placeholders.
use crate::common::unit::{emu_to_inch_f64, emu_to_pt_f64};
use crate::ooxml::pptx::shapes::placeholder::{PlaceholderShape, Xfrm};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Semantic role of a placeholder, derived from its declared type only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderRole {
    Title,
    Body,
    Subtitle,
    /// Date, footer, slide number and header regions
    Footer,
    Picture,
    Other,
}

impl fmt::Display for PlaceholderRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlaceholderRole::Title => "title",
            PlaceholderRole::Body => "body",
            PlaceholderRole::Subtitle => "subtitle",
            PlaceholderRole::Footer => "footer",
            PlaceholderRole::Picture => "picture",
            PlaceholderRole::Other => "other",
        };
        f.write_str(name)
    }
}

/// Placeholder position and size in EMUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

impl BoundingBox {
    #[inline]
    pub fn width_pt(&self) -> f64 {
        emu_to_pt_f64(self.cx)
    }

    #[inline]
    pub fn height_pt(&self) -> f64 {
        emu_to_pt_f64(self.cy)
    }
}

impl From<Xfrm> for BoundingBox {
    fn from(xfrm: Xfrm) -> Self {
        Self {
            x: xfrm.x,
            y: xfrm.y,
            cx: xfrm.cx,
            cy: xfrm.cy,
        }
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2}in x {:.2}in at ({:.2}in, {:.2}in)",
            emu_to_inch_f64(self.cx),
            emu_to_inch_f64(self.cy),
            emu_to_inch_f64(self.x),
            emu_to_inch_f64(self.y)
        )
    }
}

/// One placeholder region of a layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderSlot {
    pub role: PlaceholderRole,
    /// `idx` used to bind the slide placeholder to this one; title
    /// placeholders usually have none
    pub idx: Option<u32>,
    /// Declared `type` attribute, `None` when absent
    pub ph_type: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orient: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sz: Option<String>,
    pub bbox: Option<BoundingBox>,
}

impl PlaceholderSlot {
    /// The `<p:ph>` declaration a slide uses to inherit from this slot.
    pub fn declaration(&self) -> PlaceholderShape {
        PlaceholderShape {
            shape_id: 0,
            name: self.name.clone(),
            ph_type: self.ph_type.clone(),
            idx: self.idx,
            orient: self.orient.clone(),
            sz: self.sz.clone(),
            xfrm: None,
        }
    }
}

/// One layout available in the template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutDescriptor {
    /// Position in master-then-layout order, starting at 0
    pub id: usize,
    pub name: String,
    /// Partname of the layout inside the package
    pub partname: String,
    pub placeholders: Vec<PlaceholderSlot>,
}

impl LayoutDescriptor {
    pub fn slots(&self, role: PlaceholderRole) -> impl Iterator<Item = &PlaceholderSlot> {
        self.placeholders.iter().filter(move |slot| slot.role == role)
    }

    #[inline]
    pub fn has_role(&self, role: PlaceholderRole) -> bool {
        self.slots(role).next().is_some()
    }

    /// No placeholders other than footer regions.
    pub fn is_blank(&self) -> bool {
        self.placeholders
            .iter()
            .all(|slot| slot.role == PlaceholderRole::Footer)
    }
}

/// Catalog of a loaded template.
///
/// Keeps the template bytes that were introspected so rendering works from
/// exactly the same package and never reopens the template file.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateCatalog {
    pub source: PathBuf,
    /// Slide width and height in EMUs, when declared
    pub slide_size: Option<(i64, i64)>,
    pub layouts: Vec<LayoutDescriptor>,
    #[serde(skip)]
    pub(crate) template_bytes: Vec<u8>,
}

impl TemplateCatalog {
    pub fn get(&self, id: usize) -> Option<&LayoutDescriptor> {
        self.layouts.get(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    /// Whether at least one layout can carry a slide title.
    pub fn has_title_capable_layout(&self) -> bool {
        self.layouts
            .iter()
            .any(|layout| layout.has_role(PlaceholderRole::Title))
    }

    pub fn template_bytes(&self) -> &[u8] {
        &self.template_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(role: PlaceholderRole) -> PlaceholderSlot {
        PlaceholderSlot {
            role,
            idx: None,
            ph_type: None,
            name: String::new(),
            orient: None,
            sz: None,
            bbox: None,
        }
    }

    #[test]
    fn test_blank_ignores_footers() {
        let layout = LayoutDescriptor {
            id: 0,
            name: "Blank".to_string(),
            partname: "/ppt/slideLayouts/slideLayout7.xml".to_string(),
            placeholders: vec![slot(PlaceholderRole::Footer), slot(PlaceholderRole::Footer)],
        };
        assert!(layout.is_blank());
        assert!(!layout.has_role(PlaceholderRole::Title));
    }

    #[test]
    fn test_declaration_keeps_binding_attributes() {
        let slot = PlaceholderSlot {
            idx: Some(13),
            ph_type: Some("body".to_string()),
            sz: Some("half".to_string()),
            ..slot(PlaceholderRole::Body)
        };
        let ph = slot.declaration();
        assert_eq!(ph.idx, Some(13));
        assert_eq!(ph.ph_type.as_deref(), Some("body"));
        assert_eq!(ph.sz.as_deref(), Some("half"));
        assert!(ph.xfrm.is_none());
    }

    #[test]
    fn test_bbox_display_in_inches() {
        let bbox = BoundingBox {
            x: 914_400,
            y: 0,
            cx: 9_144_000,
            cy: 457_200,
        };
        assert_eq!(bbox.to_string(), "10.00in x 0.50in at (1.00in, 0.00in)");
        assert_eq!(bbox.height_pt(), 36.0);
    }
}
