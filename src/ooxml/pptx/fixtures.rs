//! Synthetic presentation templates for tests.
//!
//! Builds small but structurally complete `.pptx` packages in memory: one
//! theme, one or more slide masters with title/body/footer placeholders,
//! the requested layouts and, optionally, pre-existing template slides.

use crate::ooxml::opc::constants::content_type as ct;
use crate::ooxml::pptx::shapes::placeholder::Xfrm;
use std::fmt::Write as FmtWrite;
use std::io::{Cursor, Write};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const NS: &str = concat!(
    r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#,
);

const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// A placeholder declared on a fixture layout.
#[derive(Debug, Clone)]
pub struct FixturePlaceholder {
    pub ph_type: Option<&'static str>,
    pub idx: Option<u32>,
    pub xfrm: Option<Xfrm>,
}

impl FixturePlaceholder {
    fn new(ph_type: Option<&'static str>, idx: Option<u32>) -> Self {
        Self { ph_type, idx, xfrm: None }
    }

    pub fn title() -> Self {
        Self::new(Some("title"), None)
    }

    pub fn ctr_title() -> Self {
        Self::new(Some("ctrTitle"), None)
    }

    pub fn subtitle(idx: u32) -> Self {
        Self::new(Some("subTitle"), Some(idx))
    }

    pub fn body(idx: u32) -> Self {
        Self::new(Some("body"), Some(idx))
    }

    /// Content placeholder without a `type` attribute.
    pub fn object(idx: u32) -> Self {
        Self::new(None, Some(idx))
    }

    pub fn picture(idx: u32) -> Self {
        Self::new(Some("pic"), Some(idx))
    }

    pub fn date(idx: u32) -> Self {
        Self::new(Some("dt"), Some(idx))
    }

    pub fn slide_number(idx: u32) -> Self {
        Self::new(Some("sldNum"), Some(idx))
    }

    pub fn chart(idx: u32) -> Self {
        Self::new(Some("chart"), Some(idx))
    }

    /// Give the placeholder its own geometry (EMUs).
    pub fn at(mut self, x: i64, y: i64, cx: i64, cy: i64) -> Self {
        self.xfrm = Some(Xfrm { x, y, cx, cy });
        self
    }
}

struct FixtureLayout {
    name: String,
    placeholders: Vec<FixturePlaceholder>,
}

/// Builder for an in-memory template package.
pub struct TemplateFixture {
    masters: Vec<Vec<FixtureLayout>>,
    existing_slides: usize,
    main_content_type: String,
}

impl TemplateFixture {
    pub fn new() -> Self {
        Self {
            masters: vec![Vec::new()],
            existing_slides: 0,
            main_content_type: ct::PML_PRESENTATION_MAIN.to_string(),
        }
    }

    /// Add a layout to the most recently started master.
    pub fn layout(mut self, name: &str, placeholders: Vec<FixturePlaceholder>) -> Self {
        if let Some(layouts) = self.masters.last_mut() {
            layouts.push(FixtureLayout {
                name: name.to_string(),
                placeholders,
            });
        }
        self
    }

    /// Start another slide master; following layouts belong to it.
    pub fn master(mut self) -> Self {
        self.masters.push(Vec::new());
        self
    }

    /// Template slides already present, all on the first layout.
    pub fn existing_slides(mut self, count: usize) -> Self {
        self.existing_slides = count;
        self
    }

    pub fn main_content_type(mut self, content_type: &str) -> Self {
        self.main_content_type = content_type.to_string();
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut files: Vec<(String, String)> = Vec::new();
        let mut overrides: Vec<(String, &str)> = vec![
            ("/ppt/presentation.xml".to_string(), self.main_content_type.as_str()),
            ("/ppt/theme/theme1.xml".to_string(), ct::OFC_THEME),
        ];

        files.push((
            "_rels/.rels".to_string(),
            single_rel("officeDocument", "ppt/presentation.xml".to_string()),
        ));

        let mut pres_rels: Vec<(String, String, String)> = Vec::new();
        let mut master_ids = String::new();
        let mut layout_no = 0usize;

        for (m, layouts) in self.masters.iter().enumerate() {
            let master_no = m + 1;
            let r_id = format!("rId{}", pres_rels.len() + 1);
            let _ = write!(master_ids, r#"<p:sldMasterId id="{}" r:id="{}"/>"#, 2147483648u64 + (m as u64) * 100, r_id);
            pres_rels.push((
                r_id,
                "slideMaster".to_string(),
                format!("slideMasters/slideMaster{}.xml", master_no),
            ));

            let mut master_rels = Vec::new();
            let mut layout_ids = String::new();
            for (l, layout) in layouts.iter().enumerate() {
                layout_no += 1;
                let r_id = format!("rId{}", l + 1);
                let _ = write!(
                    layout_ids,
                    r#"<p:sldLayoutId id="{}" r:id="{}"/>"#,
                    2147483649u64 + (m as u64) * 100 + l as u64,
                    r_id
                );
                master_rels.push((
                    r_id,
                    "slideLayout".to_string(),
                    format!("../slideLayouts/slideLayout{}.xml", layout_no),
                ));

                files.push((
                    format!("ppt/slideLayouts/slideLayout{}.xml", layout_no),
                    layout_xml(layout),
                ));
                files.push((
                    format!("ppt/slideLayouts/_rels/slideLayout{}.xml.rels", layout_no),
                    single_rel(
                        "slideMaster",
                        format!("../slideMasters/slideMaster{}.xml", master_no),
                    ),
                ));
                overrides.push((
                    format!("/ppt/slideLayouts/slideLayout{}.xml", layout_no),
                    ct::PML_SLIDE_LAYOUT,
                ));
            }
            master_rels.push((
                format!("rId{}", layouts.len() + 1),
                "theme".to_string(),
                "../theme/theme1.xml".to_string(),
            ));

            files.push((
                format!("ppt/slideMasters/slideMaster{}.xml", master_no),
                master_xml(&layout_ids),
            ));
            files.push((
                format!("ppt/slideMasters/_rels/slideMaster{}.xml.rels", master_no),
                rels(&master_rels),
            ));
            overrides.push((
                format!("/ppt/slideMasters/slideMaster{}.xml", master_no),
                ct::PML_SLIDE_MASTER,
            ));
        }

        pres_rels.push((
            format!("rId{}", pres_rels.len() + 1),
            "theme".to_string(),
            "theme/theme1.xml".to_string(),
        ));

        let mut slide_ids = String::new();
        let has_layout = self.masters.iter().any(|layouts| !layouts.is_empty());
        let slide_count = if has_layout { self.existing_slides } else { 0 };
        for s in 0..slide_count {
            let slide_no = s + 1;
            let r_id = format!("rId{}", pres_rels.len() + 1);
            let _ = write!(slide_ids, r#"<p:sldId id="{}" r:id="{}"/>"#, 256 + s, r_id);
            pres_rels.push((r_id, "slide".to_string(), format!("slides/slide{}.xml", slide_no)));

            files.push((
                format!("ppt/slides/slide{}.xml", slide_no),
                format!(
                    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:sld {}><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/><p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr/><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:p><a:r><a:t>Template slide {}</a:t></a:r></a:p></p:txBody></p:sp></p:spTree></p:cSld></p:sld>"#,
                    NS, slide_no
                ),
            ));
            files.push((
                format!("ppt/slides/_rels/slide{}.xml.rels", slide_no),
                single_rel("slideLayout", "../slideLayouts/slideLayout1.xml".to_string()),
            ));
            overrides.push((format!("/ppt/slides/slide{}.xml", slide_no), ct::PML_SLIDE));
        }

        let slide_list = if slide_ids.is_empty() {
            String::new()
        } else {
            format!("<p:sldIdLst>{}</p:sldIdLst>", slide_ids)
        };
        files.push((
            "ppt/presentation.xml".to_string(),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:presentation {} saveSubsetFonts="1"><p:sldMasterIdLst>{}</p:sldMasterIdLst>{}<p:sldSz cx="12192000" cy="6858000"/><p:notesSz cx="6858000" cy="9144000"/></p:presentation>"#,
                NS, master_ids, slide_list
            ),
        ));
        files.push(("ppt/_rels/presentation.xml.rels".to_string(), rels(&pres_rels)));
        files.push(("ppt/theme/theme1.xml".to_string(), THEME.to_string()));

        let mut content_types = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/>"#,
        );
        for (partname, content_type) in &overrides {
            let _ = write!(
                content_types,
                r#"<Override PartName="{}" ContentType="{}"/>"#,
                partname, content_type
            );
        }
        content_types.push_str("</Types>");

        let mut zip_data = Vec::new();
        {
            let mut writer = ZipWriter::new(Cursor::new(&mut zip_data));
            let options = SimpleFileOptions::default();

            writer.start_file("[Content_Types].xml", options).unwrap();
            writer.write_all(content_types.as_bytes()).unwrap();
            for (name, content) in &files {
                writer.start_file(name.as_str(), options).unwrap();
                writer.write_all(content.as_bytes()).unwrap();
            }
            writer.finish().unwrap();
        }
        zip_data
    }
}

impl Default for TemplateFixture {
    fn default() -> Self {
        Self::new()
    }
}

fn rels(entries: &[(String, String, String)]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for (r_id, kind, target) in entries {
        let _ = write!(
            xml,
            r#"<Relationship Id="{}" Type="{}/{}" Target="{}"/>"#,
            r_id, REL_NS, kind, target
        );
    }
    xml.push_str("</Relationships>");
    xml
}

fn single_rel(kind: &str, target: String) -> String {
    rels(&[("rId1".to_string(), kind.to_string(), target)])
}

fn placeholder_sp(xml: &mut String, shape_id: usize, ph: &FixturePlaceholder) {
    let _ = write!(
        xml,
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{}" name="Placeholder {}"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph"#,
        shape_id,
        shape_id - 1
    );
    if let Some(ph_type) = ph.ph_type {
        let _ = write!(xml, r#" type="{}""#, ph_type);
    }
    if let Some(idx) = ph.idx {
        let _ = write!(xml, r#" idx="{}""#, idx);
    }
    xml.push_str("/></p:nvPr></p:nvSpPr>");
    match ph.xfrm {
        Some(Xfrm { x, y, cx, cy }) => {
            let _ = write!(
                xml,
                r#"<p:spPr><a:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></a:xfrm></p:spPr>"#,
                x, y, cx, cy
            );
        },
        None => xml.push_str("<p:spPr/>"),
    }
    xml.push_str(r#"<p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:r><a:rPr lang="en-US"/><a:t>Click to edit</a:t></a:r></a:p></p:txBody></p:sp>"#);
}

fn sp_tree(placeholders: &[FixturePlaceholder]) -> String {
    let mut xml = String::from(
        r#"<p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>"#,
    );
    for (n, ph) in placeholders.iter().enumerate() {
        placeholder_sp(&mut xml, n + 2, ph);
    }
    xml.push_str("</p:spTree>");
    xml
}

fn layout_xml(layout: &FixtureLayout) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:sldLayout {} preserve="1"><p:cSld name="{}">{}</p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#,
        NS,
        layout.name,
        sp_tree(&layout.placeholders)
    )
}

/// Master geometry mirrors the default 16:9 Office master.
fn master_xml(layout_ids: &str) -> String {
    let placeholders = [
        FixturePlaceholder::title().at(838200, 365125, 10515600, 1325563),
        FixturePlaceholder::body(1).at(838200, 1825625, 10515600, 4351338),
        FixturePlaceholder::date(2).at(838200, 6356350, 2743200, 365125),
        FixturePlaceholder::slide_number(4).at(8610600, 6356350, 2743200, 365125),
    ];
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:sldMaster {}><p:cSld>{}</p:cSld><p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/><p:sldLayoutIdLst>{}</p:sldLayoutIdLst><p:txStyles><p:titleStyle/><p:bodyStyle/><p:otherStyle/></p:txStyles></p:sldMaster>"#,
        NS,
        sp_tree(&placeholders),
        layout_ids
    )
}

const THEME: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Fixture"><a:themeElements><a:clrScheme name="Office"><a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1><a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1><a:dk2><a:srgbClr val="44546A"/></a:dk2><a:lt2><a:srgbClr val="E7E6E6"/></a:lt2><a:accent1><a:srgbClr val="4472C4"/></a:accent1><a:accent2><a:srgbClr val="ED7D31"/></a:accent2><a:accent3><a:srgbClr val="A5A5A5"/></a:accent3><a:accent4><a:srgbClr val="FFC000"/></a:accent4><a:accent5><a:srgbClr val="5B9BD5"/></a:accent5><a:accent6><a:srgbClr val="70AD47"/></a:accent6><a:hlink><a:srgbClr val="0563C1"/></a:hlink><a:folHlink><a:srgbClr val="954F72"/></a:folHlink></a:clrScheme><a:fontScheme name="Office"><a:majorFont><a:latin typeface="Calibri Light"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont><a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont></a:fontScheme><a:fmtScheme name="Office"><a:fillStyleLst/><a:lnStyleLst/><a:effectStyleLst/><a:bgFillStyleLst/></a:fmtScheme></a:themeElements></a:theme>"#;
