/// Placeholder shapes as declared on slide masters and layouts.
use crate::ooxml::error::Result;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Position and size of a shape in EMUs (from `<a:xfrm>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Xfrm {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

/// A placeholder `<p:sp>` with its `<p:ph>` declaration.
///
/// `ph_type` is the raw `type` attribute; `None` means the attribute was
/// absent, which PresentationML defines as an object/body placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderShape {
    /// `cNvPr/@id`
    pub shape_id: u32,
    /// `cNvPr/@name`
    pub name: String,
    pub ph_type: Option<String>,
    pub idx: Option<u32>,
    pub orient: Option<String>,
    pub sz: Option<String>,
    /// Geometry declared on the shape itself; inherited geometry is not resolved here.
    pub xfrm: Option<Xfrm>,
}

#[derive(Default)]
struct ShapeScan {
    shape_id: u32,
    name: String,
    ph: Option<PhScan>,
    in_sp_pr: bool,
    in_xfrm: bool,
    off: Option<(i64, i64)>,
    ext: Option<(i64, i64)>,
}

#[derive(Default)]
struct PhScan {
    ph_type: Option<String>,
    idx: Option<u32>,
    orient: Option<String>,
    sz: Option<String>,
}

/// Collect every placeholder shape of a master, layout or slide, in document order.
///
/// Shapes without a `<p:ph>` element are skipped.
pub fn parse_placeholders(xml: &[u8]) -> Result<Vec<PlaceholderShape>> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut placeholders = Vec::new();
    let mut current: Option<ShapeScan> = None;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => match e.local_name().as_ref() {
                b"sp" => current = Some(ShapeScan::default()),
                b"spPr" => {
                    if let Some(scan) = current.as_mut() {
                        scan.in_sp_pr = true;
                    }
                },
                b"xfrm" => {
                    if let Some(scan) = current.as_mut() {
                        scan.in_xfrm = scan.in_sp_pr;
                    }
                },
                b"cNvPr" => {
                    if let Some(scan) = current.as_mut() {
                        read_c_nv_pr(e, scan)?;
                    }
                },
                b"ph" => {
                    if let Some(scan) = current.as_mut() {
                        scan.ph = Some(read_ph(e)?);
                    }
                },
                _ => {},
            },
            Event::Empty(ref e) => {
                let Some(scan) = current.as_mut() else {
                    continue;
                };
                match e.local_name().as_ref() {
                    b"cNvPr" => read_c_nv_pr(e, scan)?,
                    b"ph" => scan.ph = Some(read_ph(e)?),
                    b"off" if scan.in_xfrm => scan.off = Some(read_pair(e, b"x", b"y")?),
                    b"ext" if scan.in_xfrm => scan.ext = Some(read_pair(e, b"cx", b"cy")?),
                    _ => {},
                }
            },
            Event::End(ref e) => match e.local_name().as_ref() {
                b"sp" => {
                    if let Some(scan) = current.take()
                        && let Some(ph) = scan.ph
                    {
                        let xfrm = match (scan.off, scan.ext) {
                            (Some((x, y)), Some((cx, cy))) => Some(Xfrm { x, y, cx, cy }),
                            _ => None,
                        };
                        placeholders.push(PlaceholderShape {
                            shape_id: scan.shape_id,
                            name: scan.name,
                            ph_type: ph.ph_type,
                            idx: ph.idx,
                            orient: ph.orient,
                            sz: ph.sz,
                            xfrm,
                        });
                    }
                },
                b"spPr" => {
                    if let Some(scan) = current.as_mut() {
                        scan.in_sp_pr = false;
                    }
                },
                b"xfrm" => {
                    if let Some(scan) = current.as_mut() {
                        scan.in_xfrm = false;
                    }
                },
                _ => {},
            },
            Event::Eof => break,
            _ => {},
        }
    }

    Ok(placeholders)
}

fn read_c_nv_pr(e: &BytesStart<'_>, scan: &mut ShapeScan) -> Result<()> {
    for attr in e.attributes() {
        let attr = attr?;
        match attr.key.as_ref() {
            b"id" => scan.shape_id = parse_num(&attr.value).unwrap_or(0),
            b"name" => scan.name = attr.unescape_value()?.into_owned(),
            _ => {},
        }
    }
    Ok(())
}

fn read_ph(e: &BytesStart<'_>) -> Result<PhScan> {
    let mut ph = PhScan::default();
    for attr in e.attributes() {
        let attr = attr?;
        match attr.key.as_ref() {
            b"type" => ph.ph_type = Some(attr.unescape_value()?.into_owned()),
            b"idx" => ph.idx = parse_num(&attr.value),
            b"orient" => ph.orient = Some(attr.unescape_value()?.into_owned()),
            b"sz" => ph.sz = Some(attr.unescape_value()?.into_owned()),
            _ => {},
        }
    }
    Ok(ph)
}

fn read_pair(e: &BytesStart<'_>, first: &[u8], second: &[u8]) -> Result<(i64, i64)> {
    let mut pair = (0, 0);
    for attr in e.attributes() {
        let attr = attr?;
        let key = attr.key.as_ref();
        if key == first {
            pair.0 = parse_num(&attr.value).unwrap_or(0);
        } else if key == second {
            pair.1 = parse_num(&attr.value).unwrap_or(0);
        }
    }
    Ok(pair)
}

#[inline]
fn parse_num<T: std::str::FromStr>(value: &[u8]) -> Option<T> {
    std::str::from_utf8(value).ok()?.trim().parse().ok()
}
