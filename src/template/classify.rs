//! Placeholder role classification.
//!
//! Roles come from the declared `<p:ph type>` alone, never from prompt text
//! or shape names.

use super::model::PlaceholderRole;
use phf::phf_map;

/// ST_PlaceholderType values and their roles.
static ROLE_BY_TYPE: phf::Map<&'static str, PlaceholderRole> = phf_map! {
    "title" => PlaceholderRole::Title,
    "ctrTitle" => PlaceholderRole::Title,
    "body" => PlaceholderRole::Body,
    "obj" => PlaceholderRole::Body,
    "subTitle" => PlaceholderRole::Subtitle,
    "pic" => PlaceholderRole::Picture,
    "clipArt" => PlaceholderRole::Picture,
    "dt" => PlaceholderRole::Footer,
    "ftr" => PlaceholderRole::Footer,
    "sldNum" => PlaceholderRole::Footer,
    "hdr" => PlaceholderRole::Footer,
    "chart" => PlaceholderRole::Other,
    "tbl" => PlaceholderRole::Other,
    "dgm" => PlaceholderRole::Other,
    "media" => PlaceholderRole::Other,
    "sldImg" => PlaceholderRole::Other,
};

/// Classify a declared placeholder type; an absent type is an object placeholder.
pub fn classify(ph_type: Option<&str>) -> PlaceholderRole {
    match ph_type {
        None => PlaceholderRole::Body,
        Some(ph_type) => ROLE_BY_TYPE
            .get(ph_type)
            .copied()
            .unwrap_or(PlaceholderRole::Other),
    }
}

/// Master placeholder type a layout placeholder inherits geometry from.
pub(crate) fn master_type(ph_type: Option<&str>) -> &'static str {
    match ph_type {
        Some("title" | "ctrTitle") => "title",
        Some("dt") => "dt",
        Some("ftr") => "ftr",
        Some("sldNum") => "sldNum",
        Some("hdr") => "hdr",
        _ => "body",
    }
}
