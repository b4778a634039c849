use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;

// Built once, shared across threads
static XML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "'"])
        .expect("Failed to build XML escaper")
});

/// Escape XML special characters for attribute values and text nodes.
///
/// # Examples
///
/// ```
/// use slidewright::common::xml::escape_xml;
/// assert_eq!(escape_xml("R&D <Q3>"), "R&amp;D &lt;Q3&gt;");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    XML_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"])
}

/// Drop characters XML 1.0 cannot carry at all: most C0 controls and the
/// noncharacters U+FFFE and U+FFFF.
///
/// Model output occasionally contains stray control bytes; escaping cannot
/// represent them, so they are removed before text reaches a slide.
pub fn strip_invalid_xml_chars(s: &str) -> String {
    s.chars()
        .filter(|&c| match c {
            '\t' | '\n' | '\r' => true,
            '\u{FFFE}' | '\u{FFFF}' => false,
            c => !c.is_control() || c as u32 >= 0x80,
        })
        .collect()
}
