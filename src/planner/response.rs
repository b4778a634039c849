//! Lenient parsing of the model's slide data.
//!
//! Models wrap JSON in prose or Markdown fences, return an object with a
//! `slides` array, or a bare object for a single slide. All of these are
//! accepted; anything else is a parse error.

use serde::Deserialize;
use serde_json::Value;

/// Slide data as the model returned it, before validation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DraftSlide {
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "bullets", alias = "points", alias = "content")]
    pub body: Vec<String>,
    #[serde(default, alias = "speaker_notes", alias = "notes_text")]
    pub notes: String,
    #[serde(default, alias = "type", alias = "role")]
    pub intent: Option<String>,
}

/// Parse slide data out of raw model text.
pub fn parse_slides(text: &str) -> Result<Vec<DraftSlide>, String> {
    let text = strip_code_fence(text.trim());

    let first_error = match serde_json::from_str::<Value>(text) {
        Ok(value) => return slides_from_value(value),
        Err(e) => e,
    };

    // Prose around the payload: retry on whichever bracket opens first, so a
    // single object is not mistaken for one of its own arrays.
    let bytes = text.as_bytes();
    let mut candidates = [(b'[', b']'), (b'{', b'}')];
    let array_at = memchr::memchr(b'[', bytes);
    let object_at = memchr::memchr(b'{', bytes);
    if let Some(object_at) = object_at
        && array_at.is_none_or(|array_at| object_at < array_at)
    {
        candidates.swap(0, 1);
    }

    for (open, close) in candidates {
        if let Some(candidate) = delimited(text, open, close)
            && let Ok(value) = serde_json::from_str::<Value>(candidate)
            && let Ok(slides) = slides_from_value(value)
        {
            return Ok(slides);
        }
    }

    Err(format!("response is not slide JSON: {}", first_error))
}

/// Accept an array of slides, an object with a `slides` array, or one slide
/// object. Scalars are rejected.
fn slides_from_value(value: Value) -> Result<Vec<DraftSlide>, String> {
    match value {
        Value::Array(items) => slide_list(items),
        Value::Object(mut fields) => match fields.remove("slides") {
            Some(Value::Array(items)) => slide_list(items),
            Some(other) => Err(format!("`slides` is {}, not an array", kind(&other))),
            None => draft(Value::Object(fields)).map(|slide| vec![slide]),
        },
        other => Err(format!("expected slide JSON, found {}", kind(&other))),
    }
}

fn slide_list(items: Vec<Value>) -> Result<Vec<DraftSlide>, String> {
    items
        .into_iter()
        .map(|item| match item {
            Value::Object(_) => draft(item),
            other => Err(format!("slide entry is {}, not an object", kind(&other))),
        })
        .collect()
}

fn draft(value: Value) -> Result<DraftSlide, String> {
    serde_json::from_value(value).map_err(|e| format!("response is not slide JSON: {}", e))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Remove a surrounding Markdown code fence, with or without a language tag.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let body = match memchr::memchr(b'\n', rest.as_bytes()) {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Substring from the first `open` to the last `close`, inclusive.
fn delimited(text: &str, open: u8, close: u8) -> Option<&str> {
    let bytes = text.as_bytes();
    let start = memchr::memchr(open, bytes)?;
    let end = memchr::memrchr(close, bytes)?;
    (end > start).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_array() {
        let slides = parse_slides(
            r#"[{"title":"What is Rust?","bullets":["Fast","Safe"],"notes":"Introduce it."}]"#,
        )
        .unwrap();
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].title, "What is Rust?");
        assert_eq!(slides[0].body, ["Fast", "Safe"]);
        assert_eq!(slides[0].notes, "Introduce it.");
        assert_eq!(slides[0].intent, None);
    }

    #[test]
    fn test_fenced_and_wrapped() {
        let text = "```json\n{\"slides\": [{\"title\": \"A\", \"intent\": \"section\"}, {\"title\": \"B\"}]}\n```";
        let slides = parse_slides(text).unwrap();
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].intent.as_deref(), Some("section"));
        assert!(slides[1].body.is_empty());
    }

    #[test]
    fn test_array_inside_prose() {
        let text = "Sure! Here is your outline:\n[{\"title\": \"One\"}, {\"title\": \"Two\"}]\nLet me know if you need more.";
        let slides = parse_slides(text).unwrap();
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[1].title, "Two");
    }

    #[test]
    fn test_single_object_inside_prose() {
        let text = "Slide 3:\n{\"title\": \"Roadmap\", \"body\": [\"Q1\", \"Q2\"]}";
        let slides = parse_slides(text).unwrap();
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].body, ["Q1", "Q2"]);
    }

    #[test]
    fn test_single_object_with_one_bullet_inside_prose() {
        let text = "Here is slide 2:\n{\"title\": \"Roadmap\", \"intent\": \"content\", \"bullets\": [\"Ship Q1 launch\"], \"notes\": \"Talk.\"}";
        let slides = parse_slides(text).unwrap();
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].title, "Roadmap");
        assert_eq!(slides[0].body, ["Ship Q1 launch"]);
        assert_eq!(slides[0].notes, "Talk.");
        assert_eq!(slides[0].intent.as_deref(), Some("content"));
    }

    #[test]
    fn test_single_object_without_bullets_inside_prose() {
        let text = "Here is slide 8:\n{\"title\": \"Thank you\", \"bullets\": [], \"notes\": \"Talk.\"}\nDone.";
        let slides = parse_slides(text).unwrap();
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].title, "Thank you");
        assert!(slides[0].body.is_empty());
        assert_eq!(slides[0].notes, "Talk.");
    }

    #[test]
    fn test_bare_string_array_is_not_a_slide() {
        assert!(parse_slides(r#"["Ship Q1 launch"]"#).is_err());
        assert!(parse_slides("\"just text\"").is_err());
        assert!(parse_slides(r#"{"slides": "none"}"#).is_err());
    }

    #[test]
    fn test_not_json() {
        assert!(parse_slides("I cannot help with that.").is_err());
        assert!(parse_slides("] backwards [").is_err());
    }
}
