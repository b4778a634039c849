/// Slide specifications produced by the planner.
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the model says a slide is for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideIntent {
    /// Opening/cover slide
    Title,
    /// Section divider
    Section,
    #[default]
    Content,
    /// Side-by-side comparison
    Comparison,
    /// Closing or summary slide
    Closing,
}

impl SlideIntent {
    /// Lenient mapping of the model's free-text intent label.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "title" | "cover" | "title_slide" | "intro" => SlideIntent::Title,
            "section" | "divider" | "section_break" | "section_header" => SlideIntent::Section,
            "comparison" | "compare" | "two_column" => SlideIntent::Comparison,
            "closing" | "conclusion" | "summary" | "end" | "thanks" => SlideIntent::Closing,
            _ => SlideIntent::Content,
        }
    }

    /// Intents that may carry little or no body.
    #[inline]
    pub fn is_divider(self) -> bool {
        matches!(
            self,
            SlideIntent::Title | SlideIntent::Section | SlideIntent::Closing
        )
    }
}

/// Coarse shape used for layout scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeCategory {
    TitleOnly,
    BulletedBody,
    TwoColumn,
    SectionBreak,
}

impl fmt::Display for ShapeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeCategory::TitleOnly => "title-only",
            ShapeCategory::BulletedBody => "bulleted-body",
            ShapeCategory::TwoColumn => "two-column",
            ShapeCategory::SectionBreak => "section-break",
        };
        f.write_str(name)
    }
}

/// Body size estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentVolume {
    pub chars: usize,
    pub lines: usize,
}

impl ContentVolume {
    pub fn of(body: &[String]) -> Self {
        Self {
            chars: body.iter().map(|line| line.chars().count()).sum(),
            lines: body.len(),
        }
    }

    /// Characters plus lines.
    #[inline]
    pub fn total(&self) -> usize {
        self.chars + self.lines
    }
}

/// Assign the shape category of a slide body.
pub fn categorize(intent: SlideIntent, body: &[String]) -> ShapeCategory {
    let lines = body.len();
    if lines == 0 {
        ShapeCategory::TitleOnly
    } else if intent.is_divider() && lines <= 1 {
        ShapeCategory::SectionBreak
    } else if (intent == SlideIntent::Comparison && lines >= 2) || lines > 6 {
        ShapeCategory::TwoColumn
    } else {
        ShapeCategory::BulletedBody
    }
}

/// One slide to produce.
///
/// Volume and shape are derived on construction, including when a saved plan
/// is deserialized, so they always agree with the content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SavedSlide")]
pub struct SlideSpec {
    ordinal: usize,
    title: String,
    body: Vec<String>,
    notes: String,
    intent: SlideIntent,
    volume: ContentVolume,
    shape: ShapeCategory,
}

impl SlideSpec {
    pub fn new(
        ordinal: usize,
        title: impl Into<String>,
        body: Vec<String>,
        notes: impl Into<String>,
        intent: SlideIntent,
    ) -> Self {
        let volume = ContentVolume::of(&body);
        let shape = categorize(intent, &body);
        Self {
            ordinal,
            title: title.into(),
            body,
            notes: notes.into(),
            intent,
            volume,
            shape,
        }
    }

    /// 1-based position in the deck.
    #[inline]
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[inline]
    pub fn body(&self) -> &[String] {
        &self.body
    }

    #[inline]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    #[inline]
    pub fn intent(&self) -> SlideIntent {
        self.intent
    }

    #[inline]
    pub fn volume(&self) -> ContentVolume {
        self.volume
    }

    #[inline]
    pub fn shape(&self) -> ShapeCategory {
        self.shape
    }
}

/// Serialized form of a slide in a saved plan.
#[derive(Deserialize)]
struct SavedSlide {
    ordinal: usize,
    title: String,
    #[serde(default)]
    body: Vec<String>,
    #[serde(default)]
    notes: String,
    #[serde(default)]
    intent: SlideIntent,
}

impl From<SavedSlide> for SlideSpec {
    fn from(saved: SavedSlide) -> Self {
        SlideSpec::new(saved.ordinal, saved.title, saved.body, saved.notes, saved.intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("Point {}", i)).collect()
    }

    #[test]
    fn test_categories() {
        assert_eq!(categorize(SlideIntent::Content, &[]), ShapeCategory::TitleOnly);
        assert_eq!(categorize(SlideIntent::Section, &[]), ShapeCategory::TitleOnly);
        assert_eq!(
            categorize(SlideIntent::Closing, &lines(1)),
            ShapeCategory::SectionBreak
        );
        assert_eq!(
            categorize(SlideIntent::Closing, &lines(3)),
            ShapeCategory::BulletedBody
        );
        assert_eq!(
            categorize(SlideIntent::Comparison, &lines(2)),
            ShapeCategory::TwoColumn
        );
        assert_eq!(
            categorize(SlideIntent::Content, &lines(6)),
            ShapeCategory::BulletedBody
        );
        assert_eq!(
            categorize(SlideIntent::Content, &lines(7)),
            ShapeCategory::TwoColumn
        );
    }

    #[test]
    fn test_volume_counts_chars_and_lines() {
        let volume = ContentVolume::of(&["abc".to_string(), "déf".to_string()]);
        assert_eq!(volume, ContentVolume { chars: 6, lines: 2 });
        assert_eq!(volume.total(), 8);
    }

    #[test]
    fn test_intent_labels() {
        assert_eq!(SlideIntent::from_label("Section Break"), SlideIntent::Section);
        assert_eq!(SlideIntent::from_label("two-column"), SlideIntent::Comparison);
        assert_eq!(SlideIntent::from_label("conclusion"), SlideIntent::Closing);
        assert_eq!(SlideIntent::from_label("whatever"), SlideIntent::Content);
    }

    #[test]
    fn test_saved_plan_recomputes_derived_fields() {
        let json = r#"{"ordinal":2,"title":"Agenda","body":["a","b"],"volume":{"chars":999,"lines":0},"shape":"title_only"}"#;
        let spec: SlideSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.volume(), ContentVolume { chars: 2, lines: 2 });
        assert_eq!(spec.shape(), ShapeCategory::BulletedBody);
        assert_eq!(spec.notes(), "");

        let round: SlideSpec =
            serde_json::from_str(&serde_json::to_string(&spec).unwrap()).unwrap();
        assert_eq!(round, spec);
    }
}
