//! Generation prompts.
//!
//! The prompt fixes the slide count, asks for a title, 3-6 bullets and 1-3
//! sentences of speaker notes per slide, and lists the slide intents the
//! template can actually realise.

use super::spec::ShapeCategory;
use crate::template::{PlaceholderRole, TemplateCatalog};
use std::fmt::Write;

/// Shapes the template has a layout for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShapeHints {
    pub bulleted_body: bool,
    pub two_column: bool,
}

impl ShapeHints {
    pub fn from_catalog(catalog: &TemplateCatalog) -> Self {
        let mut hints = Self::default();
        for layout in &catalog.layouts {
            if !layout.has_role(PlaceholderRole::Title) {
                continue;
            }
            let bodies = layout.slots(PlaceholderRole::Body).count();
            hints.bulleted_body |= bodies >= 1;
            hints.two_column |= bodies >= 2;
        }
        hints
    }

    pub fn supports(&self, shape: ShapeCategory) -> bool {
        match shape {
            ShapeCategory::TitleOnly | ShapeCategory::SectionBreak => true,
            ShapeCategory::BulletedBody => self.bulleted_body,
            ShapeCategory::TwoColumn => self.two_column,
        }
    }

    fn intents(&self) -> &'static str {
        if self.two_column {
            r#""title", "section", "content", "comparison" or "closing""#
        } else {
            r#""title", "section", "content" or "closing""#
        }
    }
}

/// Request for the whole deck in one response.
pub fn deck_prompt(
    topic: &str,
    slide_count: usize,
    instructions: &str,
    hints: ShapeHints,
) -> String {
    let mut prompt = String::with_capacity(2048);

    let _ = writeln!(
        prompt,
        "You are creating a professional PowerPoint presentation about \"{}\".",
        topic
    );
    let _ = writeln!(
        prompt,
        "Produce exactly {} slides as a JSON array with exactly {} elements, in presentation order.",
        slide_count, slide_count
    );
    write_slide_rules(&mut prompt, hints);
    let _ = writeln!(prompt, "Authoring instructions: {}", instructions);
    prompt.push('\n');
    prompt.push_str("Example format:\n");
    prompt.push_str(concat!(
        "[\n",
        "  {\n",
        "    \"title\": \"What is DataCamp?\",\n",
        "    \"intent\": \"content\",\n",
        "    \"bullets\": [\"Online platform for data skills\", \"Python, R, SQL, Power BI\", \"Used by 10M+ learners\"],\n",
        "    \"notes\": \"Introduce DataCamp as a flexible platform for self-paced data learning.\"\n",
        "  }\n",
        "]\n",
    ));
    prompt.push_str("Return only the JSON array.\n");

    prompt
}

/// Request for one slide of the deck.
pub fn slide_prompt(
    topic: &str,
    slide_count: usize,
    ordinal: usize,
    instructions: &str,
    hints: ShapeHints,
) -> String {
    let mut prompt = String::with_capacity(1536);

    let _ = writeln!(
        prompt,
        "You are creating a professional PowerPoint presentation about \"{}\" with {} slides.",
        topic, slide_count
    );
    let _ = writeln!(
        prompt,
        "Write slide {} of {} only, as a single JSON object.",
        ordinal, slide_count
    );
    if ordinal == 1 {
        prompt.push_str("This is the opening slide; use intent \"title\".\n");
    } else if ordinal == slide_count {
        prompt.push_str("This is the final slide; use intent \"closing\".\n");
    }
    write_slide_rules(&mut prompt, hints);
    let _ = writeln!(prompt, "Authoring instructions: {}", instructions);
    prompt.push('\n');
    prompt.push_str(
        "Example format:\n{\"title\": \"Key Benefits\", \"intent\": \"content\", \"bullets\": [\"...\", \"...\", \"...\"], \"notes\": \"...\"}\n",
    );
    prompt.push_str("Return only the JSON object.\n");

    prompt
}

fn write_slide_rules(prompt: &mut String, hints: ShapeHints) {
    prompt.push_str("Each slide must include:\n");
    prompt.push_str("- \"title\": a short, non-empty slide title\n");
    let _ = writeln!(prompt, "- \"intent\": one of {}", hints.intents());
    prompt.push_str(
        "- \"bullets\": 3-6 concise bullet points; \"section\" and \"closing\" slides may have none or one short line\n",
    );
    prompt.push_str("- \"notes\": 1-3 sentences of speaker notes explaining how to present the slide\n");
    if !hints.bulleted_body {
        prompt.push_str("The template has no body text area: keep bullets to a minimum.\n");
    }
    prompt.push_str("Keep language clear, engaging, and professional.\n");
}
