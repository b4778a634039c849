/// Binding of a slide spec to a layout: which text goes into which slot.
use super::score::{BindTier, line_capacity, text_slot_indices};
use crate::config::{OverflowPolicy, RenderConfig};
use crate::planner::SlideSpec;
use crate::template::{LayoutDescriptor, PlaceholderRole};
use serde::Serialize;
use std::collections::BTreeMap;

/// Heading of the notes section that receives body lines the slide cannot show.
pub const OVERFLOW_HEADING: &str = "Additional points:";

/// A slide bound to a layout, as written to the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoundSlide {
    pub ordinal: usize,
    pub layout_id: usize,
    pub layout_name: String,
    pub tier: BindTier,
    /// Text written per placeholder role, in slot order
    pub text: BTreeMap<PlaceholderRole, Vec<String>>,
    /// Speaker-notes paragraphs
    pub notes: Vec<String>,
    /// Body lines moved from the slide into the notes
    pub moved_to_notes: usize,
}

/// A bound slide plus the paragraphs for each of the layout's placeholders,
/// indexed like `LayoutDescriptor::placeholders`.
#[derive(Debug, Clone)]
pub(crate) struct SlidePlacement {
    pub bound: BoundSlide,
    pub paragraphs: Vec<Vec<String>>,
}

/// Distribute a spec's text over `layout`'s placeholders.
pub(crate) fn place(
    spec: &SlideSpec,
    layout: &LayoutDescriptor,
    tier: BindTier,
    config: &RenderConfig,
) -> SlidePlacement {
    let mut paragraphs: Vec<Vec<String>> = vec![Vec::new(); layout.placeholders.len()];
    let mut text: BTreeMap<PlaceholderRole, Vec<String>> = BTreeMap::new();

    if !spec.title().is_empty()
        && let Some(index) = layout
            .placeholders
            .iter()
            .position(|slot| slot.role == PlaceholderRole::Title)
    {
        paragraphs[index].push(spec.title().to_string());
        text.insert(PlaceholderRole::Title, vec![spec.title().to_string()]);
    }

    let targets = if tier == BindTier::Full {
        text_slot_indices(layout)
    } else {
        Vec::new()
    };

    let capacity: usize = targets
        .iter()
        .map(|&index| line_capacity(&layout.placeholders[index], config.fallback_bullet_capacity))
        .sum();

    let body = spec.body();
    let shown = if targets.is_empty() {
        0
    } else {
        match config.overflow {
            OverflowPolicy::MoveToNotes => body.len().min(capacity),
            OverflowPolicy::Keep => body.len(),
        }
    };
    let (kept, overflow) = body.split_at(shown);

    for (&index, chunk) in targets.iter().zip(split_even(kept, targets.len())) {
        let role = layout.placeholders[index].role;
        paragraphs[index].extend_from_slice(chunk);
        text.entry(role).or_default().extend_from_slice(chunk);
    }

    let mut notes: Vec<String> = spec
        .notes()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    if !overflow.is_empty() {
        notes.push(OVERFLOW_HEADING.to_string());
        notes.extend(overflow.iter().map(|line| format!("- {}", line)));
    }

    SlidePlacement {
        bound: BoundSlide {
            ordinal: spec.ordinal(),
            layout_id: layout.id,
            layout_name: layout.name.clone(),
            tier,
            text,
            notes,
            moved_to_notes: overflow.len(),
        },
        paragraphs,
    }
}

/// Split `lines` into `parts` contiguous chunks whose sizes differ by at most
/// one, larger chunks first.
fn split_even(lines: &[String], parts: usize) -> Vec<&[String]> {
    if parts == 0 {
        return Vec::new();
    }

    let base = lines.len() / parts;
    let extra = lines.len() % parts;
    let mut chunks = Vec::with_capacity(parts);
    let mut start = 0;
    for part in 0..parts {
        let len = base + usize::from(part < extra);
        chunks.push(&lines[start..start + len]);
        start += len;
    }
    chunks
}
