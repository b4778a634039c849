//! Layout scoring.
//!
//! A layout is first checked for role coverage (a hard disqualifier), then
//! scored on how well its body slots fit the slide's content volume. Scores
//! are integers so ties are exact; ties go to the lowest layout id.

use crate::common::unit::pt_to_emu_f64;
use crate::planner::{ShapeCategory, SlideSpec};
use crate::template::{LayoutDescriptor, PlaceholderRole, PlaceholderSlot, TemplateCatalog};
use serde::Serialize;
use tracing::debug;

/// Body text line height: 18pt at 1.2 spacing.
const LINE_HEIGHT_PT: f64 = 18.0 * 1.2;
/// Average glyph advance at 18pt.
const CHAR_WIDTH_PT: f64 = 9.0;
/// Characters per line for a slot without geometry.
const FALLBACK_CHARS_PER_LINE: usize = 60;

/// Penalty for each placeholder left empty on the slide.
const UNUSED_SLOT_PENALTY: i64 = 40;
/// Penalty for each body slot a title-only slide leaves empty.
const UNUSED_BODY_PENALTY: i64 = 100;
/// Penalty for splitting a single-column body across columns.
const SPLIT_BODY_PENALTY: i64 = 150;
/// Penalty for writing a multi-line list into a subtitle slot.
const SUBTITLE_LIST_PENALTY: i64 = 80;
/// Bonus for a two-column shape landing on a multi-body layout.
const COLUMNS_BONUS: i64 = 200;
/// Per line of unused body space.
const SLACK_WEIGHT: i64 = 5;
/// Per line that does not fit; overflow weighs more than unused space.
const OVERFLOW_WEIGHT: i64 = 30;

/// How strictly a slide's roles must be covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BindTier {
    /// Title and body both covered
    Full,
    /// Title covered; body lines go to the notes
    TitleOnly,
    /// Any layout, blank preferred
    Any,
}

/// Lines a slot can show.
pub fn line_capacity(slot: &PlaceholderSlot, fallback: usize) -> usize {
    match slot.bbox {
        Some(bbox) => {
            let line_emu = pt_to_emu_f64(LINE_HEIGHT_PT);
            ((bbox.cy.max(0) / line_emu) as usize).max(1)
        },
        None => fallback,
    }
}

fn chars_per_line(slot: &PlaceholderSlot) -> usize {
    slot.bbox
        .map(|bbox| ((bbox.width_pt() / CHAR_WIDTH_PT).floor() as usize).max(10))
        .unwrap_or(FALLBACK_CHARS_PER_LINE)
}

/// Lines the body needs: one per bullet, or more when the text wraps.
fn wrapped_lines(spec: &SlideSpec, chars_per_line: usize) -> usize {
    let volume = spec.volume();
    volume.lines.max(volume.chars.div_ceil(chars_per_line))
}

/// Indices of the slots that receive a slide's body lines.
///
/// Body slots when the layout has any; otherwise subtitle slots, which title
/// and section layouts use for their single line of text.
pub fn text_slot_indices(layout: &LayoutDescriptor) -> Vec<usize> {
    let indices_of = |role: PlaceholderRole| -> Vec<usize> {
        layout
            .placeholders
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.role == role)
            .map(|(index, _)| index)
            .collect()
    };

    let bodies = indices_of(PlaceholderRole::Body);
    if bodies.is_empty() {
        indices_of(PlaceholderRole::Subtitle)
    } else {
        bodies
    }
}

fn text_slots(layout: &LayoutDescriptor) -> Vec<&PlaceholderSlot> {
    text_slot_indices(layout)
        .into_iter()
        .map(|index| &layout.placeholders[index])
        .collect()
}

/// Whether `layout` covers the roles `tier` requires for `spec`.
pub fn covers(layout: &LayoutDescriptor, spec: &SlideSpec, tier: BindTier) -> bool {
    let needs_title = !spec.title().is_empty();
    let needs_body = !spec.body().is_empty();

    match tier {
        BindTier::Full => {
            (!needs_title || layout.has_role(PlaceholderRole::Title))
                && (!needs_body || !text_slots(layout).is_empty())
        },
        BindTier::TitleOnly => needs_title && layout.has_role(PlaceholderRole::Title),
        BindTier::Any => !needs_title,
    }
}

/// Fit score of a covering layout; higher is better.
pub fn score(
    layout: &LayoutDescriptor,
    spec: &SlideSpec,
    tier: BindTier,
    fallback_capacity: usize,
) -> i64 {
    let slots = text_slots(layout);
    let bodies = layout.slots(PlaceholderRole::Body).count() as i64;
    let others = layout
        .placeholders
        .iter()
        .filter(|slot| {
            matches!(
                slot.role,
                PlaceholderRole::Subtitle | PlaceholderRole::Picture | PlaceholderRole::Other
            )
        })
        .count() as i64;

    if tier == BindTier::Any || spec.body().is_empty() || slots.is_empty() {
        // Compact layouts first: nothing but the title should be on the slide.
        return -(bodies * UNUSED_BODY_PENALTY) - others * UNUSED_SLOT_PENALTY;
    }

    let capacity: i64 = slots
        .iter()
        .map(|slot| line_capacity(slot, fallback_capacity) as i64)
        .sum();
    let demand = wrapped_lines(spec, chars_per_line(slots[0])) as i64;

    let mut score = if capacity >= demand {
        -(capacity - demand) * SLACK_WEIGHT
    } else {
        -(demand - capacity) * OVERFLOW_WEIGHT
    };

    // Subtitles used as the text slot are not left empty.
    let used_subtitles = if bodies == 0 { slots.len() as i64 } else { 0 };
    score -= (others - used_subtitles) * UNUSED_SLOT_PENALTY;
    if used_subtitles > 0 && spec.volume().lines > 1 {
        score -= SUBTITLE_LIST_PENALTY;
    }

    match spec.shape() {
        ShapeCategory::TwoColumn if slots.len() >= 2 => score += COLUMNS_BONUS,
        ShapeCategory::BulletedBody | ShapeCategory::SectionBreak if slots.len() >= 2 => {
            score -= SPLIT_BODY_PENALTY
        },
        _ => {},
    }

    score
}

/// Best layout for `spec`: first tier with a covering layout, highest score,
/// lowest id on ties.
pub fn select(
    spec: &SlideSpec,
    catalog: &TemplateCatalog,
    fallback_capacity: usize,
) -> Option<(usize, BindTier)> {
    for tier in [BindTier::Full, BindTier::TitleOnly, BindTier::Any] {
        let mut best: Option<(usize, i64)> = None;

        for layout in catalog.layouts.iter().filter(|layout| covers(layout, spec, tier)) {
            let score = score(layout, spec, tier, fallback_capacity);
            debug!(
                ordinal = spec.ordinal(),
                layout = layout.id,
                ?tier,
                score,
                "layout scored"
            );
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((layout.id, score));
            }
        }

        if let Some((id, _)) = best {
            return Some((id, tier));
        }
    }
    None
}
