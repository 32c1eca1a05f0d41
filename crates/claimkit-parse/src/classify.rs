// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Line classifier — segments raw generated prose into typed blocks.
//
// Classification is a fold over source lines: a pure `classify_line` step
// takes the running state (are we still suppressing preamble filler?) and one
// line, and yields the next state plus at most one block. Rules are tested in
// priority order; any line no rule claims falls through to Paragraph, so no
// input line is ever rejected.

use claimkit_core::{Block, BlockKind};
use tracing::debug;

/// Catalogue of section labels recognized as report headers.
///
/// A line is a header when, after stripping bold markers, it equals one of
/// these case-insensitively, or starts with the label followed by a colon.
pub const SECTION_LABELS: &[&str] = &[
    "REMARKS",
    "RISK",
    "ITV",
    "OCCURRENCE",
    "COVERAGE",
    "DWELLING DAMAGE",
    "OTHER STRUCTURES DAMAGE",
    "CONTENTS DAMAGE",
    "ALE",
    "FMV",
    "SUBROGATION",
    "SALVAGE",
    "WORK TO BE COMPLETED",
    "RECOMMENDATION",
    "ASSIGNMENT",
    "INSURED",
    "OWNERSHIP",
    "LOSS AND ORIGIN",
    "DAMAGES",
    "DWELLING",
    "ROOF",
    "EXTERIOR",
    "INTERIOR",
    "OTHER STRUCTURES",
    "EXPERTS",
    "OFFICIAL REPORTS",
    "ACTION PLAN",
    "DIARY DATE",
    "MORTGAGEE",
    "INSURABLE INTEREST",
    "ALE / FMV CLAIM",
    "SUBROGATION / SALVAGE",
    "WORK TO BE COMPLETED / RECOMMENDATION",
    "OWNERSHIP / INSURABLE INTEREST",
];

/// Introductory filler the text generator may prepend ("Here is the
/// report..."). Matched as a case-insensitive prefix of the trimmed line.
const PREAMBLE_PREFIXES: &[&str] = &[
    "here is",
    "i have generated",
    "i've generated",
    "below is",
    "following is",
    "i have created",
    "i've created",
    "this is the",
    "as requested",
];

/// Lines consisting only of one of these tokens are spacing separators.
const SEPARATOR_TOKENS: &[&str] = &["---", "___", "..."];

/// Colon-terminated lines at or above this length are never subsections.
const SUBSECTION_MAX_CHARS: usize = 80;

/// Classifier fold state.
///
/// Suppression starts active and ends permanently the first time real
/// content (a header, an ALL-CAPS heading-like line, a bullet, or a numbered
/// item) is recognized. Once content starts, filler phrases pass through as
/// ordinary paragraphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifyState {
    pub suppressing: bool,
}

impl Default for ClassifyState {
    fn default() -> Self {
        Self { suppressing: true }
    }
}

/// Classify a whole raw text into an ordered block stream.
pub fn classify(raw: &str) -> Vec<Block> {
    let mut state = ClassifyState::default();
    let mut blocks = Vec::new();

    for line in raw.split('\n') {
        let (next, block) = classify_line(state, line);
        state = next;
        if let Some(block) = block {
            blocks.push(block);
        }
    }

    debug!(blocks = blocks.len(), "classified report content");
    blocks
}

/// Classify one source line. Pure: `(state, line) -> (state', Option<Block>)`.
///
/// `None` means the line was dropped as preamble filler; every other line
/// yields exactly one block.
pub fn classify_line(state: ClassifyState, line: &str) -> (ClassifyState, Option<Block>) {
    let trimmed = line.trim();

    // Blank and separator lines are emitted, not dropped — they carry the
    // document's vertical rhythm through every renderer.
    if trimmed.is_empty() {
        return (
            state,
            Some(Block::new(BlockKind::Blank { separator: false }, "")),
        );
    }
    if SEPARATOR_TOKENS.contains(&trimmed) {
        return (
            state,
            Some(Block::new(BlockKind::Blank { separator: true }, trimmed)),
        );
    }

    if state.suppressing && is_preamble(trimmed) {
        return (state, None);
    }

    // Header labels are matched with bold markers stripped, and the stripped
    // text is what the block carries (headers render unemphasized).
    let unbolded = trimmed.replace("**", "");
    if is_section_label(&unbolded) {
        return (
            ClassifyState { suppressing: false },
            Some(Block::new(BlockKind::Header, unbolded)),
        );
    }

    if let Some(text) = strip_bullet_marker(trimmed) {
        return (
            ClassifyState { suppressing: false },
            Some(Block::new(BlockKind::Bullet, text)),
        );
    }

    if let Some((index, text)) = strip_number_marker(trimmed) {
        return (
            ClassifyState { suppressing: false },
            Some(Block::new(BlockKind::Numbered { index }, text)),
        );
    }

    // An ALL-CAPS heading-like line is a header even when it is not in the
    // catalogue — generated reports shout section names the catalogue has
    // never seen.
    if is_caps_heading(&unbolded) {
        return (
            ClassifyState { suppressing: false },
            Some(Block::new(BlockKind::Header, unbolded)),
        );
    }

    // Header match takes priority over this rule, checked above. Long
    // colon-terminated lines fall through to Paragraph.
    if trimmed.ends_with(':') && trimmed.chars().count() < SUBSECTION_MAX_CHARS {
        return (state, Some(Block::new(BlockKind::Subsection, unbolded)));
    }

    (state, Some(Block::new(BlockKind::Paragraph, trimmed)))
}

/// Does the trimmed line start with a catalogued filler phrase?
fn is_preamble(trimmed: &str) -> bool {
    let lower = trimmed.to_lowercase();
    PREAMBLE_PREFIXES
        .iter()
        .any(|phrase| lower.starts_with(phrase))
}

/// Case-insensitive match against the section-label catalogue: the label
/// exactly, or the label immediately followed by a colon.
fn is_section_label(unbolded: &str) -> bool {
    let upper = unbolded.to_uppercase();
    SECTION_LABELS.iter().any(|label| {
        upper == *label || upper.strip_prefix(label).is_some_and(|rest| rest.starts_with(':'))
    })
}

/// `^[A-Z][A-Z\s]+:?$` — an uncatalogued line that still looks like a
/// shouted heading.
fn is_caps_heading(text: &str) -> bool {
    let body = text.strip_suffix(':').unwrap_or(text);
    let mut chars = body.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_ascii_uppercase() {
        return false;
    }
    let mut rest_len = 0;
    for c in chars {
        if !(c.is_ascii_uppercase() || c == ' ' || c == '\t') {
            return false;
        }
        rest_len += 1;
    }
    rest_len >= 1
}

/// Strip a leading `*`, `-`, or `+` bullet marker followed by whitespace.
fn strip_bullet_marker(trimmed: &str) -> Option<&str> {
    let rest = trimmed
        .strip_prefix('*')
        .or_else(|| trimmed.strip_prefix('-'))
        .or_else(|| trimmed.strip_prefix('+'))?;
    let stripped = rest.trim_start();
    if stripped.len() == rest.len() || stripped.is_empty() {
        // No whitespace after the marker (or nothing at all) — not a bullet.
        return None;
    }
    Some(stripped)
}

/// Strip a leading `N.` marker followed by whitespace, yielding the index.
fn strip_number_marker(trimmed: &str) -> Option<(u32, &str)> {
    let digits_end = trimmed.find(|c: char| !c.is_ascii_digit())?;
    if digits_end == 0 {
        return None;
    }
    let rest = trimmed[digits_end..].strip_prefix('.')?;
    let stripped = rest.trim_start();
    if stripped.len() == rest.len() || stripped.is_empty() {
        return None;
    }
    let index = trimmed[..digits_end].parse().ok()?;
    Some((index, stripped))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(raw: &str) -> Vec<BlockKind> {
        classify(raw).into_iter().map(|b| b.kind).collect()
    }

    #[test]
    fn bullet_marker_is_stripped() {
        let blocks = classify("* Replace roof");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::Bullet);
        assert_eq!(blocks[0].text, "Replace roof");
    }

    #[test]
    fn all_bullet_markers_accepted() {
        for marker in ["*", "-", "+"] {
            let blocks = classify(&format!("{marker} item"));
            assert_eq!(blocks[0].kind, BlockKind::Bullet, "marker {marker}");
            assert_eq!(blocks[0].text, "item");
        }
    }

    #[test]
    fn numbered_marker_carries_index() {
        let blocks = classify("2. Inspect wiring");
        assert_eq!(blocks[0].kind, BlockKind::Numbered { index: 2 });
        assert_eq!(blocks[0].text, "Inspect wiring");
    }

    #[test]
    fn marker_without_whitespace_is_paragraph() {
        assert_eq!(kinds("*emphasis* mid-line"), vec![BlockKind::Paragraph]);
        assert_eq!(kinds("3.5 inches of rain"), vec![BlockKind::Paragraph]);
    }

    #[test]
    fn known_label_is_header() {
        let blocks = classify("Remarks");
        assert_eq!(blocks[0].kind, BlockKind::Header);
        assert_eq!(blocks[0].text, "Remarks");
    }

    #[test]
    fn bolded_label_is_header_with_markers_stripped() {
        let blocks = classify("**LOSS AND ORIGIN**");
        assert_eq!(blocks[0].kind, BlockKind::Header);
        assert_eq!(blocks[0].text, "LOSS AND ORIGIN");
    }

    #[test]
    fn header_beats_subsection_on_colon_lines() {
        // Short and colon-terminated, but also a catalogued label: Header wins.
        let blocks = classify("COVERAGE:");
        assert_eq!(blocks[0].kind, BlockKind::Header);
    }

    #[test]
    fn short_colon_line_is_subsection() {
        let blocks = classify("Cause of damage:");
        assert_eq!(blocks[0].kind, BlockKind::Subsection);
        assert_eq!(blocks[0].text, "Cause of damage:");
    }

    #[test]
    fn long_colon_line_is_paragraph() {
        let long = format!("{}:", "x".repeat(90));
        assert_eq!(kinds(&long), vec![BlockKind::Paragraph]);
    }

    #[test]
    fn separators_and_empties_are_blanks() {
        let blocks = classify("---\n\n...");
        assert_eq!(blocks[0].kind, BlockKind::Blank { separator: true });
        assert_eq!(blocks[0].text, "---");
        assert_eq!(blocks[1].kind, BlockKind::Blank { separator: false });
        assert_eq!(blocks[2].kind, BlockKind::Blank { separator: true });
    }

    #[test]
    fn preamble_dropped_until_first_content() {
        let blocks = classify("Here is the report.\n\nFIRE\nDamage noted.");
        // First line dropped; blank emitted; FIRE ends suppression.
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].kind, BlockKind::Blank { separator: false });
        assert_eq!(blocks[1].kind, BlockKind::Header);
        assert_eq!(blocks[1].text, "FIRE");
        assert_eq!(blocks[2].kind, BlockKind::Paragraph);
        assert_eq!(blocks[2].text, "Damage noted.");
    }

    #[test]
    fn suppression_ends_permanently() {
        let blocks = classify("REMARKS\nHere is a note about the roof.");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].kind, BlockKind::Header);
        // Filler-looking line after content starts is kept.
        assert_eq!(blocks[1].kind, BlockKind::Paragraph);
    }

    #[test]
    fn preamble_case_insensitive() {
        let (state, block) =
            classify_line(ClassifyState::default(), "I HAVE GENERATED your report:");
        assert!(block.is_none());
        assert!(state.suppressing);
    }

    #[test]
    fn uncatalogued_caps_line_is_header() {
        let blocks = classify("Below is the report.\nSTRUCTURAL NOTES\nplain text");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].kind, BlockKind::Header);
        assert_eq!(blocks[0].text, "STRUCTURAL NOTES");
        assert_eq!(blocks[1].kind, BlockKind::Paragraph);
        assert_eq!(blocks[1].text, "plain text");
    }

    #[test]
    fn unmatched_lines_always_fall_through_to_paragraph() {
        let blocks = classify("just some prose with **bold** kept");
        assert_eq!(blocks[0].kind, BlockKind::Paragraph);
        assert_eq!(blocks[0].text, "just some prose with **bold** kept");
    }

    #[test]
    fn round_trip_reconstruction() {
        let input = "REMARKS\n\n* Replace roof\n2. Inspect wiring\n---\nScope of repairs:\nWater intrusion observed.";
        let restored: Vec<String> = classify(input)
            .iter()
            .map(|b| b.restore_line())
            .collect();
        assert_eq!(restored.join("\n"), input);
    }
}
