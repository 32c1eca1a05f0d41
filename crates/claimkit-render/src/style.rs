// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shared block-to-style mapping consumed by the DOCX and PDF backends.
//
// Both backends render the same block stream; keeping the mapping in one
// table stops the two from drifting apart. Values are in points; DOCX
// converts to half-points and twips at its seam, PDF uses points directly.

use claimkit_core::BlockKind;

/// Body text size for paragraphs and list items.
pub const BODY_SIZE_PT: f32 = 10.0;

/// Visual style of one block kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockStyle {
    pub bold: bool,
    pub size_pt: f32,
    pub space_before_pt: f32,
    pub space_after_pt: f32,
    /// Horizontal indent for list-item content.
    pub indent_pt: f32,
}

/// Style for one block kind. Headers are bold and a step larger; subsections
/// bold at body size; blanks contribute spacing only (separator-derived
/// blanks get a larger gap).
pub fn style_for(kind: &BlockKind) -> BlockStyle {
    match kind {
        BlockKind::Header => BlockStyle {
            bold: true,
            size_pt: 11.0,
            space_before_pt: 12.0,
            space_after_pt: 6.0,
            indent_pt: 0.0,
        },
        BlockKind::Subsection => BlockStyle {
            bold: true,
            size_pt: BODY_SIZE_PT,
            space_before_pt: 6.0,
            space_after_pt: 4.0,
            indent_pt: 0.0,
        },
        BlockKind::Bullet => BlockStyle {
            bold: false,
            size_pt: BODY_SIZE_PT,
            space_before_pt: 0.0,
            space_after_pt: 4.0,
            indent_pt: 15.0,
        },
        BlockKind::Numbered { .. } => BlockStyle {
            bold: false,
            size_pt: BODY_SIZE_PT,
            space_before_pt: 0.0,
            space_after_pt: 4.0,
            indent_pt: 20.0,
        },
        BlockKind::Paragraph => BlockStyle {
            bold: false,
            size_pt: BODY_SIZE_PT,
            space_before_pt: 0.0,
            space_after_pt: 4.0,
            indent_pt: 0.0,
        },
        BlockKind::Blank { separator } => BlockStyle {
            bold: false,
            size_pt: BODY_SIZE_PT,
            space_before_pt: 0.0,
            space_after_pt: if *separator { 7.5 } else { 4.0 },
            indent_pt: 0.0,
        },
    }
}

/// Points to DOCX twentieths-of-a-point (spacing values).
pub fn pt_to_twips(pt: f32) -> u32 {
    (pt * 20.0).round() as u32
}

/// Points to DOCX half-points (font sizes).
pub fn pt_to_half_points(pt: f32) -> u32 {
    (pt * 2.0).round() as u32
}
