// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF renderer built on `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`. Layout decisions live in the pure `layout` module;
// this module only turns placed text into ops.

mod layout;

use chrono::Utc;
use claimkit_core::error::Result;
use claimkit_core::{
    Block, BlockKind, Branding, ExportFormat, RenderedDocument, ReportMetadata, Run, or_na,
};
use claimkit_parse::{classify, parse_runs};
use printpdf::{BuiltinFont, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Point, Pt, TextItem};
use tracing::{debug, info, instrument};

use crate::filename::file_name;
use crate::style::{self, style_for};
use layout::{LayoutPage, PageLayout, TextStyle};

pub use layout::{line_height, should_wrap, text_width};

const LETTER_WIDTH_MM: f32 = 215.9;
const LETTER_HEIGHT_MM: f32 = 279.4;

const TITLE_SIZE_PT: f32 = 26.0;
const SUBTITLE_SIZE_PT: f32 = 16.0;
const LABEL_SIZE_PT: f32 = 11.0;
const FOOTER_SIZE_PT: f32 = 8.0;

/// Renders a report as a paginated letter-size PDF.
pub struct PdfRenderer {
    branding: Branding,
}

impl PdfRenderer {
    pub fn new() -> Self {
        Self {
            branding: Branding::default(),
        }
    }

    pub fn with_branding(branding: Branding) -> Self {
        Self { branding }
    }

    /// Render the full report: branded title area, metadata section, the
    /// classified block stream, and an attribution footer.
    #[instrument(skip(self, raw_content), fields(content_len = raw_content.len()))]
    pub fn render(&self, metadata: &ReportMetadata, raw_content: &str) -> Result<RenderedDocument> {
        let blocks = classify(raw_content);
        info!(blocks = blocks.len(), "rendering PDF report");

        let pages = self.build_layout(metadata, &blocks);
        debug!(pages = pages.len(), "PDF layout complete");

        let mut doc = PdfDocument::new(&format!(
            "Insurance Report - {}",
            or_na(&metadata.claim_number)
        ));
        doc.with_pages(pages.iter().map(page_to_ops).collect::<Vec<_>>());

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            debug!(warnings = warnings.len(), "printpdf reported warnings");
        }

        Ok(RenderedDocument {
            bytes,
            file_name: file_name(metadata, ExportFormat::Pdf),
        })
    }

    /// Lay out the whole report into pages of positioned text.
    fn build_layout(&self, metadata: &ReportMetadata, blocks: &[Block]) -> Vec<LayoutPage> {
        let mut layout = PageLayout::new();

        layout.centered_line(&self.branding.brand, TextStyle::bold(TITLE_SIZE_PT));
        layout.centered_line(&self.branding.report_title, TextStyle::body(SUBTITLE_SIZE_PT));
        layout.gap(20.0);

        layout.line("REPORT INFORMATION", TextStyle::bold(LABEL_SIZE_PT));
        layout.gap(4.0);
        for (label, value) in self.info_lines(metadata) {
            self.labeled_line(&mut layout, &label, &value);
        }

        layout.gap(14.0);
        layout.line("REPORT CONTENT", TextStyle::bold(LABEL_SIZE_PT));
        layout.gap(6.0);

        for block in blocks {
            self.write_block(&mut layout, block);
        }

        layout.gap(20.0);
        layout.centered_line(
            &format!(
                "Generated with {} - {}",
                self.branding.company_name, self.branding.website
            ),
            TextStyle::italic(FOOTER_SIZE_PT),
        );
        layout.centered_line(&self.branding.attribution, TextStyle::italic(FOOTER_SIZE_PT));

        layout.finish()
    }

    fn info_lines(&self, metadata: &ReportMetadata) -> Vec<(String, String)> {
        vec![
            ("Claim Number".into(), or_na(&metadata.claim_number).into()),
            ("Insured Name".into(), or_na(&metadata.insured_name).into()),
            (
                "Property Address".into(),
                or_na(&metadata.property_address).into(),
            ),
            ("Loss Date".into(), or_na(&metadata.loss_date).into()),
            ("Loss Type".into(), or_na(&metadata.loss_type).into()),
            ("Report Type".into(), or_na(&metadata.report_type).into()),
            (
                "Report Date".into(),
                Utc::now().format("%m/%d/%Y").to_string(),
            ),
        ]
    }

    /// Bold label, plain value, one line.
    fn labeled_line(&self, layout: &mut PageLayout, label: &str, value: &str) {
        let runs = vec![Run::emphasized(format!("{label}: ")), Run::plain(value)];
        layout.write_runs(&runs, style::BODY_SIZE_PT, 0.0);
    }

    fn write_block(&self, layout: &mut PageLayout, block: &Block) {
        let style = style_for(&block.kind);
        match &block.kind {
            BlockKind::Header | BlockKind::Subsection => {
                layout.gap(style.space_before_pt);
                layout.line(
                    &block.text,
                    TextStyle {
                        size_pt: style.size_pt,
                        bold: style.bold,
                        italic: false,
                    },
                );
                layout.gap(style.space_after_pt);
            }
            BlockKind::Bullet => {
                layout.list_marker("\u{2022} ", style.size_pt);
                layout.write_runs(&parse_runs(&block.text), style.size_pt, style.indent_pt);
                layout.gap(style.space_after_pt);
            }
            BlockKind::Numbered { index } => {
                layout.list_marker(&format!("{index}. "), style.size_pt);
                layout.write_runs(&parse_runs(&block.text), style.size_pt, style.indent_pt);
                layout.gap(style.space_after_pt);
            }
            BlockKind::Paragraph => {
                layout.write_runs(&parse_runs(&block.text), style.size_pt, style.indent_pt);
                layout.gap(style.space_after_pt);
            }
            BlockKind::Blank { .. } => {
                layout.gap(style.space_after_pt);
            }
        }
    }
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn font_for(bold: bool, italic: bool) -> BuiltinFont {
    match (bold, italic) {
        (true, true) => BuiltinFont::HelveticaBoldOblique,
        (true, false) => BuiltinFont::HelveticaBold,
        (false, true) => BuiltinFont::HelveticaOblique,
        (false, false) => BuiltinFont::Helvetica,
    }
}

/// Convert one laid-out page into a printpdf page. The layout measures y
/// downward from the page top; PDF text cursors sit on the baseline in a
/// bottom-up coordinate space.
fn page_to_ops(page: &LayoutPage) -> PdfPage {
    let mut ops: Vec<Op> = Vec::with_capacity(page.texts.len() * 5);

    for placed in &page.texts {
        let font = font_for(placed.bold, placed.italic);
        let baseline_y = layout::PAGE_HEIGHT_PT - placed.y_top - placed.size_pt;

        ops.push(Op::StartTextSection);
        ops.push(Op::SetTextCursor {
            pos: Point {
                x: Pt(placed.x),
                y: Pt(baseline_y),
            },
        });
        ops.push(Op::SetFontSizeBuiltinFont {
            size: Pt(placed.size_pt),
            font,
        });
        ops.push(Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(placed.text.clone())],
            font,
        });
        ops.push(Op::EndTextSection);
    }

    PdfPage::new(Mm(LETTER_WIDTH_MM), Mm(LETTER_HEIGHT_MM), ops)
}
