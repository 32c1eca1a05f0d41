// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// DOCX renderer — renders the claim-letter template plus the classified
// block stream as a WordprocessingML document.
//
// The letter shape is fixed: date, letterhead, claim-information block,
// assignment sentence, reserve table skeleton, report content, signature
// block, attribution footer. Only the metadata values and the block stream
// vary between reports.

mod package;

use std::io::Cursor;

use chrono::Utc;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use tracing::{debug, instrument};

use claimkit_core::error::Result;
use claimkit_core::{
    Block, BlockKind, Branding, ClaimkitError, ExportFormat, RenderedDocument, ReportMetadata,
    Run, or_na,
};
use claimkit_parse::{classify, parse_runs};

use crate::filename::file_name;
use crate::style::{pt_to_half_points, pt_to_twips, style_for};

/// Renders a report as a word-processor document.
pub struct DocxRenderer {
    branding: Branding,
}

impl DocxRenderer {
    pub fn new() -> Self {
        Self {
            branding: Branding::default(),
        }
    }

    pub fn with_branding(branding: Branding) -> Self {
        Self { branding }
    }

    /// Render the full claim letter. Any construction error returns `Err`
    /// with no partial buffer.
    #[instrument(skip(self, raw_content), fields(content_len = raw_content.len()))]
    pub fn render(&self, metadata: &ReportMetadata, raw_content: &str) -> Result<RenderedDocument> {
        let blocks = classify(raw_content);
        debug!(blocks = blocks.len(), "building DOCX document part");

        let document_xml = self.build_document(metadata, &blocks)?;
        let bytes = package::pack(&document_xml)?;

        Ok(RenderedDocument {
            bytes,
            file_name: file_name(metadata, ExportFormat::Docx),
        })
    }

    /// Generate word/document.xml.
    fn build_document(&self, metadata: &ReportMetadata, blocks: &[Block]) -> Result<Vec<u8>> {
        let mut xml = BodyWriter::new()?;

        xml.start_with(
            "w:document",
            &[(
                "xmlns:w",
                "http://schemas.openxmlformats.org/wordprocessingml/2006/main",
            )],
        )?;
        xml.start("w:body")?;

        self.write_letter_head(&mut xml, metadata)?;
        self.write_reserve_table(&mut xml)?;
        xml.spacing_paragraph(None, Some(400))?;

        for block in blocks {
            write_block(&mut xml, block)?;
        }

        self.write_letter_foot(&mut xml)?;

        // Section properties: 0.5" margins on a letter page.
        xml.start("w:sectPr")?;
        xml.empty(
            "w:pgSz",
            &[("w:w", "12240"), ("w:h", "15840")],
        )?;
        xml.empty(
            "w:pgMar",
            &[
                ("w:top", "720"),
                ("w:right", "720"),
                ("w:bottom", "720"),
                ("w:left", "720"),
                ("w:header", "720"),
                ("w:footer", "720"),
                ("w:gutter", "0"),
            ],
        )?;
        xml.end("w:sectPr")?;

        xml.end("w:body")?;
        xml.end("w:document")?;

        Ok(xml.into_bytes())
    }

    /// Date, letterhead, claim-information block, assignment sentence, and
    /// the reserve-table lead-in.
    fn write_letter_head(&self, xml: &mut BodyWriter, metadata: &ReportMetadata) -> Result<()> {
        let current_date = Utc::now().format("%m/%d/%Y").to_string();

        xml.text_paragraph(&current_date, ParaProps::after(200))?;
        xml.spacing_paragraph(None, Some(200))?;

        xml.styled_paragraph(
            &[Span::bold(&self.branding.company_name)],
            ParaProps::after(100),
        )?;
        xml.text_paragraph(&self.branding.tagline, ParaProps::after(200))?;
        xml.spacing_paragraph(None, Some(300))?;

        let claim_lines = [
            ("Client Claim #: ", or_na(&metadata.claim_number), 100),
            ("Insured: ", or_na(&metadata.insured_name), 100),
            ("Loss Location: ", or_na(&metadata.property_address), 100),
            ("Date of Loss: ", or_na(&metadata.loss_date), 200),
        ];
        for (label, value, after) in claim_lines {
            xml.styled_paragraph(
                &[Span::bold(label), Span::plain(value)],
                ParaProps::after(after),
            )?;
        }
        xml.spacing_paragraph(None, Some(200))?;

        let report_type = metadata.report_type.as_deref().unwrap_or("inspection report");
        xml.text_paragraph(
            &format!(
                "This will serve as our {report_type} on the above captioned assignment."
            ),
            ParaProps::after(400),
        )?;

        xml.styled_paragraph(
            &[Span::bold("ESTIMATED LOSS:")],
            ParaProps {
                before_tw: Some(200),
                after_tw: Some(200),
                ..ParaProps::default()
            },
        )?;
        xml.text_paragraph(
            "The following reserves are suggested for damages observed to date:",
            ParaProps::after(200),
        )?;

        Ok(())
    }

    /// Fixed 5x5 reserve table: bold header row, three coverage rows with
    /// empty data cells, bold Total row.
    fn write_reserve_table(&self, xml: &mut BodyWriter) -> Result<()> {
        const COLUMNS: [&str; 5] = [
            "Coverage",
            "Limit",
            "Prior Reserve",
            "Change +/-",
            "Remaining Reserve",
        ];
        const ROWS: [(&str, bool); 4] = [
            ("Dwelling", false),
            ("Other Structures", false),
            ("Personal Property", false),
            ("Total", true),
        ];

        xml.start("w:tbl")?;
        xml.start("w:tblPr")?;
        xml.empty("w:tblW", &[("w:w", "5000"), ("w:type", "pct")])?;
        xml.start("w:tblBorders")?;
        for edge in ["w:top", "w:left", "w:bottom", "w:right", "w:insideH", "w:insideV"] {
            xml.empty(edge, &[("w:val", "single"), ("w:sz", "4"), ("w:color", "auto")])?;
        }
        xml.end("w:tblBorders")?;
        xml.end("w:tblPr")?;

        xml.start("w:tblGrid")?;
        for _ in COLUMNS {
            xml.empty("w:gridCol", &[("w:w", "2160")])?;
        }
        xml.end("w:tblGrid")?;

        // Header row.
        xml.start("w:tr")?;
        for column in COLUMNS {
            xml.table_cell(&[Span::bold(column)])?;
        }
        xml.end("w:tr")?;

        // Coverage rows: label plus four empty data cells.
        for (label, bold) in ROWS {
            xml.start("w:tr")?;
            let span = if bold {
                Span::bold(label)
            } else {
                Span::plain(label)
            };
            xml.table_cell(&[span])?;
            for _ in 0..4 {
                xml.table_cell(&[])?;
            }
            xml.end("w:tr")?;
        }

        xml.end("w:tbl")?;
        Ok(())
    }

    /// Signature block and attribution footer.
    fn write_letter_foot(&self, xml: &mut BodyWriter) -> Result<()> {
        xml.spacing_paragraph(Some(600), None)?;
        xml.text_paragraph(
            "Respectfully submitted,",
            ParaProps {
                before_tw: Some(400),
                after_tw: Some(200),
                ..ParaProps::default()
            },
        )?;
        xml.spacing_paragraph(None, Some(200))?;

        xml.styled_paragraph(
            &[Span::bold(&self.branding.company_name)],
            ParaProps::after(100),
        )?;
        xml.text_paragraph(&self.branding.website, ParaProps::after(200))?;
        xml.spacing_paragraph(None, Some(200))?;

        xml.styled_paragraph(
            &[Span {
                text: &self.branding.attribution,
                bold: false,
                italic: true,
                size_half: Some(18),
            }],
            ParaProps {
                center: true,
                ..ParaProps::default()
            },
        )?;
        Ok(())
    }
}

impl Default for DocxRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Map one classified block to a WordprocessingML paragraph.
fn write_block(xml: &mut BodyWriter, block: &Block) -> Result<()> {
    let style = style_for(&block.kind);
    let before = (style.space_before_pt > 0.0).then(|| pt_to_twips(style.space_before_pt));
    let after = (style.space_after_pt > 0.0).then(|| pt_to_twips(style.space_after_pt));
    let size_half = pt_to_half_points(style.size_pt);

    match &block.kind {
        BlockKind::Header | BlockKind::Subsection => xml.styled_paragraph(
            &[Span {
                text: &block.text,
                bold: true,
                italic: false,
                size_half: Some(size_half),
            }],
            ParaProps {
                before_tw: before,
                after_tw: after,
                ..ParaProps::default()
            },
        ),
        BlockKind::Bullet => xml.runs_paragraph(
            &parse_runs(&block.text),
            ParaProps {
                after_tw: after,
                line_spacing: true,
                num_id: Some(package::BULLET_NUM_ID),
                ..ParaProps::default()
            },
        ),
        BlockKind::Numbered { .. } => xml.runs_paragraph(
            &parse_runs(&block.text),
            ParaProps {
                after_tw: after,
                line_spacing: true,
                num_id: Some(package::DECIMAL_NUM_ID),
                ..ParaProps::default()
            },
        ),
        BlockKind::Paragraph => xml.runs_paragraph(
            &parse_runs(&block.text),
            ParaProps {
                after_tw: after,
                line_spacing: true,
                ..ParaProps::default()
            },
        ),
        BlockKind::Blank { .. } => xml.spacing_paragraph(None, after),
    }
}

/// One styled span of template text.
struct Span<'a> {
    text: &'a str,
    bold: bool,
    italic: bool,
    size_half: Option<u32>,
}

impl<'a> Span<'a> {
    fn plain(text: &'a str) -> Self {
        Self {
            text,
            bold: false,
            italic: false,
            size_half: None,
        }
    }

    fn bold(text: &'a str) -> Self {
        Self {
            text,
            bold: true,
            italic: false,
            size_half: None,
        }
    }
}

/// Paragraph-level properties.
#[derive(Default)]
struct ParaProps {
    before_tw: Option<u32>,
    after_tw: Option<u32>,
    /// 1.15 line spacing (`w:line="276"`) for body text.
    line_spacing: bool,
    /// Numbering definition to attach (bullet or decimal list).
    num_id: Option<u32>,
    center: bool,
}

impl ParaProps {
    fn after(tw: u32) -> Self {
        Self {
            after_tw: Some(tw),
            ..Self::default()
        }
    }
}

/// Thin event-writer wrapper for WordprocessingML.
struct BodyWriter {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl BodyWriter {
    fn new() -> Result<Self> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
            .map_err(xml_err)?;
        Ok(Self { writer })
    }

    fn start(&mut self, name: &str) -> Result<()> {
        self.start_with(name, &[])
    }

    fn start_with(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let element = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.writer.write_event(Event::Start(element)).map_err(xml_err)
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let element = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.writer.write_event(Event::Empty(element)).map_err(xml_err)
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_err)
    }

    fn text(&mut self, text: &str) -> Result<()> {
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_err)
    }

    /// `<w:p>` with explicit spans.
    fn styled_paragraph(&mut self, spans: &[Span<'_>], props: ParaProps) -> Result<()> {
        self.start("w:p")?;
        self.paragraph_props(&props)?;
        for span in spans {
            self.run(span)?;
        }
        self.end("w:p")
    }

    /// `<w:p>` with a single plain-text span.
    fn text_paragraph(&mut self, text: &str, props: ParaProps) -> Result<()> {
        self.styled_paragraph(&[Span::plain(text)], props)
    }

    /// `<w:p>` built from parsed emphasis runs; emphasized runs become bold.
    fn runs_paragraph(&mut self, runs: &[Run], props: ParaProps) -> Result<()> {
        self.start("w:p")?;
        self.paragraph_props(&props)?;
        for run in runs {
            self.run(&Span {
                text: &run.text,
                bold: run.emphasized,
                italic: false,
                size_half: None,
            })?;
        }
        self.end("w:p")
    }

    /// Empty paragraph contributing vertical spacing only.
    fn spacing_paragraph(&mut self, before_tw: Option<u32>, after_tw: Option<u32>) -> Result<()> {
        self.styled_paragraph(
            &[],
            ParaProps {
                before_tw,
                after_tw,
                ..ParaProps::default()
            },
        )
    }

    fn paragraph_props(&mut self, props: &ParaProps) -> Result<()> {
        let plain = props.before_tw.is_none()
            && props.after_tw.is_none()
            && !props.line_spacing
            && props.num_id.is_none()
            && !props.center;
        if plain {
            return Ok(());
        }

        self.start("w:pPr")?;
        if let Some(num_id) = props.num_id {
            self.empty("w:pStyle", &[("w:val", "ListParagraph")])?;
            self.start("w:numPr")?;
            self.empty("w:ilvl", &[("w:val", "0")])?;
            self.empty("w:numId", &[("w:val", &num_id.to_string())])?;
            self.end("w:numPr")?;
        }
        if props.before_tw.is_some() || props.after_tw.is_some() || props.line_spacing {
            let mut attrs: Vec<(&str, String)> = Vec::new();
            if let Some(before) = props.before_tw {
                attrs.push(("w:before", before.to_string()));
            }
            if let Some(after) = props.after_tw {
                attrs.push(("w:after", after.to_string()));
            }
            if props.line_spacing {
                attrs.push(("w:line", "276".to_string()));
                attrs.push(("w:lineRule", "auto".to_string()));
            }
            let borrowed: Vec<(&str, &str)> =
                attrs.iter().map(|(k, v)| (*k, v.as_str())).collect();
            self.empty("w:spacing", &borrowed)?;
        }
        if props.center {
            self.empty("w:jc", &[("w:val", "center")])?;
        }
        self.end("w:pPr")
    }

    /// `<w:r>` with run properties and preserved-space text.
    fn run(&mut self, span: &Span<'_>) -> Result<()> {
        self.start("w:r")?;
        if span.bold || span.italic || span.size_half.is_some() {
            self.start("w:rPr")?;
            if span.bold {
                self.empty("w:b", &[])?;
            }
            if span.italic {
                self.empty("w:i", &[])?;
            }
            if let Some(size) = span.size_half {
                let value = size.to_string();
                self.empty("w:sz", &[("w:val", &value)])?;
                self.empty("w:szCs", &[("w:val", &value)])?;
            }
            self.end("w:rPr")?;
        }
        self.start_with("w:t", &[("xml:space", "preserve")])?;
        self.text(span.text)?;
        self.end("w:t")?;
        self.end("w:r")
    }

    /// `<w:tc>` holding one paragraph (possibly empty — cells require one).
    fn table_cell(&mut self, spans: &[Span<'_>]) -> Result<()> {
        self.start("w:tc")?;
        self.start("w:tcPr")?;
        self.empty("w:tcW", &[("w:w", "1000"), ("w:type", "pct")])?;
        self.end("w:tcPr")?;
        self.styled_paragraph(spans, ParaProps::default())?;
        self.end("w:tc")
    }

    fn into_bytes(self) -> Vec<u8> {
        self.writer.into_inner().into_inner()
    }
}

fn xml_err(err: impl std::fmt::Display) -> ClaimkitError {
    ClaimkitError::DocxError(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> ReportMetadata {
        ReportMetadata {
            claim_number: Some("CLM-1".into()),
            insured_name: Some("A. Insured".into()),
            property_address: Some("12 Elm St".into()),
            loss_date: Some("01/02/2026".into()),
            loss_type: Some("Wind".into()),
            report_type: Some("Preliminary".into()),
        }
    }

    fn document_xml(metadata: &ReportMetadata, content: &str) -> String {
        let renderer = DocxRenderer::new();
        let blocks = classify(content);
        String::from_utf8(renderer.build_document(metadata, &blocks).unwrap()).unwrap()
    }

    #[test]
    fn renders_nonempty_archive_with_file_name() {
        let doc = DocxRenderer::new()
            .render(&metadata(), "REMARKS\nRoof damage observed.")
            .unwrap();
        assert_eq!(&doc.bytes[..2], b"PK");
        assert!(doc.file_name.starts_with("CLM-1_Preliminary_"));
        assert!(doc.file_name.ends_with(".docx"));
    }

    #[test]
    fn template_contains_claim_fields_and_table_labels() {
        let xml = document_xml(&metadata(), "");
        for needle in [
            "Client Claim #: ",
            "CLM-1",
            "Loss Location: ",
            "12 Elm St",
            "ESTIMATED LOSS:",
            "Coverage",
            "Prior Reserve",
            "Personal Property",
            "Respectfully submitted,",
        ] {
            assert!(xml.contains(needle), "missing {needle:?}");
        }
    }

    #[test]
    fn missing_fields_render_na() {
        let xml = document_xml(&ReportMetadata::default(), "");
        assert!(xml.contains("N/A"));
        // Assignment sentence falls back to the generic phrase, not N/A.
        assert!(xml.contains("This will serve as our inspection report"));
    }

    #[test]
    fn header_block_is_bold_and_sized() {
        let xml = document_xml(&metadata(), "REMARKS");
        assert!(xml.contains("REMARKS"));
        assert!(xml.contains(r#"<w:sz w:val="22"/>"#));
        assert!(xml.contains("<w:b/>"));
    }

    #[test]
    fn bullet_and_numbered_reference_numbering() {
        let xml = document_xml(&metadata(), "* one\n1. two");
        assert!(xml.contains(r#"<w:numId w:val="1"/>"#));
        assert!(xml.contains(r#"<w:numId w:val="2"/>"#));
        assert!(xml.contains(r#"<w:pStyle w:val="ListParagraph"/>"#));
    }

    #[test]
    fn emphasis_becomes_bold_run() {
        let xml = document_xml(&metadata(), "The **roof** failed.");
        // Three runs: plain, bold, plain — delimiters consumed.
        assert!(!xml.contains("**"));
        assert!(xml.contains(">roof<"));
        assert!(xml.contains("<w:b/>"));
    }

    #[test]
    fn xml_escapes_reserved_characters() {
        let xml = document_xml(&metadata(), "Smith & Sons <repairs>");
        assert!(xml.contains("Smith &amp; Sons &lt;repairs&gt;"));
    }

    #[test]
    fn separator_blank_has_wider_gap() {
        let xml = document_xml(&metadata(), "---");
        assert!(xml.contains(r#"<w:spacing w:after="150"/>"#));
    }
}
