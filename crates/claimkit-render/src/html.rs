// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Hypertext renderer — one self-contained styled page per report.
//
// Unlike the DOCX and PDF backends this path does not consume the block
// stream: the whole raw content is normalized to plain text and embedded in
// a content area that preserves line breaks visually. Every interpolated
// value is HTML-escaped.

use chrono::Utc;
use claimkit_core::error::Result;
use claimkit_core::{Branding, ExportFormat, HtmlDocument, ReportMetadata, or_na};
use claimkit_parse::normalize;
use tracing::{debug, instrument};

use crate::filename::file_name;

/// Renders a report as a self-contained HTML page.
pub struct HtmlRenderer {
    branding: Branding,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self {
            branding: Branding::default(),
        }
    }

    pub fn with_branding(branding: Branding) -> Self {
        Self { branding }
    }

    /// Render the report page. Synchronous; the only failure mode is
    /// artifact construction, which for HTML cannot occur — the signature
    /// matches the other backends for uniform dispatch.
    #[instrument(skip(self, raw_content), fields(content_len = raw_content.len()))]
    pub fn render(&self, metadata: &ReportMetadata, raw_content: &str) -> Result<HtmlDocument> {
        let content = normalize(raw_content);
        debug!(normalized_len = content.len(), "content normalized for HTML");

        let title = format!(
            "Insurance Report - {}",
            escape_html(or_na(&metadata.claim_number))
        );
        let info_rows = [
            ("Claim Number", or_na(&metadata.claim_number).to_string()),
            ("Insured Name", or_na(&metadata.insured_name).to_string()),
            (
                "Property Address",
                or_na(&metadata.property_address).to_string(),
            ),
            ("Loss Date", or_na(&metadata.loss_date).to_string()),
            ("Loss Type", or_na(&metadata.loss_type).to_string()),
            ("Report Type", or_na(&metadata.report_type).to_string()),
            ("Report Date", Utc::now().format("%m/%d/%Y").to_string()),
        ];

        let mut info_html = String::new();
        for (label, value) in &info_rows {
            info_html.push_str(&format!(
                "            <div class=\"info-row\">\n                <div class=\"info-label\">{}:</div>\n                <div class=\"info-value\">{}</div>\n            </div>\n",
                label,
                escape_html(value)
            ));
        }

        let html = format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
        * {{
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }}
        body {{
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 40px 20px;
            background-color: #f5f5f5;
        }}
        .container {{
            background: white;
            padding: 40px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }}
        .header {{
            text-align: center;
            margin-bottom: 40px;
            border-bottom: 3px solid #FF7C08;
            padding-bottom: 20px;
        }}
        .header h1 {{
            color: #FF7C08;
            font-size: 32px;
            margin-bottom: 10px;
        }}
        .header h2 {{
            color: #0d6efd;
            font-size: 24px;
        }}
        .info-section {{
            background: #f8f9fa;
            padding: 20px;
            border-left: 4px solid #0d6efd;
            margin-bottom: 30px;
        }}
        .info-section h3 {{
            color: #0d6efd;
            margin-bottom: 15px;
        }}
        .info-row {{
            display: flex;
            margin-bottom: 10px;
        }}
        .info-label {{
            font-weight: bold;
            min-width: 150px;
            color: #555;
        }}
        .info-value {{
            color: #333;
        }}
        .content-section {{
            margin-top: 30px;
        }}
        .content-section h3 {{
            color: #0d6efd;
            border-bottom: 2px solid #e0e0e0;
            padding-bottom: 10px;
            margin-bottom: 20px;
        }}
        .content-text {{
            text-align: justify;
            white-space: pre-line;
            line-height: 1.8;
        }}
        .footer {{
            margin-top: 50px;
            text-align: center;
            color: #666;
            font-size: 12px;
            font-style: italic;
            padding-top: 20px;
            border-top: 1px solid #e0e0e0;
        }}
        @media print {{
            body {{
                background: white;
            }}
            .container {{
                box-shadow: none;
            }}
        }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>{brand}</h1>
            <h2>{report_title}</h2>
        </div>

        <div class="info-section">
            <h3>Report Information</h3>
{info_html}        </div>

        <div class="content-section">
            <h3>Report Content</h3>
            <div class="content-text">{content}</div>
        </div>

        <div class="footer">
            <p>Generated with {brand_name} - <a href="{website}">{website}</a></p>
            <p>{attribution}</p>
        </div>
    </div>
</body>
</html>
"#,
            title = title,
            brand = escape_html(&self.branding.brand),
            report_title = escape_html(&self.branding.report_title),
            info_html = info_html,
            content = escape_html(&content),
            brand_name = escape_html(&self.branding.company_name),
            website = escape_html(&self.branding.website),
            attribution = escape_html(&self.branding.attribution),
        );

        Ok(HtmlDocument {
            html,
            file_name: file_name(metadata, ExportFormat::Html),
        })
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Escape the five HTML-special characters.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> ReportMetadata {
        ReportMetadata {
            claim_number: Some("CLM-2209".into()),
            insured_name: Some("J. Alvarez".into()),
            property_address: None,
            loss_date: Some("03/14/2026".into()),
            loss_type: Some("Hail".into()),
            report_type: Some("Preliminary".into()),
        }
    }

    #[test]
    fn escape_html_covers_special_characters() {
        assert_eq!(escape_html("AT&T"), "AT&amp;T");
        assert_eq!(escape_html("<div>"), "&lt;div&gt;");
        assert_eq!(escape_html("\"quoted\""), "&quot;quoted&quot;");
        assert_eq!(escape_html("it's"), "it&#x27;s");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn missing_field_renders_na() {
        let page = HtmlRenderer::new().render(&metadata(), "content").unwrap();
        assert!(page.html.contains("Property Address"));
        assert!(page.html.contains("N/A"));
    }

    #[test]
    fn content_is_normalized_and_escaped() {
        let page = HtmlRenderer::new()
            .render(&metadata(), "**bold** & <script>alert(1)</script>")
            .unwrap();
        assert!(!page.html.contains("**"));
        assert!(!page.html.contains("<script>"));
        assert!(page.html.contains("&lt;script&gt;"));
        assert!(page.html.contains("&amp;"));
    }

    #[test]
    fn metadata_fields_are_escaped() {
        let mut meta = metadata();
        meta.insured_name = Some("<b>Smith & Sons</b>".into());
        let page = HtmlRenderer::new().render(&meta, "x").unwrap();
        assert!(!page.html.contains("<b>Smith"));
        assert!(page.html.contains("&lt;b&gt;Smith &amp; Sons&lt;/b&gt;"));
    }

    #[test]
    fn file_name_has_html_extension() {
        let page = HtmlRenderer::new().render(&metadata(), "x").unwrap();
        assert!(page.file_name.starts_with("CLM-2209_Preliminary_"));
        assert!(page.file_name.ends_with(".html"));
    }

    #[test]
    fn page_is_self_contained() {
        let page = HtmlRenderer::new().render(&metadata(), "Roof damage.").unwrap();
        assert!(page.html.starts_with("<!DOCTYPE html>"));
        assert!(page.html.contains("<style>"));
        assert!(page.html.contains("Report Content"));
        assert!(page.html.contains("Roof damage."));
    }
}
