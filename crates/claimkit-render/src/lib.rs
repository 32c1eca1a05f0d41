// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// claimkit-render — Output backends for the ClaimKit report engine.
//
// Three independent renderers (DOCX, PDF, HTML) consume the same report
// metadata and raw content and produce downloadable artifacts. A thin
// `ReportRenderer` facade dispatches on the requested export format.

pub mod docx;
pub mod filename;
pub mod html;
pub mod pdf;
pub mod style;

// Re-export the primary structs so callers can use `claimkit_render::PdfRenderer` etc.
pub use docx::DocxRenderer;
pub use filename::file_name;
pub use html::{HtmlRenderer, escape_html};
pub use pdf::PdfRenderer;
pub use style::{BlockStyle, style_for};

use claimkit_core::error::Result;
use claimkit_core::{Branding, ExportFormat, ReportArtifact, ReportMetadata};
use tracing::info;

/// Format-dispatching facade over the three backends.
///
/// Each render call is independent; a failure in one format never affects
/// another, so callers can retry a report in a different format.
pub struct ReportRenderer {
    docx: DocxRenderer,
    pdf: PdfRenderer,
    html: HtmlRenderer,
}

impl ReportRenderer {
    pub fn new() -> Self {
        Self::with_branding(Branding::default())
    }

    pub fn with_branding(branding: Branding) -> Self {
        Self {
            docx: DocxRenderer::with_branding(branding.clone()),
            pdf: PdfRenderer::with_branding(branding.clone()),
            html: HtmlRenderer::with_branding(branding),
        }
    }

    /// Render one report in the requested format.
    pub fn render(
        &self,
        format: ExportFormat,
        metadata: &ReportMetadata,
        raw_content: &str,
    ) -> Result<ReportArtifact> {
        info!(?format, "rendering report");
        match format {
            ExportFormat::Docx => Ok(ReportArtifact::Document(
                self.docx.render(metadata, raw_content)?,
            )),
            ExportFormat::Pdf => Ok(ReportArtifact::Document(
                self.pdf.render(metadata, raw_content)?,
            )),
            ExportFormat::Html => Ok(ReportArtifact::Page(
                self.html.render(metadata, raw_content)?,
            )),
        }
    }
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new()
    }
}
