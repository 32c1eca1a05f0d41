// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the ClaimKit report engine.

use serde::{Deserialize, Serialize};

/// Placeholder rendered wherever an absent metadata field is displayed.
pub const MISSING_FIELD: &str = "N/A";

/// Metadata describing one claim report.
///
/// All fields are optional; absent fields render as the literal `"N/A"`
/// wherever they are displayed. Constructed by the caller per render request
/// and read-only to the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub claim_number: Option<String>,
    pub insured_name: Option<String>,
    pub property_address: Option<String>,
    /// Free-text date of loss as captured by intake (not parsed).
    pub loss_date: Option<String>,
    pub loss_type: Option<String>,
    pub report_type: Option<String>,
}

/// Display an optional metadata field, falling back to `"N/A"`.
pub fn or_na(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or(MISSING_FIELD)
}

/// Classification of one source line of report text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    /// A catalogued section label (e.g. "LOSS AND ORIGIN").
    Header,
    /// A short colon-terminated run-in label, bolded but smaller than a header.
    Subsection,
    /// A bullet list item (`*`, `-`, or `+` marker, stripped).
    Bullet,
    /// A numbered list item carrying the parsed index (`1.`, `2.`, ...).
    Numbered { index: u32 },
    /// Ordinary body text, emphasis markup retained.
    Paragraph,
    /// An empty or separator-only line. Separator-derived blanks get a
    /// larger vertical gap in every renderer.
    Blank { separator: bool },
}

/// One classified unit of report text.
///
/// Blocks form an ordered sequence; order defines document reading order.
/// `text` holds the block's content with its leading marker stripped
/// (emphasis markup still present except for headers). For blanks, `text`
/// holds the original separator token, so the source line is restorable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub kind: BlockKind,
    pub text: String,
}

impl Block {
    pub fn new(kind: BlockKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Reconstruct the source line this block was classified from, restoring
    /// the stripped list marker. Emphasis stripped from header lines is not
    /// restorable; headers round-trip as their displayed text.
    pub fn restore_line(&self) -> String {
        match self.kind {
            BlockKind::Bullet => format!("* {}", self.text),
            BlockKind::Numbered { index } => format!("{}. {}", index, self.text),
            _ => self.text.clone(),
        }
    }
}

/// One styled span of text within a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub text: String,
    pub emphasized: bool,
}

impl Run {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: false,
        }
    }

    pub fn emphasized(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: true,
        }
    }
}

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Docx,
    Pdf,
    Html,
}

impl ExportFormat {
    /// File extension for generated artifacts.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Docx => "docx",
            Self::Pdf => "pdf",
            Self::Html => "html",
        }
    }

    /// MIME type for HTTP delivery of the artifact.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::Pdf => "application/pdf",
            Self::Html => "text/html",
        }
    }

    /// Infer export format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "docx" => Some(Self::Docx),
            "pdf" => Some(Self::Pdf),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

/// A rendered binary document (DOCX or PDF) plus its suggested file name.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub file_name: String,
}

/// A rendered hypertext page plus its suggested file name.
#[derive(Debug, Clone)]
pub struct HtmlDocument {
    pub html: String,
    pub file_name: String,
}

/// Output of the format-dispatching facade.
#[derive(Debug, Clone)]
pub enum ReportArtifact {
    Document(RenderedDocument),
    Page(HtmlDocument),
}

impl ReportArtifact {
    pub fn file_name(&self) -> &str {
        match self {
            Self::Document(doc) => &doc.file_name,
            Self::Page(page) => &page.file_name,
        }
    }

    /// Artifact payload as bytes, regardless of medium.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Document(doc) => doc.bytes,
            Self::Page(page) => page.html.into_bytes(),
        }
    }
}
