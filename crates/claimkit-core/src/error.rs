// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for ClaimKit.

use thiserror::Error;

/// Top-level error type for all ClaimKit operations.
#[derive(Debug, Error)]
pub enum ClaimkitError {
    // -- Render errors --
    #[error("DOCX generation failed: {0}")]
    DocxError(String),

    #[error("PDF generation failed: {0}")]
    PdfError(String),

    #[error("HTML generation failed: {0}")]
    HtmlError(String),

    #[error("unsupported export format: {0}")]
    UnsupportedFormat(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ClaimkitError>;
