// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Suggested file names for rendered artifacts.

use chrono::Utc;
use claimkit_core::{ExportFormat, ReportMetadata};

/// `{claimNumber}_{reportType}_{epochMillis}.{ext}`, with `"NA"` standing in
/// for absent fields. Displayed fields fall back to `"N/A"`, but a slash is
/// not usable inside a path component, so file names use the slash-free
/// form. The caller owns storage; this is only a suggestion.
pub fn file_name(metadata: &ReportMetadata, format: ExportFormat) -> String {
    format!(
        "{}_{}_{}.{}",
        file_component(&metadata.claim_number),
        file_component(&metadata.report_type),
        Utc::now().timestamp_millis(),
        format.extension()
    )
}

fn file_component(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or("NA")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_matches_convention() {
        let metadata = ReportMetadata {
            claim_number: Some("CLM-1".into()),
            report_type: Some("Preliminary".into()),
            ..Default::default()
        };
        let name = file_name(&metadata, ExportFormat::Pdf);
        let mut parts = name.splitn(3, '_');
        assert_eq!(parts.next(), Some("CLM-1"));
        assert_eq!(parts.next(), Some("Preliminary"));
        let tail = parts.next().unwrap();
        let (millis, ext) = tail.split_once('.').unwrap();
        assert!(millis.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(ext, "pdf");
    }

    #[test]
    fn missing_fields_fall_back_to_slash_free_placeholder() {
        let name = file_name(&ReportMetadata::default(), ExportFormat::Docx);
        assert!(name.starts_with("NA_NA_"));
        assert!(name.ends_with(".docx"));
        assert!(!name.contains('/'));
    }
}
