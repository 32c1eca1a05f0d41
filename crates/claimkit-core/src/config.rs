// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Letterhead and attribution configuration.

use serde::{Deserialize, Serialize};

/// Fixed strings stamped into every rendered document.
///
/// The report templates (letterhead, signature block, footer attribution)
/// are fixed in shape; only these strings vary per deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branding {
    /// Short brand mark used in banners ("CLAIMKIT").
    pub brand: String,
    /// Letterhead company line.
    pub company_name: String,
    /// Letterhead tagline under the company line.
    pub tagline: String,
    /// Document subtitle ("Insurance Inspection Report").
    pub report_title: String,
    /// Public web address shown in the signature block and footer.
    pub website: String,
    /// Attribution line naming the text-generation provider.
    pub attribution: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            brand: "CLAIMKIT".into(),
            company_name: "ClaimKit Insurance Services".into(),
            tagline: "Professional Property Inspection Reports".into(),
            report_title: "Insurance Inspection Report".into(),
            website: "https://claimkit.example.com".into(),
            attribution: "Powered by ClaimKit AI".into(),
        }
    }
}
