// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// claimkit-parse — Report text structuring for the ClaimKit report engine.
//
// Turns the free-form prose produced by the text-generation provider into a
// typed block stream (classify), splits block text into styled spans (runs),
// and strips the ad hoc markup dialect entirely (normalize) for output media
// without rich-text primitives.

pub mod classify;
pub mod normalize;
pub mod runs;

// Re-export the primary entry points so callers can use `claimkit_parse::classify` etc.
pub use classify::{ClassifyState, classify, classify_line};
pub use normalize::normalize;
pub use runs::parse_runs;
