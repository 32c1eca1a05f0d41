// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Inline run parser — splits one block's text into styled spans.
//
// The dialect has a single emphasis level delimited by matched `**...**` or
// `__...__` pairs; nesting and overlap are not supported. An explicit scanner
// is used rather than a regex because the pattern needs a backreference
// (open and close delimiter must match), which the `regex` crate does not
// support.

use claimkit_core::Run;

const DELIMITERS: [&str; 2] = ["**", "__"];

/// Split block text into an ordered sequence of plain and emphasized runs.
///
/// Concatenating all runs' text yields the input with emphasis delimiters
/// removed. Text without delimiters comes back as a single plain run.
pub fn parse_runs(text: &str) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut rest = text;

    while let Some(span) = next_emphasis(rest) {
        if span.start > 0 {
            runs.push(Run::plain(&rest[..span.start]));
        }
        runs.push(Run::emphasized(&rest[span.start + 2..span.end]));
        rest = &rest[span.end + 2..];
    }

    if !rest.is_empty() {
        runs.push(Run::plain(rest));
    }
    if runs.is_empty() {
        runs.push(Run::plain(text));
    }
    runs
}

struct EmphasisSpan {
    /// Byte offset of the opening delimiter.
    start: usize,
    /// Byte offset of the closing delimiter.
    end: usize,
}

/// Earliest matched delimiter pair in `text`, if any.
fn next_emphasis(text: &str) -> Option<EmphasisSpan> {
    let mut best: Option<EmphasisSpan> = None;

    for delim in DELIMITERS {
        let Some(start) = text.find(delim) else {
            continue;
        };
        let Some(close) = text[start + 2..].find(delim) else {
            continue;
        };
        let span = EmphasisSpan {
            start,
            end: start + 2 + close,
        };
        if best.as_ref().is_none_or(|b| span.start < b.start) {
            best = Some(span);
        }
    }

    best
}
