// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Plain-text normalizer — strips the whole markup dialect from raw content.
//
// Used where styling cannot be expressed (the hypertext content area embeds
// plain text). Passes run in a fixed order so that stripping one token class
// cannot re-introduce another; the guarantee is that output contains no
// tokens of the supported dialect, and that normalizing twice equals
// normalizing once.

use regex::Regex;
use std::sync::LazyLock;

static BOLD_STARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static BOLD_UNDERSCORES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"__(.+?)__").unwrap());
static ITALIC_STAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.+?)\*").unwrap());
static ITALIC_UNDERSCORE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_(.+?)_").unwrap());
static LIST_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^[*\-+]\s+").unwrap());
static HEADING_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#+\s+").unwrap());
static STRIKETHROUGH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"~~(.+?)~~").unwrap());
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`(.+?)`").unwrap());

/// Strip all markup from raw content, yielding display-ready plain text.
///
/// Newlines are preserved (the hypertext renderer shows them as visual
/// breaks); runs of horizontal whitespace collapse to single spaces.
pub fn normalize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let text = BOLD_STARS.replace_all(raw, "$1");
    let text = BOLD_UNDERSCORES.replace_all(&text, "$1");
    let text = ITALIC_STAR.replace_all(&text, "$1");
    let text = ITALIC_UNDERSCORE.replace_all(&text, "$1");
    let text = LIST_MARKER.replace_all(&text, "");
    let text = HEADING_MARKER.replace_all(&text, "");
    let text = STRIKETHROUGH.replace_all(&text, "$1");
    let text = INLINE_CODE.replace_all(&text, "$1");

    // Anything the paired passes left behind.
    let text = text.replace('*', "");
    let text = strip_lone_underscores(&text);

    collapse_whitespace(&text)
}

/// Remove `_` characters not adjacent to a word character on either side.
///
/// The source dialect's rule is a lookaround (`(?<!\w)_(?!\w)`), which the
/// `regex` crate does not support; an explicit scan applies the same
/// adjacency test. Underscores inside identifiers ("snake_case") survive.
fn strip_lone_underscores(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' {
            let prev_word = i > 0 && is_word(chars[i - 1]);
            let next_word = i + 1 < chars.len() && is_word(chars[i + 1]);
            if !prev_word && !next_word {
                continue;
            }
        }
        out.push(c);
    }
    out
}

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Collapse horizontal whitespace runs to single spaces, trim each line, and
/// trim the whole text. Newlines survive.
fn collapse_whitespace(text: &str) -> String {
    let collapsed: Vec<String> = text
        .split('\n')
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect();
    collapsed.join("\n").trim().to_string()
}
