// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pure page-layout accumulator for the PDF backend.
//
// Tracks a text cursor across a fixed letter page, measuring run widths and
// deciding wraps and page breaks without touching the PDF op stream. The
// renderer consumes the resulting placed text, so wrap logic is testable
// without a document backend.

use claimkit_core::Run;

/// US letter page in points.
pub const PAGE_WIDTH_PT: f32 = 612.0;
pub const PAGE_HEIGHT_PT: f32 = 792.0;
/// Uniform 1" margins.
pub const MARGIN_PT: f32 = 72.0;

/// Average Helvetica glyph width as a fraction of the font size. Good enough
/// for wrap decisions on body text.
const AVG_GLYPH_WIDTH: f32 = 0.5;

/// Estimated width of a string at the given size.
pub fn text_width(text: &str, size_pt: f32) -> f32 {
    text.chars().count() as f32 * size_pt * AVG_GLYPH_WIDTH
}

/// Vertical advance for one line at the given size.
pub fn line_height(size_pt: f32) -> f32 {
    size_pt * 1.25 + 2.0
}

/// Wrap before a run iff it overflows the remaining line width and something
/// already sits on the current line. A run first on its line is never
/// wrapped, whatever its width.
pub fn should_wrap(x: f32, line_start_x: f32, run_width: f32, max_x: f32) -> bool {
    x > line_start_x && x + run_width > max_x
}

/// One positioned piece of text. `y_top` is measured down from the page top;
/// the renderer converts to PDF's bottom-up coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub text: String,
    pub x: f32,
    pub y_top: f32,
    pub size_pt: f32,
    pub bold: bool,
    pub italic: bool,
}

/// Placed text of one laid-out page.
#[derive(Debug, Default)]
pub struct LayoutPage {
    pub texts: Vec<PlacedText>,
}

/// Text style for a whole placed line.
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    pub size_pt: f32,
    pub bold: bool,
    pub italic: bool,
}

impl TextStyle {
    pub fn body(size_pt: f32) -> Self {
        Self {
            size_pt,
            bold: false,
            italic: false,
        }
    }

    pub fn bold(size_pt: f32) -> Self {
        Self {
            bold: true,
            ..Self::body(size_pt)
        }
    }

    pub fn italic(size_pt: f32) -> Self {
        Self {
            italic: true,
            ..Self::body(size_pt)
        }
    }
}

/// Cursor-based layout accumulator over a sequence of letter pages.
pub struct PageLayout {
    done: Vec<LayoutPage>,
    current: LayoutPage,
    /// Absolute horizontal cursor.
    x: f32,
    /// Distance from page top to the top of the current line.
    y: f32,
    /// Where the current line begins (margin plus any indent).
    line_start_x: f32,
    /// Queued list marker, placed together with the item's runs.
    pending_marker: Option<(String, f32)>,
}

impl PageLayout {
    pub fn new() -> Self {
        Self {
            done: Vec::new(),
            current: LayoutPage::default(),
            x: MARGIN_PT,
            y: MARGIN_PT,
            line_start_x: MARGIN_PT,
            pending_marker: None,
        }
    }

    /// Finish the current page and return all pages in order.
    pub fn finish(mut self) -> Vec<LayoutPage> {
        self.done.push(self.current);
        self.done
    }

    /// Vertical gap. Never starts a new page by itself — a gap at the page
    /// bottom just leaves the cursor past the limit until text arrives.
    pub fn gap(&mut self, pt: f32) {
        self.y += pt;
    }

    fn break_page(&mut self) {
        let full = std::mem::take(&mut self.current);
        self.done.push(full);
        self.y = MARGIN_PT;
        self.x = self.line_start_x;
    }

    /// Start a new page if the next line would pass the bottom margin.
    fn ensure_room(&mut self, advance: f32) {
        if self.y + advance > PAGE_HEIGHT_PT - MARGIN_PT {
            self.break_page();
        }
    }

    fn place(&mut self, text: &str, x: f32, style: TextStyle) {
        self.current.texts.push(PlacedText {
            text: text.to_string(),
            x,
            y_top: self.y,
            size_pt: style.size_pt,
            bold: style.bold,
            italic: style.italic,
        });
    }

    /// One full line starting at the left margin.
    pub fn line(&mut self, text: &str, style: TextStyle) {
        self.line_start_x = MARGIN_PT;
        self.write_line_at(text, MARGIN_PT, style);
    }

    /// One line centered between the margins.
    pub fn centered_line(&mut self, text: &str, style: TextStyle) {
        let width = text_width(text, style.size_pt);
        let x = ((PAGE_WIDTH_PT - width) / 2.0).max(MARGIN_PT);
        self.line_start_x = MARGIN_PT;
        self.write_line_at(text, x, style);
    }

    fn write_line_at(&mut self, text: &str, x: f32, style: TextStyle) {
        self.ensure_room(line_height(style.size_pt));
        self.place(text, x, style);
        self.y += line_height(style.size_pt);
        self.x = self.line_start_x;
    }

    /// Write styled runs as flowing text with an indent offset, wrapping at
    /// run boundaries (and within a run only when the run alone exceeds a
    /// whole line). Emphasized runs render bold.
    pub fn write_runs(&mut self, runs: &[Run], size_pt: f32, indent_pt: f32) {
        let start_x = MARGIN_PT + indent_pt;
        let max_x = PAGE_WIDTH_PT - MARGIN_PT;
        self.line_start_x = start_x;
        self.ensure_room(line_height(size_pt));
        match self.pending_marker.take() {
            Some((marker, marker_size)) => {
                self.place(&marker, MARGIN_PT, TextStyle::body(marker_size));
                self.x = start_x.max(MARGIN_PT + text_width(&marker, marker_size));
            }
            None => self.x = self.x.max(start_x),
        }

        for run in runs {
            let style = TextStyle {
                size_pt,
                bold: run.emphasized,
                italic: false,
            };
            let width = text_width(&run.text, size_pt);

            if should_wrap(self.x, start_x, width, max_x) {
                self.newline(size_pt);
            }

            if self.x + width <= max_x || run.text.trim().is_empty() {
                self.place(&run.text, self.x, style);
                self.x += width;
            } else {
                // Run alone exceeds a whole line: fill word by word.
                self.write_wrapped_words(&run.text, style, max_x);
            }
        }

        // Terminate the flow: following content starts on a fresh line.
        self.newline(size_pt);
        self.line_start_x = MARGIN_PT;
        self.x = MARGIN_PT;
    }

    /// Queue a list-item marker glyph for the left margin. Placement is
    /// deferred to the item's runs, so the marker and the first line of its
    /// text always break pages together.
    pub fn list_marker(&mut self, marker: &str, size_pt: f32) {
        self.pending_marker = Some((marker.to_string(), size_pt));
    }

    fn newline(&mut self, size_pt: f32) {
        self.y += line_height(size_pt);
        self.x = self.line_start_x;
        self.ensure_room(line_height(size_pt));
    }

    fn write_wrapped_words(&mut self, text: &str, style: TextStyle, max_x: f32) {
        for word in text.split_whitespace() {
            let word_width = text_width(word, style.size_pt);
            let space_width = text_width(" ", style.size_pt);

            if should_wrap(self.x, self.line_start_x, word_width, max_x) {
                self.newline(style.size_pt);
            }
            self.place(word, self.x, style);
            self.x += word_width + space_width;
        }
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_requires_content_on_line() {
        // Overflowing run first on the line is never wrapped.
        assert!(!should_wrap(72.0, 72.0, 9999.0, 540.0));
        // Same run mid-line wraps.
        assert!(should_wrap(300.0, 72.0, 9999.0, 540.0));
        // Fits: no wrap.
        assert!(!should_wrap(300.0, 72.0, 100.0, 540.0));
    }

    #[test]
    fn lines_stack_downward() {
        let mut layout = PageLayout::new();
        layout.line("first", TextStyle::body(10.0));
        layout.line("second", TextStyle::body(10.0));
        let pages = layout.finish();
        assert_eq!(pages.len(), 1);
        assert!(pages[0].texts[1].y_top > pages[0].texts[0].y_top);
        assert_eq!(pages[0].texts[0].x, MARGIN_PT);
    }

    #[test]
    fn centered_line_is_centered() {
        let mut layout = PageLayout::new();
        layout.centered_line("TITLE", TextStyle::bold(26.0));
        let pages = layout.finish();
        let width = text_width("TITLE", 26.0);
        assert!((pages[0].texts[0].x - (PAGE_WIDTH_PT - width) / 2.0).abs() < 0.01);
    }

    #[test]
    fn long_content_breaks_pages() {
        let mut layout = PageLayout::new();
        for i in 0..120 {
            layout.line(&format!("line {i}"), TextStyle::body(10.0));
        }
        let pages = layout.finish();
        assert!(pages.len() > 1, "expected a page break");
        // Every placed line sits inside the writable area.
        for page in &pages {
            for t in &page.texts {
                assert!(t.y_top + line_height(t.size_pt) <= PAGE_HEIGHT_PT - MARGIN_PT + 0.01);
            }
        }
    }

    #[test]
    fn emphasized_runs_are_bold_and_ordered() {
        let runs = vec![
            Run::plain("roof was "),
            Run::emphasized("compromised"),
            Run::plain(" by hail"),
        ];
        let mut layout = PageLayout::new();
        layout.write_runs(&runs, 10.0, 0.0);
        let pages = layout.finish();
        let texts = &pages[0].texts;
        assert_eq!(texts.len(), 3);
        assert!(!texts[0].bold && texts[1].bold && !texts[2].bold);
        // All on one line, advancing rightward.
        assert_eq!(texts[0].y_top, texts[1].y_top);
        assert!(texts[1].x > texts[0].x);
    }

    #[test]
    fn overflowing_run_wraps_to_next_line() {
        let long = "x".repeat(200);
        let runs = vec![Run::plain("lead "), Run::emphasized(&long)];
        let mut layout = PageLayout::new();
        layout.write_runs(&runs, 10.0, 0.0);
        let pages = layout.finish();
        let texts = &pages[0].texts;
        // The long run wrapped below the lead run rather than overflowing.
        assert!(texts[1].y_top > texts[0].y_top);
        assert_eq!(texts[1].x, MARGIN_PT);
    }

    #[test]
    fn gap_then_text_respects_page_bottom() {
        let mut layout = PageLayout::new();
        layout.gap(10_000.0);
        layout.line("after the gap", TextStyle::body(10.0));
        let pages = layout.finish();
        assert_eq!(pages.len(), 2);
        assert!(pages[0].texts.is_empty());
        assert_eq!(pages[1].texts[0].y_top, MARGIN_PT);
    }

    #[test]
    fn marker_then_runs_share_a_line() {
        let mut layout = PageLayout::new();
        layout.list_marker("\u{2022} ", 10.0);
        layout.write_runs(&[Run::plain("item text")], 10.0, 15.0);
        let pages = layout.finish();
        let texts = &pages[0].texts;
        assert_eq!(texts.len(), 2);
        assert_eq!(texts[0].y_top, texts[1].y_top);
        assert_eq!(texts[1].x, MARGIN_PT + 15.0);
    }

    #[test]
    fn marker_at_page_bottom_moves_with_its_runs() {
        let mut layout = PageLayout::new();
        // Fill the first page exactly: 44 body lines reach the bottom margin.
        for i in 0..44 {
            layout.line(&format!("filler {i}"), TextStyle::body(10.0));
        }
        layout.list_marker("\u{2022} ", 10.0);
        layout.write_runs(&[Run::plain("item at the boundary")], 10.0, 15.0);
        let pages = layout.finish();
        assert_eq!(pages.len(), 2);
        // Marker and text land together at the top of the new page.
        let texts = &pages[1].texts;
        assert_eq!(texts[0].text, "\u{2022} ");
        assert_eq!(texts[0].y_top, MARGIN_PT);
        assert_eq!(texts[0].y_top, texts[1].y_top);
        assert!(pages[0].texts.iter().all(|t| t.text != "\u{2022} "));
    }
}
