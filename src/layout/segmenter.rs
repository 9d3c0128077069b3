//! Line and paragraph segmentation.
//!
//! Each article region is scanned once. Glyphs are grouped into lines by
//! vertical overlap with the running line extent; word separators are
//! inserted where a glyph starts after the predicted start of the next
//! word. When a line closes, its start is compared with the previous line
//! start to decide whether it opens a new paragraph.

use std::cmp::Ordering;

use super::article::{partition, OverlapIndex};
use super::markers::ListMarker;
use super::{Glyph, GlyphPage, LayoutListener, LayoutOptions, LineItem};

/// Layout segmentation engine.
///
/// A segmenter may be reused across documents; per-document state is reset
/// at the start of every run.
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    options: LayoutOptions,
    overlap: OverlapIndex,
}

impl Segmenter {
    /// Create a segmenter with the given options.
    pub fn new(options: LayoutOptions) -> Self {
        Self {
            options,
            overlap: OverlapIndex::new(),
        }
    }

    /// Get the options.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Clear per-document state.
    pub fn reset(&mut self) {
        self.overlap.clear();
    }

    /// Segment a sequence of pages, reporting events to `listener`.
    ///
    /// Pages outside the page selection are skipped but still count towards
    /// page numbers.
    pub fn process<L: LayoutListener + ?Sized>(&mut self, pages: &[GlyphPage], listener: &mut L) {
        self.reset();
        listener.start_document();
        for (index, page) in pages.iter().enumerate() {
            let number = index as u32 + 1;
            if !self.options.pages.includes(number) {
                log::trace!("Skipping page {}", number);
                continue;
            }
            self.process_page(number, page, listener);
        }
        listener.end_document();
    }

    fn process_page<L: LayoutListener + ?Sized>(
        &mut self,
        number: u32,
        page: &GlyphPage,
        listener: &mut L,
    ) {
        self.overlap.clear();
        let overlap = if self.options.suppress_duplicate_overlapping_text {
            Some(&mut self.overlap)
        } else {
            None
        };
        let mut regions = partition(page, self.options.separate_by_beads, overlap);

        log::debug!(
            "Page {}: {} glyphs in {} regions",
            number,
            page.glyphs.len(),
            regions.len()
        );

        listener.start_page(number, dimension(page.width), dimension(page.height));
        for region in &mut regions {
            if self.options.sort_by_position {
                region.sort_by(reading_order);
            }
            listener.start_article();
            RegionScan::new(&self.options).run(region, listener);
            listener.end_article();
        }
        listener.end_page();
    }
}

fn dimension(value: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Top to bottom, then left to right.
fn reading_order(a: &Glyph, b: &Glyph) -> Ordering {
    a.y.total_cmp(&b.y).then_with(|| a.x.total_cmp(&b.x))
}

/// Whether a glyph at `y` with `height` overlaps the running line extent.
fn same_line(y: f32, height: f32, max_y: f32, max_height: f32) -> bool {
    (max_y - y).abs() < 0.1
        || (max_y <= y && max_y >= y - height)
        || (y <= max_y && y >= max_y - max_height)
}

/// First whitespace-delimited token of a glyph run.
fn leading_token(items: &[LineItem]) -> String {
    let mut token = String::new();
    for item in items {
        for c in item.text().chars() {
            if !c.is_whitespace() {
                token.push(c);
            } else if !token.is_empty() {
                return token;
            }
        }
    }
    token
}

/// Start of a closed line, as seen by the next paragraph decision.
#[derive(Debug, Clone, Copy)]
struct LineStart {
    x: f32,
    paragraph_start: bool,
    hanging_indent: bool,
    marker: Option<ListMarker>,
}

/// Line being accumulated.
#[derive(Debug)]
struct OpenLine {
    items: Vec<LineItem>,
    /// First glyph of the line, rendered or not
    start: Glyph,
    /// Baseline of the preceding glyph and height of the preceding line
    previous: Option<(f32, f32)>,
}

/// Rolling state of one glyph of look-behind.
#[derive(Debug)]
struct Previous {
    y: f32,
    font_id: String,
    font_size: f32,
    /// Text exists and does not end in whitespace
    open_ended: bool,
}

struct RegionScan<'a> {
    options: &'a LayoutOptions,
    line: Option<OpenLine>,
    last_line_start: Option<LineStart>,
    paragraph_open: bool,
    previous: Option<Previous>,
    max_y: f32,
    max_height: f32,
    end_of_last_x: Option<f32>,
    last_word_spacing: Option<f32>,
    previous_average_char_width: Option<f32>,
}

impl<'a> RegionScan<'a> {
    fn new(options: &'a LayoutOptions) -> Self {
        Self {
            options,
            line: None,
            last_line_start: None,
            paragraph_open: false,
            previous: None,
            max_y: f32::MIN,
            max_height: 0.0,
            end_of_last_x: None,
            last_word_spacing: None,
            previous_average_char_width: None,
        }
    }

    fn run<L: LayoutListener + ?Sized>(mut self, glyphs: &[Glyph], listener: &mut L) {
        for glyph in glyphs {
            self.push(glyph, listener);
        }
        self.close_line(listener);
        if self.paragraph_open {
            listener.end_paragraph();
        }
    }

    fn push<L: LayoutListener + ?Sized>(&mut self, glyph: &Glyph, listener: &mut L) {
        if let Some(previous) = &self.previous {
            if previous.font_id != glyph.font_id || previous.font_size != glyph.font_size {
                self.previous_average_char_width = None;
            }
        }

        let word_spacing = glyph.space_width;
        let delta_space = if word_spacing == 0.0 || !word_spacing.is_finite() {
            f32::MAX
        } else {
            match self.last_word_spacing {
                Some(last) => (word_spacing + last) / 2.0 * self.options.spacing_tolerance,
                None => word_spacing * self.options.spacing_tolerance,
            }
        };
        let char_width = glyph.width / glyph.char_count() as f32;
        let average_char_width = match self.previous_average_char_width {
            Some(previous) => (previous + char_width) / 2.0,
            None => char_width,
        };
        let delta_char_width = average_char_width * self.options.average_char_tolerance;
        let mut expected_word_start = self
            .end_of_last_x
            .map(|end| end + delta_space.min(delta_char_width));

        match self.previous.as_ref().map(|p| p.y) {
            None => self.open_line(glyph, None),
            Some(previous_y) => {
                if !same_line(glyph.y, glyph.height, self.max_y, self.max_height) {
                    let boundary = (previous_y, self.max_height);
                    self.close_line(listener);
                    self.open_line(glyph, Some(boundary));
                    expected_word_start = None;
                }
            }
        }

        let open_ended = self.previous.as_ref().is_some_and(|p| p.open_ended);
        if let (Some(expected), Some(line)) = (expected_word_start, self.line.as_mut()) {
            if expected < glyph.x && open_ended {
                line.items.push(LineItem::Separator);
            }
        }

        self.max_y = self.max_y.max(glyph.y);
        self.max_height = self.max_height.max(glyph.height);
        self.end_of_last_x = Some(glyph.right());
        if glyph.rendered_text().is_some() {
            if let Some(line) = self.line.as_mut() {
                line.items.push(LineItem::Glyph(glyph.clone()));
            }
        }

        self.previous = Some(Previous {
            y: glyph.y,
            font_id: glyph.font_id.clone(),
            font_size: glyph.font_size,
            open_ended: glyph
                .text
                .as_deref()
                .is_some_and(|t| !t.ends_with(char::is_whitespace)),
        });
        self.last_word_spacing = Some(word_spacing);
        self.previous_average_char_width = Some(average_char_width);
    }

    fn open_line(&mut self, start: &Glyph, previous: Option<(f32, f32)>) {
        self.line = Some(OpenLine {
            items: Vec::new(),
            start: start.clone(),
            previous,
        });
        self.max_y = f32::MIN;
        self.max_height = 0.0;
        self.end_of_last_x = None;
    }

    /// Decide the paragraph break for the pending line and emit it.
    fn close_line<L: LayoutListener + ?Sized>(&mut self, listener: &mut L) {
        let Some(line) = self.line.take() else {
            return;
        };
        let marker = ListMarker::classify(&leading_token(&line.items));
        let (paragraph_start, hanging_indent) = self.separation(&line, marker);

        if paragraph_start {
            if self.paragraph_open {
                listener.end_paragraph();
            }
            listener.start_paragraph();
            self.paragraph_open = true;
        }
        listener.line(&line.items);

        self.last_line_start = Some(LineStart {
            x: line.start.x,
            paragraph_start,
            hanging_indent,
            marker,
        });
    }

    /// Returns (paragraph start, hanging indent) for a closed line.
    fn separation(&self, line: &OpenLine, marker: Option<ListMarker>) -> (bool, bool) {
        let (Some(last), Some((previous_y, previous_height))) =
            (self.last_line_start, line.previous)
        else {
            return (true, false);
        };

        let start = &line.start;
        let y_gap = (start.y - previous_y).abs();
        let x_gap = start.x - last.x;
        let space = start.space_width;

        let decision = if y_gap > self.options.drop_threshold * previous_height {
            (true, false)
        } else if x_gap > self.options.indent_threshold * space {
            if last.paragraph_start {
                (false, true)
            } else {
                (true, false)
            }
        } else if x_gap < -space {
            (!last.paragraph_start, false)
        } else if x_gap.abs() < 0.25 * start.width {
            if last.hanging_indent {
                (false, true)
            } else {
                let repeated = last.paragraph_start && last.marker.is_some() && last.marker == marker;
                (repeated, false)
            }
        } else {
            (false, false)
        };

        log::trace!(
            "Line at ({:.1}, {:.1}): y_gap={:.1} x_gap={:.1} -> {:?}",
            start.x,
            start.y,
            y_gap,
            x_gap,
            decision
        );
        decision
    }
}
