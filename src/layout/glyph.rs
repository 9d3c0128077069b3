//! Glyph records consumed by the segmentation engine.
//!
//! Coordinates are in page units with the origin at the top-left corner of
//! the page; `y` is the glyph baseline and grows downward.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// One rendered character (or spacing marker) with position and font data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Glyph {
    /// Rendered text (None or empty for pure spacing markers)
    #[serde(default)]
    pub text: Option<String>,

    /// X position (left edge)
    pub x: f32,

    /// Y position (baseline, from page top)
    pub y: f32,

    /// Advance width
    pub width: f32,

    /// Glyph height
    pub height: f32,

    /// Font identity
    #[serde(default)]
    pub font_id: String,

    /// Font size in points
    pub font_size: f32,

    /// Cap height of the font
    #[serde(default)]
    pub cap_height: f32,

    /// Italic angle of the font
    #[serde(default)]
    pub italic_angle: f32,

    /// Whether the glyph is a combining mark
    #[serde(default)]
    pub is_diacritic: bool,

    /// Width of a space in the glyph's font and size
    #[serde(default)]
    pub space_width: f32,
}

impl Glyph {
    /// Create a glyph with text at the given position.
    pub fn new(text: impl Into<String>, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            text: Some(text.into()),
            x,
            y,
            width,
            height,
            font_id: String::new(),
            font_size: height,
            cap_height: 0.0,
            italic_angle: 0.0,
            is_diacritic: false,
            space_width: 0.0,
        }
    }

    /// Create a characterless spacing marker.
    pub fn spacer(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            text: None,
            ..Self::new("", x, y, width, height)
        }
    }

    /// Set font identity and size.
    pub fn with_font(mut self, font_id: impl Into<String>, font_size: f32) -> Self {
        self.font_id = font_id.into();
        self.font_size = font_size;
        self
    }

    /// Set the width of a space.
    pub fn with_space_width(mut self, space_width: f32) -> Self {
        self.space_width = space_width;
        self
    }

    /// Set cap height and italic angle.
    pub fn with_metrics(mut self, cap_height: f32, italic_angle: f32) -> Self {
        self.cap_height = cap_height;
        self.italic_angle = italic_angle;
        self
    }

    /// Mark the glyph as a diacritic.
    pub fn diacritic(mut self) -> Self {
        self.is_diacritic = true;
        self
    }

    /// Text that contributes to a line, if any.
    pub fn rendered_text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }

    /// Number of characters, never less than one.
    pub fn char_count(&self) -> usize {
        self.text
            .as_deref()
            .map(|t| t.chars().count())
            .unwrap_or(0)
            .max(1)
    }

    /// X of the right edge.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Check whether `other` sits on this glyph.
    ///
    /// The horizontal center of `other` must lie within this glyph's advance
    /// and its baseline within one glyph height of this baseline.
    pub fn contains(&self, other: &Glyph) -> bool {
        let center = other.x + other.width / 2.0;
        let reach = self.height.max(other.height);
        center >= self.x && center <= self.right() && (other.y - self.y).abs() <= reach
    }

    /// Combine a diacritic onto this glyph. Geometry is kept.
    pub fn merge_diacritic(&mut self, diacritic: &Glyph) {
        let mut merged = self.text.take().unwrap_or_default();
        if let Some(mark) = diacritic.rendered_text() {
            merged.extend(mark.chars().map(combining_form));
        }
        self.text = Some(merged.nfc().collect());
    }

    /// Replace non-finite or negative geometry with zero.
    pub fn sanitized(mut self) -> Self {
        let before = (self.x, self.y, self.width, self.height, self.space_width);
        self.x = finite(self.x);
        self.y = finite(self.y);
        self.width = non_negative(self.width);
        self.height = non_negative(self.height);
        self.font_size = non_negative(self.font_size);
        self.space_width = non_negative(self.space_width);
        self.cap_height = finite(self.cap_height);
        self.italic_angle = finite(self.italic_angle);
        if before != (self.x, self.y, self.width, self.height, self.space_width) {
            log::debug!(
                "Sanitized glyph {:?} geometry {:?}",
                self.text.as_deref().unwrap_or(""),
                before
            );
        }
        self
    }
}

/// Spacing accents map to their combining counterparts so NFC can compose
/// them with the base character.
fn combining_form(c: char) -> char {
    match c {
        '`' => '\u{0300}',
        '\u{00B4}' => '\u{0301}',
        '^' | '\u{02C6}' => '\u{0302}',
        '~' | '\u{02DC}' => '\u{0303}',
        '\u{00AF}' => '\u{0304}',
        '\u{02D8}' => '\u{0306}',
        '\u{02D9}' => '\u{0307}',
        '\u{00A8}' => '\u{0308}',
        '\u{02DA}' => '\u{030A}',
        '\u{02DD}' => '\u{030B}',
        '\u{02C7}' => '\u{030C}',
        '\u{00B8}' => '\u{0327}',
        '\u{02DB}' => '\u{0328}',
        other => other,
    }
}

fn finite(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn non_negative(value: f32) -> f32 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        0.0
    }
}

/// Article bead rectangle in top-down page space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeadRect {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl BeadRect {
    /// Create a bead from its top-left and bottom-right corners.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Check if a point lies inside the rectangle (edges included).
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }

    /// Replace non-finite or negative coordinates with zero.
    pub fn sanitized(self) -> Self {
        let clean = Self {
            x0: non_negative(self.x0),
            y0: non_negative(self.y0),
            x1: non_negative(self.x1),
            y1: non_negative(self.y1),
        };
        if clean != self {
            log::debug!("Sanitized bead {:?}", self);
        }
        clean
    }
}

/// One page of glyphs as delivered by the glyph source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlyphPage {
    /// Page width
    pub width: f32,

    /// Page height
    pub height: f32,

    /// Article beads, in order
    #[serde(default)]
    pub beads: Vec<BeadRect>,

    /// Glyphs in content-stream order
    #[serde(default)]
    pub glyphs: Vec<Glyph>,
}

impl GlyphPage {
    /// Create an empty page.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Add a glyph.
    pub fn push(&mut self, glyph: Glyph) {
        self.glyphs.push(glyph);
    }

    /// Add a bead rectangle.
    pub fn with_bead(mut self, bead: BeadRect) -> Self {
        self.beads.push(bead);
        self
    }
}

/// A full glyph stream for one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlyphDocument {
    /// Document identifier
    #[serde(default)]
    pub id: Option<String>,

    /// Pages in order
    pub pages: Vec<GlyphPage>,
}

impl GlyphDocument {
    /// Create a document from pages.
    pub fn new(pages: Vec<GlyphPage>) -> Self {
        Self { id: None, pages }
    }

    /// Set the identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// An entry in a line's glyph run.
#[derive(Debug, Clone, PartialEq)]
pub enum LineItem {
    /// A rendered glyph
    Glyph(Glyph),
    /// Synthetic word separator
    Separator,
}

impl LineItem {
    /// Text contributed by this item.
    pub fn text(&self) -> &str {
        match self {
            LineItem::Glyph(glyph) => glyph.rendered_text().unwrap_or(""),
            LineItem::Separator => " ",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitized_glyph() {
        let glyph = Glyph::new("a", f32::NAN, 10.0, -3.0, f32::INFINITY).sanitized();
        assert_eq!(glyph.x, 0.0);
        assert_eq!(glyph.y, 10.0);
        assert_eq!(glyph.width, 0.0);
        assert_eq!(glyph.height, 0.0);
    }

    #[test]
    fn test_char_count_at_least_one() {
        assert_eq!(Glyph::spacer(0.0, 0.0, 1.0, 1.0).char_count(), 1);
        assert_eq!(Glyph::new("fi", 0.0, 0.0, 1.0, 1.0).char_count(), 2);
    }

    #[test]
    fn test_merge_diacritic() {
        let mut base = Glyph::new("e", 10.0, 100.0, 5.0, 8.0);
        let acute = Glyph::new("\u{00B4}", 10.5, 97.0, 4.0, 3.0).diacritic();
        assert!(base.contains(&acute));
        base.merge_diacritic(&acute);
        assert_eq!(base.text.as_deref(), Some("\u{00E9}"));
        assert_eq!(base.x, 10.0);
    }

    #[test]
    fn test_contains_rejects_neighbour() {
        let base = Glyph::new("e", 10.0, 100.0, 5.0, 8.0);
        let next = Glyph::new("f", 15.0, 100.0, 5.0, 8.0);
        assert!(!base.contains(&next));
    }

    #[test]
    fn test_bead_contains() {
        let bead = BeadRect::new(50.0, 50.0, 300.0, 700.0);
        assert!(bead.contains(50.0, 700.0));
        assert!(!bead.contains(301.0, 100.0));
        assert_eq!(BeadRect::new(-1.0, f32::NAN, 1.0, 1.0).sanitized().x0, 0.0);
    }

    #[test]
    fn test_line_item_text() {
        assert_eq!(LineItem::Separator.text(), " ");
        assert_eq!(LineItem::Glyph(Glyph::spacer(0.0, 0.0, 1.0, 1.0)).text(), "");
    }
}
