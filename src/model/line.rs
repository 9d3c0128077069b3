//! Line-level types.

use std::cell::Cell;

use serde::{Deserialize, Serialize};

use super::FontKey;

/// A single line of text, as rendered on the page.
///
/// Geometry and text are fixed once the builder creates the line. The
/// classification tag is the only mutable part and can be set at most once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Rendered text
    pub text: String,

    /// Dominant font size in points
    pub font_size: f32,

    /// Dominant composite font identity
    pub font_key: FontKey,

    /// X of the first rendered glyph
    pub first_x: f32,

    /// X of the last rendered glyph
    pub last_x: f32,

    /// Baseline Y of the first rendered glyph, measured from the page top
    pub y: f32,

    /// Classification tag (None = untagged)
    #[serde(default, skip_serializing_if = "is_untagged")]
    tag: Cell<Option<LineTag>>,
}

fn is_untagged(tag: &Cell<Option<LineTag>>) -> bool {
    tag.get().is_none()
}

impl Line {
    /// Create a new untagged line whose font key is derived from the size.
    pub fn new(text: impl Into<String>, font_size: f32, first_x: f32, last_x: f32, y: f32) -> Self {
        Self {
            text: text.into(),
            font_size,
            font_key: FontKey::from_size(font_size),
            first_x,
            last_x,
            y,
            tag: Cell::new(None),
        }
    }

    /// Replace the composite font key.
    pub fn with_font_key(mut self, key: FontKey) -> Self {
        self.font_key = key;
        self
    }

    /// Number of characters in the line.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Check if the line has no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Horizontal span between the first and last glyph.
    pub fn span(&self) -> f32 {
        self.last_x - self.first_x
    }

    /// Current tag, if any.
    pub fn tag(&self) -> Option<LineTag> {
        self.tag.get()
    }

    /// Check if the line carries no tag yet.
    pub fn is_untagged(&self) -> bool {
        self.tag.get().is_none()
    }

    /// Tag the line unless it is already tagged.
    ///
    /// Returns `true` if the tag was applied.
    pub fn tag_once(&self, tag: LineTag) -> bool {
        if self.tag.get().is_some() {
            return false;
        }
        self.tag.set(Some(tag));
        true
    }
}

/// Classification assigned to a line by the paper extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineTag {
    /// Part of the paper title
    Title,
    /// Part of the author block
    Author,
    /// Part of the abstract
    Abstract,
    /// Running header
    Header,
    /// Running footer
    Footer,
    /// Outside the content area or before the title
    Useless,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_new() {
        let line = Line::new("Hello wörld", 10.0, 72.0, 140.0, 100.0);
        assert_eq!(line.len(), 11);
        assert_eq!(line.span(), 68.0);
        assert_eq!(line.font_key, FontKey::from_size(10.0));
        assert!(line.is_untagged());
    }

    #[test]
    fn test_tag_once() {
        let line = Line::new("Title", 18.0, 0.0, 0.0, 0.0);
        assert!(line.tag_once(LineTag::Useless));
        assert!(!line.tag_once(LineTag::Title));
        assert_eq!(line.tag(), Some(LineTag::Useless));
    }
}
