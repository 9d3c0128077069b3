//! Page-level types.

use serde::{Deserialize, Serialize};

use super::Paragraph;

/// A single page in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed position in the source)
    pub number: u32,

    /// Page width in layout units
    pub width: f32,

    /// Page height in layout units
    pub height: f32,

    /// Paragraphs on the page, in reading order
    pub paragraphs: Vec<Paragraph>,
}

impl Page {
    /// Create a new page with the given dimensions.
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            paragraphs: Vec::new(),
        }
    }

    /// Create a new page with standard Letter size (8.5 x 11 inches).
    pub fn letter(number: u32) -> Self {
        Self::new(number, 612.0, 792.0) // 8.5 * 72, 11 * 72
    }

    /// Add a paragraph to the page.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }

    /// Get the number of paragraphs on the page.
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Get the number of lines over all paragraphs.
    pub fn line_count(&self) -> usize {
        self.paragraphs.iter().map(Paragraph::line_count).sum()
    }

    /// Get plain text content of the page.
    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Check if the page is empty (no paragraphs).
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Get page dimensions as (width, height) tuple.
    pub fn dimensions(&self) -> (f32, f32) {
        (self.width, self.height)
    }
}
