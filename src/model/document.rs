//! Document-level types.

use serde::{Deserialize, Serialize};

use super::{DocumentCursor, FontKey, Page};

/// A segmented document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document identifier (usually the source file name)
    pub id: Option<String>,

    /// Pages in the document
    pub pages: Vec<Page>,

    /// Layout metrics, set once after all pages are built
    #[serde(default)]
    layout: Option<LayoutMetrics>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty document with an identifier.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by position (1-indexed).
    pub fn get_page(&self, index: u32) -> Option<&Page> {
        if index == 0 {
            return None;
        }
        self.pages.get((index - 1) as usize)
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Layout metrics (all zero until set).
    pub fn layout(&self) -> LayoutMetrics {
        self.layout.unwrap_or_default()
    }

    /// Check if layout metrics have been set.
    pub fn has_layout(&self) -> bool {
        self.layout.is_some()
    }

    /// Set the layout metrics.
    ///
    /// Metrics can only be set once; later calls are ignored and return
    /// `false`.
    pub fn set_layout(&mut self, metrics: LayoutMetrics) -> bool {
        if self.layout.is_some() {
            log::warn!("Layout metrics already set, ignoring update");
            return false;
        }
        self.layout = Some(metrics);
        true
    }

    /// Start a three-tier traversal over the document.
    pub fn cursor(&self) -> DocumentCursor<'_> {
        DocumentCursor::new(self)
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.pages
            .iter()
            .map(|page| page.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Document-wide layout statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutMetrics {
    /// Dominant left edge of content lines
    pub left_margin: f32,

    /// Distance from the dominant right edge of content lines to the page edge
    pub right_margin: f32,

    /// Top margin
    pub top_margin: f32,

    /// Bottom margin
    pub bottom_margin: f32,

    /// Point size of the dominant content font
    pub content_font_size: f32,

    /// Composite key of the dominant content font
    pub content_font_key: FontKey,
}

impl LayoutMetrics {
    /// Create metrics from margins (left, right, top, bottom).
    pub fn with_margins(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left_margin: left,
            right_margin: right,
            top_margin: top,
            bottom_margin: bottom,
            ..Self::default()
        }
    }

    /// Set the dominant content font.
    pub fn with_content_font(mut self, key: FontKey, size: f32) -> Self {
        self.content_font_key = key;
        self.content_font_size = size;
        self
    }
}
