//! # paperparse
//!
//! Layout segmentation and academic-paper metadata extraction from
//! positioned glyph streams.
//!
//! The input is an already-decoded sequence of glyph records per page.
//! The library groups glyphs into lines and paragraphs using geometric and
//! typographic heuristics, then recovers title, authors, abstract and
//! keywords from the resulting structure.
//!
//! ## Quick Start
//!
//! ```
//! use paperparse::layout::{Glyph, GlyphDocument, GlyphPage};
//! use paperparse::{extract_paper, read_document};
//!
//! let mut page = GlyphPage::new(612.0, 792.0);
//! for (i, c) in "Title".chars().enumerate() {
//!     page.push(Glyph::new(c.to_string(), 250.0 + i as f32 * 9.0, 100.0, 9.0, 18.0));
//! }
//!
//! let document = read_document(&GlyphDocument::new(vec![page]));
//! let paper = extract_paper(&document);
//! assert_eq!(paper.title, "Title");
//! ```
//!
//! ## Pipeline
//!
//! - [`layout::Segmenter`] turns glyph pages into layout events
//! - [`builder::DocumentBuilder`] turns events into a [`Document`]
//! - [`paper::PaperExtractor`] walks the document with a
//!   [`model::DocumentCursor`] and fills a [`Paper`]

pub mod builder;
pub mod error;
pub mod layout;
pub mod model;
pub mod paper;

// Re-export commonly used types
pub use builder::{DocumentBuilder, DocumentReader};
pub use error::{CursorTier, Error, Result};
pub use layout::{GlyphDocument, LayoutOptions, PageSelection};
pub use model::{Document, DocumentCursor, LayoutMetrics, Line, LineTag, Page, Paragraph};
pub use paper::{Paper, PaperExtractor};

/// Segment a glyph document with default reader settings.
///
/// # Example
///
/// ```
/// use paperparse::{read_document, GlyphDocument};
///
/// let doc = read_document(&GlyphDocument::default());
/// assert!(doc.is_empty());
/// ```
pub fn read_document(glyphs: &GlyphDocument) -> Document {
    DocumentReader::new().read(glyphs)
}

/// Segment a glyph document with custom options.
///
/// Fails if the options contain non-finite or negative thresholds.
pub fn read_document_with_options(glyphs: &GlyphDocument, options: LayoutOptions) -> Result<Document> {
    Ok(DocumentReader::with_options(options)?.read(glyphs))
}

/// Extract paper metadata from a built document.
///
/// Tags the document's lines as a side effect.
pub fn extract_paper(document: &Document) -> Paper {
    PaperExtractor::new().extract(document)
}

/// Builder for reading glyph documents.
///
/// # Example
///
/// ```
/// use paperparse::{GlyphDocument, PageSelection, Paperparse};
///
/// let result = Paperparse::new()
///     .with_drop_threshold(3.0)
///     .with_pages(PageSelection::Range(1..=2))
///     .sorted()
///     .read(&GlyphDocument::default())?;
/// assert!(result.paper().is_empty());
/// # Ok::<(), paperparse::Error>(())
/// ```
pub struct Paperparse {
    options: LayoutOptions,
}

impl Paperparse {
    /// Create a new builder with reader defaults.
    pub fn new() -> Self {
        Self {
            options: LayoutOptions::default()
                .with_drop_threshold(builder::READER_DROP_THRESHOLD),
        }
    }

    /// Set the indent threshold.
    pub fn with_indent_threshold(mut self, threshold: f32) -> Self {
        self.options = self.options.with_indent_threshold(threshold);
        self
    }

    /// Set the drop threshold.
    pub fn with_drop_threshold(mut self, threshold: f32) -> Self {
        self.options = self.options.with_drop_threshold(threshold);
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.options = self.options.with_pages(pages);
        self
    }

    /// Sort glyphs into reading order before segmenting.
    pub fn sorted(mut self) -> Self {
        self.options = self.options.sorted();
        self
    }

    /// Ignore article beads.
    pub fn without_beads(mut self) -> Self {
        self.options = self.options.without_beads();
        self
    }

    /// Keep duplicate overlapping glyphs.
    pub fn keep_duplicates(mut self) -> Self {
        self.options = self.options.keep_duplicates();
        self
    }

    /// Get the layout options.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Read a glyph document and return a result wrapper.
    pub fn read(self, glyphs: &GlyphDocument) -> Result<PaperparseResult> {
        let document = read_document_with_options(glyphs, self.options)?;
        Ok(PaperparseResult { document })
    }
}

impl Default for Paperparse {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of reading a glyph document.
pub struct PaperparseResult {
    /// The segmented document
    pub document: Document,
}

impl PaperparseResult {
    /// Extract paper metadata.
    pub fn paper(&self) -> Paper {
        extract_paper(&self.document)
    }

    /// Get plain text.
    pub fn plain_text(&self) -> String {
        self.document.plain_text()
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Take the document.
    pub fn into_document(self) -> Document {
        self.document
    }
}
