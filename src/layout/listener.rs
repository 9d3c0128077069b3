//! Segmentation event sink.
//!
//! The segmenter reports structure as a flat stream of boundary events.
//! Implementors override only the events they care about; every method
//! defaults to a no-op.
//!
//! # Example
//!
//! ```
//! use paperparse::layout::{LayoutListener, LineItem};
//!
//! #[derive(Default)]
//! struct LineCounter(usize);
//!
//! impl LayoutListener for LineCounter {
//!     fn line(&mut self, _items: &[LineItem]) {
//!         self.0 += 1;
//!     }
//! }
//! ```

use super::LineItem;

/// Receiver of segmentation events.
///
/// For every page the order is `start_page`, then one
/// `start_article`/`end_article` pair per region, then `end_page`.
/// Paragraph events inside an article are balanced and every `line` call
/// falls inside an open paragraph.
pub trait LayoutListener {
    /// Called once before the first page.
    fn start_document(&mut self) {}

    /// Called once after the last page.
    fn end_document(&mut self) {}

    /// Called when a selected page starts.
    ///
    /// # Arguments
    /// * `number` - 1-based position of the page in the source
    /// * `width` - Page width
    /// * `height` - Page height
    fn start_page(&mut self, number: u32, width: f32, height: f32) {
        let _ = (number, width, height);
    }

    /// Called when a page ends.
    fn end_page(&mut self) {}

    /// Called when an article region starts.
    fn start_article(&mut self) {}

    /// Called when an article region ends.
    fn end_article(&mut self) {}

    /// Called when a paragraph starts.
    fn start_paragraph(&mut self) {}

    /// Called when a paragraph ends.
    fn end_paragraph(&mut self) {}

    /// Called with the glyph run of a closed line.
    fn line(&mut self, items: &[LineItem]) {
        let _ = items;
    }
}
