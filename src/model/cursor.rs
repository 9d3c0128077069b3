//! Three-tier traversal over a document.
//!
//! The cursor keeps one position per tier (page, paragraph, line) plus the
//! item most recently returned at each tier. Advancing a lower tier whose
//! position is exhausted first advances the tier above it, so repeated
//! [`DocumentCursor::next_line`] calls visit every line in document order.

use std::slice::Iter;

use super::{Document, Line, Page, Paragraph};
use crate::error::{CursorTier, Error, Result};

/// Lazy page/paragraph/line cursor with auto-descent.
#[derive(Debug, Clone)]
pub struct DocumentCursor<'a> {
    pages: Iter<'a, Page>,
    paragraphs: Iter<'a, Paragraph>,
    lines: Iter<'a, Line>,
    current_page: Option<&'a Page>,
    current_paragraph: Option<&'a Paragraph>,
    current_line: Option<&'a Line>,
}

impl<'a> DocumentCursor<'a> {
    /// Create a cursor positioned before the first page.
    pub fn new(document: &'a Document) -> Self {
        Self {
            pages: document.pages.iter(),
            paragraphs: Iter::default(),
            lines: Iter::default(),
            current_page: None,
            current_paragraph: None,
            current_line: None,
        }
    }

    /// Check if another page follows.
    pub fn has_next_page(&self) -> bool {
        !self.pages.as_slice().is_empty()
    }

    /// Check if another paragraph follows, on this page or a later one.
    pub fn has_next_paragraph(&self) -> bool {
        !self.paragraphs.as_slice().is_empty()
            || self.pages.as_slice().iter().any(|page| !page.is_empty())
    }

    /// Check if another line follows anywhere in the document.
    pub fn has_next_line(&self) -> bool {
        !self.lines.as_slice().is_empty()
            || self.paragraphs.as_slice().iter().any(|p| !p.is_empty())
            || self
                .pages
                .as_slice()
                .iter()
                .flat_map(|page| page.paragraphs.iter())
                .any(|p| !p.is_empty())
    }

    /// Advance to the next page.
    ///
    /// The paragraph position moves to the start of the new page and the
    /// line position is cleared.
    pub fn next_page(&mut self) -> Result<&'a Page> {
        let page = self
            .pages
            .next()
            .ok_or(Error::CursorExhausted(CursorTier::Page))?;
        self.paragraphs = page.paragraphs.iter();
        self.lines = Iter::default();
        self.current_page = Some(page);
        Ok(page)
    }

    /// Advance to the next paragraph, moving to later pages as needed.
    pub fn next_paragraph(&mut self) -> Result<&'a Paragraph> {
        if !self.has_next_paragraph() {
            return Err(Error::CursorExhausted(CursorTier::Paragraph));
        }
        loop {
            if let Some(paragraph) = self.paragraphs.next() {
                self.lines = paragraph.lines.iter();
                self.current_paragraph = Some(paragraph);
                return Ok(paragraph);
            }
            self.next_page()?;
        }
    }

    /// Advance to the next line, moving to later paragraphs and pages as
    /// needed.
    pub fn next_line(&mut self) -> Result<&'a Line> {
        if !self.has_next_line() {
            return Err(Error::CursorExhausted(CursorTier::Line));
        }
        loop {
            if let Some(line) = self.lines.next() {
                self.current_line = Some(line);
                return Ok(line);
            }
            self.next_paragraph()?;
        }
    }

    /// Most recently returned page.
    pub fn current_page(&self) -> Option<&'a Page> {
        self.current_page
    }

    /// Most recently returned paragraph.
    pub fn current_paragraph(&self) -> Option<&'a Paragraph> {
        self.current_paragraph
    }

    /// Most recently returned line.
    pub fn current_line(&self) -> Option<&'a Line> {
        self.current_line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with(pages: &[&[usize]]) -> Document {
        let mut doc = Document::new();
        for (i, paragraphs) in pages.iter().enumerate() {
            let mut page = Page::letter(i as u32 + 1);
            for (p, &count) in paragraphs.iter().enumerate() {
                let lines = (0..count)
                    .map(|l| Line::new(format!("{}", 10 * (p + 1) + l + 1), 10.0, 0.0, 0.0, 0.0))
                    .collect();
                page.add_paragraph(Paragraph::with_lines(lines));
            }
            doc.add_page(page);
        }
        doc
    }

    #[test]
    fn test_current_before_advance() {
        let doc = doc_with(&[&[1]]);
        let cursor = doc.cursor();
        assert!(cursor.current_page().is_none());
        assert!(cursor.current_paragraph().is_none());
        assert!(cursor.current_line().is_none());
    }

    #[test]
    fn test_next_line_skips_empty_pages() {
        let doc = doc_with(&[&[], &[2]]);
        let mut cursor = doc.cursor();
        assert!(cursor.has_next_line());
        assert_eq!(cursor.next_line().unwrap().text, "11");
        assert_eq!(cursor.current_page().map(|p| p.number), Some(2));
    }

    #[test]
    fn test_has_next_paragraph_ignores_empty_pages() {
        let doc = doc_with(&[&[1], &[]]);
        let mut cursor = doc.cursor();
        cursor.next_paragraph().unwrap();
        assert!(cursor.has_next_page());
        assert!(!cursor.has_next_paragraph());
        assert_eq!(
            cursor.next_paragraph(),
            Err(Error::CursorExhausted(CursorTier::Paragraph))
        );
    }

    #[test]
    fn test_next_page_resets_line_position() {
        let doc = doc_with(&[&[3], &[2]]);
        let mut cursor = doc.cursor();
        cursor.next_line().unwrap();
        cursor.next_page().unwrap();
        // Remaining lines of page 1 are not revisited.
        assert_eq!(cursor.next_line().unwrap().text, "11");
        assert_eq!(cursor.current_page().map(|p| p.number), Some(2));
        assert_eq!(cursor.next_line().unwrap().text, "12");
        assert!(!cursor.has_next_line());
    }
}
