//! Paragraph-level types.

use serde::{Deserialize, Serialize};

use super::{FontKey, Line, MajorityVote};

/// A paragraph: lines in reading order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Lines in the paragraph
    pub lines: Vec<Line>,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Create a paragraph from lines.
    pub fn with_lines(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    /// Add a line to the paragraph.
    pub fn add_line(&mut self, line: Line) {
        self.lines.push(line);
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// First line, if any.
    pub fn first_line(&self) -> Option<&Line> {
        self.lines.first()
    }

    /// Check if the paragraph has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of characters over all lines.
    pub fn text_length(&self) -> usize {
        self.lines.iter().map(Line::len).sum()
    }

    /// Paragraph text.
    ///
    /// Lines are joined with a space. A line ending in a hyphen is joined to
    /// the next one directly with the hyphen removed.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for line in &self.lines {
            if text.ends_with('-') {
                text.pop();
            } else if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(&line.text);
        }
        text
    }

    /// Dominant font of the paragraph, weighted by line length.
    pub fn font_key(&self) -> FontKey {
        self.vote().key()
    }

    /// Point size of the dominant font.
    pub fn font_size(&self) -> f32 {
        self.vote().size()
    }

    fn vote(&self) -> MajorityVote {
        let mut vote = MajorityVote::new();
        for line in &self.lines {
            vote.push(line.font_key, line.font_size, line.len());
        }
        vote
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str, size: f32) -> Line {
        Line::new(text, size, 0.0, 0.0, 0.0)
    }

    #[test]
    fn test_paragraph_text_joins_lines() {
        let p = Paragraph::with_lines(vec![line("first", 10.0), line("second", 10.0)]);
        assert_eq!(p.text(), "first second");
        assert_eq!(p.text_length(), 11);
    }

    #[test]
    fn test_paragraph_text_rejoins_hyphenation() {
        let p = Paragraph::with_lines(vec![line("segmen-", 10.0), line("tation works", 10.0)]);
        assert_eq!(p.text(), "segmentation works");
    }

    #[test]
    fn test_paragraph_font_weighted_by_length() {
        let p = Paragraph::with_lines(vec![
            line("Heading", 14.0),
            line("a much longer body line", 10.0),
        ]);
        assert_eq!(p.font_size(), 10.0);
        assert_eq!(p.font_key(), FontKey::from_size(10.0));
    }

    #[test]
    fn test_empty_paragraph() {
        let p = Paragraph::new();
        assert!(p.is_empty());
        assert_eq!(p.text(), "");
        assert_eq!(p.font_key(), FontKey::default());
    }
}
