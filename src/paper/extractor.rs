//! Heuristic paper metadata extraction.
//!
//! The extractor walks a built [`Document`] with a single cursor:
//!
//! 1. Lines outside the content area, and every line before the first
//!    plausible title line, are tagged [`LineTag::Useless`].
//! 2. The title grows from the first untagged line while the font does not
//!    get smaller.
//! 3. Authors are read from the line that stopped the title, from short
//!    lines in the same paragraph and from the first lines of following
//!    paragraphs, up to the abstract.
//! 4. The abstract runs over paragraphs sharing the font of its first
//!    paragraph.
//! 5. Keywords are read from keyword paragraphs right after the abstract.

use std::collections::BTreeSet;

use super::text::{
    clean_abstract, contains_ignore_case, is_keyword_section, parse_keywords, single_author,
    split_authors, starts_with_ignore_case,
};
use super::Paper;
use crate::model::{Document, DocumentCursor, LayoutMetrics, Line, LineTag, Page, Paragraph};

const ABSTRACT: &str = "abstract";
const MAX_AUTHORS: usize = 4;
const MAX_ABSTRACT_LENGTH: usize = 1200;
const LONG_PARAGRAPH: usize = 350;

/// Horizontal placement of a line relative to the content margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Alignment {
    Left,
    Center,
    Right,
}

fn alignment(line: &Line, page: &Page, layout: &LayoutMetrics) -> Alignment {
    let left = line.first_x - layout.left_margin;
    let right = page.width - layout.right_margin - line.last_x;
    let mut offset = 20.0;
    if line.span() > 300.0 {
        offset += 20.0;
    }
    if left - right > offset {
        Alignment::Right
    } else if right - left > offset {
        Alignment::Left
    } else {
        Alignment::Center
    }
}

fn inside_content_area(line: &Line, page: &Page, layout: &LayoutMetrics) -> bool {
    line.first_x > layout.left_margin - 20.0
        && line.last_x < page.width - layout.right_margin + 30.0
        && line.y > layout.top_margin
        && line.y < page.height - layout.bottom_margin
}

fn is_potential_title(line: &Line, page: &Page, layout: &LayoutMetrics) -> bool {
    line.y < page.height * 0.75 && alignment(line, page, layout) != Alignment::Right
}

/// Tag lines outside the content area, and all lines before the first
/// title candidate, as useless.
fn mark_useless(document: &Document) {
    let layout = document.layout();
    let mut cursor = document.cursor();
    let mut title_found = false;
    while let Ok(line) = cursor.next_line() {
        let Some(page) = cursor.current_page() else {
            continue;
        };
        if !inside_content_area(line, page, &layout) {
            line.tag_once(LineTag::Useless);
        }
        if !title_found {
            title_found = is_potential_title(line, page, &layout);
            if !title_found {
                line.tag_once(LineTag::Useless);
            }
        }
    }
}

/// Extracts [`Paper`] metadata from documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaperExtractor;

impl PaperExtractor {
    /// Create an extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extract title, authors, abstract and keywords.
    ///
    /// Lines of the document are tagged along the way; a line that is
    /// already tagged keeps its tag.
    pub fn extract(&self, document: &Document) -> Paper {
        let mut paper = Paper::new(document.id.clone());
        mark_useless(document);

        let mut run = Extraction::new(document);
        let Some(first) = run.first_untagged_line() else {
            log::debug!("No candidate lines in {:?}", document.id);
            return paper;
        };

        let stop = run.title(first, &mut paper.title);
        if let Some(stop) = stop {
            let (authors, boundary) = run.authors(stop);
            paper.authors = authors;
            if boundary {
                paper.abstract_text = run.abstract_text();
                paper.keywords = run.keywords();
            } else {
                log::debug!("No abstract boundary in {:?}", document.id);
            }
        }

        log::debug!(
            "Extracted {:?}: {} authors, {} abstract chars, {} keywords (abstract confidence {:.2})",
            paper.title,
            paper.authors.len(),
            paper.abstract_text.len(),
            paper.keywords.len(),
            run.abstract_confidence
        );
        paper
    }
}

/// State of one extraction run.
struct Extraction<'a> {
    cursor: DocumentCursor<'a>,
    abstract_confidence: f32,
}

impl<'a> Extraction<'a> {
    fn new(document: &'a Document) -> Self {
        Self {
            cursor: document.cursor(),
            abstract_confidence: 1.0,
        }
    }

    fn first_untagged_line(&mut self) -> Option<&'a Line> {
        while let Ok(line) = self.cursor.next_line() {
            if line.is_untagged() {
                return Some(line);
            }
        }
        None
    }

    /// Grow the title from `first`. Returns the line that stopped it.
    fn title(&mut self, first: &'a Line, title: &mut String) -> Option<&'a Line> {
        let mut threshold = first.font_key;
        first.tag_once(LineTag::Title);
        title.push_str(&first.text);

        while let Ok(line) = self.cursor.next_line() {
            if line.font_key < threshold {
                return Some(line);
            }
            threshold = threshold.max(line.font_key);
            line.tag_once(LineTag::Title);
            title.push(' ');
            title.push_str(&line.text);
        }
        None
    }

    /// Collect authors from `first` up to the abstract. The flag tells
    /// whether the cursor stopped on an abstract paragraph.
    fn authors(&mut self, first: &'a Line) -> (Vec<String>, bool) {
        let key = first.font_key;
        first.tag_once(LineTag::Author);
        let mut authors = split_authors(&first.text);
        let mut all_found = authors.len() > 1;

        if !all_found {
            if let Some(paragraph) = self.cursor.current_paragraph() {
                for line in &paragraph.lines {
                    if !all_found && line.is_untagged() && line.font_key == key {
                        take_author(&mut authors, line);
                    }
                    all_found = all_found || authors.len() >= MAX_AUTHORS;
                }
            }
        }

        let mut previous = self.cursor.current_paragraph();
        while let Ok(current) = self.cursor.next_paragraph() {
            if self.is_abstract_boundary(current, previous) {
                return (authors, true);
            }
            if let Some(line) = current.first_line() {
                if !all_found && line.font_key == key {
                    take_author(&mut authors, line);
                }
                all_found = all_found || authors.len() >= MAX_AUTHORS;
            }
            previous = Some(current);
        }
        (authors, false)
    }

    fn is_abstract_boundary(&mut self, current: &Paragraph, previous: Option<&Paragraph>) -> bool {
        if let Some(previous) = previous {
            let text = previous.text();
            if contains_ignore_case(&text, ABSTRACT) && text.chars().count() < 12 {
                return true;
            }
        }

        let text = current.text();
        let length = text.chars().count();
        if length > 20 && starts_with_ignore_case(&text, ABSTRACT) {
            return true;
        }
        if length > LONG_PARAGRAPH {
            self.abstract_confidence *= 0.9;
            log::debug!(
                "Treating {}-char paragraph as abstract start (confidence {:.2})",
                length,
                self.abstract_confidence
            );
            return true;
        }
        false
    }

    fn abstract_text(&mut self) -> String {
        let Some(start) = self.cursor.current_paragraph() else {
            return String::new();
        };
        let key = start.font_key();
        let mut text = start.text();
        tag_paragraph(start, LineTag::Abstract);

        while let Ok(paragraph) = self.cursor.next_paragraph() {
            let continues = paragraph.font_key() == key
                && paragraph.first_line().map(|l| l.font_key) == Some(key)
                && text.chars().count() + paragraph.text_length() < MAX_ABSTRACT_LENGTH
                && !is_keyword_section(&paragraph.text());
            if !continues {
                break;
            }
            text.push(' ');
            text.push_str(&paragraph.text());
            tag_paragraph(paragraph, LineTag::Abstract);
        }
        clean_abstract(&text)
    }

    fn keywords(&mut self) -> BTreeSet<String> {
        let mut keywords = BTreeSet::new();
        let mut paragraph = self.cursor.current_paragraph();
        while let Some(current) = paragraph {
            let text = current.text();
            if !is_keyword_section(&text) {
                break;
            }
            keywords.extend(parse_keywords(&text));
            paragraph = self.cursor.next_paragraph().ok();
        }
        keywords
    }
}

fn take_author(authors: &mut Vec<String>, line: &Line) {
    line.tag_once(LineTag::Author);
    if let Some(name) = single_author(&line.text) {
        authors.push(name);
    }
}

fn tag_paragraph(paragraph: &Paragraph, tag: LineTag) {
    for line in &paragraph.lines {
        line.tag_once(tag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> LayoutMetrics {
        LayoutMetrics::with_margins(72.0, 72.0, 40.0, 40.0)
    }

    #[test]
    fn test_alignment() {
        let page = Page::letter(1);
        let centered = Line::new("Title", 18.0, 200.0, 412.0, 100.0);
        let right = Line::new("Preprint", 9.0, 480.0, 540.0, 60.0);
        let left = Line::new("Body", 10.0, 72.0, 300.0, 300.0);
        assert_eq!(alignment(&centered, &page, &layout()), Alignment::Center);
        assert_eq!(alignment(&right, &page, &layout()), Alignment::Right);
        assert_eq!(alignment(&left, &page, &layout()), Alignment::Left);
    }

    #[test]
    fn test_content_area() {
        let page = Page::letter(1);
        assert!(inside_content_area(&Line::new("a", 10.0, 72.0, 500.0, 100.0), &page, &layout()));
        // Running header above the top margin.
        assert!(!inside_content_area(&Line::new("a", 10.0, 72.0, 500.0, 30.0), &page, &layout()));
        // Page number below the bottom margin.
        assert!(!inside_content_area(&Line::new("1", 10.0, 300.0, 300.0, 770.0), &page, &layout()));
    }

    #[test]
    fn test_authors_without_abstract_boundary() {
        let mut page = Page::letter(1);
        page.add_paragraph(Paragraph::with_lines(vec![Line::new(
            "Deep Parsing", 18.0, 250.0, 362.0, 100.0,
        )]));
        page.add_paragraph(Paragraph::with_lines(vec![Line::new(
            "Alice Liddell", 12.0, 270.0, 342.0, 140.0,
        )]));
        let mut document = Document::new();
        document.add_page(page);
        document.set_layout(layout());

        let mut run = Extraction::new(&document);
        let first = run.first_untagged_line().unwrap();
        let mut title = String::new();
        let stop = run.title(first, &mut title).unwrap();
        let (authors, boundary) = run.authors(stop);
        assert_eq!(authors, vec!["Alice Liddell"]);
        assert!(!boundary);
    }

    #[test]
    fn test_empty_document() {
        let paper = PaperExtractor::new().extract(&Document::new());
        assert!(paper.is_empty());
    }
}
