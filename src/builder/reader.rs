//! Document building from segmentation events.

use unicode_normalization::UnicodeNormalization;

use super::stats::LayoutStatistics;
use crate::error::Result;
use crate::layout::{GlyphDocument, GlyphPage, LayoutListener, LayoutOptions, LineItem, Segmenter};
use crate::model::{Document, FontKey, Line, MajorityVote, Page, Paragraph};

/// Drop threshold used by [`DocumentReader::new`].
pub const READER_DROP_THRESHOLD: f32 = 2.8;

/// Builds a [`Document`] from layout events.
///
/// Lines without rendered text are dropped, paragraphs without lines and
/// pages without paragraphs are not attached. Font and margin statistics
/// are accumulated per kept line and turned into layout metrics by
/// [`DocumentBuilder::finish`].
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    document: Document,
    page: Option<Page>,
    paragraph: Option<Paragraph>,
    stats: LayoutStatistics,
    last_page_width: f32,
}

impl DocumentBuilder {
    /// Create a builder for a document with the given identifier.
    pub fn new(id: Option<String>) -> Self {
        let mut document = Document::new();
        document.id = id;
        Self {
            document,
            ..Self::default()
        }
    }

    /// Compute layout metrics and return the document.
    pub fn finish(mut self) -> Document {
        if self.page.is_some() {
            log::warn!("Finishing document with an open page");
        }
        let metrics = self.stats.metrics(self.last_page_width);
        self.document.set_layout(metrics);
        self.document
    }
}

impl LayoutListener for DocumentBuilder {
    fn start_document(&mut self) {
        self.document.pages.clear();
        self.stats.clear();
        self.page = None;
        self.paragraph = None;
    }

    fn start_page(&mut self, number: u32, width: f32, height: f32) {
        self.page = Some(Page::new(number, width, height));
        self.last_page_width = width;
    }

    fn end_page(&mut self) {
        match self.page.take() {
            Some(page) if !page.is_empty() => self.document.add_page(page),
            Some(page) => log::trace!("Dropping empty page {}", page.number),
            None => log::warn!("Page closed without an open page"),
        }
    }

    fn start_paragraph(&mut self) {
        self.paragraph = Some(Paragraph::new());
    }

    fn end_paragraph(&mut self) {
        let Some(paragraph) = self.paragraph.take() else {
            log::warn!("Paragraph closed without an open paragraph");
            return;
        };
        if paragraph.is_empty() {
            return;
        }
        match self.page.as_mut() {
            Some(page) => page.add_paragraph(paragraph),
            None => log::warn!("Paragraph closed without an open page"),
        }
    }

    fn line(&mut self, items: &[LineItem]) {
        let Some(line) = build_line(items) else {
            return;
        };
        let Some(paragraph) = self.paragraph.as_mut() else {
            log::warn!("Line outside a paragraph: {:?}", line.text);
            return;
        };
        self.stats.record_line(&line, self.last_page_width);
        paragraph.add_line(line);
    }
}

/// Turn a glyph run into a line. Returns `None` if nothing is rendered.
pub fn build_line(items: &[LineItem]) -> Option<Line> {
    let mut text = String::new();
    let mut vote = MajorityVote::new();
    let mut first = None;
    let mut last = None;

    for item in items {
        match item {
            LineItem::Separator => text.push(' '),
            LineItem::Glyph(glyph) => {
                let Some(rendered) = glyph.rendered_text() else {
                    continue;
                };
                text.push_str(rendered);
                let key = FontKey::new(glyph.font_size, glyph.cap_height, glyph.italic_angle);
                vote.push(key, glyph.font_size, glyph.char_count());
                if first.is_none() {
                    first = Some(glyph);
                }
                last = Some(glyph);
            }
        }
    }

    let text = clean_text(&text);
    let (first, last) = (first?, last?);
    if text.is_empty() {
        return None;
    }
    Some(Line::new(text, vote.size(), first.x, last.x, first.y).with_font_key(vote.key()))
}

/// Expand presentation forms (ligatures and the like), drop control
/// characters and trim.
fn clean_text(text: &str) -> String {
    let mut clean = String::with_capacity(text.len());
    for c in text.chars() {
        if is_presentation_form(c) {
            clean.extend(c.nfkc());
        } else if !c.is_control() {
            clean.push(c);
        }
    }
    clean.trim().to_string()
}

fn is_presentation_form(c: char) -> bool {
    matches!(c, '\u{FB00}'..='\u{FDFF}' | '\u{FE70}'..='\u{FEFF}')
}

/// Reads glyph documents into [`Document`]s.
///
/// One reader can be reused for any number of documents.
#[derive(Debug, Clone)]
pub struct DocumentReader {
    segmenter: Segmenter,
}

impl DocumentReader {
    /// Create a reader with default options and a drop threshold of 2.8.
    pub fn new() -> Self {
        Self {
            segmenter: Segmenter::new(
                LayoutOptions::default().with_drop_threshold(READER_DROP_THRESHOLD),
            ),
        }
    }

    /// Create a reader with explicit options.
    pub fn with_options(options: LayoutOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            segmenter: Segmenter::new(options),
        })
    }

    /// Get the layout options.
    pub fn options(&self) -> &LayoutOptions {
        self.segmenter.options()
    }

    /// Read a glyph document.
    pub fn read(&mut self, glyphs: &GlyphDocument) -> Document {
        self.read_pages(glyphs.id.clone(), &glyphs.pages)
    }

    /// Read a sequence of glyph pages.
    pub fn read_pages(&mut self, id: Option<String>, pages: &[GlyphPage]) -> Document {
        let mut builder = DocumentBuilder::new(id);
        self.segmenter.process(pages, &mut builder);
        let document = builder.finish();
        log::debug!(
            "Read {} pages ({} kept)",
            pages.len(),
            document.page_count()
        );
        document
    }
}

impl Default for DocumentReader {
    fn default() -> Self {
        Self::new()
    }
}
