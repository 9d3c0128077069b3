//! Document model types for segmented content.
//!
//! A [`Document`] owns pages, pages own paragraphs, paragraphs own lines.
//! The model is built once by the document builder and is read-only
//! afterwards, apart from line tags set by the paper extractor.

mod cursor;
mod document;
mod font;
mod line;
mod page;
mod paragraph;

pub use cursor::DocumentCursor;
pub use document::{Document, LayoutMetrics};
pub use font::{FontKey, MajorityVote};
pub use line::{Line, LineTag};
pub use page::Page;
pub use paragraph::Paragraph;
