//! Paper metadata extraction.
//!
//! Applies font-size and position heuristics to a built document to recover
//! title, authors, abstract and keywords. Results are best effort.

mod extractor;
mod record;
pub mod text;

pub use extractor::PaperExtractor;
pub use record::Paper;
