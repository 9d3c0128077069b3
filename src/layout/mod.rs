//! Layout segmentation engine.
//!
//! Turns per-page glyph records into a stream of page, article, paragraph
//! and line events using geometric and typographic heuristics only.

pub mod article;
mod glyph;
mod listener;
pub mod markers;
mod options;
mod segmenter;

pub use article::OverlapIndex;
pub use glyph::{BeadRect, Glyph, GlyphDocument, GlyphPage, LineItem};
pub use listener::LayoutListener;
pub use markers::ListMarker;
pub use options::{LayoutOptions, PageSelection, DEFAULT_DROP_THRESHOLD, DEFAULT_INDENT_THRESHOLD};
pub use segmenter::Segmenter;
