//! Document builder.
//!
//! Listens to segmentation events, turns glyph runs into lines and collects
//! the statistics that become the document's layout metrics.

mod reader;
pub mod stats;

pub use reader::{build_line, DocumentBuilder, DocumentReader, READER_DROP_THRESHOLD};
pub use stats::{Bias, Histogram, LayoutStatistics};
