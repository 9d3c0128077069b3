//! Error types for paperparse library.

use std::fmt;
use thiserror::Error;

/// Result type alias for paperparse operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building or traversing documents.
///
/// Malformed glyph input is never an error: geometry is sanitized and the
/// heuristics degrade. Missing paper fields are empty values, not errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A cursor tier was advanced past its last item.
    #[error("No next {0} in document")]
    CursorExhausted(CursorTier),

    /// Layout options contain a non-finite or negative value.
    #[error("Invalid layout options: {0}")]
    InvalidOptions(String),

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),
}

/// The traversal tier an exhausted cursor refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorTier {
    /// Page tier
    Page,
    /// Paragraph tier
    Paragraph,
    /// Line tier
    Line,
}

impl fmt::Display for CursorTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CursorTier::Page => "page",
            CursorTier::Paragraph => "paragraph",
            CursorTier::Line => "line",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::CursorExhausted(CursorTier::Paragraph);
        assert_eq!(err.to_string(), "No next paragraph in document");

        let err = Error::InvalidOptions("drop_threshold must be finite".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid layout options: drop_threshold must be finite"
        );
    }

    #[test]
    fn test_tier_display() {
        assert_eq!(CursorTier::Page.to_string(), "page");
        assert_eq!(CursorTier::Line.to_string(), "line");
    }
}
