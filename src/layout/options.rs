//! Segmentation options and page selection.

use std::ops::RangeInclusive;

use crate::error::{Error, Result};

/// Default indent threshold, in space widths.
pub const DEFAULT_INDENT_THRESHOLD: f32 = 2.0;

/// Default drop threshold, in line heights.
pub const DEFAULT_DROP_THRESHOLD: f32 = 2.5;

/// Options for the layout segmentation engine.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    /// Horizontal shift (in space widths) that signals an indented line
    pub indent_threshold: f32,

    /// Vertical gap (in line heights) that signals a new paragraph
    pub drop_threshold: f32,

    /// Multiplier applied to the space width when predicting the next word
    pub spacing_tolerance: f32,

    /// Multiplier applied to the average character width when predicting
    /// the next word
    pub average_char_tolerance: f32,

    /// Drop glyphs rendered twice at the same spot (fake bold)
    pub suppress_duplicate_overlapping_text: bool,

    /// Partition glyphs by article beads
    pub separate_by_beads: bool,

    /// Sort each region into reading order before scanning
    pub sort_by_position: bool,

    /// Pages to process
    pub pages: PageSelection,
}

impl LayoutOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indent threshold.
    pub fn with_indent_threshold(mut self, threshold: f32) -> Self {
        self.indent_threshold = threshold;
        self
    }

    /// Set the drop threshold.
    pub fn with_drop_threshold(mut self, threshold: f32) -> Self {
        self.drop_threshold = threshold;
        self
    }

    /// Set the space width tolerance.
    pub fn with_spacing_tolerance(mut self, tolerance: f32) -> Self {
        self.spacing_tolerance = tolerance;
        self
    }

    /// Set the average character width tolerance.
    pub fn with_average_char_tolerance(mut self, tolerance: f32) -> Self {
        self.average_char_tolerance = tolerance;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Set a page range (1-indexed, inclusive).
    pub fn with_page_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.pages = PageSelection::Range(range);
        self
    }

    /// Sort glyphs into reading order before scanning.
    pub fn sorted(mut self) -> Self {
        self.sort_by_position = true;
        self
    }

    /// Treat every page as a single region.
    pub fn without_beads(mut self) -> Self {
        self.separate_by_beads = false;
        self
    }

    /// Keep glyphs that overlap an identical glyph.
    pub fn keep_duplicates(mut self) -> Self {
        self.suppress_duplicate_overlapping_text = false;
        self
    }

    /// Check that every threshold and tolerance is finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("indent_threshold", self.indent_threshold),
            ("drop_threshold", self.drop_threshold),
            ("spacing_tolerance", self.spacing_tolerance),
            ("average_char_tolerance", self.average_char_tolerance),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(Error::InvalidOptions(format!("{} must be finite", name)));
            }
            if value < 0.0 {
                return Err(Error::InvalidOptions(format!(
                    "{} must not be negative",
                    name
                )));
            }
        }
        if let PageSelection::Range(range) = &self.pages {
            if range.start() > range.end() {
                return Err(Error::InvalidPageRange(format!(
                    "{}-{}",
                    range.start(),
                    range.end()
                )));
            }
        }
        Ok(())
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            indent_threshold: DEFAULT_INDENT_THRESHOLD,
            drop_threshold: DEFAULT_DROP_THRESHOLD,
            spacing_tolerance: 0.5,
            average_char_tolerance: 0.3,
            suppress_duplicate_overlapping_text: true,
            separate_by_beads: true,
            sort_by_position: false,
            pages: PageSelection::All,
        }
    }
}

/// Page selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PageSelection {
    /// All pages
    #[default]
    All,
    /// A range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Specific pages (1-indexed)
    Pages(Vec<u32>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.contains(&page),
        }
    }

    /// Parse a page selection string (e.g., "1-10", "1,3,5,7-10").
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(PageSelection::All);
        }

        if let Some((start, end)) = s.split_once('-') {
            if !start.contains(',') && !end.contains(',') {
                let (start, end) = (page_number(start)?, page_number(end)?);
                if start > end {
                    return Err(Error::InvalidPageRange(s.to_string()));
                }
                return Ok(PageSelection::Range(start..=end));
            }
        }

        let mut pages = Vec::new();
        for part in s.split(',') {
            match part.split_once('-') {
                Some((start, end)) => {
                    let (start, end) = (page_number(start)?, page_number(end)?);
                    if start > end {
                        return Err(Error::InvalidPageRange(part.trim().to_string()));
                    }
                    pages.extend(start..=end);
                }
                None => pages.push(page_number(part)?),
            }
        }

        pages.sort_unstable();
        pages.dedup();
        Ok(PageSelection::Pages(pages))
    }
}

fn page_number(s: &str) -> Result<u32> {
    match s.trim().parse::<u32>() {
        Ok(0) | Err(_) => Err(Error::InvalidPageRange(s.trim().to_string())),
        Ok(n) => Ok(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_options_builder() {
        let options = LayoutOptions::new()
            .with_indent_threshold(3.0)
            .with_drop_threshold(2.8)
            .sorted()
            .without_beads()
            .keep_duplicates();

        assert_eq!(options.indent_threshold, 3.0);
        assert_eq!(options.drop_threshold, 2.8);
        assert!(options.sort_by_position);
        assert!(!options.separate_by_beads);
        assert!(!options.suppress_duplicate_overlapping_text);
    }

    #[test]
    fn test_default_options() {
        let options = LayoutOptions::default();
        assert_eq!(options.indent_threshold, 2.0);
        assert_eq!(options.drop_threshold, 2.5);
        assert_eq!(options.spacing_tolerance, 0.5);
        assert_eq!(options.average_char_tolerance, 0.3);
        assert!(options.suppress_duplicate_overlapping_text);
        assert!(options.separate_by_beads);
        assert!(!options.sort_by_position);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let options = LayoutOptions::new().with_drop_threshold(f32::NAN);
        assert!(matches!(options.validate(), Err(Error::InvalidOptions(_))));

        let options = LayoutOptions::new().with_spacing_tolerance(-0.5);
        assert!(matches!(options.validate(), Err(Error::InvalidOptions(_))));
    }

    #[test]
    fn test_page_selection_includes() {
        assert!(PageSelection::All.includes(1));
        assert!(PageSelection::All.includes(100));

        let range = PageSelection::Range(5..=10);
        assert!(!range.includes(4));
        assert!(range.includes(5));
        assert!(range.includes(10));
        assert!(!range.includes(11));

        let pages = PageSelection::Pages(vec![1, 3, 5]);
        assert!(pages.includes(3));
        assert!(!pages.includes(2));
    }

    #[test]
    fn test_page_selection_parse() {
        assert_eq!(PageSelection::parse("").unwrap(), PageSelection::All);
        assert_eq!(PageSelection::parse("all").unwrap(), PageSelection::All);
        assert_eq!(
            PageSelection::parse("1-10").unwrap(),
            PageSelection::Range(1..=10)
        );
        assert_eq!(
            PageSelection::parse("1,3,5-7,3").unwrap(),
            PageSelection::Pages(vec![1, 3, 5, 6, 7])
        );
    }

    #[test]
    fn test_page_selection_parse_errors() {
        assert!(matches!(
            PageSelection::parse("x"),
            Err(Error::InvalidPageRange(_))
        ));
        assert!(matches!(
            PageSelection::parse("9-3"),
            Err(Error::InvalidPageRange(_))
        ));
        assert!(matches!(
            PageSelection::parse("0"),
            Err(Error::InvalidPageRange(_))
        ));
    }
}
