//! List-item marker classes.

use std::sync::OnceLock;

use regex::Regex;

/// Style of a list-item marker at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListMarker {
    /// `.`
    Bullet,
    /// `1.`
    Decimal,
    /// `[1]`
    Bracketed,
    /// `1)`
    Parenthesized,
    /// `A.`
    UpperAlpha,
    /// `a.`
    LowerAlpha,
    /// `A)`
    UpperAlphaParen,
    /// `a)`
    LowerAlphaParen,
    /// `IV.`
    UpperRoman,
    /// `iv.`
    LowerRoman,
}

impl ListMarker {
    /// All classes in matching order.
    pub const ALL: [ListMarker; 10] = [
        ListMarker::Bullet,
        ListMarker::Decimal,
        ListMarker::Bracketed,
        ListMarker::Parenthesized,
        ListMarker::UpperAlpha,
        ListMarker::LowerAlpha,
        ListMarker::UpperAlphaParen,
        ListMarker::LowerAlphaParen,
        ListMarker::UpperRoman,
        ListMarker::LowerRoman,
    ];

    fn pattern(self) -> &'static str {
        match self {
            ListMarker::Bullet => r"^\.$",
            ListMarker::Decimal => r"^\d+\.$",
            ListMarker::Bracketed => r"^\[\d+\]$",
            ListMarker::Parenthesized => r"^\d+\)$",
            ListMarker::UpperAlpha => r"^[A-Z]\.$",
            ListMarker::LowerAlpha => r"^[a-z]\.$",
            ListMarker::UpperAlphaParen => r"^[A-Z]\)$",
            ListMarker::LowerAlphaParen => r"^[a-z]\)$",
            ListMarker::UpperRoman => r"^[IVXL]+\.$",
            ListMarker::LowerRoman => r"^[ivxl]+\.$",
        }
    }

    /// Classify the leading token of a line. First match wins.
    pub fn classify(token: &str) -> Option<ListMarker> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        matchers()
            .iter()
            .find(|(_, regex)| regex.is_match(token))
            .map(|(marker, _)| *marker)
    }
}

fn matchers() -> &'static [(ListMarker, Regex)] {
    static MATCHERS: OnceLock<Vec<(ListMarker, Regex)>> = OnceLock::new();
    MATCHERS.get_or_init(|| {
        ListMarker::ALL
            .iter()
            .filter_map(|&marker| Regex::new(marker.pattern()).ok().map(|re| (marker, re)))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_numeric() {
        assert_eq!(ListMarker::classify("1."), Some(ListMarker::Decimal));
        assert_eq!(ListMarker::classify("12."), Some(ListMarker::Decimal));
        assert_eq!(ListMarker::classify("[3]"), Some(ListMarker::Bracketed));
        assert_eq!(ListMarker::classify("4)"), Some(ListMarker::Parenthesized));
    }

    #[test]
    fn test_classify_alpha_and_roman() {
        assert_eq!(ListMarker::classify("a."), Some(ListMarker::LowerAlpha));
        assert_eq!(ListMarker::classify("B)"), Some(ListMarker::UpperAlphaParen));
        // A lone capital I is alphabetic because it is tested first.
        assert_eq!(ListMarker::classify("I."), Some(ListMarker::UpperAlpha));
        assert_eq!(ListMarker::classify("IV."), Some(ListMarker::UpperRoman));
        assert_eq!(ListMarker::classify("xii."), Some(ListMarker::LowerRoman));
        assert_eq!(ListMarker::classify("."), Some(ListMarker::Bullet));
    }

    #[test]
    fn test_classify_plain_words() {
        assert_eq!(ListMarker::classify("The"), None);
        assert_eq!(ListMarker::classify("1.5"), None);
        assert_eq!(ListMarker::classify(""), None);
    }
}
