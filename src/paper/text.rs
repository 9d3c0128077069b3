//! String helpers for metadata extraction.

/// Paragraph prefixes that introduce a keyword list.
pub const KEYWORD_PREFIXES: [&str; 3] = ["keywords", "index terms", "general terms"];

/// Substrings that rule out a line as an author name.
const NOT_A_NAME: [&str; 11] = [
    "Computer",
    "Department",
    "Science",
    "University",
    "School",
    "Academy",
    "College",
    "Abstract",
    "Email",
    " of ",
    ",",
];

/// Collapse runs of whitespace into single spaces and trim.
pub fn normalize_space(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip an ASCII prefix, ignoring case.
pub fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> &'a str {
    match text.get(..prefix.len()) {
        Some(head) if head.eq_ignore_ascii_case(prefix) => &text[prefix.len()..],
        _ => text,
    }
}

/// Check for an ASCII prefix, ignoring case.
pub fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Check for a substring, ignoring case.
pub fn contains_ignore_case(text: &str, needle: &str) -> bool {
    text.to_lowercase().contains(&needle.to_lowercase())
}

/// Keep only ASCII letters, periods, commas and spaces, then trim.
pub fn name_characters(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphabetic() || matches!(c, '.' | ',' | ' '))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Clean up a candidate author name.
///
/// Names under five characters are discarded. A trailing lone character
/// after the last space (`"Jane Doe A"`) is dropped.
pub fn boil_author(author: &str) -> String {
    let chars: Vec<char> = author.chars().collect();
    if chars.len() < 5 {
        return String::new();
    }
    let last_space = chars.iter().rposition(|&c| c == ' ');
    if last_space == Some(chars.len() - 2) {
        return chars[..chars.len() - 2].iter().collect();
    }
    author.to_string()
}

/// Split an author line such as `"Jane Doe, John Roe and Max Moe"`.
pub fn split_authors(line: &str) -> Vec<String> {
    let filtered = name_characters(line);
    let mut authors = Vec::new();
    for part in filtered.split(',') {
        let part = normalize_space(part);
        let part = strip_prefix_ignore_case(&part, "and ");
        for name in part.split(" and ") {
            let boiled = boil_author(name);
            if !boiled.is_empty() {
                authors.push(boiled);
            }
        }
    }
    authors
}

/// Accept a single-name line (short, no affiliation words).
pub fn single_author(line: &str) -> Option<String> {
    if line.chars().count() >= 25 {
        return None;
    }
    let filtered = name_characters(line);
    if filtered.is_empty() || NOT_A_NAME.iter().any(|noise| contains_ignore_case(&filtered, noise)) {
        return None;
    }
    Some(boil_author(&filtered)).filter(|name| !name.is_empty())
}

/// Check if text opens a keyword list.
pub fn is_keyword_section(text: &str) -> bool {
    let text = text.trim().to_lowercase();
    text.chars().count() < 150 && KEYWORD_PREFIXES.iter().any(|p| text.starts_with(p))
}

/// Parse a keyword paragraph into individual keywords.
pub fn parse_keywords(text: &str) -> Vec<String> {
    let mut text = text.trim();
    for prefix in KEYWORD_PREFIXES {
        text = strip_prefix_ignore_case(text, prefix);
    }
    text.split(',')
        .filter_map(|part| {
            let cleaned: String = normalize_space(part)
                .chars()
                .map(|c| if c.is_alphanumeric() || c == ' ' { c } else { ' ' })
                .collect();
            let keyword = normalize_space(strip_prefix_ignore_case(cleaned.trim(), "and "));
            (!keyword.is_empty()).then_some(keyword)
        })
        .collect()
}

/// Strip a leading "abstract" and any leading non-letters.
pub fn clean_abstract(text: &str) -> String {
    strip_prefix_ignore_case(text, "abstract")
        .trim_start_matches(|c: char| !c.is_ascii_alphabetic())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boil_author() {
        assert_eq!(boil_author("Li"), "");
        assert_eq!(boil_author("Jane Doe A"), "Jane Doe");
        assert_eq!(boil_author("Jane Doe"), "Jane Doe");
    }

    #[test]
    fn test_split_authors() {
        assert_eq!(
            split_authors("Jane Doe1, John Roe2 and Max Moe*"),
            vec!["Jane Doe", "John Roe", "Max Moe"]
        );
        assert_eq!(split_authors("and Alice Liddell"), vec!["Alice Liddell"]);
        assert!(split_authors("Bo, Al").is_empty());
    }

    #[test]
    fn test_single_author() {
        assert_eq!(single_author("Alice Liddell"), Some("Alice Liddell".to_string()));
        assert_eq!(single_author("University of Oxford"), None);
        assert_eq!(single_author("Department of Physics"), None);
        assert_eq!(single_author("A very long line that is not a name"), None);
    }

    #[test]
    fn test_parse_keywords() {
        let keywords =
            parse_keywords("Keywords: Machine Learning, Natural Language  Processing, and Parsing");
        assert_eq!(
            keywords,
            vec!["Machine Learning", "Natural Language Processing", "Parsing"]
        );
        assert_eq!(parse_keywords("Index Terms-graphs, trees"), vec!["graphs", "trees"]);
    }

    #[test]
    fn test_is_keyword_section() {
        assert!(is_keyword_section("  KEYWORDS: a, b"));
        assert!(is_keyword_section("General Terms Algorithms"));
        assert!(!is_keyword_section("Introduction"));
    }

    #[test]
    fn test_clean_abstract() {
        assert_eq!(clean_abstract("Abstract—We study parsing."), "We study parsing.");
        assert_eq!(clean_abstract("ABSTRACT. 1 Intro"), "Intro");
    }

    #[test]
    fn test_strip_prefix_non_ascii() {
        assert_eq!(strip_prefix_ignore_case("é", "ab"), "é");
        assert!(!starts_with_ignore_case("", "abstract"));
    }
}
