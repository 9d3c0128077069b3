//! Paper metadata record.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Bibliographic fields recovered from a document.
///
/// Every field may be empty; a missing field is a normal outcome.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    /// Identifier of the source document
    pub id: Option<String>,

    /// Title
    pub title: String,

    /// Author names in order of appearance
    pub authors: Vec<String>,

    /// Abstract text
    #[serde(rename = "abstract")]
    pub abstract_text: String,

    /// Keywords, deduplicated
    pub keywords: BTreeSet<String>,

    /// Reference entries, filled by downstream enrichment; the extractor leaves this empty
    #[serde(default)]
    pub references: Vec<String>,

    /// Section headings, filled by downstream enrichment; the extractor leaves this empty
    #[serde(default)]
    pub headings: Vec<String>,
}

impl Paper {
    /// Create an empty paper for a document.
    pub fn new(id: Option<String>) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Check if no field was recovered.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.authors.is_empty()
            && self.abstract_text.is_empty()
            && self.keywords.is_empty()
            && self.references.is_empty()
            && self.headings.is_empty()
    }
}
