//! Article metadata from PubMed and content scraped from PMC.

use serde::{Deserialize, Serialize};

use super::Pmid;

/// Fixed substitutes used when expected data is absent.
pub mod placeholder {
    pub const TITLE: &str = "Title not found";
    pub const JOURNAL: &str = "Journal not found";
    pub const AUTHORS: &str = "Authors not found";
    pub const SUMMARY: &str = "Summary generation failed";
    pub const ABSTRACT: &str = "No abstract available";
}

/// Bibliographic record from the PubMed detail endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleMetadata {
    /// PubMed identifier.
    pub pmid: Pmid,

    /// Article title.
    #[serde(default)]
    pub title: Option<String>,

    /// Authors as `LastName Initials`, in publication order.
    #[serde(default)]
    pub authors: Vec<String>,

    /// Journal name.
    #[serde(default)]
    pub journal: Option<String>,

    /// Digital Object Identifier.
    #[serde(default)]
    pub doi: Option<String>,

    /// Abstract text; structured abstracts are flattened.
    #[serde(default)]
    pub r#abstract: Option<String>,
}

impl ArticleMetadata {
    /// Create an empty record for a PMID.
    #[must_use]
    pub fn new(pmid: Pmid) -> Self {
        Self { pmid, title: None, authors: Vec::new(), journal: None, doi: None, r#abstract: None }
    }

    #[must_use]
    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or(placeholder::TITLE)
    }

    #[must_use]
    pub fn journal_or_default(&self) -> &str {
        self.journal.as_deref().unwrap_or(placeholder::JOURNAL)
    }

    #[must_use]
    pub fn abstract_or_default(&self) -> &str {
        self.r#abstract.as_deref().unwrap_or(placeholder::ABSTRACT)
    }

    /// Comma-separated author list.
    #[must_use]
    pub fn author_names(&self) -> String {
        if self.authors.is_empty() {
            placeholder::AUTHORS.to_string()
        } else {
            self.authors.join(", ")
        }
    }
}

/// Content extracted from a rendered PMC article page.
///
/// Header fields are never empty: missing markup yields a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedContent {
    pub title: String,
    pub journal: String,
    /// Author names joined with `", "`.
    pub authors: String,
    /// Paragraph texts separated by blank lines; empty if the page had none.
    pub full_text: String,
    /// Public PubMed link derived from the PMC identifier.
    pub pubmed_link: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_defaults() {
        let metadata = ArticleMetadata::new(Pmid::new("1"));
        assert_eq!(metadata.title_or_default(), "Title not found");
        assert_eq!(metadata.journal_or_default(), "Journal not found");
        assert_eq!(metadata.author_names(), "Authors not found");
        assert_eq!(metadata.abstract_or_default(), "No abstract available");
    }

    #[test]
    fn test_author_names_joined() {
        let mut metadata = ArticleMetadata::new(Pmid::new("1"));
        metadata.authors = vec!["Smith J".to_string(), "Doe A".to_string()];
        assert_eq!(metadata.author_names(), "Smith J, Doe A");
    }

    #[test]
    fn test_metadata_serializes_camel_case() {
        let mut metadata = ArticleMetadata::new(Pmid::new("42"));
        metadata.doi = Some("10.1/x".to_string());
        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json["pmid"], "42");
        assert_eq!(json["doi"], "10.1/x");
        assert!(json.get("abstract").is_some());
    }
}
