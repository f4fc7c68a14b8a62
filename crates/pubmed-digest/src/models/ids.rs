//! PubMed and PubMed Central identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix carried by every PMC identifier.
const PMC_PREFIX: &str = "PMC";

/// PubMed record identifier (PMID).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pmid(String);

impl Pmid {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pmid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// PubMed Central identifier (`PMC` followed by the numeric id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pmcid(String);

impl Pmcid {
    /// Wrap an identifier, adding the `PMC` prefix if it is missing.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        if id.starts_with(PMC_PREFIX) { Self(id) } else { Self(format!("{PMC_PREFIX}{id}")) }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The identifier without its `PMC` prefix.
    #[must_use]
    pub fn numeric(&self) -> &str {
        self.0.strip_prefix(PMC_PREFIX).unwrap_or(&self.0)
    }
}

impl fmt::Display for Pmcid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pmcid_prefix_added_once() {
        assert_eq!(Pmcid::new("12345").as_str(), "PMC12345");
        assert_eq!(Pmcid::new("PMC12345").as_str(), "PMC12345");
    }

    #[test]
    fn test_pmcid_numeric() {
        assert_eq!(Pmcid::new("PMC777").numeric(), "777");
    }

    #[test]
    fn test_ids_serialize_as_strings() {
        let json = serde_json::to_string(&Pmid::new("38000001")).unwrap();
        assert_eq!(json, "\"38000001\"");
    }
}
