//! User-supplied search criteria.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, PipelineResult};
use crate::query::build_query;

/// What the user asked for in one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    /// Author names, in the order given.
    #[serde(default)]
    pub authors: Vec<String>,

    /// Topic keywords, in the order given.
    #[serde(default)]
    pub topics: Vec<String>,

    /// First creation date included.
    pub start: NaiveDate,

    /// Last creation date included.
    pub end: NaiveDate,

    /// Requester email, sent to E-utilities as a courtesy contact.
    #[serde(default)]
    pub email: String,
}

impl SearchCriteria {
    #[must_use]
    pub fn new(
        authors: Vec<String>,
        topics: Vec<String>,
        start: NaiveDate,
        end: NaiveDate,
        email: impl Into<String>,
    ) -> Self {
        Self { authors, topics, start, end, email: email.into() }
    }

    /// Build criteria from free-text form fields holding one entry per line.
    #[must_use]
    pub fn from_form(
        email: &str,
        authors: &str,
        topics: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        Self::new(split_lines(authors), split_lines(topics), start, end, email.trim())
    }

    /// The requester email, or a validation error if none was given.
    pub fn requester_email(&self) -> PipelineResult<&str> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(PipelineError::validation("email", "an email address is required"));
        }
        Ok(email)
    }

    /// The search expression for these criteria.
    #[must_use]
    pub fn query(&self) -> String {
        build_query(&self.authors, &self.topics, self.start, self.end)
    }
}

/// Split newline-separated text into trimmed, non-blank entries.
#[must_use]
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::trim).filter(|l| !l.is_empty()).map(String::from).collect()
}
