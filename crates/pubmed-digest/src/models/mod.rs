//! Data models for search criteria, identifiers and article content.
//!
//! Serialized forms use `#[serde(rename_all = "camelCase")]` to match the
//! JSON Lines output.

mod article;
mod criteria;
mod ids;

pub use article::{ArticleMetadata, ScrapedContent, placeholder};
pub use criteria::{SearchCriteria, split_lines};
pub use ids::{Pmcid, Pmid};
