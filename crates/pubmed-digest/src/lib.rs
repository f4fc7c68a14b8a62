//! PubMed Digest
//!
//! Searches PubMed by author and topic within a creation-date range, scrapes
//! each matching article's full text from PubMed Central, and summarizes it
//! with Google Gemini.
//!
//! # Pipeline
//!
//! - **Query**: authors and topics become OR-groups, AND-joined with a date clause
//! - **Search**: E-utilities `esearch`, capped at a fixed page size
//! - **Translate**: `elink` from PubMed to PMC; articles without full text are skipped
//! - **Metadata**: `efetch` XML for title, authors, journal, DOI and abstract
//! - **Scrape**: the rendered PMC page for body paragraphs
//! - **Summarize**: one Gemini request per article
//!
//! Upstream failures never abort a run: they are reported and the affected
//! article is skipped or given a placeholder.
//!
//! # Example
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use pubmed_digest::{Config, MarkdownReporter, Pipeline, SearchCriteria};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let pipeline = Pipeline::from_config(&config)?;
//!
//!     let criteria = SearchCriteria::new(
//!         vec!["Smith J".to_string()],
//!         vec![],
//!         NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
//!         NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
//!         "you@example.org",
//!     );
//!
//!     let mut reporter = MarkdownReporter::new(std::io::stdout(), &config.pubmed_url);
//!     pipeline.run(&criteria, &mut reporter).await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod formatters;
pub mod models;
pub mod pipeline;
pub mod query;

pub use config::Config;
pub use error::{ClientError, PipelineError};
pub use formatters::{JsonLinesReporter, MarkdownReporter, NoticeLevel, Reporter};
pub use models::{ArticleMetadata, Pmcid, Pmid, ScrapedContent, SearchCriteria};
pub use pipeline::{Pipeline, RunOutcome, Services};
pub use query::build_query;
