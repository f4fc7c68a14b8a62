//! Fuzzing library for pubmed-digest.
//!
//! This crate provides fuzzing targets for the parsers that read upstream
//! responses: efetch XML, PMC article pages, and line-oriented search input.
//!
//! # Usage
//!
//! ```bash
//! cd crates/pubmed-digest-fuzz
//! cargo +nightly fuzz run fuzz_efetch_parse -- -max_total_time=60
//! ```

pub use pubmed_digest::client::{parse_article_page, parse_pubmed_article};
pub use pubmed_digest::models;
