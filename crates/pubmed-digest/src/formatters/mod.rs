//! Rendering of pipeline output.
//!
//! The pipeline writes to a [`Reporter`] as it goes; Markdown and JSON Lines
//! renderings are provided.

mod json;
mod markdown;

pub use json::{JsonLinesReporter, compact_article};
pub use markdown::{MarkdownReporter, format_article_markdown, format_full_text_markdown};

use std::io;

use serde::Serialize;

use crate::models::{ArticleMetadata, Pmcid, ScrapedContent};

/// Severity of a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeLevel {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Success => "Success",
            Self::Warning => "Warning",
            Self::Error => "Error",
        }
    }
}

/// Receives pipeline output as it is produced.
///
/// For each rendered article the calls arrive in order: [`article`](Self::article),
/// then [`summary`](Self::summary) if summaries are enabled, then
/// [`full_text`](Self::full_text).
pub trait Reporter: Send {
    /// A status or error message for the user.
    fn notice(&mut self, level: NoticeLevel, message: &str) -> io::Result<()>;

    /// Header fields of an article.
    fn article(&mut self, pmcid: &Pmcid, metadata: &ArticleMetadata) -> io::Result<()>;

    /// Generated summary of the current article.
    fn summary(&mut self, summary: &str) -> io::Result<()>;

    /// Scraped content of the current article; ends the article.
    fn full_text(&mut self, content: &ScrapedContent) -> io::Result<()>;
}
