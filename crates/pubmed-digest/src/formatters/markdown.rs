//! Markdown output formatting.

use std::io::Write;

use super::{NoticeLevel, Reporter};
use crate::models::{ArticleMetadata, Pmcid, ScrapedContent};

/// Format the header section of an article.
#[must_use]
pub fn format_article_markdown(pmcid: &Pmcid, metadata: &ArticleMetadata, pubmed_url: &str) -> String {
    let mut output = format!("## 📄 {}\n\n", metadata.title_or_default());

    output.push_str(&format!("**Journal:** {}\n\n", metadata.journal_or_default()));
    output.push_str(&format!("**Authors:** {}\n\n", metadata.author_names()));
    output.push_str(&format!("**Abstract:** {}\n\n", metadata.abstract_or_default()));

    let mut links = vec![format!(
        "[PubMed]({}/{}/)",
        pubmed_url.trim_end_matches('/'),
        metadata.pmid
    )];
    if let Some(doi) = &metadata.doi {
        links.push(format!("[DOI](https://doi.org/{doi})"));
    }
    links.push(format!("PMC: {pmcid}"));
    output.push_str(&format!("**Links:** {}\n\n", links.join(" | ")));

    output
}

/// Format scraped text as a collapsed disclosure block.
///
/// The body sits in a tilde fence longer than any tilde run it contains, so
/// scraped text cannot close the fence or the surrounding block.
#[must_use]
pub fn format_full_text_markdown(content: &ScrapedContent) -> String {
    let fence = code_fence(&content.full_text);
    format!(
        "<details>\n<summary>Show Full Text: {}</summary>\n\n{fence}text\n{}\n{fence}\n\n</details>\n\n---\n\n",
        escape_html(&content.title),
        content.full_text
    )
}

fn code_fence(text: &str) -> String {
    let longest = text.split(|c: char| c != '~').map(str::len).max().unwrap_or(0);
    "~".repeat(longest.max(2) + 1)
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Writes Markdown sections as articles complete.
pub struct MarkdownReporter<W> {
    out: W,
    pubmed_url: String,
}

impl<W: Write + Send> MarkdownReporter<W> {
    pub fn new(out: W, pubmed_url: impl Into<String>) -> Self {
        Self { out, pubmed_url: pubmed_url.into() }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Reporter for MarkdownReporter<W> {
    fn notice(&mut self, level: NoticeLevel, message: &str) -> std::io::Result<()> {
        write!(self.out, "> **{}:** {}\n\n", level.label(), message)?;
        self.out.flush()
    }

    fn article(&mut self, pmcid: &Pmcid, metadata: &ArticleMetadata) -> std::io::Result<()> {
        self.out.write_all(format_article_markdown(pmcid, metadata, &self.pubmed_url).as_bytes())?;
        self.out.flush()
    }

    fn summary(&mut self, summary: &str) -> std::io::Result<()> {
        write!(self.out, "**Summary:**\n\n{}\n\n", summary.trim())?;
        self.out.flush()
    }

    fn full_text(&mut self, content: &ScrapedContent) -> std::io::Result<()> {
        self.out.write_all(format_full_text_markdown(content).as_bytes())?;
        self.out.flush()
    }
}
