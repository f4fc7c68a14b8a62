//! Soft-failure wrappers around each upstream call.
//!
//! Upstream errors are reported to the user and replaced with a safe default
//! (empty list, `None`, or the summary placeholder). The only error these
//! functions return is a failure to write the report itself.

use crate::client::{ArticleScraper, LinkService, MetadataService, SearchService, TextGenerator};
use crate::error::PipelineResult;
use crate::formatters::{NoticeLevel, Reporter};
use crate::models::{ArticleMetadata, Pmcid, Pmid, ScrapedContent, placeholder};

/// Instruction prepended to the article text.
pub const SUMMARY_PROMPT: &str = "Give a brief overview of this scientific article full text: ";

/// The full generation prompt for an article body.
#[must_use]
pub fn summary_prompt(text: &str) -> String {
    format!("{SUMMARY_PROMPT}{text}")
}

/// Search for PMIDs, never returning more than `max_results`.
pub async fn search_ids(
    service: &dyn SearchService,
    query: &str,
    email: &str,
    max_results: usize,
    reporter: &mut dyn Reporter,
) -> PipelineResult<Vec<Pmid>> {
    match service.search(query, email, max_results).await {
        Ok(mut ids) => {
            ids.truncate(max_results);
            Ok(ids)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Search failed");
            reporter.notice(NoticeLevel::Error, &format!("Error fetching PMIDs: {e}"))?;
            Ok(Vec::new())
        }
    }
}

/// Resolve the PMC counterpart of a PMID.
pub async fn translate_id(
    service: &dyn LinkService,
    pmid: &Pmid,
    reporter: &mut dyn Reporter,
) -> PipelineResult<Option<Pmcid>> {
    match service.translate(pmid).await {
        Ok(pmcid) => Ok(pmcid),
        Err(e) => {
            tracing::warn!(%pmid, error = %e, "PMID translation failed");
            reporter.notice(NoticeLevel::Error, &format!("Error converting PMID {pmid} to PMCID: {e}"))?;
            Ok(None)
        }
    }
}

/// Fetch bibliographic metadata; failures skip the article.
pub async fn fetch_metadata(
    service: &dyn MetadataService,
    pmid: &Pmid,
    reporter: &mut dyn Reporter,
) -> PipelineResult<Option<ArticleMetadata>> {
    match service.fetch_metadata(pmid).await {
        Ok(metadata) => Ok(Some(metadata)),
        Err(e) => {
            tracing::warn!(%pmid, error = %e, "Metadata fetch failed");
            reporter.notice(NoticeLevel::Error, &format!("Error fetching metadata for PMID {pmid}: {e}"))?;
            Ok(None)
        }
    }
}

/// Scrape the PMC page.
pub async fn scrape_article(
    scraper: &dyn ArticleScraper,
    pmcid: &Pmcid,
    reporter: &mut dyn Reporter,
) -> PipelineResult<Option<ScrapedContent>> {
    match scraper.scrape(pmcid).await {
        Ok(content) => Ok(Some(content)),
        Err(e) => {
            tracing::warn!(%pmcid, error = %e, "Scrape failed");
            reporter.notice(NoticeLevel::Error, &format!("Error scraping article {pmcid}: {e}"))?;
            Ok(None)
        }
    }
}

/// Summarize article text; always yields a string.
pub async fn summarize(
    generator: &dyn TextGenerator,
    text: &str,
    reporter: &mut dyn Reporter,
) -> PipelineResult<String> {
    match generator.generate(&summary_prompt(text)).await {
        Ok(Some(summary)) => Ok(summary),
        Ok(None) => {
            tracing::warn!("Generation returned no text");
            Ok(placeholder::SUMMARY.to_string())
        }
        Err(e) => {
            tracing::warn!(error = %e, "Summary generation failed");
            reporter.notice(NoticeLevel::Error, &format!("Error generating summary: {e}"))?;
            Ok(placeholder::SUMMARY.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_prompt() {
        assert_eq!(
            summary_prompt("Body."),
            "Give a brief overview of this scientific article full text: Body."
        );
        assert_eq!(summary_prompt(""), SUMMARY_PROMPT);
    }
}
