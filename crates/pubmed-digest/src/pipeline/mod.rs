//! Search-to-summary pipeline.
//!
//! One run per submission: validate the email, build the query, search, then
//! for each PMID translate → fetch metadata → scrape → render → summarize →
//! render full text → pace. Articles are processed strictly in order and any
//! upstream failure only skips the article it happened on.

mod pacing;
mod stages;

pub use pacing::{FixedDelay, NoDelay, Pacer};
pub use stages::{
    SUMMARY_PROMPT, fetch_metadata, scrape_article, search_ids, summarize, summary_prompt,
    translate_id,
};

use std::sync::Arc;

use crate::client::{
    ArticleScraper, EntrezClient, GeminiClient, LinkService, MetadataService, PmcClient,
    SearchService, TextGenerator, build_http_client,
};
use crate::config::Config;
use crate::error::PipelineResult;
use crate::formatters::{NoticeLevel, Reporter};
use crate::models::{Pmid, SearchCriteria};

/// Shown once per run when no text generator is configured.
pub const SUMMARIES_DISABLED: &str = "Summaries are disabled: no Gemini API key configured";

/// Upstream collaborators used by the pipeline.
#[derive(Clone)]
pub struct Services {
    pub search: Arc<dyn SearchService>,
    pub links: Arc<dyn LinkService>,
    pub metadata: Arc<dyn MetadataService>,
    pub scraper: Arc<dyn ArticleScraper>,
    /// Absent when no generation credentials are configured.
    pub generator: Option<Arc<dyn TextGenerator>>,
}

impl Services {
    /// Build the real NCBI, PMC and Gemini clients over one HTTP client.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let http = build_http_client(config)?;
        let entrez = Arc::new(EntrezClient::new(config, http.clone()));
        let generator = GeminiClient::from_config(config, http.clone())
            .map(|g| Arc::new(g) as Arc<dyn TextGenerator>);

        if generator.is_none() {
            tracing::warn!("No Gemini API key configured, summaries are disabled");
        }

        Ok(Self {
            search: entrez.clone(),
            links: entrez.clone(),
            metadata: entrez,
            scraper: Arc::new(PmcClient::new(config, http)),
            generator,
        })
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// No requester email; nothing was requested.
    MissingEmail,
    /// The search matched nothing (or failed).
    NoResults,
    /// Every PMID was processed.
    Completed {
        /// PMIDs returned by the search.
        found: usize,
        /// Articles rendered.
        rendered: usize,
    },
}

/// Sequential search-to-summary driver.
pub struct Pipeline {
    services: Services,
    pacer: Arc<dyn Pacer>,
    max_results: usize,
}

impl Pipeline {
    #[must_use]
    pub fn new(services: Services, pacer: Arc<dyn Pacer>, max_results: usize) -> Self {
        Self { services, pacer, max_results }
    }

    /// Pipeline over the real services, pacing with the configured delay.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(
            Services::from_config(config)?,
            Arc::new(FixedDelay(config.pacing_delay)),
            config.max_results,
        ))
    }

    /// Run one submission, rendering each article to `reporter` as it completes.
    pub async fn run(
        &self,
        criteria: &SearchCriteria,
        reporter: &mut dyn Reporter,
    ) -> PipelineResult<RunOutcome> {
        let email = match criteria.requester_email() {
            Ok(email) => email,
            Err(e) => {
                tracing::warn!(error = %e.to_user_message(), "Run not started");
                reporter.notice(NoticeLevel::Error, "Please provide your email address")?;
                return Ok(RunOutcome::MissingEmail);
            }
        };

        let query = criteria.query();
        tracing::info!(%query, "Searching PubMed");

        let pmids =
            search_ids(self.services.search.as_ref(), &query, email, self.max_results, reporter)
                .await?;

        if pmids.is_empty() {
            reporter.notice(NoticeLevel::Warning, "No articles found matching your criteria")?;
            return Ok(RunOutcome::NoResults);
        }

        reporter.notice(NoticeLevel::Success, &format!("Found {} articles", pmids.len()))?;
        if self.services.generator.is_none() {
            reporter.notice(NoticeLevel::Info, SUMMARIES_DISABLED)?;
        }

        let mut rendered = 0;
        for pmid in &pmids {
            if self.process(pmid, reporter).await? {
                rendered += 1;
            }
            self.pacer.pace().await;
        }

        tracing::info!(found = pmids.len(), rendered, "Run complete");
        Ok(RunOutcome::Completed { found: pmids.len(), rendered })
    }

    /// Process one PMID. Returns whether an article was rendered.
    async fn process(&self, pmid: &Pmid, reporter: &mut dyn Reporter) -> PipelineResult<bool> {
        tracing::info!(%pmid, "Processing article");

        let Some(pmcid) = translate_id(self.services.links.as_ref(), pmid, reporter).await? else {
            tracing::info!(%pmid, "No PMC full text, skipping");
            return Ok(false);
        };

        let Some(metadata) = fetch_metadata(self.services.metadata.as_ref(), pmid, reporter).await?
        else {
            return Ok(false);
        };

        let Some(content) = scrape_article(self.services.scraper.as_ref(), &pmcid, reporter).await?
        else {
            return Ok(false);
        };

        reporter.article(&pmcid, &metadata)?;

        if let Some(generator) = &self.services.generator {
            tracing::info!(%pmid, "Generating summary");
            let summary = summarize(generator.as_ref(), &content.full_text, reporter).await?;
            reporter.summary(&summary)?;
        }

        reporter.full_text(&content)?;
        Ok(true)
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("has_generator", &self.services.generator.is_some())
            .field("max_results", &self.max_results)
            .finish()
    }
}
