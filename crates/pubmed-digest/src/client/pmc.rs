//! PubMed Central article page scraping.

use std::sync::LazyLock;

use reqwest::header::USER_AGENT;
use reqwest_middleware::ClientWithMiddleware;
use scraper::{ElementRef, Html, Selector};

use super::{ArticleScraper, check_status};
use crate::config::Config;
use crate::error::ClientResult;
use crate::models::{Pmcid, ScrapedContent, placeholder};

static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("h1.content-title"));
static JOURNAL: LazyLock<Selector> = LazyLock::new(|| selector("div.journal-title"));
static CONTRIB_GROUP: LazyLock<Selector> = LazyLock::new(|| selector("div.contrib-group"));
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| selector("a"));
static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| selector("p"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static CSS selector is valid")
}

/// Fetches rendered PMC article pages.
#[derive(Clone)]
pub struct PmcClient {
    client: ClientWithMiddleware,
    pmc_url: String,
    pubmed_url: String,
    user_agent: String,
}

impl PmcClient {
    #[must_use]
    pub fn new(config: &Config, client: ClientWithMiddleware) -> Self {
        Self {
            client,
            pmc_url: config.pmc_url.trim_end_matches('/').to_string(),
            pubmed_url: config.pubmed_url.trim_end_matches('/').to_string(),
            user_agent: config.browser_user_agent.clone(),
        }
    }

    /// `{host}/pmc/articles/{pmcid}/`
    #[must_use]
    pub fn article_url(&self, pmcid: &Pmcid) -> String {
        format!("{}/pmc/articles/{}/", self.pmc_url, pmcid)
    }

    /// Download the article page HTML.
    pub async fn fetch_page(&self, pmcid: &Pmcid) -> ClientResult<String> {
        let response = self
            .client
            .get(self.article_url(pmcid))
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let response = check_status(response).await?;
        Ok(response.text().await?)
    }
}

impl std::fmt::Debug for PmcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PmcClient").field("pmc_url", &self.pmc_url).finish()
    }
}

#[async_trait::async_trait]
impl ArticleScraper for PmcClient {
    async fn scrape(&self, pmcid: &Pmcid) -> ClientResult<ScrapedContent> {
        let html = self.fetch_page(pmcid).await?;
        let content = parse_article_page(&html, pmcid, &self.pubmed_url);
        tracing::debug!(%pmcid, chars = content.full_text.len(), "Scraped article page");
        Ok(content)
    }
}

/// Extract header fields and body text from a PMC article page.
///
/// Never fails: missing markup becomes the matching placeholder and a page
/// without paragraphs yields an empty body.
#[must_use]
pub fn parse_article_page(html: &str, pmcid: &Pmcid, pubmed_url: &str) -> ScrapedContent {
    let document = Html::parse_document(html);

    let title = first_text(&document, &TITLE).unwrap_or_else(|| placeholder::TITLE.to_string());
    let journal = first_text(&document, &JOURNAL).unwrap_or_else(|| placeholder::JOURNAL.to_string());

    let authors = document
        .select(&CONTRIB_GROUP)
        .next()
        .map(|group| group.select(&ANCHOR).filter_map(element_text).collect::<Vec<_>>())
        .filter(|names| !names.is_empty())
        .map_or_else(|| placeholder::AUTHORS.to_string(), |names| names.join(", "));

    let full_text = document
        .select(&PARAGRAPH)
        .map(|p| p.text().collect::<String>().trim().to_string())
        .collect::<Vec<_>>()
        .join("\n\n");

    ScrapedContent {
        title,
        journal,
        authors,
        full_text,
        pubmed_link: format!("{}/{}/", pubmed_url.trim_end_matches('/'), pmcid.numeric()),
    }
}

fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document.select(selector).next().and_then(element_text)
}

/// Trimmed text of an element, `None` when blank.
fn element_text(element: ElementRef<'_>) -> Option<String> {
    let text = element.text().collect::<String>();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
