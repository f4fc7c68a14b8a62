//! Clients for the upstream services.
//!
//! - [`EntrezClient`]: NCBI E-utilities search, link and fetch
//! - [`PmcClient`]: PubMed Central article pages
//! - [`GeminiClient`]: text generation
//!
//! Each capability the pipeline needs is a trait so tests can substitute fakes.
//! All clients share one HTTP client built by [`build_http_client`].

mod entrez;
mod gemini;
mod middleware;
mod pmc;

pub use entrez::{EntrezClient, parse_pubmed_article};
pub use gemini::GeminiClient;
pub use middleware::RequestLogger;
pub use pmc::{PmcClient, parse_article_page};

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};
use crate::models::{ArticleMetadata, Pmcid, Pmid, ScrapedContent};

/// Literature database search.
#[async_trait::async_trait]
pub trait SearchService: Send + Sync {
    /// Return at most `max_results` PMIDs matching `query`.
    async fn search(&self, query: &str, email: &str, max_results: usize) -> ClientResult<Vec<Pmid>>;
}

/// Cross-reference from PubMed to PubMed Central.
#[async_trait::async_trait]
pub trait LinkService: Send + Sync {
    /// `Ok(None)` when the article has no PMC counterpart.
    async fn translate(&self, pmid: &Pmid) -> ClientResult<Option<Pmcid>>;
}

/// Bibliographic detail lookup.
#[async_trait::async_trait]
pub trait MetadataService: Send + Sync {
    async fn fetch_metadata(&self, pmid: &Pmid) -> ClientResult<ArticleMetadata>;
}

/// Full-text page scraping.
#[async_trait::async_trait]
pub trait ArticleScraper: Send + Sync {
    async fn scrape(&self, pmcid: &Pmcid) -> ClientResult<ScrapedContent>;
}

/// Text generation.
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    /// `Ok(None)` when the service answered without any text.
    async fn generate(&self, prompt: &str) -> ClientResult<Option<String>>;
}

/// Build the HTTP client shared by every service client.
///
/// Timeouts come from the configuration; requests are traced by
/// [`RequestLogger`]. Nothing is retried.
pub fn build_http_client(config: &Config) -> anyhow::Result<ClientWithMiddleware> {
    let client = Client::builder()
        .user_agent(format!("{}/{}", api::TOOL_NAME, env!("CARGO_PKG_VERSION")))
        .timeout(config.request_timeout)
        .connect_timeout(config.connect_timeout)
        .gzip(true)
        .build()?;

    Ok(ClientBuilder::new(client).with(RequestLogger).build())
}

/// Longest response body excerpt carried into an error message.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Map non-success status codes to errors.
async fn check_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    match status.as_u16() {
        429 => {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(60);

            Err(ClientError::rate_limited(retry_after))
        }
        404 => Err(ClientError::not_found(error_body(response).await)),
        400 => Err(ClientError::bad_request(error_body(response).await)),
        500..=599 => Err(ClientError::server(status.as_u16(), error_body(response).await)),
        _ => Err(ClientError::UnexpectedStatus {
            status: status.as_u16(),
            message: error_body(response).await,
        }),
    }
}

/// Short description of an error response for user-facing messages.
async fn error_body(response: reqwest::Response) -> String {
    let status = response.status();
    let is_html = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("html"));
    let body = response.text().await.unwrap_or_default();

    body_excerpt(&body, is_html)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("no response body").to_string())
}

/// Whitespace-collapsed, length-capped body text. HTML pages yield `None`.
fn body_excerpt(body: &str, is_html: bool) -> Option<String> {
    let trimmed = body.trim_start();
    let lowered: String = trimmed.chars().take(15).collect::<String>().to_ascii_lowercase();
    if is_html || lowered.starts_with("<!doctype") || lowered.starts_with("<html") {
        return None;
    }

    let collapsed = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return None;
    }

    if collapsed.chars().count() <= MAX_ERROR_BODY_CHARS {
        return Some(collapsed);
    }

    let mut excerpt: String = collapsed.chars().take(MAX_ERROR_BODY_CHARS).collect();
    excerpt.push('…');
    Some(excerpt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_excerpt_keeps_short_text() {
        assert_eq!(
            body_excerpt("  {\"error\":\n \"bad key\"}  ", false).as_deref(),
            Some("{\"error\": \"bad key\"}")
        );
        assert_eq!(body_excerpt("   ", false), None);
    }

    #[test]
    fn test_body_excerpt_drops_html() {
        assert_eq!(body_excerpt("<p>blocked</p>", true), None);
        assert_eq!(body_excerpt("\n<!DOCTYPE html><html>blocked</html>", false), None);
        assert_eq!(body_excerpt("<HTML><body>x</body></HTML>", false), None);
    }

    #[test]
    fn test_body_excerpt_is_capped() {
        let body = "é".repeat(1000);
        let excerpt = body_excerpt(&body, false).unwrap();
        assert_eq!(excerpt.chars().count(), MAX_ERROR_BODY_CHARS + 1);
        assert!(excerpt.ends_with('…'));
    }
}
