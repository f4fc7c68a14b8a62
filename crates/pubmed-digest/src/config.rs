//! Configuration for the PubMed digest pipeline.

use std::time::Duration;

use url::Url;

use crate::error::{PipelineError, PipelineResult};

/// Service endpoints and defaults.
pub mod api {
    use std::time::Duration;

    /// Base URL for NCBI E-utilities (esearch, elink, efetch).
    pub const EUTILS_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

    /// Host serving rendered PubMed Central article pages.
    pub const PMC_URL: &str = "https://www.ncbi.nlm.nih.gov";

    /// Public PubMed article pages.
    pub const PUBMED_URL: &str = "https://pubmed.ncbi.nlm.nih.gov";

    /// Gemini REST API.
    pub const GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

    /// Default Gemini model.
    pub const GEMINI_MODEL: &str = "gemini-2.0-flash";

    /// Identifies this program to E-utilities (`tool` parameter).
    pub const TOOL_NAME: &str = "pubmed-digest";

    /// PMC rejects bot-like user agents, so page requests present as a browser.
    pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
        AppleWebKit/537.36 (KHTML, like Gecko) Chrome/129.0.0.0 Safari/537.36";

    /// Request timeout. Generation over a full article can be slow.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Pause after each processed article to spare the scraped site.
    pub const PACING_DELAY: Duration = Duration::from_secs(2);

    /// Page size of a single search.
    pub const MAX_RESULTS: usize = 10;
}

/// Pipeline configuration.
#[derive(Clone)]
pub struct Config {
    /// E-utilities base URL.
    pub eutils_url: String,

    /// Host for PMC article pages (`{pmc_url}/pmc/articles/{pmcid}/`).
    pub pmc_url: String,

    /// Host for public PubMed links.
    pub pubmed_url: String,

    /// Gemini API base URL.
    pub gemini_url: String,

    /// Gemini model name.
    pub gemini_model: String,

    /// Gemini API key. Without one, summaries are skipped.
    pub gemini_api_key: Option<String>,

    /// NCBI API key (optional, raises E-utilities rate limits).
    pub ncbi_api_key: Option<String>,

    /// User agent sent to PMC.
    pub browser_user_agent: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Delay between processed articles.
    pub pacing_delay: Duration,

    /// Maximum identifiers taken from one search.
    pub max_results: usize,
}

impl Config {
    /// Create a configuration for the public NCBI and Gemini services.
    #[must_use]
    pub fn new(gemini_api_key: Option<String>) -> Self {
        Self {
            eutils_url: api::EUTILS_URL.to_string(),
            pmc_url: api::PMC_URL.to_string(),
            pubmed_url: api::PUBMED_URL.to_string(),
            gemini_url: api::GEMINI_URL.to_string(),
            gemini_model: api::GEMINI_MODEL.to_string(),
            gemini_api_key,
            ncbi_api_key: None,
            browser_user_agent: api::BROWSER_USER_AGENT.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            pacing_delay: api::PACING_DELAY,
            max_results: api::MAX_RESULTS,
        }
    }

    /// Create a test configuration with every service behind one mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            eutils_url: format!("{}/entrez/eutils", base_url),
            pmc_url: base_url.to_string(),
            pubmed_url: format!("{}/pubmed", base_url),
            gemini_url: format!("{}/v1beta", base_url),
            gemini_model: "test-model".to_string(),
            gemini_api_key: Some("test-key".to_string()),
            ncbi_api_key: None,
            browser_user_agent: api::BROWSER_USER_AGENT.to_string(),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            pacing_delay: Duration::ZERO,
            max_results: api::MAX_RESULTS,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `GEMINI_API_KEY`, `GEMINI_MODEL` and `NCBI_API_KEY`.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::new(non_empty_var("GEMINI_API_KEY"));
        if let Some(model) = non_empty_var("GEMINI_MODEL") {
            config.gemini_model = model;
        }
        config.ncbi_api_key = non_empty_var("NCBI_API_KEY");
        config.validate()?;
        Ok(config)
    }

    /// Check that base URLs parse and the result cap is usable.
    pub fn validate(&self) -> PipelineResult<()> {
        for (field, value) in [
            ("eutils_url", &self.eutils_url),
            ("pmc_url", &self.pmc_url),
            ("pubmed_url", &self.pubmed_url),
            ("gemini_url", &self.gemini_url),
        ] {
            let url = Url::parse(value)
                .map_err(|e| PipelineError::config(field, format!("invalid URL '{value}': {e}")))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(PipelineError::config(
                    field,
                    format!("unsupported URL scheme: {}", url.scheme()),
                ));
            }
        }

        if self.max_results == 0 {
            return Err(PipelineError::config("max_results", "must be at least 1"));
        }

        Ok(())
    }

    /// Check if summaries can be generated.
    #[must_use]
    pub const fn has_gemini_key(&self) -> bool {
        self.gemini_api_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("eutils_url", &self.eutils_url)
            .field("pmc_url", &self.pmc_url)
            .field("gemini_model", &self.gemini_model)
            .field("has_gemini_key", &self.has_gemini_key())
            .field("has_ncbi_key", &self.ncbi_api_key.is_some())
            .field("request_timeout", &self.request_timeout)
            .field("pacing_delay", &self.pacing_delay)
            .field("max_results", &self.max_results)
            .finish()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
