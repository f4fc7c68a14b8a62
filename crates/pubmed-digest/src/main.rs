//! PubMed Digest - Entry Point
//!
//! Runs one search and writes the rendered articles to stdout. Logs go to stderr.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use pubmed_digest::config::api;
use pubmed_digest::{
    Config, JsonLinesReporter, MarkdownReporter, Pipeline, Reporter, RunOutcome, SearchCriteria,
};

#[derive(Parser, Debug)]
#[command(name = "pubmed-digest")]
#[command(about = "Search PubMed, scrape PMC full text and summarize each article with Gemini")]
#[command(version)]
struct Cli {
    /// Your email address (required by NCBI E-utilities)
    #[arg(long, env = "NCBI_EMAIL")]
    email: Option<String>,

    /// Author to search for, e.g. "Smith J" (repeatable)
    #[arg(long = "author", value_name = "NAME")]
    authors: Vec<String>,

    /// Topic searched in titles and abstracts (repeatable)
    #[arg(long = "topic", value_name = "TOPIC")]
    topics: Vec<String>,

    /// File with one author per line
    #[arg(long)]
    authors_file: Option<PathBuf>,

    /// File with one topic per line
    #[arg(long)]
    topics_file: Option<PathBuf>,

    /// First creation date, YYYY-MM-DD (default: today)
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Last creation date, YYYY-MM-DD (default: today)
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Output format
    #[arg(long, default_value = "markdown")]
    format: OutputFormat,

    /// Gemini API key (summaries are skipped without one)
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    gemini_api_key: Option<String>,

    /// Gemini model
    #[arg(long, env = "GEMINI_MODEL", default_value = api::GEMINI_MODEL)]
    gemini_model: String,

    /// NCBI API key (optional, enables higher rate limits)
    #[arg(long, env = "NCBI_API_KEY", hide_env_values = true)]
    ncbi_api_key: Option<String>,

    /// Maximum number of articles to process
    #[arg(long, default_value_t = api::MAX_RESULTS)]
    max_results: usize,

    /// Pause after each article, in seconds
    #[arg(long, default_value_t = api::PACING_DELAY.as_secs_f64())]
    delay_secs: f64,

    /// Request timeout, in seconds
    #[arg(long, default_value_t = api::REQUEST_TIMEOUT.as_secs())]
    timeout_secs: u64,

    /// Connection timeout, in seconds
    #[arg(long, default_value_t = api::CONNECT_TIMEOUT.as_secs())]
    connect_timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    /// Markdown sections with a collapsible full text
    #[default]
    Markdown,
    /// One JSON object per line
    Json,
}

impl Cli {
    fn config(&self) -> anyhow::Result<Config> {
        let mut config = Config::new(self.gemini_api_key.clone().filter(|k| !k.trim().is_empty()));
        config.gemini_model.clone_from(&self.gemini_model);
        config.ncbi_api_key = self.ncbi_api_key.clone().filter(|k| !k.trim().is_empty());
        config.max_results = self.max_results;
        config.pacing_delay = Duration::try_from_secs_f64(self.delay_secs)
            .with_context(|| format!("invalid --delay-secs value: {}", self.delay_secs))?;
        config.request_timeout = Duration::from_secs(self.timeout_secs);
        config.connect_timeout = Duration::from_secs(self.connect_timeout_secs);
        config.validate()?;
        Ok(config)
    }

    fn criteria(&self) -> anyhow::Result<SearchCriteria> {
        let authors = entry_text(&self.authors, self.authors_file.as_deref())?;
        let topics = entry_text(&self.topics, self.topics_file.as_deref())?;

        let today = Local::now().date_naive();
        let start = self.start.unwrap_or(today);
        let end = self.end.unwrap_or(today);
        if start > end {
            tracing::warn!(%start, %end, "Start date is after end date, the search will match nothing");
        }

        Ok(SearchCriteria::from_form(
            self.email.as_deref().unwrap_or_default(),
            &authors,
            &topics,
            start,
            end,
        ))
    }
}

/// Repeated flag values followed by the file's lines, one entry per line.
fn entry_text(values: &[String], file: Option<&Path>) -> anyhow::Result<String> {
    let mut text = values.join("\n");
    if let Some(path) = file {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        text.push('\n');
        text.push_str(&contents);
    }
    Ok(text)
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), format = ?cli.format, "Starting PubMed digest");

    let config = cli.config()?;
    tracing::debug!(?config, "Resolved configuration");

    let criteria = cli.criteria()?;
    let pipeline = Pipeline::from_config(&config)?;

    let stdout = std::io::stdout();
    let mut reporter: Box<dyn Reporter> = match cli.format {
        OutputFormat::Markdown => Box::new(MarkdownReporter::new(stdout, &config.pubmed_url)),
        OutputFormat::Json => Box::new(JsonLinesReporter::new(stdout, &config.pubmed_url)),
    };

    let outcome = pipeline.run(&criteria, reporter.as_mut()).await.map_err(|e| {
        tracing::error!(error = %e, "Run aborted");
        anyhow::anyhow!(e.to_user_message())
    })?;

    tracing::info!(?outcome, "Finished");
    if outcome == RunOutcome::MissingEmail {
        std::process::exit(2);
    }

    Ok(())
}
