//! JSON Lines output: one object per notice and per article.

use std::io::Write;

use serde_json::{Value, json};

use super::{NoticeLevel, Reporter};
use crate::models::{ArticleMetadata, Pmcid, ScrapedContent};

/// Compact JSON representation of an article's metadata.
#[must_use]
pub fn compact_article(pmcid: &Pmcid, metadata: &ArticleMetadata, pubmed_url: &str) -> Value {
    let mut obj = json!({
        "type": "article",
        "pmid": metadata.pmid,
        "pmcid": pmcid,
        "title": metadata.title_or_default(),
        "authors": metadata.authors,
        "link": format!("{}/{}/", pubmed_url.trim_end_matches('/'), metadata.pmid),
    });

    // Add optional fields only if present
    if let Some(journal) = &metadata.journal {
        obj["journal"] = json!(journal);
    }

    if let Some(doi) = &metadata.doi {
        obj["doi"] = json!(doi);
    }

    if let Some(abstract_text) = &metadata.r#abstract {
        obj["abstract"] = json!(abstract_text);
    }

    obj
}

/// Writes newline-delimited JSON.
///
/// Article objects are held until their full text arrives so each article is
/// emitted as a single line.
pub struct JsonLinesReporter<W> {
    out: W,
    pubmed_url: String,
    pending: Option<Value>,
}

impl<W: Write + Send> JsonLinesReporter<W> {
    pub fn new(out: W, pubmed_url: impl Into<String>) -> Self {
        Self { out, pubmed_url: pubmed_url.into(), pending: None }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, value: &Value) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.out, value)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

impl<W: Write + Send> Reporter for JsonLinesReporter<W> {
    fn notice(&mut self, level: NoticeLevel, message: &str) -> std::io::Result<()> {
        self.write_line(&json!({ "type": "notice", "level": level, "message": message }))
    }

    fn article(&mut self, pmcid: &Pmcid, metadata: &ArticleMetadata) -> std::io::Result<()> {
        self.pending = Some(compact_article(pmcid, metadata, &self.pubmed_url));
        Ok(())
    }

    fn summary(&mut self, summary: &str) -> std::io::Result<()> {
        if let Some(article) = self.pending.as_mut() {
            article["summary"] = json!(summary);
        }
        Ok(())
    }

    fn full_text(&mut self, content: &ScrapedContent) -> std::io::Result<()> {
        let mut article = self.pending.take().unwrap_or_else(|| json!({ "type": "article" }));
        article["scraped"] = json!(content);
        self.write_line(&article)
    }
}
