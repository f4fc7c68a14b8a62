//! NCBI E-utilities client: `esearch`, `elink` and `efetch`.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::{LinkService, MetadataService, SearchService, check_status};
use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};
use crate::models::{ArticleMetadata, Pmcid, Pmid};

/// Link set connecting a PubMed record to its PMC full text.
const PUBMED_PMC_LINK: &str = "pubmed_pmc";

/// E-utilities client.
#[derive(Clone)]
pub struct EntrezClient {
    client: ClientWithMiddleware,
    eutils_url: String,
    api_key: Option<String>,
}

impl EntrezClient {
    #[must_use]
    pub fn new(config: &Config, client: ClientWithMiddleware) -> Self {
        Self {
            client,
            eutils_url: config.eutils_url.trim_end_matches('/').to_string(),
            api_key: config.ncbi_api_key.clone(),
        }
    }

    /// Parameters sent with every request.
    fn base_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("tool", api::TOOL_NAME.to_string())];
        if let Some(key) = &self.api_key {
            params.push(("api_key", key.clone()));
        }
        params
    }

    async fn get_text(&self, endpoint: &str, params: &[(&'static str, String)]) -> ClientResult<String> {
        let url = format!("{}/{}", self.eutils_url, endpoint);
        let response = self.client.get(&url).query(params).send().await?;
        let response = check_status(response).await?;
        Ok(response.text().await?)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&'static str, String)],
    ) -> ClientResult<T> {
        let body = self.get_text(endpoint, params).await?;
        serde_json::from_str(&body).map_err(ClientError::from)
    }
}

impl std::fmt::Debug for EntrezClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntrezClient")
            .field("eutils_url", &self.eutils_url)
            .field("has_api_key", &self.api_key.is_some())
            .finish()
    }
}

#[derive(Deserialize)]
struct ESearchResponse {
    esearchresult: ESearchResult,
}

#[derive(Deserialize)]
struct ESearchResult {
    #[serde(default)]
    idlist: Vec<String>,
    #[serde(rename = "ERROR", default)]
    error: Option<String>,
}

#[async_trait::async_trait]
impl SearchService for EntrezClient {
    async fn search(&self, query: &str, email: &str, max_results: usize) -> ClientResult<Vec<Pmid>> {
        let mut params = self.base_params();
        params.extend([
            ("db", "pubmed".to_string()),
            ("term", query.to_string()),
            ("retmax", max_results.to_string()),
            ("retmode", "json".to_string()),
            ("email", email.to_string()),
        ]);

        let response: ESearchResponse = self.get_json("esearch.fcgi", &params).await?;
        if let Some(error) = response.esearchresult.error {
            return Err(ClientError::bad_request(error));
        }

        let mut ids: Vec<Pmid> = response.esearchresult.idlist.into_iter().map(Pmid::new).collect();
        ids.truncate(max_results);
        tracing::debug!(count = ids.len(), "esearch returned PMIDs");
        Ok(ids)
    }
}

#[derive(Deserialize)]
struct ELinkResponse {
    #[serde(default)]
    linksets: Vec<LinkSet>,
}

#[derive(Deserialize)]
struct LinkSet {
    #[serde(default)]
    linksetdbs: Vec<LinkSetDb>,
}

#[derive(Deserialize)]
struct LinkSetDb {
    #[serde(default)]
    linkname: String,
    #[serde(default)]
    links: Vec<LinkId>,
}

/// elink reports ids as strings, but some modes use numbers or objects.
#[derive(Deserialize)]
#[serde(untagged)]
enum LinkId {
    Text(String),
    Number(u64),
    Scored { id: String },
}

impl LinkId {
    fn into_string(self) -> String {
        match self {
            Self::Text(id) | Self::Scored { id } => id,
            Self::Number(id) => id.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl LinkService for EntrezClient {
    async fn translate(&self, pmid: &Pmid) -> ClientResult<Option<Pmcid>> {
        let mut params = self.base_params();
        params.extend([
            ("dbfrom", "pubmed".to_string()),
            ("db", "pmc".to_string()),
            ("id", pmid.to_string()),
            ("linkname", PUBMED_PMC_LINK.to_string()),
            ("retmode", "json".to_string()),
        ]);

        let response: ELinkResponse = self.get_json("elink.fcgi", &params).await?;

        // Other link sets (pubmed_pmc_refs, ...) name citing articles, not this one.
        let pmcid = response
            .linksets
            .into_iter()
            .flat_map(|set| set.linksetdbs)
            .find(|db| db.linkname == PUBMED_PMC_LINK)
            .and_then(|db| db.links.into_iter().next())
            .map(|id| Pmcid::new(id.into_string()));

        tracing::debug!(%pmid, pmcid = ?pmcid, "elink resolved");
        Ok(pmcid)
    }
}

#[async_trait::async_trait]
impl MetadataService for EntrezClient {
    async fn fetch_metadata(&self, pmid: &Pmid) -> ClientResult<ArticleMetadata> {
        let mut params = self.base_params();
        params.extend([
            ("db", "pubmed".to_string()),
            ("id", pmid.to_string()),
            ("retmode", "xml".to_string()),
        ]);

        let xml = self.get_text("efetch.fcgi", &params).await?;
        parse_pubmed_article(&xml, pmid)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Journal,
    AbstractSection,
    LastName,
    Initials,
    ForeName,
    CollectiveName,
    Doi,
}

struct Capture {
    field: Field,
    depth: usize,
    text: String,
}

#[derive(Default)]
struct AuthorName {
    last: Option<String>,
    initials: Option<String>,
    fore: Option<String>,
    collective: Option<String>,
}

impl AuthorName {
    /// `LastName Initials`, the form PubMed itself displays.
    fn into_display(self) -> Option<String> {
        if let Some(collective) = self.collective {
            return Some(collective);
        }
        let last = self.last?;
        match self.initials.or(self.fore) {
            Some(given) => Some(format!("{last} {given}")),
            None => Some(last),
        }
    }
}

fn attribute(element: &BytesStart<'_>, name: &str) -> Option<String> {
    element
        .try_get_attribute(name)
        .ok()
        .flatten()
        .and_then(|a| a.unescape_value().ok())
        .map(|v| v.into_owned())
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse the first `PubmedArticle` of an efetch XML response.
pub fn parse_pubmed_article(xml: &str, pmid: &Pmid) -> ClientResult<ArticleMetadata> {
    let mut reader = Reader::from_str(xml);

    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut article: Option<ArticleMetadata> = None;
    let mut capture: Option<Capture> = None;
    let mut author = AuthorName::default();
    let mut abstract_label: Option<String> = None;
    let mut abstract_sections: Vec<String> = Vec::new();

    loop {
        match reader.read_event().map_err(ClientError::xml)? {
            Event::Start(e) => {
                let name = e.name().as_ref().to_vec();

                if name == b"PubmedArticle" && article.is_none() {
                    article = Some(ArticleMetadata::new(pmid.clone()));
                } else if article.is_some() && capture.is_none() {
                    let parent = stack.last().map(Vec::as_slice);
                    let grandparent = stack.len().checked_sub(2).map(|i| stack[i].as_slice());

                    let field = match (name.as_slice(), parent) {
                        (b"ArticleTitle", _) => Some(Field::Title),
                        (b"Title", Some(b"Journal")) => Some(Field::Journal),
                        (b"AbstractText", Some(b"Abstract")) => {
                            abstract_label = attribute(&e, "Label");
                            Some(Field::AbstractSection)
                        }
                        (b"LastName", Some(b"Author")) => Some(Field::LastName),
                        (b"Initials", Some(b"Author")) => Some(Field::Initials),
                        (b"ForeName", Some(b"Author")) => Some(Field::ForeName),
                        (b"CollectiveName", Some(b"Author")) => Some(Field::CollectiveName),
                        (b"ELocationID", _)
                            if attribute(&e, "EIdType").as_deref() == Some("doi") =>
                        {
                            Some(Field::Doi)
                        }
                        (b"ArticleId", Some(b"ArticleIdList"))
                            if grandparent == Some(b"PubmedData".as_slice())
                                && attribute(&e, "IdType").as_deref() == Some("doi") =>
                        {
                            Some(Field::Doi)
                        }
                        _ => None,
                    };

                    if let Some(field) = field {
                        capture = Some(Capture { field, depth: stack.len(), text: String::new() });
                    }
                }

                stack.push(name);
            }
            Event::Text(e) => {
                if let Some(c) = capture.as_mut() {
                    c.text.push_str(&e.unescape().map_err(ClientError::xml)?);
                }
            }
            Event::CData(e) => {
                if let Some(c) = capture.as_mut() {
                    c.text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::End(_) => {
                let name = stack.pop().unwrap_or_default();

                if capture.as_ref().is_some_and(|c| c.depth == stack.len()) {
                    if let (Some(c), Some(a)) = (capture.take(), article.as_mut()) {
                        let text = collapse_whitespace(&c.text);
                        let value = (!text.is_empty()).then_some(text);
                        match c.field {
                            Field::Title => a.title = value,
                            Field::Journal => a.journal = value,
                            Field::AbstractSection => {
                                if let Some(text) = value {
                                    abstract_sections.push(match abstract_label.take() {
                                        Some(label) => format!("{label}: {text}"),
                                        None => text,
                                    });
                                }
                            }
                            Field::LastName => author.last = value,
                            Field::Initials => author.initials = value,
                            Field::ForeName => author.fore = value,
                            Field::CollectiveName => author.collective = value,
                            Field::Doi => {
                                if a.doi.is_none() {
                                    a.doi = value;
                                }
                            }
                        }
                    }
                }

                match name.as_slice() {
                    b"Author" => {
                        if let (Some(a), Some(display)) =
                            (article.as_mut(), std::mem::take(&mut author).into_display())
                        {
                            a.authors.push(display);
                        }
                    }
                    b"PubmedArticle" if article.is_some() => break,
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let mut article = article.ok_or_else(|| ClientError::not_found(format!("PubMed record {pmid}")))?;
    if !abstract_sections.is_empty() {
        article.r#abstract = Some(abstract_sections.join("\n\n"));
    }
    Ok(article)
}
