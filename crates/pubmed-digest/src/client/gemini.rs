//! Gemini `generateContent` client.

use reqwest_middleware::ClientWithMiddleware;
use serde::{Deserialize, Serialize};

use super::{TextGenerator, check_status};
use crate::config::Config;
use crate::error::{ClientError, ClientResult};

/// Gemini REST client.
#[derive(Clone)]
pub struct GeminiClient {
    client: ClientWithMiddleware,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a client, or `None` when no API key is configured.
    #[must_use]
    pub fn from_config(config: &Config, client: ClientWithMiddleware) -> Option<Self> {
        let api_key = config.gemini_api_key.clone()?;
        Some(Self {
            client,
            endpoint: config.gemini_url.trim_end_matches('/').to_string(),
            model: config.gemini_model.clone(),
            api_key,
        })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient").field("model", &self.model).finish()
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[async_trait::async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> ClientResult<Option<String>> {
        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);
        let body = serde_json::to_string(&GenerateRequest {
            contents: [Content { parts: [RequestPart { text: prompt }] }],
        })?;

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .body(body)
            .send()
            .await?;

        let response = check_status(response).await?;
        let text = response.text().await?;
        let parsed: GenerateResponse = serde_json::from_str(&text).map_err(ClientError::from)?;

        // Blocked prompts come back with no candidates.
        let generated: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        Ok((!generated.trim().is_empty()).then_some(generated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http() -> ClientWithMiddleware {
        reqwest_middleware::ClientBuilder::new(reqwest::Client::new()).build()
    }

    #[test]
    fn test_requires_api_key() {
        let config = Config::default();
        assert!(GeminiClient::from_config(&config, http()).is_none());

        let config = Config::new(Some("secret-key".to_string()));
        let client = GeminiClient::from_config(&config, http()).unwrap();
        assert_eq!(client.model(), "gemini-2.0-flash");
        assert!(!format!("{client:?}").contains("secret-key"));
    }

    #[test]
    fn test_request_shape() {
        let body = serde_json::to_value(GenerateRequest {
            contents: [Content { parts: [RequestPart { text: "hello" }] }],
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"contents": [{"parts": [{"text": "hello"}]}]}));
    }
}
