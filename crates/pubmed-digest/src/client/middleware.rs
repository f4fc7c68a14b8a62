//! Middleware for the shared HTTP client.

use std::time::Instant;

use http::Extensions;
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next};

/// Traces every outbound request with its status and latency.
///
/// Only host and path are logged: query strings carry the requester email
/// and API keys.
#[derive(Debug, Default, Clone, Copy)]
pub struct RequestLogger;

#[async_trait::async_trait]
impl Middleware for RequestLogger {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let method = req.method().clone();
        let host = req.url().host_str().unwrap_or_default().to_string();
        let path = req.url().path().to_string();
        let started = Instant::now();

        tracing::debug!(%method, %host, %path, "Sending request");
        let result = next.run(req, extensions).await;
        let elapsed_ms = started.elapsed().as_millis();

        match &result {
            Ok(response) => {
                tracing::debug!(%method, %host, %path, status = response.status().as_u16(), elapsed_ms, "Received response");
            }
            Err(e) => {
                tracing::warn!(%method, %host, %path, elapsed_ms, error = %e, "Request failed");
            }
        }

        result
    }
}
