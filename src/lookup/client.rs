//! LRCLIB HTTP client
//!
//! Handles communication with the LRCLIB search endpoint.
//! See: https://lrclib.net/docs
//!
//! LRCLIB asks clients to identify themselves. Browsers can't override
//! `User-Agent`, so the service also reads `X-User-Agent`; we send both.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;

use super::LookupError;
use super::dto::SearchResponse;
use super::query::LookupQuery;

/// Identifying header value: client name, version and homepage
const CLIENT_ID: &str = concat!(
    "LRCLib-Get ",
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("CARGO_PKG_HOMEPAGE"),
    ")"
);

const CLIENT_ID_HEADER: &str = "X-User-Agent";

/// LRCLIB API client
#[derive(Debug, Clone)]
pub struct LrclibClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl LrclibClient {
    /// Create a client for the API rooted at `base_url` (e.g. `https://lrclib.net/api`)
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, LookupError> {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .user_agent(CLIENT_ID)
            .timeout(timeout)
            .build()
            .map_err(|e| LookupError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Full request URL for a query
    fn search_url(&self, query: &LookupQuery) -> String {
        format!("{}/search?{}", self.base_url, query.to_query_string())
    }

    /// Run a search and return the body with every candidate record.
    ///
    /// 404 and an empty result array both map to [`LookupError::NotFound`];
    /// any other non-success status maps to [`LookupError::Server`].
    pub async fn search(&self, query: &LookupQuery) -> Result<SearchResponse, LookupError> {
        let url = self.search_url(query);
        tracing::debug!("GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .header(CLIENT_ID_HEADER, CLIENT_ID)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound);
        }

        if !status.is_success() {
            return Err(LookupError::Server {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;
        let parsed = SearchResponse::parse(body).map_err(|e| LookupError::Parse(e.to_string()))?;

        if parsed.records.is_empty() {
            return Err(LookupError::NotFound);
        }
        Ok(parsed)
    }
}
