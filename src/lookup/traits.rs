//! Trait definition for the lyrics search service.
//!
//! The batch pipeline only talks to [`LyricsApi`], so tests can substitute a
//! mock that answers from memory and records every query it receives.

use async_trait::async_trait;

use super::LookupError;
use super::client::LrclibClient;
use super::dto::SearchResponse;
use super::query::LookupQuery;

/// A service able to answer search queries.
#[async_trait]
pub trait LyricsApi: Send + Sync {
    /// Return the response for a query, or why there is none.
    async fn search(&self, query: &LookupQuery) -> Result<SearchResponse, LookupError>;
}

#[async_trait]
impl LyricsApi for LrclibClient {
    async fn search(&self, query: &LookupQuery) -> Result<SearchResponse, LookupError> {
        LrclibClient::search(self, query).await
    }
}
