//! Lyrics lookup against the LRCLIB search API.
//!
//! # Architecture
//!
//! - **Query** (`query.rs`) - Builds the deterministic search query from probes and options
//! - **DTO** (`dto.rs`) - Exact shape of a search result record
//! - **Client** (`client.rs`) - HTTP client for the search endpoint
//! - **Selection** (`select.rs`) - Picks one candidate using duration rules
//! - **Traits** (`traits.rs`) - Seam for substituting the service in tests
//!
//! # Usage
//!
//! ```ignore
//! let client = LrclibClient::new("https://lrclib.net/api", Duration::from_secs(30))?;
//! let query = build_query(&tags, &duration, "Song.mp3", &options);
//! if !query.is_empty() {
//!     let response = client.search(&query).await?;
//!     let choice = select_candidate(&response.records, duration.ok(), &options);
//! }
//! ```

mod client;
pub mod dto;
mod query;
mod select;
pub mod traits;

pub use client::LrclibClient;
pub use query::{LookupQuery, build_query};
pub use select::{Selection, select_candidate};
pub use traits::LyricsApi;

/// Errors a lookup can end with.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// 404, or a successful response with no records
    #[error("No lyrics found")]
    NotFound,

    /// Any other non-success status
    #[error("Server error: HTTP {status}")]
    Server { status: u16 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),
}
