//! eBay-specific modules: token auth, the two search-API clients, and
//! raw-record normalization.

pub mod auth;
pub mod browse;
pub mod finding;
pub mod models;
pub mod normalize;

pub use browse::BrowseClient;
pub use finding::FindingClient;
pub use models::{Listing, ListingManifest};

use crate::error::Result;
use async_trait::async_trait;

/// Common seam over the two search-API generations - enables mocking for tests.
///
/// The Browse API (bearer token) and the Finding API (static key, page-number
/// pagination) return differently shaped records; both implementations hand
/// back the normalized form in provider response order.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetches and normalizes every listing for the configured seller.
    async fn fetch_all(&self) -> Result<Vec<Listing>>;
}
