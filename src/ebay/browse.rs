//! Browse API search client (bearer-token variant).

use crate::config::Config;
use crate::ebay::normalize;
use crate::ebay::{Listing, ListingSource};
use crate::error::{Error, Result};
use crate::marketplace::Marketplace;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

/// Production API root.
pub const API_BASE: &str = "https://api.ebay.com";

/// Browse API client scoped to one seller's public listings.
///
/// One request per run: the Browse generation is cursor/limit based and the
/// site only needs the first `limit` results.
pub struct BrowseClient {
    client: Client,
    token: String,
    seller: String,
    marketplace: Marketplace,
    query: String,
    limit: u32,
    base_url: Option<String>,
}

impl BrowseClient {
    /// Creates a client from resolved configuration and a minted token.
    pub fn new(config: &Config, client: Client, token: String) -> Result<Self> {
        Self::with_base_url(config, client, token, None)
    }

    /// Creates a client with an optional custom base URL (for testing).
    pub fn with_base_url(
        config: &Config,
        client: Client,
        token: String,
        base_url: Option<String>,
    ) -> Result<Self> {
        Ok(Self {
            client,
            token,
            seller: config.require_seller()?.to_string(),
            marketplace: config.marketplace,
            query: config.query.clone(),
            limit: config.limit,
            base_url,
        })
    }

    fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(API_BASE)
    }

    fn search_url(&self) -> String {
        // The Browse API requires q (or a category filter); the seller
        // constraint rides along as a filter expression.
        format!(
            "{}/buy/browse/v1/item_summary/search?q={}&filter={}&limit={}",
            self.base_url(),
            urlencoding::encode(&self.query),
            urlencoding::encode(&format!("sellers:{{{}}}", self.seller)),
            self.limit
        )
    }
}

#[async_trait]
impl ListingSource for BrowseClient {
    async fn fetch_all(&self) -> Result<Vec<Listing>> {
        let url = self.search_url();
        info!("Searching Browse API for seller: {}", self.seller);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .header("X-EBAY-C-MARKETPLACE-ID", self.marketplace.id())
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(Error::Fetch { status: status.as_u16(), body: text });
        }

        let json: Value = serde_json::from_str(&text)?;
        let items = json
            .get("itemSummaries")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(normalize::from_item_summary)
            .collect::<Vec<_>>();

        debug!("Browse search returned {} items", items.len());
        Ok(items)
    }
}
