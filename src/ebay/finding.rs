//! Finding API search client (API-key variant, page-number pagination).

use crate::config::Config;
use crate::ebay::normalize::{self, pluck};
use crate::ebay::{Listing, ListingSource};
use crate::error::{Error, Result};
use crate::marketplace::Marketplace;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

/// Production API root.
pub const API_BASE: &str = "https://svcs.ebay.com";

const SERVICE_PATH: &str = "/services/search/FindingService/v1";
const OPERATION: &str = "findItemsAdvanced";

/// Finding API client scoped to one seller's listings.
///
/// The Finding generation authenticates with a static application key passed
/// as a query parameter; there is no token to mint. Results are paginated by
/// page number, and every reported page is fetched sequentially.
pub struct FindingClient {
    client: Client,
    api_key: String,
    seller: String,
    marketplace: Marketplace,
    query: String,
    entries_per_page: u32,
    base_url: Option<String>,
}

impl FindingClient {
    /// Creates a client from resolved configuration and the static API key.
    pub fn new(config: &Config, client: Client, api_key: String) -> Result<Self> {
        Self::with_base_url(config, client, api_key, None)
    }

    /// Creates a client with an optional custom base URL (for testing).
    pub fn with_base_url(
        config: &Config,
        client: Client,
        api_key: String,
        base_url: Option<String>,
    ) -> Result<Self> {
        Ok(Self {
            client,
            api_key,
            seller: config.require_seller()?.to_string(),
            marketplace: config.marketplace,
            query: config.query.clone(),
            entries_per_page: config.limit,
            base_url,
        })
    }

    fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(API_BASE)
    }

    /// Fetches one page and returns the parsed response body.
    async fn fetch_page(&self, page: u32) -> Result<Value> {
        let url = format!("{}{}", self.base_url(), SERVICE_PATH);
        debug!("GET {} (page {})", url, page);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("OPERATION-NAME", OPERATION),
                ("SERVICE-VERSION", "1.0.0"),
                ("SECURITY-APPNAME", &self.api_key),
                ("RESPONSE-DATA-FORMAT", "JSON"),
                ("GLOBAL-ID", self.marketplace.global_id()),
                ("keywords", &self.query),
                ("itemFilter(0).name", "Seller"),
                ("itemFilter(0).value", &self.seller),
                ("paginationInput.entriesPerPage", &self.entries_per_page.to_string()),
                ("paginationInput.pageNumber", &page.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(Error::Fetch { status: status.as_u16(), body: text });
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// Reads the reported total page count, defaulting to 1 when the
    /// pagination metadata is absent or malformed.
    fn total_pages(page: &Value) -> u32 {
        let path = ["findItemsAdvancedResponse", "0", "paginationOutput", "0", "totalPages", "0"];
        match pluck(page, &path) {
            Some(Value::String(s)) => s.parse().unwrap_or(1),
            Some(Value::Number(n)) => n.as_u64().unwrap_or(1) as u32,
            _ => 1,
        }
    }

    /// Extracts and normalizes the items of one page, empty when absent at
    /// any level of nesting.
    fn page_items(page: &Value) -> Vec<Listing> {
        let path = ["findItemsAdvancedResponse", "0", "searchResult", "0", "item"];
        pluck(page, &path)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(normalize::from_finding_item)
            .collect()
    }
}

#[async_trait]
impl ListingSource for FindingClient {
    async fn fetch_all(&self) -> Result<Vec<Listing>> {
        info!("Searching Finding API for seller: {}", self.seller);

        let first = self.fetch_page(1).await?;
        let total_pages = Self::total_pages(&first);
        debug!("Provider reports {} page(s)", total_pages);

        let mut items = Self::page_items(&first);

        // Strictly sequential; any failed page aborts the whole run before
        // the manifest write.
        for page in 2..=total_pages {
            let body = self.fetch_page(page).await?;
            items.extend(Self::page_items(&body));
        }

        debug!("Finding search accumulated {} items", items.len());
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_test_config() -> Config {
        Config {
            seller: Some("lawhi-46".to_string()),
            query: "game".to_string(),
            limit: 100,
            ..Config::default()
        }
    }

    fn make_client(mock_uri: &str) -> FindingClient {
        FindingClient::with_base_url(
            &make_test_config(),
            Client::new(),
            "app-key".to_string(),
            Some(mock_uri.to_string()),
        )
        .unwrap()
    }

    fn page_body(total_pages: u32, titles: &[&str]) -> Value {
        let items: Vec<_> = titles
            .iter()
            .map(|t| {
                json!({
                    "title": [t],
                    "viewItemURL": [format!("https://www.ebay.com/itm/{t}")],
                    "galleryURL": [format!("https://thumbs.ebaystatic.com/{t}.jpg")],
                    "sellingStatus": [{
                        "currentPrice": [{"@currencyId": "USD", "__value__": "5.00"}]
                    }]
                })
            })
            .collect();

        json!({
            "findItemsAdvancedResponse": [{
                "ack": ["Success"],
                "searchResult": [{"@count": titles.len().to_string(), "item": items}],
                "paginationOutput": [{
                    "pageNumber": ["1"],
                    "totalPages": [total_pages.to_string()]
                }]
            }]
        })
    }

    #[test]
    fn test_requires_seller() {
        let mut config = make_test_config();
        config.seller = None;

        let result = FindingClient::new(&config, Client::new(), "key".to_string());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_total_pages_defaults_to_one() {
        assert_eq!(FindingClient::total_pages(&json!({})), 1);
        assert_eq!(
            FindingClient::total_pages(&json!({"findItemsAdvancedResponse": [{}]})),
            1
        );
        assert_eq!(
            FindingClient::total_pages(&json!({
                "findItemsAdvancedResponse": [{
                    "paginationOutput": [{"totalPages": ["garbage"]}]
                }]
            })),
            1
        );
        assert_eq!(FindingClient::total_pages(&page_body(7, &[])), 7);
    }

    #[test]
    fn test_page_items_tolerates_missing_nesting() {
        assert!(FindingClient::page_items(&json!({})).is_empty());
        assert!(FindingClient::page_items(&json!({
            "findItemsAdvancedResponse": [{"searchResult": [{}]}]
        }))
        .is_empty());

        let items = FindingClient::page_items(&page_body(1, &["a", "b"]));
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "a");
        assert_eq!(items[0].price, "5.00 USD");
    }

    #[tokio::test]
    async fn test_single_page_fetch() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(SERVICE_PATH))
            .and(query_param("OPERATION-NAME", "findItemsAdvanced"))
            .and(query_param("SECURITY-APPNAME", "app-key"))
            .and(query_param("itemFilter(0).name", "Seller"))
            .and(query_param("itemFilter(0).value", "lawhi-46"))
            .and(query_param("GLOBAL-ID", "EBAY-US"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(1, &["only"])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = make_client(&mock_server.uri());
        let items = client.fetch_all().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "only");
    }

    #[tokio::test]
    async fn test_pagination_fetches_every_reported_page_in_order() {
        let mock_server = MockServer::start().await;

        for (page, titles) in
            [(1, &["p1-a", "p1-b"][..]), (2, &["p2-a"][..]), (3, &["p3-a", "p3-b"][..])]
        {
            Mock::given(method("GET"))
                .and(path(SERVICE_PATH))
                .and(query_param("paginationInput.pageNumber", page.to_string()))
                .respond_with(ResponseTemplate::new(200).set_body_json(page_body(3, titles)))
                .expect(1)
                .mount(&mock_server)
                .await;
        }

        let client = make_client(&mock_server.uri());
        let items = client.fetch_all().await.unwrap();

        // Exactly 3 requests (the .expect(1) mocks verify on drop), items
        // concatenated page order first, then within-page order.
        let titles: Vec<_> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["p1-a", "p1-b", "p2-a", "p3-a", "p3-b"]);
    }

    #[tokio::test]
    async fn test_mid_pagination_failure_aborts() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(SERVICE_PATH))
            .and(query_param("paginationInput.pageNumber", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(2, &["p1"])))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path(SERVICE_PATH))
            .and(query_param("paginationInput.pageNumber", "2"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&mock_server)
            .await;

        let client = make_client(&mock_server.uri());
        let err = client.fetch_all().await.unwrap_err();

        match err {
            Error::Fetch { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected Fetch error, got: {other}"),
        }
    }

    #[tokio::test]
    async fn test_http_error_on_first_page() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(SERVICE_PATH))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&mock_server)
            .await;

        let client = make_client(&mock_server.uri());
        let err = client.fetch_all().await.unwrap_err();
        assert!(matches!(err, Error::Fetch { status: 401, .. }));
    }
}
