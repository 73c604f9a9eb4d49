//! Listings pipeline command: credential → fetch → normalize → write.

use crate::config::Config;
use crate::ebay::models::ListingManifest;
use crate::ebay::{auth, BrowseClient, FindingClient, ListingSource};
use crate::error::Error;
use crate::manifest::write_json;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

/// Fetches seller listings and writes the listings manifest.
pub struct ListingsCommand {
    config: Config,
}

impl ListingsCommand {
    /// Creates a new listings command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Selects the API variant from the available credentials, fetches, and
    /// writes the manifest.
    pub async fn execute(&self) -> Result<String> {
        // Fail on missing seller before any network call.
        self.config.require_seller()?;

        let http = reqwest::Client::builder().build().context("Failed to create HTTP client")?;

        let source: Box<dyn ListingSource> =
            if let Some((client_id, client_secret)) = self.config.client_credentials() {
                debug!("Using Browse API (client-credentials token)");
                let token =
                    auth::mint_app_token(&http, client_id, client_secret, auth::TOKEN_URL).await?;
                Box::new(BrowseClient::new(&self.config, http, token)?)
            } else if let Some(api_key) = self.config.api_key.as_deref().filter(|k| !k.is_empty())
            {
                debug!("Using Finding API (static key)");
                Box::new(FindingClient::new(&self.config, http, api_key.to_string())?)
            } else {
                return Err(Error::Config(
                    "EBAY_CLIENT_ID + EBAY_CLIENT_SECRET, or EBAY_API_KEY".to_string(),
                )
                .into());
            };

        self.execute_with_source(source.as_ref()).await
    }

    /// Runs the pipeline with a provided source (for testing).
    pub async fn execute_with_source(&self, source: &dyn ListingSource) -> Result<String> {
        let seller = self.config.require_seller()?.to_string();
        info!("Fetching listings for seller: {}", seller);

        // Any fetch failure surfaces here, before the write step.
        let items = source.fetch_all().await?;

        let manifest =
            ListingManifest::new(seller, self.config.marketplace, self.config.query.clone(), items);

        let out = Path::new(&self.config.listings_out);
        write_json(out, &manifest)
            .with_context(|| format!("Failed to write {}", out.display()))?;

        Ok(format!("Wrote {} items -> {}", manifest.count, out.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ebay::Listing;
    use async_trait::async_trait;
    use std::fs;
    use tempfile::tempdir;

    struct MockSource {
        items: Vec<Listing>,
    }

    #[async_trait]
    impl ListingSource for MockSource {
        async fn fetch_all(&self) -> crate::error::Result<Vec<Listing>> {
            Ok(self.items.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl ListingSource for FailingSource {
        async fn fetch_all(&self) -> crate::error::Result<Vec<Listing>> {
            Err(Error::Fetch { status: 502, body: "bad gateway".to_string() })
        }
    }

    fn make_listing(title: &str) -> Listing {
        Listing {
            title: title.to_string(),
            href: format!("https://www.ebay.com/itm/{title}"),
            img: String::new(),
            price: "1 USD".to_string(),
        }
    }

    fn make_test_config(out: &Path) -> Config {
        Config {
            seller: Some("lawhi-46".to_string()),
            listings_out: out.to_string_lossy().into_owned(),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_writes_manifest_with_items_in_order() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("data").join("ebay.json");
        let cmd = ListingsCommand::new(make_test_config(&out));

        let source = MockSource { items: vec![make_listing("a"), make_listing("b")] };
        let msg = cmd.execute_with_source(&source).await.unwrap();
        assert!(msg.contains("Wrote 2 items"));

        let manifest: ListingManifest =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(manifest.seller, "lawhi-46");
        assert_eq!(manifest.marketplace, "EBAY_US");
        assert_eq!(manifest.query, "game");
        assert_eq!(manifest.count, 2);
        let titles: Vec<_> = manifest.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_empty_result_still_writes_manifest() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("ebay.json");
        let cmd = ListingsCommand::new(make_test_config(&out));

        cmd.execute_with_source(&MockSource { items: Vec::new() }).await.unwrap();

        let manifest: ListingManifest =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(manifest.count, 0);
        assert!(manifest.items.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_leaves_no_manifest() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("ebay.json");
        let cmd = ListingsCommand::new(make_test_config(&out));

        let err = cmd.execute_with_source(&FailingSource).await.unwrap_err();
        assert!(err.to_string().contains("502"));
        assert!(!out.exists());
    }

    #[tokio::test]
    async fn test_fetch_failure_preserves_previous_manifest() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("ebay.json");
        let cmd = ListingsCommand::new(make_test_config(&out));

        cmd.execute_with_source(&MockSource { items: vec![make_listing("keep")] })
            .await
            .unwrap();
        let before = fs::read_to_string(&out).unwrap();

        assert!(cmd.execute_with_source(&FailingSource).await.is_err());
        let after = fs::read_to_string(&out).unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_missing_seller_is_config_error_without_network() {
        let dir = tempdir().unwrap();
        let mut config = make_test_config(&dir.path().join("ebay.json"));
        config.seller = None;
        config.client_id = Some("id".to_string());
        config.client_secret = Some("secret".to_string());

        let cmd = ListingsCommand::new(config);
        let err = cmd.execute().await.unwrap_err();
        assert!(err.to_string().contains("EBAY_SELLER"));
    }

    #[tokio::test]
    async fn test_missing_credentials_is_config_error() {
        let dir = tempdir().unwrap();
        let config = make_test_config(&dir.path().join("ebay.json"));

        let cmd = ListingsCommand::new(config);
        let err = cmd.execute().await.unwrap_err();
        assert!(err.to_string().contains("EBAY_API_KEY"));
    }
}
