//! Configuration management with TOML, environment variables, and CLI overrides.
//!
//! This is the only module that reads the process environment. Everything
//! downstream receives a fully resolved [`Config`] by value.

use crate::error::{Error, Result};
use crate::marketplace::Marketplace;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Seller username whose public listings are fetched
    #[serde(default)]
    pub seller: Option<String>,

    /// OAuth client id (App ID) for the client-credentials exchange
    #[serde(default)]
    pub client_id: Option<String>,

    /// OAuth client secret (Cert ID)
    #[serde(default)]
    pub client_secret: Option<String>,

    /// Static API key for the Finding API variant
    #[serde(default)]
    pub api_key: Option<String>,

    /// Marketplace the search runs against
    #[serde(default)]
    pub marketplace: Marketplace,

    /// Page-size limit for search requests
    #[serde(default = "default_limit")]
    pub limit: u32,

    /// Search query (the Browse API requires a non-empty `q`)
    #[serde(default = "default_query")]
    pub query: String,

    /// Output path for the listings manifest
    #[serde(default = "default_listings_out")]
    pub listings_out: String,

    /// Root directory scanned for carousel image folders
    #[serde(default = "default_images_root")]
    pub images_root: String,

    /// Output directory for per-folder carousel manifests
    #[serde(default = "default_carousels_out")]
    pub carousels_out: String,
}

fn default_limit() -> u32 {
    50
}

fn default_query() -> String {
    // Broad term so a seller filter still effectively returns all items.
    "game".to_string()
}

fn default_listings_out() -> String {
    "src/data/ebay.json".to_string()
}

fn default_images_root() -> String {
    "public/images".to_string()
}

fn default_carousels_out() -> String {
    "src/data/carousels".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seller: None,
            client_id: None,
            client_secret: None,
            api_key: None,
            marketplace: Marketplace::Us,
            limit: default_limit(),
            query: default_query(),
            listings_out: default_listings_out(),
            images_root: default_images_root(),
            carousels_out: default_carousels_out(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> anyhow::Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("storefront-gen.toml");
        if local_config.exists() {
            debug!("Found storefront-gen.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("storefront-gen").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    ///
    /// An unparsable value is a config-time error, not a silent default: a
    /// typo'd marketplace must not send the search to the wrong site.
    pub fn with_env(mut self) -> anyhow::Result<Self> {
        // EBAY_APP_ID is the legacy name for the client id.
        if let Ok(id) = std::env::var("EBAY_CLIENT_ID").or_else(|_| std::env::var("EBAY_APP_ID")) {
            self.client_id = Some(id);
        }

        if let Ok(secret) = std::env::var("EBAY_CLIENT_SECRET") {
            self.client_secret = Some(secret);
        }

        if let Ok(key) = std::env::var("EBAY_API_KEY") {
            self.api_key = Some(key);
        }

        if let Ok(seller) = std::env::var("EBAY_SELLER") {
            self.seller = Some(seller);
        }

        if let Ok(marketplace) = std::env::var("EBAY_MARKETPLACE_ID") {
            self.marketplace = marketplace
                .parse()
                .map_err(anyhow::Error::msg)
                .context("Invalid EBAY_MARKETPLACE_ID")?;
        }

        if let Ok(limit) = std::env::var("EBAY_LIMIT") {
            self.limit = limit
                .parse()
                .with_context(|| format!("Invalid EBAY_LIMIT: {}", limit))?;
        }

        if let Ok(query) = std::env::var("EBAY_QUERY") {
            self.query = query;
        }

        Ok(self)
    }

    /// Returns the seller, or a config error naming the missing input.
    pub fn require_seller(&self) -> Result<&str> {
        self.seller
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::Config("EBAY_SELLER".to_string()))
    }

    /// Returns the OAuth client credential pair, if both halves are present.
    pub fn client_credentials(&self) -> Option<(&str, &str)> {
        match (self.client_id.as_deref(), self.client_secret.as_deref()) {
            (Some(id), Some(secret)) if !id.is_empty() && !secret.is_empty() => {
                Some((id, secret))
            }
            _ => None,
        }
    }
}
