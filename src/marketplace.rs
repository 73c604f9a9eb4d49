//! eBay marketplace identifiers and currency configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported eBay marketplaces with their API identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Marketplace {
    #[default]
    Us,
    Gb,
    De,
    Fr,
    It,
    Es,
    Ca,
    Au,
}

impl Marketplace {
    /// Returns the `X-EBAY-C-MARKETPLACE-ID` header value (Browse API).
    pub fn id(&self) -> &'static str {
        match self {
            Marketplace::Us => "EBAY_US",
            Marketplace::Gb => "EBAY_GB",
            Marketplace::De => "EBAY_DE",
            Marketplace::Fr => "EBAY_FR",
            Marketplace::It => "EBAY_IT",
            Marketplace::Es => "EBAY_ES",
            Marketplace::Ca => "EBAY_CA",
            Marketplace::Au => "EBAY_AU",
        }
    }

    /// Returns the `GLOBAL-ID` request parameter (Finding API).
    pub fn global_id(&self) -> &'static str {
        match self {
            Marketplace::Us => "EBAY-US",
            Marketplace::Gb => "EBAY-GB",
            Marketplace::De => "EBAY-DE",
            Marketplace::Fr => "EBAY-FR",
            Marketplace::It => "EBAY-IT",
            Marketplace::Es => "EBAY-ES",
            Marketplace::Ca => "EBAY-ENCA",
            Marketplace::Au => "EBAY-AU",
        }
    }

    /// Returns the site currency code.
    pub fn currency(&self) -> &'static str {
        match self {
            Marketplace::Us => "USD",
            Marketplace::Gb => "GBP",
            Marketplace::De | Marketplace::Fr | Marketplace::It | Marketplace::Es => "EUR",
            Marketplace::Ca => "CAD",
            Marketplace::Au => "AUD",
        }
    }

    /// Returns all supported marketplaces.
    pub fn all() -> &'static [Marketplace] {
        &[
            Marketplace::Us,
            Marketplace::Gb,
            Marketplace::De,
            Marketplace::Fr,
            Marketplace::It,
            Marketplace::Es,
            Marketplace::Ca,
            Marketplace::Au,
        ]
    }
}

impl FromStr for Marketplace {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept both the short code ("us") and the header form ("EBAY_US").
        let s = s.trim();
        let short = s
            .strip_prefix("EBAY_")
            .or_else(|| s.strip_prefix("EBAY-"))
            .unwrap_or(s);
        match short.to_lowercase().as_str() {
            "us" => Ok(Marketplace::Us),
            "gb" | "uk" => Ok(Marketplace::Gb),
            "de" => Ok(Marketplace::De),
            "fr" => Ok(Marketplace::Fr),
            "it" => Ok(Marketplace::It),
            "es" => Ok(Marketplace::Es),
            "ca" | "enca" => Ok(Marketplace::Ca),
            "au" => Ok(Marketplace::Au),
            _ => Err(format!("Unknown marketplace: {}. Use one of: us, gb, de, fr, it, es, ca, au", s)),
        }
    }
}

impl fmt::Display for Marketplace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Marketplace::Us => "us",
            Marketplace::Gb => "gb",
            Marketplace::De => "de",
            Marketplace::Fr => "fr",
            Marketplace::It => "it",
            Marketplace::Es => "es",
            Marketplace::Ca => "ca",
            Marketplace::Au => "au",
        };
        write!(f, "{}", code)
    }
}
