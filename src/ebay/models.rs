//! Data models for normalized listings and the output manifest.

use crate::manifest::now_iso;
use crate::marketplace::Marketplace;
use serde::{Deserialize, Serialize};

/// One normalized listing: the durable output unit.
///
/// Every field is a plain string; fields a provider record lacked are empty
/// strings, never absent keys, so the site build can index them blindly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// Listing title
    pub title: String,
    /// Web URL of the listing page
    pub href: String,
    /// Primary image URL (possibly empty)
    pub img: String,
    /// Display price, "<value> <currency>" or bare value (possibly empty)
    pub price: String,
}

/// The listings manifest written for the site build.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingManifest {
    /// Seller the items belong to
    pub seller: String,
    /// Marketplace id the search ran against (e.g. "EBAY_US")
    pub marketplace: String,
    /// RFC 3339 UTC timestamp of this run
    pub fetched_at: String,
    /// Search query used
    pub query: String,
    /// Number of items
    pub count: usize,
    /// Items in provider response order
    pub items: Vec<Listing>,
}

impl ListingManifest {
    /// Assembles a manifest stamped with the current time.
    pub fn new(
        seller: impl Into<String>,
        marketplace: Marketplace,
        query: impl Into<String>,
        items: Vec<Listing>,
    ) -> Self {
        Self {
            seller: seller.into(),
            marketplace: marketplace.id().to_string(),
            fetched_at: now_iso(),
            query: query.into(),
            count: items.len(),
            items,
        }
    }
}
