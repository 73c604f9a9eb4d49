//! storefront-gen - build-time data generation for a static storefront site.
//!
//! Two stateless pipelines, each invoked once per build: fetch a seller's
//! public eBay listings into a JSON manifest, and scan an images tree into
//! per-folder carousel manifests.

pub mod carousel;
pub mod commands;
pub mod config;
pub mod ebay;
pub mod error;
pub mod manifest;
pub mod marketplace;

pub use config::Config;
pub use ebay::models::{Listing, ListingManifest};
pub use error::Error;
pub use marketplace::Marketplace;
