//! Error taxonomy for the data-generation pipelines.
//!
//! All three named variants are fatal: commands propagate them up to `main`,
//! which prints the chain and exits non-zero. There is no retry layer.

use thiserror::Error;

/// Errors produced by the listings and carousel pipelines.
#[derive(Debug, Error)]
pub enum Error {
    /// A required setting is missing. Raised before any network call.
    #[error("missing required setting: {0}")]
    Config(String),

    /// The token endpoint rejected the credential exchange, or returned a
    /// body without an access token.
    #[error("token request failed ({status}): {body}")]
    Auth { status: u16, body: String },

    /// The search endpoint returned a non-success status. The raw body is
    /// kept for diagnostics.
    #[error("search request failed ({status}): {body}")]
    Fetch { status: u16, body: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
