//! Errors raised while talking to the catalog service.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("cannot build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("GET {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("GET {url} returned {status}")]
    Status { url: String, status: StatusCode },

    #[error("cannot decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// The upstream answered 404 for this resource.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}
