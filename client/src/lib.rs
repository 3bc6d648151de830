//! Fetches the roster feed and publishes result sets to a keyed JSON store.

pub mod publish;
pub mod source;
pub mod store;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

pub use publish::{
    indexed_key, publish_blob, publish_indexed, INACTIVE_PLAYERS_KEY, LOW_LEVEL_LIST_KEY,
    VIP_AWARDS_KEY,
};
pub use source::{HttpSource, PlayerSource};
pub use store::{FirebaseStore, Store};

use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Roster feed read when no source is configured.
pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/NTH-VTC/OnlineDemoC-/refs/heads/main/lab12_players.json";

/// Realtime database written when no database is configured.
pub const DEFAULT_DATABASE_URL: &str =
    "https://lab-12-final-85ae7-default-rtdb.asia-southeast1.firebasedatabase.app/";

/// Error type for client operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("http client error: {0}")]
    Client(#[source] reqwest::Error),
    #[error("fetch failed: {0}")]
    Fetch(#[source] reqwest::Error),
    #[error("fetch failed: {status}: {body}")]
    FetchStatus {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("publish to {key} failed: {source}")]
    Publish {
        key: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("publish to {key} failed: {status}: {body}")]
    PublishStatus {
        key: String,
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
    #[error("invalid URL scheme: {0} (expected http or https)")]
    InvalidScheme(String),
    #[error("invalid store key: {0:?}")]
    InvalidKey(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Builds the HTTP client shared by the source and the store.
///
/// `None` leaves requests without a deadline.
pub fn http_client(timeout: Option<Duration>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(Error::Client)
}

pub(crate) fn parse_http_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(Error::InvalidScheme(scheme.to_string())),
    }
}
